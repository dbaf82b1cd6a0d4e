//! Core data types: review records, classification buckets and thresholds.

use serde::{Deserialize, Serialize};

/// Placeholder used when a review container has no text element.
pub const MISSING_TEXT: &str = "N/A";

/// A single review pulled from a source page.
///
/// `rating` is whatever number the page showed. It is expected to lie in
/// 0–10 but is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_text: String,
    pub rating: Option<f64>,
}

impl ReviewRecord {
    pub fn new(review_text: impl Into<String>, rating: Option<f64>) -> Self {
        Self {
            review_text: review_text.into(),
            rating,
        }
    }
}

/// Rating cutoffs and how many entries of each bucket get rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Ratings at or above this are positive.
    pub positive_min: f64,
    /// Ratings at or below this are negative.
    pub negative_max: f64,
    /// Maximum entries shown per bucket.
    pub limit: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive_min: 7.0,
            negative_max: 4.0,
            limit: 5,
        }
    }
}

/// Records split into the two display buckets, in original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classified {
    pub positive: Vec<ReviewRecord>,
    pub negative: Vec<ReviewRecord>,
}
