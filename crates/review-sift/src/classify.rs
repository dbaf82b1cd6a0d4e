//! Rating-threshold classification.

use crate::types::{Classified, ReviewRecord, Thresholds};

/// Split records into positive and negative buckets.
///
/// Records without a rating, and records whose rating falls strictly between
/// the two cutoffs, land in neither bucket. Order is preserved.
pub fn classify(records: &[ReviewRecord], thresholds: &Thresholds) -> Classified {
    let mut out = Classified::default();
    for record in records {
        let Some(rating) = record.rating else {
            continue;
        };
        if rating >= thresholds.positive_min {
            out.positive.push(record.clone());
        } else if rating <= thresholds.negative_max {
            out.negative.push(record.clone());
        }
    }
    out
}
