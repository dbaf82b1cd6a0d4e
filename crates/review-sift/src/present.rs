//! Rendering of classified reviews onto a display surface.
//!
//! The presenter never owns its output: callers hand it a [`Surface`], which
//! may be a terminal, a JSON collector, or an in-memory buffer in tests.

use crate::types::{Classified, ReviewRecord};

/// A sink the presenter and pipeline write user-visible output to.
pub trait Surface {
    /// Horizontal separator between sections.
    fn separator(&mut self);
    /// Section header.
    fn header(&mut self, text: &str);
    /// Plain line of body text.
    fn line(&mut self, text: &str);
    /// Positive status message (e.g. a page was found).
    fn success(&mut self, text: &str);
    /// Non-fatal problem with the user's input.
    fn warning(&mut self, text: &str);
    /// A stage failed.
    fn error(&mut self, text: &str);

    /// A long-running stage started. Surfaces may show a spinner.
    fn stage_started(&mut self, _text: &str) {}
    /// The current stage finished.
    fn stage_finished(&mut self) {}
}

pub const POSITIVE_HEADER: &str = "Positive Reviews";
pub const NEGATIVE_HEADER: &str = "Negative Reviews";
pub const SNIPPETS_HEADER: &str = "Review Snippets";

/// Render both buckets, each truncated to the first `limit` entries.
pub fn present(classified: &Classified, limit: usize, surface: &mut dyn Surface) {
    section(
        POSITIVE_HEADER,
        &classified.positive,
        limit,
        "No positive reviews found.",
        surface,
    );
    section(
        NEGATIVE_HEADER,
        &classified.negative,
        limit,
        "No negative reviews found.",
        surface,
    );
}

/// Render an unclassified list of search snippets.
pub fn present_snippets(records: &[ReviewRecord], limit: usize, surface: &mut dyn Surface) {
    section(
        SNIPPETS_HEADER,
        records,
        limit,
        "No review snippets found.",
        surface,
    );
}

fn section(
    title: &str,
    records: &[ReviewRecord],
    limit: usize,
    empty_message: &str,
    surface: &mut dyn Surface,
) {
    surface.separator();
    surface.header(title);
    if records.is_empty() {
        surface.line(empty_message);
        return;
    }
    for (i, record) in records.iter().take(limit).enumerate() {
        surface.line(&format!("{}. {}", i + 1, record.review_text));
    }
}

/// One line written to a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceLine {
    Separator,
    Header(String),
    Line(String),
    Success(String),
    Warning(String),
    Error(String),
}

/// Surface that records everything written to it.
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub lines: Vec<SurfaceLine>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body lines only, without headers or status messages.
    pub fn body(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                SurfaceLine::Line(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                SurfaceLine::Error(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Body lines written under the given header.
    pub fn section(&self, header: &str) -> Vec<&str> {
        let mut inside = false;
        let mut out = Vec::new();
        for l in &self.lines {
            match l {
                SurfaceLine::Header(h) => inside = h == header,
                SurfaceLine::Separator => inside = false,
                SurfaceLine::Line(s) if inside => out.push(s.as_str()),
                _ => {}
            }
        }
        out
    }
}

impl Surface for MemorySurface {
    fn separator(&mut self) {
        self.lines.push(SurfaceLine::Separator);
    }
    fn header(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Header(text.to_string()));
    }
    fn line(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Line(text.to_string()));
    }
    fn success(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Success(text.to_string()));
    }
    fn warning(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Warning(text.to_string()));
    }
    fn error(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Error(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::types::Thresholds;

    #[test]
    fn test_present_numbers_entries() {
        let records = vec![
            ReviewRecord::new("great", Some(9.0)),
            ReviewRecord::new("ok", Some(5.0)),
            ReviewRecord::new("bad", Some(2.0)),
        ];
        let mut surface = MemorySurface::new();
        present(&classify(&records, &Thresholds::default()), 5, &mut surface);

        assert_eq!(surface.section(POSITIVE_HEADER), vec!["1. great"]);
        assert_eq!(surface.section(NEGATIVE_HEADER), vec!["1. bad"]);
    }

    #[test]
    fn test_present_truncates_to_first_five() {
        let records: Vec<ReviewRecord> = (1..=8)
            .map(|i| ReviewRecord::new(format!("good {i}"), Some(8.0)))
            .collect();
        let mut surface = MemorySurface::new();
        present(&classify(&records, &Thresholds::default()), 5, &mut surface);

        assert_eq!(
            surface.section(POSITIVE_HEADER),
            vec!["1. good 1", "2. good 2", "3. good 3", "4. good 4", "5. good 5"]
        );
    }

    #[test]
    fn test_present_empty_reports_both_lists() {
        let mut surface = MemorySurface::new();
        present(&Classified::default(), 5, &mut surface);

        assert_eq!(
            surface.section(POSITIVE_HEADER),
            vec!["No positive reviews found."]
        );
        assert_eq!(
            surface.section(NEGATIVE_HEADER),
            vec!["No negative reviews found."]
        );
    }

    #[test]
    fn test_present_snippets() {
        let records = vec![
            ReviewRecord::new("first", None),
            ReviewRecord::new("second", Some(8.0)),
        ];
        let mut surface = MemorySurface::new();
        present_snippets(&records, 1, &mut surface);
        assert_eq!(surface.section(SNIPPETS_HEADER), vec!["1. first"]);

        let mut empty = MemorySurface::new();
        present_snippets(&[], 5, &mut empty);
        assert_eq!(empty.body(), vec!["No review snippets found."]);
    }
}
