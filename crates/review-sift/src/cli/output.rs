//! Global output flags, terminal styling and the two CLI surfaces.

use crate::present::Surface;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

pub fn is_json() -> bool {
    std::env::var_os("REVIEW_SIFT_JSON").is_some()
}

pub fn is_quiet() -> bool {
    std::env::var_os("REVIEW_SIFT_QUIET").is_some()
}

pub fn is_verbose() -> bool {
    std::env::var_os("REVIEW_SIFT_VERBOSE").is_some()
}

pub fn no_color() -> bool {
    std::env::var_os("REVIEW_SIFT_NO_COLOR").is_some() || std::env::var_os("NO_COLOR").is_some()
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to serialize output: {e}"),
    }
}

/// ANSI styling that collapses to plain text with `--no-color`.
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self { color: !no_color() }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }
    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }
    pub fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }
    pub fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }
    pub fn dim(&self, text: &str) -> String {
        self.paint("90", text)
    }

    pub fn ok_sym(&self) -> String {
        self.green("✓")
    }
    pub fn warn_sym(&self) -> String {
        self.yellow("!")
    }
    pub fn err_sym(&self) -> String {
        self.red("✗")
    }
}

/// Writes to stdout, with a spinner on stderr while stages run.
pub struct TerminalSurface {
    s: Styled,
    spinner: Option<ProgressBar>,
    show_progress: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            s: Styled::new(),
            spinner: None,
            show_progress: !is_quiet(),
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn separator(&mut self) {
        println!("{}", self.s.dim("---"));
    }
    fn header(&mut self, text: &str) {
        println!("{}", self.s.bold(text));
    }
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
    fn success(&mut self, text: &str) {
        println!("{} {text}", self.s.ok_sym());
    }
    fn warning(&mut self, text: &str) {
        println!("{} {text}", self.s.warn_sym());
    }
    fn error(&mut self, text: &str) {
        println!("{} {text}", self.s.err_sym());
    }

    fn stage_started(&mut self, text: &str) {
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(text.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    fn stage_finished(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

/// A status message collected by [`JsonSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub level: &'static str,
    pub text: String,
}

/// Collects status messages; list output comes from the run outcome.
#[derive(Debug, Default)]
pub struct JsonSurface {
    pub messages: Vec<Message>,
}

impl JsonSurface {
    fn push(&mut self, level: &'static str, text: &str) {
        self.messages.push(Message {
            level,
            text: text.to_string(),
        });
    }
}

impl Surface for JsonSurface {
    fn separator(&mut self) {}
    fn header(&mut self, _text: &str) {}
    fn line(&mut self, _text: &str) {}
    fn success(&mut self, text: &str) {
        self.push("success", text);
    }
    fn warning(&mut self, text: &str) {
        self.push("warning", text);
    }
    fn error(&mut self, text: &str) {
        self.push("error", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styling() {
        let s = Styled::plain();
        assert_eq!(s.bold("x"), "x");
        assert_eq!(s.ok_sym(), "✓");
    }

    #[test]
    fn test_json_surface_keeps_only_messages() {
        let mut surface = JsonSurface::default();
        surface.header("Positive Reviews");
        surface.line("1. great");
        surface.error("Could not scrape reviews.");
        assert_eq!(
            surface.messages,
            vec![Message {
                level: "error",
                text: "Could not scrape reviews.".into()
            }]
        );
    }
}
