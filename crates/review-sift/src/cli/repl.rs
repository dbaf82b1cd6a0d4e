//! Interactive prompt for review-sift.
//!
//! Launch with `review-sift` (no command). Each line typed is a movie title
//! and Enter runs the search. Lines starting with `/` are commands; Tab
//! completes them.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config as EditorConfig, Editor, Event, EventContext,
    EventHandler, Helper, KeyEvent, RepeatCount,
};

use crate::cli::output::TerminalSurface;
use crate::config::Config;
use crate::pipeline;
use crate::source::Source;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/source", "Show or switch the review source"),
    ("/sources", "List available sources"),
    ("/limit", "Show or set how many reviews per list"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit"),
];

/// REPL helper for tab completion.
#[derive(Default)]
struct SiftHelper;

impl Completer for SiftHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];
        if !input.starts_with('/') {
            return Ok((pos, Vec::new()));
        }

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<12} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // source name completion
        if let Some(arg) = input.strip_prefix("/source ") {
            let start = input.len() - arg.len();
            let matches: Vec<Pair> = Source::ALL
                .iter()
                .filter(|s| s.as_str().starts_with(arg.trim()))
                .map(|s| Pair {
                    display: s.as_str().to_string(),
                    replacement: s.as_str().to_string(),
                })
                .collect();
            return Ok((start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for SiftHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for SiftHelper {}
impl Validator for SiftHelper {}
impl Helper for SiftHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// What a typed line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Empty,
    Search(&'a str),
    Command(&'a str, &'a str),
}

/// Split a prompt line into a title search or a `/command args` pair.
pub fn parse_line(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    match line.strip_prefix('/') {
        Some(rest) => {
            let mut parts = rest.splitn(2, ' ');
            let cmd = parts.next().unwrap_or("");
            let args = parts.next().unwrap_or("").trim();
            ReplInput::Command(cmd, args)
        }
        None => ReplInput::Search(line),
    }
}

/// Run the interactive prompt.
pub async fn run(mut config: Config, mut source: Source) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mreview-sift v{}\x1b[0m \x1b[90m\u{2014} movie review sorter\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Type a movie title and press Enter. \x1b[36m/help\x1b[0m for commands, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let editor_config = EditorConfig::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<SiftHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(editor_config)?;
    rl.set_helper(Some(SiftHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let hist_path = dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".review_sift_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut pipeline = source.build(&config)?;

    loop {
        let prompt = format!(" \x1b[36m{source}>\x1b[0m ");
        match rl.readline(&prompt) {
            Ok(line) => match parse_line(&line) {
                ReplInput::Empty => continue,
                ReplInput::Search(title) => {
                    let mut surface = TerminalSurface::new();
                    pipeline::run(title, &pipeline, &config.thresholds, &mut surface).await;
                    println!();
                }
                ReplInput::Command(cmd, args) => match cmd {
                    "exit" | "quit" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    "" | "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "sources" => crate::cli::sources_cmd::run()?,
                    "source" => {
                        if args.is_empty() {
                            eprintln!("  Source: {source} ({})", source.description());
                            continue;
                        }
                        match args.parse::<Source>() {
                            Ok(next) => match next.build(&config) {
                                Ok(p) => {
                                    source = next;
                                    pipeline = p;
                                    eprintln!("  Switched to {source}.");
                                }
                                Err(e) => eprintln!("  Cannot use {next}: {e}"),
                            },
                            Err(e) => eprintln!("  {e}"),
                        }
                    }
                    "limit" => {
                        if args.is_empty() {
                            eprintln!("  Limit: {}", config.thresholds.limit);
                            continue;
                        }
                        match args.parse::<usize>() {
                            Ok(n) if n > 0 => {
                                config.thresholds.limit = n;
                                eprintln!("  Showing up to {n} reviews per list.");
                            }
                            _ => eprintln!("  Usage: /limit <positive number>"),
                        }
                    }
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                },
            },
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Type a movie title to search. Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<12} {desc}");
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), ReplInput::Empty);
        assert_eq!(
            parse_line("  The Dark Knight "),
            ReplInput::Search("The Dark Knight")
        );
        assert_eq!(
            parse_line("/source browser"),
            ReplInput::Command("source", "browser")
        );
        assert_eq!(parse_line("/exit"), ReplInput::Command("exit", ""));
        assert_eq!(parse_line("/"), ReplInput::Command("", ""));
    }
}
