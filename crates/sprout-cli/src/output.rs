//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::{Term, measure_text_width};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `lines` inside a rounded border, with a dimmed frame when colour is on.
    pub fn boxed(&self, lines: &[String]) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        for line in render_box(lines) {
            if self.no_color {
                self.term.write_line(&line)?;
            } else {
                self.term.write_line(&colorize_frame(&line))?;
            }
        }
        Ok(())
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

const PADDING: usize = 1;

/// Draw a rounded box around `lines`, padded to the widest line.
///
/// Widths are measured in terminal columns, so lines that already carry ANSI
/// codes or wide characters still line up.
pub fn render_box(lines: &[String]) -> Vec<String> {
    let inner = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        + PADDING * 2;

    let horizontal = "\u{2500}".repeat(inner);
    let pad = " ".repeat(PADDING);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("\u{256d}{horizontal}\u{256e}"));
    for line in lines {
        let fill = " ".repeat(inner - PADDING * 2 - measure_text_width(line));
        out.push(format!("\u{2502}{pad}{line}{fill}{pad}\u{2502}"));
    }
    out.push(format!("\u{2570}{horizontal}\u{256f}"));
    out
}

fn colorize_frame(line: &str) -> String {
    let mut chars = line.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == '\u{2502}' => {
            let body: String = chars.collect();
            format!("{}{}{}", first.dimmed(), body, last.dimmed())
        }
        _ => line.dimmed().to_string(),
    }
}
