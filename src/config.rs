use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

pub const DEFAULT_CONSOLE_LINES: usize = 25;

#[derive(Parser, Debug)]
#[command(about = "Slide the tiles back into order: w/a/s/d to move, q to quit")]
pub struct Args {
    /// Blank lines printed above each board. Raise it if the board
    /// isn't sitting at the bottom of the console.
    #[arg(long, default_value_t = DEFAULT_CONSOLE_LINES)]
    pub console_lines: usize,
    /// Clear the terminal before each board instead of printing blank lines.
    #[arg(long)]
    pub clear: bool,
    /// Seed for a reproducible shuffle.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Tracing filter, e.g. "info", "debug". Logs go to stderr.
    #[arg(long, default_value = "warn")]
    pub log: String,
}

/// How the console is cleared before a board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    BlankLines(usize),
    Terminal,
}

impl ClearMode {
    pub fn write_preamble<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match *self {
            ClearMode::BlankLines(count) => {
                for _ in 0..count {
                    writeln!(out)?;
                }
                Ok(())
            }
            ClearMode::Terminal => queue!(out, Clear(ClearType::All), MoveTo(0, 0)),
        }
    }
}

impl Default for ClearMode {
    fn default() -> Self {
        ClearMode::BlankLines(DEFAULT_CONSOLE_LINES)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub clear: ClearMode,
    pub seed: Option<u64>,
    pub log: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let clear = if args.clear {
            ClearMode::Terminal
        } else {
            ClearMode::BlankLines(args.console_lines)
        };

        Self {
            clear,
            seed: args.seed,
            log: args.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_console_layout() {
        let config = Config::from(Args::parse_from(["fifteen-puzzle"]));
        assert_eq!(config.clear, ClearMode::BlankLines(25));
        assert_eq!(config.seed, None);
        assert_eq!(config.log, "warn");
    }

    #[test]
    fn clear_flag_selects_terminal_mode() {
        let args = Args::parse_from(["fifteen-puzzle", "--clear", "--console-lines", "3"]);
        assert_eq!(Config::from(args).clear, ClearMode::Terminal);
    }

    #[test]
    fn seed_and_console_lines_are_parsed() {
        let args = Args::parse_from(["fifteen-puzzle", "--seed", "42", "--console-lines", "3"]);
        let config = Config::from(args);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.clear, ClearMode::BlankLines(3));
    }

    #[test]
    fn blank_line_preamble() {
        let mut out = Vec::new();
        ClearMode::BlankLines(3).write_preamble(&mut out).unwrap();
        assert_eq!(out, b"\n\n\n");
    }

    #[test]
    fn terminal_preamble_emits_escape_sequence() {
        let mut out = Vec::new();
        ClearMode::Terminal.write_preamble(&mut out).unwrap();
        assert!(out.starts_with(b"\x1b["));
    }
}
