use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.pyintentions.toml):
  Create this file in your project root to set defaults.
  The same table is read from [tool.pyintentions] in pyproject.toml.

  [pyintentions]
  quote_style = \"double\"                           # Quotes for new __all__ entries
  typing_modules = [\"typing\", \"typing_extensions\"] # Where Optional/Union come from
  assume_unbound_typing = true                     # Unimported Optional/Union mean typing's
";

/// A 1-indexed line and column, columns counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column.
    pub column: usize,
}

/// Parses `LINE:COL`.
pub fn parse_position(value: &str) -> Result<Position, String> {
    let invalid = || format!("invalid position '{value}', expected LINE:COL");
    let (line, column) = value.split_once(':').ok_or_else(invalid)?;
    let line: usize = line.trim().parse().map_err(|_| invalid())?;
    let column: usize = column.trim().parse().map_err(|_| invalid())?;
    if line == 0 || column == 0 {
        return Err(format!("invalid position '{value}', lines and columns start at 1"));
    }
    Ok(Position { line, column })
}

/// Where the cursor is. Exactly one of the two forms is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct CursorArgs {
    /// Cursor as LINE:COL, both 1-indexed.
    #[arg(long, value_parser = parse_position)]
    pub at: Option<Position>,

    /// Cursor as a 0-indexed byte offset.
    #[arg(long)]
    pub offset: Option<usize>,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// The matching `tracing` level.
    #[must_use]
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Command-line arguments for `pyintentions`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pyintentions - cursor-driven rewrites for Python sources",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity on stderr (overridden by RUST_LOG).
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the intentions available at a cursor position.
    List {
        /// Python file to inspect.
        file: PathBuf,

        /// Cursor position.
        #[command(flatten)]
        cursor: CursorArgs,

        /// Output raw JSON.
        #[arg(long)]
        json: bool,
    },
    /// Apply one intention at a cursor position.
    Apply {
        /// Python file to rewrite.
        file: PathBuf,

        /// Id of the intention, as shown by `intentions`.
        intention: String,

        /// Cursor position.
        #[command(flatten)]
        cursor: CursorArgs,

        /// Write the result back to the file instead of printing it.
        #[arg(long)]
        write: bool,
    },
    /// Show every intention in the catalogue.
    Intentions {
        /// Output raw JSON.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3:7"), Ok(Position { line: 3, column: 7 }));
        assert!(parse_position("3").is_err());
        assert!(parse_position("0:1").is_err());
        assert!(parse_position("a:b").is_err());
    }

    #[test]
    fn test_cursor_forms_are_exclusive() {
        assert!(Cli::try_parse_from(["pyintentions", "list", "a.py", "--at", "1:1"]).is_ok());
        assert!(Cli::try_parse_from(["pyintentions", "list", "a.py", "--offset", "4"]).is_ok());
        assert!(Cli::try_parse_from(["pyintentions", "list", "a.py"]).is_err());
        assert!(Cli::try_parse_from([
            "pyintentions", "list", "a.py", "--at", "1:1", "--offset", "4"
        ])
        .is_err());
    }
}
