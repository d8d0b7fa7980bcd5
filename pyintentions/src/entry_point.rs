use crate::cli::{Cli, Commands, CursorArgs};
use crate::config::{Config, Settings};
use crate::error::IntentionError;
use crate::intentions::{all_intentions, apply_intention, available_at, Context};
use crate::logging::init_tracing;
use crate::output;
use crate::syntax::PyFile;
use anyhow::{Context as _, Result};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::Path;

/// A file loaded for a cursor-driven command.
struct Loaded {
    file: PyFile,
    settings: Settings,
    offset: usize,
    location: String,
}

/// Reads `path`, resolves the cursor and folds the configuration found above
/// the file. Prints the problem and returns `None` when the cursor or the file
/// is unusable.
fn load(path: &Path, cursor: &CursorArgs) -> Result<Option<Loaded>> {
    if !path.is_file() {
        eprintln!("Error: The file '{}' does not exist.", path.display());
        return Ok(None);
    }
    let source = fs::read_to_string(path)
        .map_err(|source| IntentionError::Io {
            path: path.to_path_buf(),
            source,
        })
        .with_context(|| format!("reading {}", path.display()))?;
    let file = PyFile::parse(source);

    let resolved = match (cursor.at, cursor.offset) {
        (Some(position), _) => file
            .line_index()
            .offset_of(position.line, position.column, file.source())
            .map(|offset| (offset, format!("{}:{}", position.line, position.column))),
        (None, Some(offset)) => file
            .source()
            .is_char_boundary(offset)
            .then(|| (offset, format!("offset {offset}"))),
        (None, None) => None,
    };
    let Some((offset, location)) = resolved else {
        eprintln!("Error: The cursor is outside '{}'.", path.display());
        return Ok(None);
    };

    let config = Config::load_from_path(path);
    if let Some(config_path) = &config.config_file_path {
        tracing::debug!(path = %config_path.display(), "loaded configuration");
    }
    Ok(Some(Loaded {
        file,
        settings: config.settings(),
        offset,
        location,
    }))
}

/// Runs the CLI with the given arguments, writing to stdout.
///
/// # Errors
///
/// Returns an error if writing output or the target file fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    let mut stdout = std::io::stdout();
    run_with_args_to(args, &mut stdout)
}

/// Runs the CLI with the given arguments, writing command output to `writer`.
///
/// Returns the process exit code: 0 on success, 1 when the intention is not
/// available or the arguments are unusable.
///
/// # Errors
///
/// Returns an error if writing output or the target file fails.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["pyintentions".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };
    init_tracing(cli.log_level);

    match cli.command {
        Commands::Intentions { json } => {
            output::print_catalogue(writer, &all_intentions(), json)?;
            Ok(0)
        }
        Commands::List { file, cursor, json } => {
            let Some(loaded) = load(&file, &cursor)? else {
                return Ok(1);
            };
            let context = Context::new(&loaded.file, loaded.offset, &loaded.settings);
            let offers = available_at(&context);
            output::print_offers(writer, &loaded.location, &offers, json)?;
            Ok(0)
        }
        Commands::Apply {
            file,
            intention,
            cursor,
            write,
        } => {
            let Some(loaded) = load(&file, &cursor)? else {
                return Ok(1);
            };
            let context = Context::new(&loaded.file, loaded.offset, &loaded.settings);
            let text = match apply_intention(&intention, &context) {
                Ok(text) => text,
                Err(
                    e @ (IntentionError::NotAvailable { .. } | IntentionError::UnknownIntention(_)),
                ) => {
                    eprintln!("Error: {e}");
                    return Ok(1);
                }
                Err(e) => return Err(e).with_context(|| format!("applying {intention}")),
            };
            if write {
                fs::write(&file, &text)
                    .map_err(|source| IntentionError::Io {
                        path: file.clone(),
                        source,
                    })
                    .with_context(|| format!("writing {}", file.display()))?;
                output::print_applied(writer, &intention, &file.display().to_string())?;
            } else {
                write!(writer, "{text}")?;
            }
            writer.flush()?;
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn run(args: &[&str]) -> (i32, String) {
        let mut buffer = Vec::new();
        let code =
            run_with_args_to(args.iter().map(|arg| (*arg).to_owned()).collect(), &mut buffer)
                .unwrap();
        (code, String::from_utf8(buffer).unwrap())
    }

    fn python_file(source: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".py").tempfile().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_apply_prints_rewritten_file() {
        let file = python_file("def foo():\n    pass\n");
        let path = file.path().to_str().unwrap();
        let (code, out) = run(&["apply", path, "add-to-all", "--at", "1:6"]);
        assert_eq!(code, 0);
        assert_eq!(out, "__all__ = [\"foo\"]\n\ndef foo():\n    pass\n");
    }

    #[test]
    fn test_apply_unavailable_exits_with_one() {
        let file = python_file("x = 1\n");
        let path = file.path().to_str().unwrap();
        let (code, out) = run(&["apply", path, "make-maybe", "--offset", "0"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cursor_past_end_is_rejected() {
        let file = python_file("x = 1\n");
        let path = file.path().to_str().unwrap();
        assert_eq!(run(&["list", path, "--at", "9:1"]).0, 1);
        assert_eq!(run(&["list", path, "--offset", "99"]).0, 1);
    }

    #[test]
    fn test_help_goes_to_writer() {
        let (code, out) = run(&["--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("CONFIGURATION FILE"));
    }
}
