//! Command line parsing.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const USAGE: &str = "\
Usage:
  render-doc invoice <order.json> [--out <file>] [--config <file>]
  render-doc receipt <order.json> [--out <file>] [--config <file>]
  render-doc quote   <checkout.json> [--config <file>]

Options:
  -o, --out <FILE>      Output path (default: suggested filename)
  -c, --config <FILE>   Configuration file (default: ./titiktemu.toml)
  -h, --help            Show this help message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Invoice,
    Receipt,
    Quote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run {
        action: Action,
        input: PathBuf,
        out: Option<PathBuf>,
        config: Option<PathBuf>,
    },
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> AppResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let mut action = None;
    let mut input = None;
    let mut out = None;
    let mut config = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--out" | "-o" => {
                out = Some(PathBuf::from(value_of(&args, i)?));
                i += 1;
            }
            "--config" | "-c" => {
                config = Some(PathBuf::from(value_of(&args, i)?));
                i += 1;
            }
            flag if flag.starts_with('-') => {
                return Err(AppError::Usage(format!("unknown option '{}'", flag)));
            }
            word if action.is_none() => {
                action = Some(match word {
                    "invoice" => Action::Invoice,
                    "receipt" => Action::Receipt,
                    "quote" => Action::Quote,
                    other => {
                        return Err(AppError::Usage(format!("unknown command '{}'", other)))
                    }
                });
            }
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => {
                return Err(AppError::Usage(format!("unexpected argument '{}'", extra)));
            }
        }
        i += 1;
    }

    let action = action.ok_or_else(|| AppError::Usage("missing command".to_string()))?;
    let input = input.ok_or_else(|| AppError::Usage("missing input file".to_string()))?;

    if action == Action::Quote && out.is_some() {
        return Err(AppError::Usage("quote prints to stdout; --out is not accepted".to_string()));
    }

    Ok(Command::Run {
        action,
        input,
        out,
        config,
    })
}

fn value_of(args: &[String], i: usize) -> AppResult<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("{} needs a value", args[i])))
}
