//! Command-line parsing.
//!
//! Arguments are few enough to parse by hand: global flags may appear
//! anywhere, everything else is positional.

use std::fmt;

use lox_diagnostic::emitter::ColorMode;
use lox_eval::EvalConfig;

/// What the binary was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Repl,
    Run(String),
    Parse(String),
    Lex(String),
    /// Describe an error code such as `E2001`.
    Explain(String),
    Help,
    Version,
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub command: Command,
    pub eval: EvalConfig,
    pub color: ColorMode,
}

/// A command line that could not be understood.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

impl Options {
    /// Parse arguments, not including the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Options, UsageError> {
        let mut eval = EvalConfig::default();
        let mut color = ColorMode::Auto;
        let mut positional: Vec<&str> = Vec::new();

        for arg in args {
            let arg = arg.as_ref();
            if let Some(depth) = arg.strip_prefix("--max-call-depth=") {
                eval.max_call_depth = match depth.parse::<usize>() {
                    Ok(depth) if depth > 0 => depth,
                    _ => {
                        return Err(UsageError(format!(
                            "invalid value for --max-call-depth: '{depth}'"
                        )))
                    }
                };
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                color = match mode {
                    "auto" => ColorMode::Auto,
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    _ => return Err(UsageError(format!("invalid value for --color: '{mode}'"))),
                };
            } else if matches!(arg, "help" | "--help" | "-h") && positional.is_empty() {
                positional.push("help");
            } else if matches!(arg, "version" | "--version" | "-V") && positional.is_empty() {
                positional.push("version");
            } else if arg.starts_with('-') {
                return Err(UsageError(format!("unknown option '{arg}'")));
            } else {
                positional.push(arg);
            }
        }

        let command = match positional.as_slice() {
            [] => Command::Repl,
            ["help"] => Command::Help,
            ["version"] => Command::Version,
            ["run", path] => Command::Run((*path).to_string()),
            ["parse", path] => Command::Parse((*path).to_string()),
            ["lex", path] => Command::Lex((*path).to_string()),
            ["explain", code] => Command::Explain((*code).to_string()),
            [cmd @ ("run" | "parse" | "lex")] => {
                return Err(UsageError(format!("missing file path for '{cmd}'")))
            }
            ["explain"] => return Err(UsageError("missing error code for 'explain'".to_string())),
            [path] => Command::Run((*path).to_string()),
            _ => return Err(UsageError("too many arguments".to_string())),
        };

        Ok(Options {
            command,
            eval,
            color,
        })
    }
}

pub const USAGE: &str = "\
Usage: lox [options] [command]

Commands:
  (none)             Start the interactive prompt
  <file>             Run a script
  run <file>         Run a script
  parse <file>       Print the syntax tree
  lex <file>         Print the token stream
  explain <code>     Describe an error code, e.g. E2001
  help               Show this help message
  version            Show version information

Options:
  --max-call-depth=N Most nested calls before \"Stack overflow.\" (default 1024)
  --color=<mode>     Diagnostic colors: auto, always, never";
