//! Command handlers for the `lox` binary. Each returns the process exit
//! code so `main` stays a thin dispatcher and tests can call them directly.

use std::io::{self, BufRead, IsTerminal, Write};

use lox_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use lox_diagnostic::ErrorCode;
use lox_eval::{stdout_handler, EvalConfig};
use lox_ir::StringInterner;

use crate::{exit, print_program, RunOutcome, Session};

/// Read a script, turning the I/O error into a user-facing message.
pub fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// [`read_file`], reporting failure on stderr as an I/O exit code.
fn read_script(path: &str) -> Result<String, i32> {
    read_file(path).map_err(|message| {
        eprintln!("error: {message}");
        exit::IO_ERR
    })
}

fn stderr_emitter(color: ColorMode) -> TerminalEmitter<io::Stderr> {
    TerminalEmitter::stderr(color, io::stderr().is_terminal())
}

/// `lox <file>`: run a whole script.
pub fn run_file(path: &str, config: EvalConfig, color: ColorMode) -> i32 {
    let source = match read_script(path) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let mut emitter = stderr_emitter(color);
    let mut session = Session::new(stdout_handler(), config);
    let outcome = session.run(&source, &mut emitter);
    if let RunOutcome::CompileError { errors } = outcome {
        emitter.emit_summary(errors);
        emitter.flush();
    }
    outcome.exit_code()
}

/// `lox`: read-eval-print loop over stdin.
///
/// Every line runs in the same session, so definitions persist. An error
/// on one line is reported and forgotten before the next prompt.
pub fn run_prompt(config: EvalConfig, color: ColorMode) -> i32 {
    let mut emitter = stderr_emitter(color);
    let mut session = Session::new(stdout_handler(), config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            None => break,
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: reading input: {e}");
                return exit::IO_ERR;
            }
        };
        session.run(&line, &mut emitter);
        session.reset_errors();
    }
    println!();
    0
}

/// `lox parse <file>`: print the syntax tree and any syntax errors.
pub fn parse_file(path: &str, color: ColorMode) -> i32 {
    let source = match read_script(path) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let interner = StringInterner::new();
    let lexed = lox_lexer::lex(&source, &interner);
    let parsed = lox_parse::parse(&lexed.tokens);

    print!("{}", print_program(&parsed.arena, &parsed.statements, &interner));

    let mut emitter = stderr_emitter(color);
    let diagnostics: Vec<_> = lexed.diagnostics().chain(parsed.diagnostics()).collect();
    emitter.emit_all(&diagnostics);
    emitter.emit_summary(diagnostics.len());
    emitter.flush();

    if diagnostics.is_empty() {
        0
    } else {
        exit::DATA_ERR
    }
}

/// `lox lex <file>`: print the token stream.
pub fn lex_file(path: &str, color: ColorMode) -> i32 {
    let source = match read_script(path) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let interner = StringInterner::new();
    let lexed = lox_lexer::lex(&source, &interner);

    println!("Tokens for '{path}' ({} tokens):", lexed.tokens.len());
    for token in lexed.tokens.iter() {
        println!("  {:?} '{}'", token, lexed.tokens.lexeme(token));
    }

    let mut emitter = stderr_emitter(color);
    let diagnostics: Vec<_> = lexed.diagnostics().collect();
    emitter.emit_all(&diagnostics);
    emitter.flush();

    if diagnostics.is_empty() {
        0
    } else {
        exit::DATA_ERR
    }
}

/// `lox explain <code>`: one-line description of an error code.
pub fn explain(code: &str) -> i32 {
    match code.parse::<ErrorCode>() {
        Ok(code) => {
            println!("{code}: {}", code.description());
            0
        }
        Err(()) => {
            eprintln!("error: unknown error code '{code}'");
            eprintln!("codes look like E0001 (lexical), E1001 (syntax), E2001 (resolution) or E6001 (runtime)");
            exit::USAGE
        }
    }
}
