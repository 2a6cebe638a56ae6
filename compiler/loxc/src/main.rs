//! The `lox` binary.

use loxc::cli::{Command, Options, USAGE};
use loxc::{commands, exit, tracing_setup};

fn main() {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match Options::parse(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(exit::USAGE);
        }
    };

    let code = match &options.command {
        Command::Repl => commands::run_prompt(options.eval, options.color),
        Command::Run(path) => commands::run_file(path, options.eval, options.color),
        Command::Parse(path) => commands::parse_file(path, options.color),
        Command::Lex(path) => commands::lex_file(path, options.color),
        Command::Explain(code) => commands::explain(code),
        Command::Help => {
            println!("Lox interpreter");
            println!();
            println!("{USAGE}");
            0
        }
        Command::Version => {
            println!("lox {}", env!("CARGO_PKG_VERSION"));
            0
        }
    };
    std::process::exit(code);
}
