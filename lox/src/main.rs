use clap::Parser as ClapParser;
use console::style;
use lox::builtin_functions::default_builtin_vars;
use lox::Error;
use lox_interp::interpreter::Interpreter;
use lox_interp::output::Stdout;
use lox_parser::lexer::Scanner;
use lox_parser::parser::Parser;
use lox_parser::printer::AstPrinter;
use lox_source::Source;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Exit status when the script can not be read (`EX_NOINPUT`).
const EXIT_NO_INPUT: i32 = 66;

#[derive(ClapParser, Debug)]
#[command(name = "lox")]
#[command(author, version, about = "Tree-walking interpreter for the Lox language", long_about = None)]
struct Cli {
    /// Script to run. Starts an interactive prompt if omitted.
    script: Option<PathBuf>,

    /// Print the scanned tokens before running.
    #[arg(long)]
    print_tokens: bool,

    /// Print the parsed program before running.
    #[arg(long)]
    print_ast: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut interpreter = Interpreter::new(&default_builtin_vars(), Stdout);

    match &cli.script {
        Some(path) => run_file(&cli, path, &mut interpreter),
        None => run_prompt(&cli, &mut interpreter),
    }
}

fn run_file(cli: &Cli, path: &Path, interpreter: &mut Interpreter<Stdout>) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!(
                "{} reading {}: {}",
                style("error").red().bold(),
                path.display(),
                err
            );
            process::exit(EXIT_NO_INPUT);
        }
    };

    debug_print(cli, &content);
    if let Err(err) = lox::run(&content, interpreter) {
        report(&err);
        process::exit(err.exit_code());
    }
}

fn run_prompt(cli: &Cli, interpreter: &mut Interpreter<Stdout>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break, // end of input
            Ok(_) => {}
            Err(err) => {
                eprintln!("{} reading input: {}", style("error").red().bold(), err);
                break;
            }
        }

        debug_print(cli, &input);
        // errors are reported but the session goes on
        if let Err(err) = lox::run(&input, interpreter) {
            report(&err);
        }
    }
}

/// Prints the tokens and/or the syntax tree of `content` if requested on the command line.
fn debug_print(cli: &Cli, content: &str) {
    if !cli.print_tokens && !cli.print_ast {
        return;
    }

    let source: Source = content.into();
    if cli.print_tokens {
        for token in Scanner::new(&source).scan_tokens() {
            eprintln!("{}", style(token).dim());
        }
    }
    if cli.print_ast {
        // diagnostics are reported when the program is run
        let dummy_source: Source = content.into();
        for stmt in Parser::from_source(&dummy_source).parse_program() {
            eprintln!("{}", style(AstPrinter::print_stmt(&stmt)).cyan());
        }
    }
}

fn report(err: &Error) {
    match err {
        Error::Syntax(errors) => {
            for error in errors {
                eprintln!("{}", style(error).red());
            }
        }
        Error::Runtime(error) => eprintln!("{}", style(error).red().bold()),
    }
}
