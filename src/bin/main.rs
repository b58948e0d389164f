use anyhow::Result;
use clap::{Parser, Subcommand};
use jayc::ast::AstPrinter;
use jayc::parser::{Lexer, LookaheadScanner};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "jayc")]
#[command(about = "Jay Language Compiler front end")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .jay file and show the re-rendered source
    Parse {
        /// Input .jay file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the raw AST instead of re-rendered source
        #[arg(short, long)]
        detailed: bool,
    },

    /// Lexically analyze a .jay file
    Lex {
        /// Input .jay file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show token lines
        #[arg(short, long)]
        lines: bool,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse { input, detailed } => parse_file(input, *detailed),
        Commands::Lex { input, lines } => lex_file(input, *lines),
    }
}

fn parse_file(input: &PathBuf, detailed: bool) -> Result<ExitCode> {
    let source = fs::read_to_string(input)?;
    let file_name = input.display().to_string();

    let scanner = LookaheadScanner::from_source(&file_name, &source)?;
    let mut parser = jayc::parser::Parser::new(scanner);
    let unit = parser.parse();

    if detailed {
        println!("{:#?}", unit);
    } else {
        print!("{}", AstPrinter::new().print(&unit));
    }

    if parser.error_has_occurred() {
        eprintln!("{}: {} error(s)", file_name, parser.diagnostics().len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn lex_file(input: &PathBuf, lines: bool) -> Result<ExitCode> {
    let source = fs::read_to_string(input)?;
    let tokens = Lexer::new(&source).tokenize()?;

    for token in &tokens {
        if lines {
            println!("{:4}  {:?} {}", token.line, token.kind, token.image);
        } else {
            println!("{:?} {}", token.kind, token.image);
        }
    }
    Ok(ExitCode::SUCCESS)
}
