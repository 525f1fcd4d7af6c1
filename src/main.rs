//! Command-line entry point for the MiniJava transpiler.

use clap::Parser;
use colored::Colorize;
use minijava::Driver;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mjc", version, about = "Translates a statically checked Java subset to Python")]
struct Args {
    /// Input source file (.java)
    input: PathBuf,

    /// Output file (defaults to the input path with a .py extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the token stream to stdout
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parse tree to stdout
    #[arg(long)]
    dump_ast: bool,

    /// Write a Graphviz DOT rendering of the parse tree to FILE
    #[arg(long, value_name = "FILE")]
    emit_dot: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}: {}", "error".red().bold(), message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    if args.input.extension().map_or(true, |ext| ext != "java") {
        return Err(format!(
            "expected a .java input file, got '{}'",
            args.input.display()
        ));
    }

    let file = args.input.display().to_string();
    let source = fs::read_to_string(&args.input)
        .map_err(|err| format!("cannot read '{}': {}", file, err))?;

    let driver = Driver::new(&file, &source)
        .dump_tokens(args.dump_tokens)
        .dump_tree(args.dump_ast)
        .emit_dot(args.emit_dot.is_some());

    let artifacts = match driver.compile() {
        Ok(artifacts) => artifacts,
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                eprint!("{}", diagnostic);
            }
            let count = diagnostics.len();
            let plural = if count == 1 { "" } else { "s" };
            return Err(format!(
                "could not translate '{}' due to {} previous error{}",
                file, count, plural
            ));
        }
    };

    if let Some(dump) = &artifacts.token_dump {
        print!("{}", dump);
    }
    if let Some(dump) = &artifacts.tree_dump {
        println!("{}", dump);
    }
    if let (Some(path), Some(dot)) = (&args.emit_dot, &artifacts.dot) {
        fs::write(path, dot)
            .map_err(|err| format!("cannot write '{}': {}", path.display(), err))?;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("py"));
    fs::write(&output, &artifacts.python)
        .map_err(|err| format!("cannot write '{}': {}", output.display(), err))?;

    println!(
        "{} {} -> {}",
        "translated".green().bold(),
        file,
        output.display()
    );
    Ok(())
}
