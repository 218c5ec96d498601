mod repl;

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use calc_rs::{new_interpreter, parse, scan, Engine};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// log every parser production and store write to stderr
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// run a file, one statement at a time
    Run {
        #[arg(name = "FILE")]
        file: PathBuf,

        /// print every variable once the file has run
        #[arg(long)]
        dump_store: bool,
    },
    /// print the tokens of a statement
    Tokens {
        #[arg(name = "SOURCE")]
        source: String,
    },
    /// print the syntax tree of a statement
    Ast {
        #[arg(name = "SOURCE")]
        source: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(cli.trace);

    match cli.command {
        Some(Commands::Run { file, dump_store }) => {
            let reader = File::open(&file)
                .with_context(|| format!("could not open {}", file.display()))?;
            let mut engine = new_interpreter();
            repl::run_session(
                engine.as_mut(),
                BufReader::new(reader),
                std::io::stdout().lock(),
                false,
            )?;
            if dump_store {
                repl::dump_store(engine.store(), std::io::stdout().lock())?;
            }
            Ok(())
        }
        Some(Commands::Tokens { source }) => {
            for token in scan(&source)? {
                println!("{:?}", token);
            }
            Ok(())
        }
        Some(Commands::Ast { source }) => {
            let node = parse(scan(&source)?)?;
            println!("{}", node);
            Ok(())
        }
        None => repl::start(),
    }
}

fn install_tracing(trace: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if trace {
        if let Ok(directive) = "calc_rs=trace".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
