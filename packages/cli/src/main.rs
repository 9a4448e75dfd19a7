mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, assets, blocks, compile, init, preview, save, AddArgs, AssetsArgs, CompileArgs, InitArgs, PreviewArgs,
    SaveArgs,
};
use tracing_subscriber::EnvFilter;

/// Mailframe CLI - block based email designs compiled to client-safe HTML
#[derive(Parser, Debug)]
#[command(name = "mailframe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Mailframe project
    Init(InitArgs),

    /// List the block palette and editable fields
    Blocks,

    /// Append or insert a block into a design
    Add(AddArgs),

    /// Compile designs to email HTML
    Compile(CompileArgs),

    /// Print the interactive preview tree of a design as JSON
    Preview(PreviewArgs),

    /// Compile and store a design under a slug
    Save(SaveArgs),

    /// Search the configured media library
    Assets(AssetsArgs),
}

fn init_tracing() {
    // stdout carries command output, keep diagnostics on stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Blocks => blocks(),
        Command::Add(args) => add(args, &cwd),
        Command::Compile(args) => compile(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
        Command::Save(args) => save(args, &cwd).await,
        Command::Assets(args) => assets(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
