use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    dual::{self, DualArgs},
    faces::{self, FacesArgs},
    nodes::{self, ColorArgs, KColorArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

#[derive(Parser, Debug)]
#[command(name = "gcol", about = "Node and face colouring of graphs")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Colour nodes with as few colours as the configuration finds.
    Color(ColorArgs),
    /// Colour nodes with exactly `k` colours.
    KColor(KColorArgs),
    /// Colour nodes with `k` colours and balanced class weights.
    Equitable(KColorArgs),
    /// Extract the planar dual of a straight-line drawing.
    Dual(DualArgs),
    /// Colour the faces of a straight-line drawing.
    Faces(FacesArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Color(args) => nodes::run_color(&args, cli.verbose),
        Command::KColor(args) => nodes::run_k_color(&args, cli.verbose, false),
        Command::Equitable(args) => nodes::run_k_color(&args, cli.verbose, true),
        Command::Dual(args) => dual::run(&args),
        Command::Faces(args) => faces::run(&args, cli.verbose),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
