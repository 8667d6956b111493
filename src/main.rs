use std::process::ExitCode;

use clap::Parser;
use genemaster::command;
use genemaster::runtime;

/// Run the genome sequencing pipeline: QC, trimming, alignment, BAM conversion
/// and sorting, assembly and annotation
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    command: command::GenomeSequencingCMD,
}

fn main() -> ExitCode {
    runtime::setup_global_logger();
    let mut cli = Cli::parse();

    if let Err(e) = cli.command.try_execute() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
