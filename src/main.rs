use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;
use unload_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // No subcommand: show usage and the registered record types hint
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {e}");
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Ctrl-C flows into cooperative session cancellation
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = {
            let cancellation_token = cancellation_token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    eprintln!("\nReceived CTRL+C, cancelling the parse...");
                    cancellation_token.cancel();
                }
            }
        };
        tokio::spawn(shutdown_signal);

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {error}");
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("Unload Processor - z/OS Unload Dataset Converter");
    println!("================================================");
    println!();
    println!("Convert IRRDBU00 security unloads and DCOLLECT storage collections");
    println!("into typed tables, with optional Parquet export.");
    println!();
    println!("USAGE:");
    println!("    unload-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse    Parse an unload file into per-record-type tables");
    println!("    types    List the record types a family's registry knows");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a security unload and export every table:");
    println!("    unload-processor parse -i irrdbu00.bin -f security -o ./tables");
    println!();
    println!("    # Decode only user and group base records:");
    println!("    unload-processor parse -i irrdbu00.bin -f security -t USBD,GPBD");
    println!();
    println!("    # Parse a DCOLLECT file with strict record handling:");
    println!("    unload-processor parse -i dcollect.bin -f storage --strict");
    println!();
    println!("For detailed help on any command, use:");
    println!("    unload-processor <COMMAND> --help");
}
