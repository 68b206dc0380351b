//! Command implementations for the unload processor CLI
//!
//! Runs a parse session in the background, feeds the progress bar from the
//! session's status snapshots, and reports a colored summary when the
//! session reaches a terminal state.

use std::time::Duration;

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::models::RecordFamily;
use crate::app::services::parse_session::ParseSession;
use crate::app::services::schema_registry;
use crate::cli::args::{Args, Commands, ParseArgs, TypesArgs};
use crate::constants::PROGRESS_POLL_MS;
use crate::{Result, UnloadSet};

/// Dispatch the parsed arguments.
pub async fn run(args: Args, shutdown: CancellationToken) -> Result<()> {
    setup_logging();
    debug!("command line arguments: {args:?}");

    match args.command {
        Some(Commands::Parse(parse_args)) => run_parse(parse_args, shutdown).await,
        Some(Commands::Types(types_args)) => run_types(types_args),
        None => Ok(()),
    }
}

fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    // RUST_LOG wins; default keeps the progress bar readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("unload_processor=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_parse(args: ParseArgs, shutdown: CancellationToken) -> Result<()> {
    let family: RecordFamily = args.family.into();
    let options = args.parse_options();

    let session = ParseSession::start(&args.input, family, options)?;
    info!("parsing '{}' as {family} unload", args.input.display());

    let progress = if args.quiet {
        None
    } else {
        Some(make_progress_bar(session.status().total_bytes))
    };

    // poll status until the pass reaches a terminal state, forwarding
    // Ctrl-C to cooperative cancellation
    loop {
        let status = session.status();
        if let Some(bar) = &progress {
            bar.set_position(status.bytes_processed);
            bar.set_message(format!(
                "{} records, {} diagnostics",
                status.records_processed, status.error_records
            ));
        }
        if status.state.is_terminal() {
            break;
        }
        if shutdown.is_cancelled() {
            session.cancel();
        }
        tokio::time::sleep(Duration::from_millis(PROGRESS_POLL_MS)).await;
    }

    let final_status = session.status();
    match session.wait().await {
        Ok(set) => {
            if let Some(bar) = &progress {
                bar.finish_and_clear();
            }
            report_success(&args, &set, final_status.elapsed)?;
            Ok(())
        }
        Err(error) => {
            if let Some(bar) = &progress {
                bar.abandon_with_message(format!("{}", "parse failed".red()));
            }
            Err(error)
        }
    }
}

fn make_progress_bar(total_bytes: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_bytes);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] \
                 {bytes}/{total_bytes} ({percent}%) | {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    bar.set_message("reading unload");
    bar
}

fn report_success(args: &ParseArgs, set: &UnloadSet, elapsed: Duration) -> Result<()> {
    let stats = set.stats();
    println!(
        "{} in {}",
        "parse complete".green().bold(),
        HumanDuration(elapsed)
    );
    println!("  {}", stats.summary());

    for (code, counts) in &stats.per_type {
        let name = schema_registry::name_for(set.family(), code).unwrap_or("-");
        println!(
            "  {:<8} {:<8} {:>10} seen {:>10} rows",
            code.cyan(),
            name,
            counts.seen,
            counts.appended
        );
    }

    if args.diagnostics && !set.diagnostics().is_empty() {
        println!("{}", "diagnostics:".yellow().bold());
        for diagnostic in set.diagnostics() {
            let field = diagnostic.field.as_deref().unwrap_or("-");
            println!(
                "  offset {:>10}  {:<8} {:<20} {}",
                diagnostic.offset, diagnostic.type_code, field, diagnostic.detail
            );
        }
    }

    if let Some(output) = &args.output {
        let written = set.export_parquet(output, &args.prefix)?;
        println!(
            "{} {} table(s) to {}",
            "exported".green(),
            written.len(),
            output.display()
        );
    }
    Ok(())
}

fn run_types(args: TypesArgs) -> Result<()> {
    let family: RecordFamily = args.family.into();
    println!("{} record types ({family} family):", "registered".bold());
    for (code, name) in schema_registry::known_types(family) {
        println!("  {:<6} {}", code.cyan(), name);
    }
    Ok(())
}
