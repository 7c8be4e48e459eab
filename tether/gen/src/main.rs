//! Tether helper generator
//!
//! Scans a crate's sources for `#[http_action]` structs and writes one
//! helper per action.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tether_gen::codegen::{DEFAULT_RUNTIME_PATH, EmitterConfig, HELPER_SUFFIX};
use tether_gen::errors::GeneratorError;
use tether_gen::output::{DirSink, FailureMode, FileSink, MemorySink, generate_all};
use tether_gen::scanner::scan_dir;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Tether helper generator - binds HTTP actions to requests and responses
#[derive(Parser, Debug)]
#[command(name = "tether-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source directory to scan for actions
    #[arg(long, default_value = "src")]
    src: PathBuf,

    /// Source root the helper files are mirrored under, next to their actions
    #[arg(short, long, default_value = "src")]
    out: PathBuf,

    /// Suffix appended to action names to form helper names
    #[arg(long, default_value = HELPER_SUFFIX)]
    suffix: String,

    /// Path of the runtime crate as seen from generated code
    #[arg(long, default_value = DEFAULT_RUNTIME_PATH)]
    runtime_path: String,

    /// Print generated helpers without writing files
    #[arg(long)]
    dry_run: bool,

    /// Keep generating after a failing action and report all errors
    #[arg(long)]
    keep_going: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing from RUST_LOG or the verbosity flags, writing to stderr
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,tether_gen=info".to_string(),
            2 => "info,tether_gen=debug".to_string(),
            _ => "debug,tether_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EmitterConfig::default()
        .with_suffix(cli.suffix)
        .with_runtime_path(cli.runtime_path);
    config.validate()?;

    let mode = if cli.keep_going {
        FailureMode::KeepGoing
    } else {
        FailureMode::FailFast
    };

    let actions = scan_dir(&cli.src)?;
    if actions.is_empty() {
        eprintln!(
            "{} no #[http_action] structs found under {}",
            "warning:".yellow().bold(),
            cli.src.display()
        );
        return Ok(());
    }

    let mut memory = MemorySink::new();
    let mut dir = DirSink::new(&cli.out);
    let sink: &mut dyn FileSink = if cli.dry_run { &mut memory } else { &mut dir };

    let report = generate_all(&actions, &config, sink, mode)?;

    for artifact in memory.artifacts() {
        println!("// ---- {}::{} ----", artifact.package, artifact.class_name);
        println!("{}", artifact.source);
    }

    for error in &report.errors {
        eprintln!("{} {error}", "error:".red().bold());
    }

    let target = if cli.dry_run {
        "stdout".to_string()
    } else {
        cli.out.display().to_string()
    };
    eprintln!(
        "{} {} helper(s) to {target}",
        "generated".green().bold(),
        report.emitted.len()
    );

    report.into_result().map(|_| ())
}
