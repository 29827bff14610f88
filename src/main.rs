mod cli;

use shortform::{
    batch::{BatchReport, BatchRunner, FfmpegEncoder},
    config, preset,
};

use anyhow::Result;
use clap::Parser;
use cli::{BatchArgs, Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "shortform=debug,shortform_av=debug".to_string()
        } else {
            "shortform=info,shortform_av=info".to_string()
        }
    });

    // Status lines go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => run_batch(cli.batch, cli.config.as_deref()),
        Some(Commands::Presets) => list_presets(),
        Some(Commands::CheckTools) => check_tools(),
        Some(Commands::Validate {
            config: config_path,
        }) => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
    }
}

fn run_batch(args: BatchArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = config::load_config_or_default(config_path)?;
    let batch = config
        .batch
        .with_overrides(args.input, args.output, args.preset);
    let preset = preset::resolve(&batch.preset);

    let stop = Arc::new(AtomicBool::new(false));
    let encoder = match FfmpegEncoder::discover(config.tools.ffmpeg_path.as_deref()) {
        Ok(encoder) => encoder,
        // A dry run only prints commands, so a missing ffmpeg is not fatal.
        Err(e) if args.dry_run => {
            tracing::warn!("{}; showing commands for plain `ffmpeg`", e);
            FfmpegEncoder::new(PathBuf::from("ffmpeg"))
        }
        Err(e) => return Err(e.into()),
    }
    .with_stop_signal(Arc::clone(&stop));

    let runner = BatchRunner::new(encoder)
        .with_stop_signal(Arc::clone(&stop))
        .dry_run(args.dry_run);

    tracing::debug!(
        "Batch: {:?} -> {:?} with preset {}",
        batch.input_dir,
        batch.output_dir,
        preset
    );

    // The batch blocks on one ffmpeg at a time; the runtime only exists to
    // turn Ctrl+C / SIGTERM into a raised stop flag.
    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async move {
        let mut worker = tokio::task::spawn_blocking(move || {
            runner.run(&batch.input_dir, &batch.output_dir, preset)
        });

        tokio::select! {
            result = &mut worker => result,
            _ = shutdown_signal() => {
                stop.store(true, Ordering::Relaxed);
                worker.await
            }
        }
    })??;

    Ok(exit_code(&report))
}

fn exit_code(report: &BatchReport) -> ExitCode {
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "{} of {} job(s) failed",
            report.failed(),
            report.results.len()
        );
        ExitCode::FAILURE
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Interrupt received, stopping batch");
}

fn list_presets() -> Result<ExitCode> {
    println!(
        "{:<10} {:>6} {:>6} {:>4} {:>8}  {}",
        "PRESET", "WIDTH", "HEIGHT", "FPS", "BITRATE", "CODEC"
    );
    for p in preset::presets() {
        let marker = if p.name == preset::DEFAULT_PRESET {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<10} {:>6} {:>6} {:>4} {:>8}  {}{}",
            p.name, p.width, p.height, p.frame_rate, p.video_bitrate, p.video_codec, marker
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn check_tools() -> Result<ExitCode> {
    println!("Checking external tools...\n");

    let tools = shortform_av::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg (with NVENC support) to run batches.");
    }

    Ok(ExitCode::SUCCESS)
}

fn validate_config(path: Option<&Path>) -> Result<ExitCode> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_batch_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            print_batch_config(&config);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_batch_config(config: &config::Config) {
    println!("  Input: {}", config.batch.input_dir.display());
    println!("  Output: {}", config.batch.output_dir.display());
    println!("  Preset: {}", preset::resolve(&config.batch.preset));
    match config.tools.ffmpeg_path {
        Some(ref ffmpeg) => println!("  ffmpeg: {}", ffmpeg.display()),
        None => println!("  ffmpeg: (from PATH)"),
    }
}
