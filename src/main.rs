use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod error;
mod log;
mod model;
mod render;
mod run;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "iterdist-viz")]
#[command(about = "Render per-schedule iteration/thread distributions from a loop log", long_about = None)]
struct Cli {
    /// Log produced by the scheduling driver.
    #[arg(long = "log_file", default_value = "logs.txt")]
    log_file: PathBuf,

    /// Directory for the rendered images (created if missing).
    #[arg(long = "output_dir", default_value = "./distributions")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let opts = run::RunOptions {
        log_file: cli.log_file,
        output_dir: cli.output_dir,
        remove_log_file: true,
    };
    let summary = run::run(&opts)?;
    println!(
        "Wrote {} images to {} ({} skipped)",
        summary.written.len(),
        opts.output_dir.display(),
        summary.skipped.len()
    );

    Ok(())
}
