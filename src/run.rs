//! End-to-end run: read the log, build distributions, render one image each.

use crate::Result;
use crate::log::{self, ConfigurationKey};
use crate::model::Distribution;
use crate::render;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub log_file: PathBuf,
    pub output_dir: PathBuf,
    /// Delete the log once every configuration has been rendered.
    pub remove_log_file: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    /// Configurations whose data segments held no points.
    pub skipped: Vec<ConfigurationKey>,
}

pub fn run(opts: &RunOptions) -> Result<RunSummary> {
    // 1) Group segments by configuration.
    let groups = log::parse_log_file(&opts.log_file)?;
    info!(
        "found {} configurations in {}",
        groups.len(),
        opts.log_file.display()
    );

    // 2) Decode every configuration before touching the output directory.
    let distributions = groups
        .into_iter()
        .map(|(key, text)| Distribution::from_events(key, &text))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // 3) Render.
    fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("create output dir {}", opts.output_dir.display()))?;

    let mut summary = RunSummary::default();
    for d in &distributions {
        debug!("{}", d);
        if d.is_empty() {
            warn!("{}: no execution points, skipping", d.key());
            summary.skipped.push(d.key().clone());
            continue;
        }
        let path = render::render_distribution(d, &opts.output_dir)?;
        info!("wrote {}", path.display());
        summary.written.push(path);
    }

    // 4) Only a fully successful run consumes the log.
    if opts.remove_log_file {
        fs::remove_file(&opts.log_file)
            .with_context(|| format!("remove log file {}", opts.log_file.display()))?;
        info!("removed {}", opts.log_file.display());
    }

    Ok(summary)
}
