use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, ensure};
use tracing::info;

use rangehound_common::config::Config;
use rangehound_common::network::range::RangeSet;
use rangehound_core::engine::{self, MatchSink, SweepConfig};
use rangehound_core::resolver::{Resolve, SystemResolver};

use crate::commands::CommandLine;
use crate::sources;
use crate::terminal::print;

/// Wires the whole pipeline together: open the name list, load the range
/// sources, then hand everything to the engine and report the outcome.
///
/// Everything up to the engine call is a startup error when it fails; the
/// engine itself only ever fails per job.
pub async fn run(args: &CommandLine, cfg: &Config) -> anyhow::Result<()> {
    ensure!(cfg.threads >= 1, "--threads must be at least 1");

    let names = File::open(&args.name_file)
        .with_context(|| format!("opening name file {}", args.name_file.display()))?;

    let mut ranges = RangeSet::new();
    for source in range_sources(args) {
        let body = sources::fetch(source).await?;
        ranges
            .extend_from_lines(body.as_bytes())
            .with_context(|| format!("reading CIDRs from {source}"))?;
    }
    info!("loaded {} CIDRs", ranges.len());

    let ranges = Arc::new(ranges);
    let resolver: Arc<dyn Resolve> = Arc::new(SystemResolver);
    let sweep_cfg = SweepConfig {
        workers: cfg.threads,
        threshold: cfg.threshold,
    };
    let on_match: MatchSink = Arc::new(|name: &str| print::found(name));

    let start = Instant::now();
    let reader = BufReader::new(names);
    let summary =
        tokio::task::spawn_blocking(move || {
            engine::sweep(reader, ranges, resolver, &sweep_cfg, on_match)
        })
        .await
        .context("sweep worker pool panicked")?;

    print::summary(&summary, start.elapsed(), cfg);
    Ok(())
}

/// The second source is optional; the empty string disables it, matching
/// the `--range-url2=""` convention.
fn range_sources(args: &CommandLine) -> Vec<&str> {
    let mut sources = vec![args.range_url.as_str()];
    if !args.range_url2.is_empty() {
        sources.push(args.range_url2.as_str());
    }
    sources
}
