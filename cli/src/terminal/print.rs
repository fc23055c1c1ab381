use std::time::Duration;

use colored::*;

use rangehound_common::config::Config;
use rangehound_core::engine::SweepSummary;

pub const TOTAL_WIDTH: usize = 64;

const BANNER: &str = r#"
 █▀█ ▄▀█ █▄ █ █▀▀ █▀▀ █ █ █▀█ █ █ █▄ █ █▀▄
 █▀▄ █▀█ █ ▀█ █▄█ ██▄ █▀█ █▄█ █▄█ █ ▀█ █▄▀
"#;

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet {
        return;
    }

    eprintln!("{}", BANNER.bright_green().bold());
    let tagline = format!(
        "v{} — which of these names live in those ranges?",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{}", tagline.bright_black());
    eprintln!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

/// One result line per confirmed match, on stdout. The literal format is
/// the tool's primary output and scripts depend on it.
pub fn found(name: &str) {
    println!("{name} found.");
}

pub fn summary(summary: &SweepSummary, elapsed: Duration, cfg: &Config) {
    if cfg.quiet {
        return;
    }

    let matched = format!("{} matches", summary.matched).green().bold();
    let names = format!("{} names", summary.submitted).bold();
    let took = format!("{:.2}s", elapsed.as_secs_f64()).yellow().bold();

    eprintln!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
    eprintln!("Sweep complete: {matched} across {names} in {took}");
}
