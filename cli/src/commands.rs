pub mod sweep;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "rangehound")]
#[command(about = "Finds hostnames that resolve into a set of network ranges.")]
pub struct CommandLine {
    /// Read hostnames from this file, one per line
    #[arg(long = "name-file", default_value = "top1m.txt")]
    pub name_file: PathBuf,

    /// Stop looking (best effort) once this many matches have been found
    #[arg(short = 'n', long = "top", default_value_t = 50)]
    pub threshold: u64,

    /// How many parallel resolver threads to run
    #[arg(long, default_value_t = 200)]
    pub threads: usize,

    /// Primary CIDR source; http(s):// and file:// URLs or a plain path
    #[arg(long = "range-url", default_value = "https://www.cloudflare.com/ips-v4")]
    pub range_url: String,

    /// Secondary CIDR source; pass an empty string to disable it
    #[arg(long = "range-url2", default_value = "https://www.cloudflare.com/ips-v6")]
    pub range_url2: String,

    /// Only print result lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip the startup banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
