mod commands;
mod sources;
mod terminal;

use commands::{CommandLine, sweep};
use rangehound_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    logging::init(args.quiet);

    let cfg = Config {
        threads: args.threads,
        threshold: args.threshold,
        quiet: args.quiet,
        no_banner: args.no_banner,
    };
    print::banner(&cfg);

    sweep::run(&args, &cfg).await
}
