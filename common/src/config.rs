/// Runtime settings shared across the sweep pipeline.
pub struct Config {
    /// How many parallel resolver threads to run. Must be at least one.
    pub threads: usize,

    /// Match count at which workers begin draining instead of resolving.
    ///
    /// Best effort: jobs already in flight when the threshold is crossed
    /// still complete, so the final count may overshoot.
    pub threshold: u64,

    /// Only emit result lines; suppresses the banner and the summary and
    /// raises the default log level to warnings.
    pub quiet: bool,

    /// Skips only the startup banner.
    pub no_banner: bool,
}
