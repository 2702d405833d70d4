use std::error::Error;
use std::io::{self, BufWriter, Write};

use clap::Parser;
use collatz_cache::config::Config;
use collatz_cache::report::Report;
use collatz_cache::sampler::Sampler;
use collatz_cache::step_cache::StepCache;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load(Config::parse())?;
    config.validate()?;

    // Logs go to stderr, stdout carries one line per sample.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level()?)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(?config, "configuration loaded");
    info!(
        policy = config.policy.as_str(),
        capacity = config.cache_size,
        min = config.min,
        max = config.max,
        samples = config.samples,
        "starting"
    );

    let mut cache = StepCache::new(config.policy, config.cache_size);
    let mut report = Report::create(config.output.as_deref())?;
    let mut out = BufWriter::new(io::stdout().lock());

    for number in Sampler::new(config.min..=config.max, config.seed).take(config.samples) {
        let (steps, hit) = cache.lookup_or_compute(number);
        report.record(&mut out, number, steps, hit)?;
    }
    out.flush()?;

    report.finish(&cache)?;
    Ok(())
}
