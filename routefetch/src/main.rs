mod compute;
mod distances;
mod land;
mod options;
mod presets;
mod progress;
mod report;

use anyhow::Result;
use clap::Parser;
use options::Cli;
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli {
        Cli::Compute(compute) => compute.run(),
        Cli::Distances(distances) => distances.run(),
    }
}
