use anyhow::Result;
use tracing::info;

use config::Config;

mod args;
mod config;
mod file;
mod generators;
mod header;

use crate::{args::get_command, generators::generate_vol};

pub fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = get_command().get_matches();
    let cfg = Config::from_args(&args)?;

    info!(?cfg, "Generating volume");
    generate_vol(&cfg)
}
