mod commands;
mod config;
mod fonts;
mod layout;
mod shortcuts;
mod studio;

use tilepaint_engine::logging::init_logging;
use tilepaint_engine::window::Runtime;

use crate::commands::NativePicker;
use crate::config::StudioConfig;
use crate::studio::Studio;

fn main() -> anyhow::Result<()> {
    let config = StudioConfig::from_args(std::env::args());
    init_logging(config.logging.clone());
    log::info!("starting {} ({}x{})", config.title, config.width, config.height);

    let studio = Studio::new(&config, NativePicker);
    Runtime::run(config.runtime(), studio)
}
