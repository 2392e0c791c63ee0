use genposter_config::Config;

use crate::app::App;

mod app;
mod download;
mod logging;
mod playback;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    let config = Config::load()?;
    tracing::info!(?config, log = ?log_path, "starting genposter");

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}
