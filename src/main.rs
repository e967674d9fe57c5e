mod app_logic;
mod core;
mod shell;

use crate::app_logic::ConfigToolLogic;
use crate::core::{CoreSettingsStore, default_ini_path};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::sync::Arc;

fn main() {
    // Warn level keeps the interactive prompt clean; raise when debugging.
    if let Err(e) = TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {e}");
    }

    let ini_path = default_ini_path();
    log::debug!("Main: Using settings file {ini_path:?}");

    let store = Arc::new(CoreSettingsStore::new());
    let mut logic = ConfigToolLogic::new(store, ini_path);

    if let Err(e) = shell::run(&mut logic) {
        eprintln!("Terminal I/O error: {e}");
        std::process::exit(1);
    }
}
