mod app;
mod config;
mod lifelog;
mod logsource;
mod poller;
mod recorder;
mod screen;
mod session;
mod store;

use std::sync::Arc;
use eframe::egui;
use log::warn;

use crate::app::{App, APP_NAME};
use crate::config::{statuses_file_path, Config};
use crate::store::{PrefsStore, StatusStore};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = Config::load();
    let store: Arc<dyn StatusStore> = match statuses_file_path() {
        Some(path) => Arc::new(PrefsStore::open(path)),
        None => {
            warn!("no config directory available, statuses won't persist");
            Arc::new(PrefsStore::in_memory())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")).as_str(),
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, config, store)))),
    )
}
