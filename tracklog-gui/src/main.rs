use iced::application;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::components::App;

pub mod components;
pub mod config;

fn main() -> iced::Result {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set up logging: {err}");
    }

    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .run()
}
