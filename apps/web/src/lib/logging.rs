//! Routes `tracing` events to the browser console. Debug builds log at
//! `debug`, release builds only surface warnings and errors.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*};
use tracing_web::MakeWebConsoleWriter;

pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let console = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(level);

    if tracing_subscriber::registry().with(console).try_init().is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
}
