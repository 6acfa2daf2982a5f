//! 基础设施层

mod file_source;
#[cfg(unix)]
mod signals;

pub use file_source::FileCatalogSource;
#[cfg(unix)]
pub use signals::spawn_reload_signal_listener;
