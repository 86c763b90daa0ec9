//! Windowing and frame-loop plumbing for wobble applications.
//!
//! An application implements [`WobbleApp`] and hands an instance to
//! [`App`], which owns the winit event loop, the GPU surface, the control
//! panel and the per-frame cadence: update, clear, scene draws, panel
//! overlay, present.

pub mod config;
pub mod context;
pub mod graphics;
pub mod runner;
pub mod traits;

pub use config::{App, AppConfig};
pub use context::AppContext;
pub use traits::WobbleApp;

/// Installs the console logger. Call once, before `App::run`.
pub fn init_logging() -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
