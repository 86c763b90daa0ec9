use wobble_core::Color;

use crate::runner;
use crate::traits::WobbleApp;

/// Window and renderer configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// MSAA sample count; 1 disables multisampling.
    pub msaa_samples: u32,
    pub clear_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Wobble".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            msaa_samples: 4,
            clear_color: Color::rgb(0.2, 0.2, 0.2),
        }
    }
}

/// Builder-style entry point.
pub struct App<A: WobbleApp> {
    config: AppConfig,
    app_state: A,
}

impl<A: WobbleApp + 'static> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn with_msaa(mut self, samples: u32) -> Self {
        self.config.msaa_samples = samples;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Runs the event loop until the window closes.
    pub fn run(self) -> anyhow::Result<()> {
        runner::run_internal(self.config, self.app_state)
    }
}
