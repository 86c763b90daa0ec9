use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use wobble_core::{InputState, TimeClock};
use wobble_gui::{ControlPanel, GuiBatch};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::graphics::GraphicsState;
use crate::traits::WobbleApp;

/// Frames between periodic FPS log lines.
const FPS_LOG_INTERVAL: u64 = 300;

struct Runner<A: WobbleApp> {
    app: A,
    config: AppConfig,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    panel: ControlPanel,
    input: InputState,
    clock: TimeClock,
    window_size: (u32, u32),
}

impl<A: WobbleApp> Runner<A> {
    fn new(app: A, config: AppConfig) -> Self {
        let window_size = (config.width, config.height);
        Self {
            app,
            config,
            window: None,
            graphics: None,
            panel: ControlPanel::new(),
            input: InputState::new(),
            clock: TimeClock::new(),
            window_size,
        }
    }
}

impl<A: WobbleApp> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        self.app.configure_panel(&mut self.panel);

        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window_size = (self.config.width, self.config.height);

        let mut gfx = match pollster::block_on(GraphicsState::new(window.clone(), &self.config)) {
            Ok(g) => g,
            Err(e) => {
                log::error!("GPU initialization failed: {e:#}");
                event_loop.exit();
                return;
            }
        };

        // User setup: assets, materials, initial meshes. Any failure here is
        // startup-fatal; nothing can render without them.
        {
            let events = Vec::new();
            let mut ctx = AppContext {
                input: &self.input,
                time: self.clock.peek(),
                window_size: self.window_size,
                panel: &mut self.panel,
                panel_events: &events,
                exit_requested: false,
            };
            if let Err(e) = self.app.setup(&mut gfx.renderer, &mut ctx) {
                log::error!("startup failed: {e:#}");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.graphics = Some(gfx);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // The panel sees events first so widget interaction wins over app
        // shortcuts; it also keeps the shared InputState current.
        self.panel.handle_window_event(&event, &mut self.input);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let Some(gfx) = &mut self.graphics else { return };
                gfx.resize(size.width, size.height);
                self.window_size = (size.width, size.height);

                let events = Vec::new();
                let mut ctx = AppContext {
                    input: &self.input,
                    time: self.clock.peek(),
                    window_size: self.window_size,
                    panel: &mut self.panel,
                    panel_events: &events,
                    exit_requested: false,
                };
                self.app.on_resize(self.window_size, &mut ctx);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gfx), Some(window)) = (&mut self.graphics, &self.window) else {
            return;
        };

        let time = self.clock.tick();
        if time.frame_count > 0 && time.frame_count % FPS_LOG_INTERVAL == 0 {
            log::debug!("frame {} at {:.1} fps", time.frame_count, time.fps);
        }

        // ── Update ────────────────────────────────────────────────────────
        let panel_events = self.panel.drain_events();
        let exit = {
            let mut ctx = AppContext {
                input: &self.input,
                time,
                window_size: self.window_size,
                panel: &mut self.panel,
                panel_events: &panel_events,
                exit_requested: false,
            };
            self.app.update(&mut ctx);
            ctx.exit_requested
        };
        if exit {
            event_loop.exit();
            return;
        }

        // ── Draw ──────────────────────────────────────────────────────────
        let frame = match gfx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.window_size;
                gfx.resize(w, h);
                window.request_redraw();
                return;
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                window.request_redraw();
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gfx.renderer.begin_frame();
        gfx.renderer.clear(&mut encoder, &view);

        {
            let mut ctx = AppContext {
                input: &self.input,
                time,
                window_size: self.window_size,
                panel: &mut self.panel,
                panel_events: &panel_events,
                exit_requested: false,
            };
            if let Err(e) = self
                .app
                .draw_scene(&mut gfx.renderer, &mut encoder, &view, &mut ctx)
            {
                // usage error: surface it loudly, keep the loop alive
                log::error!("scene draw rejected: {e}");
            }
        }

        // panel overlay on top of the resolved scene
        let mut batch = GuiBatch::new();
        self.panel.draw(&mut batch);
        gfx.gui_renderer
            .render(&mut encoder, &view, &batch, &gfx.context.queue);

        gfx.context.queue.submit(Some(encoder.finish()));
        frame.present();

        window.request_redraw();
    }
}

pub(crate) fn run_internal<A: WobbleApp + 'static>(
    config: AppConfig,
    app: A,
) -> anyhow::Result<()> {
    let mut runner = Runner::new(app, config);
    let event_loop = EventLoop::new()?;
    // Poll: drive frames continuously, like a game loop.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner)?;
    Ok(())
}
