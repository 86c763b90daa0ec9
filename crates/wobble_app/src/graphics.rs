use std::sync::Arc;

use winit::window::Window;

use wobble_core::GpuContext;
use wobble_gui::GuiRenderer;
use wobble_renderer::Renderer;

use crate::config::AppConfig;

/// Surface, renderer and panel pipeline bundled together; created once the
/// window exists.
pub struct GraphicsState {
    pub context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub renderer: Renderer,
    pub gui_renderer: GuiRenderer,
}

impl GraphicsState {
    pub async fn new(window: Arc<Window>, config: &AppConfig) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        // Arc<Window> keeps the surface 'static without unsafe.
        let surface = instance.create_surface(window)?;
        let context = GpuContext::for_surface(instance, Some(&surface)).await?;

        let caps = surface.get_capabilities(&context.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let present_mode = if config.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: config.width.max(1),
            height: config.height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&context.device, &surface_config);

        let mut renderer = Renderer::new(
            context.device.clone(),
            context.queue.clone(),
            surface_config.width,
            surface_config.height,
            format,
            config.msaa_samples,
        );
        renderer.set_clear_color(config.clear_color);

        let gui_renderer = GuiRenderer::new(
            context.device.clone(),
            format,
            256,
            surface_config.width,
            surface_config.height,
        );

        Ok(Self {
            context,
            surface,
            surface_config,
            renderer,
            gui_renderer,
        })
    }

    /// Reconfigures the swapchain and size-dependent GPU resources.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.context.device, &self.surface_config);
        self.renderer.resize(width, height);
        self.gui_renderer.resize(&self.context.queue, width, height);
    }
}
