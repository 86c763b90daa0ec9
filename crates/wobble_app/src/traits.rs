use wobble_gui::ControlPanel;
use wobble_renderer::{RenderResult, Renderer};

use crate::context::AppContext;

/// The trait every wobble application implements.
///
/// All methods have default implementations, so an app only overrides the
/// stages it needs. Startup errors from `setup` abort initialization;
/// errors from `draw_scene` are logged by the runner and the frame is
/// presented without the failed pass.
#[allow(unused_variables)]
pub trait WobbleApp {
    /// Registers controls and actions on the panel. Called once before the
    /// window appears.
    fn configure_panel(&mut self, panel: &mut ControlPanel) {}

    /// Called once after the GPU is ready: load assets, compile materials,
    /// build the initial scene.
    fn setup(&mut self, renderer: &mut Renderer, ctx: &mut AppContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Per-frame logic before rendering: consume panel events, advance the
    /// parameter block, rebuild invalidated meshes.
    fn update(&mut self, ctx: &mut AppContext) {}

    /// Records this frame's scene passes. The runner has already cleared
    /// color and depth; the panel overlay is drawn afterwards.
    fn draw_scene(
        &mut self,
        renderer: &mut Renderer,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        ctx: &mut AppContext,
    ) -> RenderResult<()> {
        Ok(())
    }

    /// Called after the swapchain was reconfigured for a new window size.
    /// Update camera aspect ratio and projection here; the change takes
    /// effect on the next frame.
    fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut AppContext) {}
}
