//! Off-screen color and depth attachments, MSAA-aware.
//!
//! With MSAA enabled the passes render into the multisampled color texture
//! and resolve into the swapchain view; without it they draw the swapchain
//! view directly. The depth attachment always matches the color sample
//! count.

use crate::resources::texture::{self, RenderTextureDesc};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct RenderTarget {
    // views keep the underlying textures alive; the texture handles are not
    // needed again after creation
    msaa_view: Option<wgpu::TextureView>,
    depth_view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    sample_count: u32,
    width: u32,
    height: u32,
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let msaa_view = Self::make_msaa(device, width, height, format, sample_count);
        let depth_view = Self::make_depth(device, width, height, sample_count);

        Self {
            msaa_view,
            depth_view,
            format,
            sample_count,
            width,
            height,
        }
    }

    /// Recreates the attachments when the window changes size. Early-outs
    /// without GPU allocation if the dimensions are unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;

        self.msaa_view = Self::make_msaa(device, width, height, self.format, self.sample_count);
        self.depth_view = Self::make_depth(device, width, height, self.sample_count);
    }

    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    #[inline]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Returns the `(render_view, resolve_target)` pair for a pass that
    /// should end up on `surface_view`.
    pub fn color_attachment_views<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.msaa_view {
            Some(msaa) => (msaa, Some(surface_view)),
            None => (surface_view, None),
        }
    }

    fn make_msaa(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let tex = texture::create_render_texture(
            device,
            &RenderTextureDesc {
                label: "Color MSAA Texture",
                width,
                height,
                format,
                sample_count,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            },
        );
        Some(texture::default_view(&tex))
    }

    fn make_depth(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let tex = texture::create_render_texture(
            device,
            &RenderTextureDesc {
                label: "Depth Texture",
                width,
                height,
                format: DEPTH_FORMAT,
                sample_count,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            },
        );
        texture::default_view(&tex)
    }
}
