use super::helpers;

/// Depth attachment matching the swapchain size, so nearer points hide
/// farther ones across layers.
pub(crate) struct DepthTarget {
    // Owns the texture behind `view`
    _tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) = helpers::create_depth_texture(device, "depth_tex", width, height);
        Self { _tex: tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self._tex, self.view) = helpers::create_depth_texture(device, "depth_tex", width, height);
    }
}
