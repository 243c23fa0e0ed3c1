use std::cell::RefCell;

use wgpu::{BindGroup, CommandEncoder, Queue, TextureView};

/// Everything a renderer needs to record one frame.
pub struct RenderingContext<'a> {
    surface_view: &'a TextureView,
    depth_view: &'a TextureView,
    scene_bind_group: &'a BindGroup,
    queue: &'a RefCell<Queue>,
    encoder: &'a RefCell<Option<CommandEncoder>>,
    time: f32,
}

impl<'a> RenderingContext<'a> {
    pub fn new(
        surface_view: &'a TextureView,
        depth_view: &'a TextureView,
        scene_bind_group: &'a BindGroup,
        queue: &'a RefCell<Queue>,
        encoder: &'a RefCell<Option<CommandEncoder>>,
        time: f32,
    ) -> RenderingContext<'a> {
        RenderingContext {
            surface_view,
            depth_view,
            scene_bind_group,
            queue,
            encoder,
            time,
        }
    }

    pub fn surface_view(&self) -> &'a TextureView {
        self.surface_view
    }

    pub fn depth_view(&self) -> &'a TextureView {
        self.depth_view
    }

    pub fn scene_bind_group(&self) -> &'a BindGroup {
        self.scene_bind_group
    }

    pub fn queue(&self) -> &'a RefCell<Queue> {
        self.queue
    }

    pub fn encoder(&self) -> &'a RefCell<Option<CommandEncoder>> {
        self.encoder
    }

    /// Seconds since the app started.
    pub fn time(&self) -> f32 {
        self.time
    }
}

pub trait Renderer {
    fn render(&mut self, context: &RenderingContext);
}
