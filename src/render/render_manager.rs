use std::{cell::RefCell, iter, sync::Arc};

use glam::{UVec2, Vec3};
use log::{info, warn};
use wgpu::{
    Adapter, Color, Device, DeviceDescriptor, Instance, LoadOp, Operations, PresentMode, Queue,
    RenderPassColorAttachment, RenderPassDepthStencilAttachment, RenderPassDescriptor,
    RequestAdapterOptions, StoreOp, Surface, SurfaceConfiguration, SurfaceError, Texture,
    TextureFormat, TextureUsages, TextureView,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::utils::create_texture_2d;

use super::{
    renderer::{Renderer, RenderingContext},
    scene::{Camera, GlobalLight, SceneBindGroup, SceneUniform},
    RenderError,
};

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    pub clear_color: Color,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub camera_fov: f32,
    pub camera_near_plane: f32,
    pub camera_far_plane: f32,
    pub global_light: GlobalLight,
    pub ambient_light: Vec3,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: Color {
                r: 0.05,
                g: 0.05,
                b: 0.08,
                a: 1.0,
            },
            camera_position: Vec3::new(0.0, 0.0, 14.0),
            camera_target: Vec3::ZERO,
            camera_fov: 60.0,
            camera_near_plane: 0.1,
            camera_far_plane: 100.0,
            global_light: GlobalLight::default(),
            ambient_light: Vec3::splat(0.25),
        }
    }
}

pub struct RenderManager {
    settings: RenderSettings,
    surface_config: SurfaceConfiguration,
    surface: Surface<'static>,
    device: Device,
    queue: RefCell<Queue>,
    depth_texture: Texture,
    depth_view: TextureView,
    camera: Camera,
    scene_bind_group: SceneBindGroup,
    renderers: Vec<Box<dyn Renderer>>,
}

impl RenderManager {
    pub async fn new(
        settings: &RenderSettings,
        window: Arc<Window>,
    ) -> Result<RenderManager, RenderError> {
        let instance = Instance::new(Default::default());

        let size = surface_size(window.inner_size());
        let surface = instance.create_surface(window)?;

        let (adapter, device, queue) = Self::create_wgpu_objects(&instance, &surface).await?;
        info!("using adapter {}", adapter.get_info().name);

        let surface_config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &surface_config);

        let depth_texture = create_depth_texture(&device, size);
        let depth_view = depth_texture.create_view(&Default::default());

        let camera = create_camera(settings, size);

        let scene_bind_group = SceneBindGroup::new(
            &device,
            SceneUniform::new(settings.global_light, settings.ambient_light),
        );

        Ok(RenderManager {
            settings: *settings,
            surface_config,
            surface,
            device,
            queue: RefCell::new(queue),
            depth_texture,
            depth_view,
            camera,
            scene_bind_group,
            renderers: Vec::new(),
        })
    }

    pub fn add_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &RefCell<Queue> {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.surface_config.format
    }

    pub fn depth_format(&self) -> TextureFormat {
        self.depth_texture.format()
    }

    pub fn scene_bind_group(&self) -> &SceneBindGroup {
        &self.scene_bind_group
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        let size = surface_size(size);
        if size.cmpeq(UVec2::ZERO).any() {
            return;
        }

        self.surface_config.width = size.x;
        self.surface_config.height = size.y;
        self.surface.configure(&self.device, &self.surface_config);

        self.depth_texture = create_depth_texture(&self.device, size);
        self.depth_view = self.depth_texture.create_view(&Default::default());
        self.camera.set_aspect_ratio(aspect_ratio(size));
    }

    /// Records and presents one frame. A lost or outdated surface is
    /// reconfigured and the frame is skipped.
    pub fn render(&mut self, time: f32) -> Result<(), RenderError> {
        let surface = match self.surface.get_current_texture() {
            Ok(surface) => surface,
            Err(err @ (SurfaceError::Lost | SurfaceError::Outdated)) => {
                warn!("{err}, reconfiguring surface");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let surface_view = surface.texture.create_view(&Default::default());

        let mut uniform = *self.scene_bind_group.uniform();
        uniform.view_proj_matrix = self.camera.view_proj_matrix();
        uniform.camera_pos = self.camera.position();
        uniform.time = time;
        self.scene_bind_group
            .update_uniform(&self.queue.borrow(), &uniform);

        let encoder = RefCell::new(Some(
            self.device.create_command_encoder(&Default::default()),
        ));

        let context = RenderingContext::new(
            &surface_view,
            &self.depth_view,
            self.scene_bind_group.bind_group(),
            &self.queue,
            &encoder,
            time,
        );

        self.clear_surface(&context);

        for renderer in &mut self.renderers {
            renderer.render(&context);
        }

        if let Some(encoder) = encoder.into_inner() {
            self.queue.borrow().submit(iter::once(encoder.finish()));
        }

        surface.present();

        Ok(())
    }

    async fn create_wgpu_objects(
        instance: &Instance,
        surface: &Surface<'static>,
    ) -> Result<(Adapter, Device, Queue), RenderError> {
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                compatible_surface: Some(surface),
                ..Default::default()
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    label: Some("device"),
                    ..Default::default()
                },
                None,
            )
            .await?;

        Ok((adapter, device, queue))
    }

    fn create_surface_config(
        surface: &Surface,
        adapter: &Adapter,
        size: UVec2,
    ) -> SurfaceConfiguration {
        let surface_capabilities = surface.get_capabilities(adapter);
        let surface_format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or(surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8UnormSrgb);
        let present_mode = if surface_capabilities
            .present_modes
            .contains(&PresentMode::AutoVsync)
        {
            PresentMode::AutoVsync
        } else {
            PresentMode::Fifo
        };
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or_default();

        SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.x.max(1),
            height: size.y.max(1),
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        }
    }

    fn clear_surface(&self, context: &RenderingContext) {
        let mut encoder_ref = context.encoder().borrow_mut();
        let Some(encoder) = encoder_ref.as_mut() else {
            return;
        };

        encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("clear"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: context.surface_view(),
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(self.settings.clear_color),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: context.depth_view(),
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });
    }
}

fn surface_size(size: PhysicalSize<u32>) -> UVec2 {
    mint::Vector2::from(size).into()
}

fn aspect_ratio(size: UVec2) -> f32 {
    size.x.max(1) as f32 / size.y.max(1) as f32
}

fn create_camera(settings: &RenderSettings, size: UVec2) -> Camera {
    Camera::new(
        settings.camera_position,
        settings.camera_target,
        settings.camera_fov,
        aspect_ratio(size),
        settings.camera_near_plane,
        settings.camera_far_plane,
    )
}

fn create_depth_texture(device: &Device, size: UVec2) -> Texture {
    create_texture_2d(
        device,
        DEPTH_FORMAT,
        size.x.max(1),
        size.y.max(1),
        TextureUsages::RENDER_ATTACHMENT,
    )
}
