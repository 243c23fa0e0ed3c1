use std::sync::Arc;

use log::{error, info};
use thiserror::Error;
use winit::{
    dpi::{PhysicalSize, Size},
    error::{EventLoopError, OsError},
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

use crate::{
    controllers::camera_controller::CameraController,
    render::{
        mesh_renderer::MeshRenderer,
        render_manager::{RenderManager, RenderSettings},
        texture::TextureSettings,
        RenderError,
    },
    shapes::ShapeError,
};

use super::{
    input_manager::{InputManager, InputSettings},
    showcase::ShowcaseSettings,
    time_manager::TimeManager,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("failed to open window: {0}")]
    Window(#[from] OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Clone, Debug)]
pub struct AppSettings {
    pub initial_size: Size,
    pub title: String,
    pub resizable: bool,
    pub target_frame_rate: u32,
    pub input_settings: InputSettings,
    pub render_settings: RenderSettings,
    pub texture_settings: TextureSettings,
    pub showcase_settings: ShowcaseSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            initial_size: Size::Physical(PhysicalSize::new(1024, 768)),
            title: "Shapes".into(),
            resizable: true,
            target_frame_rate: 60,
            input_settings: Default::default(),
            render_settings: Default::default(),
            texture_settings: Default::default(),
            showcase_settings: Default::default(),
        }
    }
}

pub struct App {
    event_loop: Option<EventLoop<()>>,
    window: Arc<Window>,
    min_render_time: f32,
    render_timer: f32,
    time_manager: TimeManager,
    input_manager: InputManager,
    render_manager: RenderManager,
    camera_controller: CameraController,
}

impl App {
    pub async fn new(settings: &AppSettings) -> Result<App, AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let window = Arc::new(
            WindowBuilder::new()
                .with_inner_size(settings.initial_size)
                .with_title(settings.title.clone())
                .with_resizable(settings.resizable)
                .build(&event_loop)?,
        );

        let mut render_manager =
            RenderManager::new(&settings.render_settings, window.clone()).await?;

        let camera_controller = CameraController::new(render_manager.camera());

        let mut mesh_renderer = MeshRenderer::new(&render_manager, &settings.texture_settings);
        settings
            .showcase_settings
            .populate(&mut mesh_renderer, render_manager.device())?;
        render_manager.add_renderer(Box::new(mesh_renderer));

        Ok(App {
            event_loop: Some(event_loop),
            window,
            min_render_time: 1.0 / settings.target_frame_rate.max(1) as f32,
            render_timer: 0.0,
            time_manager: TimeManager::new(),
            input_manager: InputManager::new(&settings.input_settings),
            render_manager,
            camera_controller,
        })
    }

    pub fn run(mut self) -> Result<(), AppError> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };

        info!("entering event loop");
        event_loop.run(move |event, elwt| self.handle_event(event, elwt))?;

        Ok(())
    }

    fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => self.render_manager.handle_resize(size),
                WindowEvent::KeyboardInput { event, .. } => {
                    self.input_manager.handle_keyboard_input(&event)
                }
                WindowEvent::RedrawRequested => self.render(elwt),
                _ => (),
            },
            Event::AboutToWait => self.update(elwt),
            _ => (),
        }
    }

    fn update(&mut self, elwt: &EventLoopWindowTarget<()>) {
        self.time_manager.update();
        self.render_timer += self.time_manager.delta();

        if self.input_manager.exit_requested() {
            info!("exit requested");
            elwt.exit();
            return;
        }

        self.camera_controller
            .update(&self.input_manager, self.render_manager.camera_mut());
        self.input_manager.late_update();

        if self.render_timer >= self.min_render_time {
            self.render_timer = 0.0;
            self.window.request_redraw();
        }
    }

    fn render(&mut self, elwt: &EventLoopWindowTarget<()>) {
        if let Err(err) = self.render_manager.render(self.time_manager.elapsed()) {
            error!("rendering stopped: {err}");
            elwt.exit();
        }
    }
}
