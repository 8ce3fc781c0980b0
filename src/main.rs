use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use shape_lab::camera::Camera;
use shape_lab::cli::Cli;
use shape_lab::frame::FrameClock;
use shape_lab::renderer::ShapeRenderer;
use shape_lab::scene::{SceneState, SHAPE_ROLL_SPEED, SHAPE_TILT_STEP};

const INITIAL_WINDOW_WIDTH: u32 = 1200;
const INITIAL_WINDOW_HEIGHT: u32 = 800;

/// Pixel deltas to look degrees in mouse-look mode, applied before the
/// camera's own sensitivity.
const MOUSE_LOOK_SCALE: f32 = 0.1;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<ShapeRenderer>,
    camera: Camera,
    scene: SceneState,
    frames: FrameClock,
    roll_ccw: bool,
    roll_cw: bool,
    last_cursor: Option<(f32, f32)>,
}

impl App {
    fn new(cli: Cli) -> Self {
        let scene = SceneState::new(cli.shape.into());
        Self {
            cli,
            window: None,
            renderer: None,
            camera: Camera::new(glam::Vec3::new(0.0, 1.0, 5.0)),
            scene,
            frames: FrameClock::new(),
            roll_ccw: false,
            roll_cw: false,
            last_cursor: None,
        }
    }

    fn handle_keyboard(&mut self, event: &KeyEvent) {
        self.camera.movement.process_keyboard(event);

        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyQ => self.roll_ccw = is_pressed,
                KeyCode::KeyE => self.roll_cw = is_pressed,
                _ => {}
            }
        }
    }

    fn handle_cursor(&mut self, x: f32, y: f32) {
        if !self.cli.mouse_look {
            return;
        }

        // First event only seeds the reference point, otherwise the camera
        // would snap on the initial cursor position.
        if let Some((last_x, last_y)) = self.last_cursor {
            let x_delta = (x - last_x) * MOUSE_LOOK_SCALE;
            let y_delta = (last_y - y) * MOUSE_LOOK_SCALE;
            self.camera.adjust_orientation(x_delta, y_delta, true);
        }
        self.last_cursor = Some((x, y));
    }

    fn handle_scroll(&mut self, y_delta: f32) {
        if self.cli.mouse_look {
            self.camera.adjust_zoom(y_delta);
        } else {
            self.scene.tilt_shape(y_delta * SHAPE_TILT_STEP);
        }
    }

    fn update_and_render(&mut self) {
        let frame = self.frames.next().expect("frame clock is infinite");

        self.camera.apply_movement(frame.delta);

        if self.roll_ccw {
            self.scene.roll_shape(SHAPE_ROLL_SPEED * frame.delta);
        }
        if self.roll_cw {
            self.scene.roll_shape(-SHAPE_ROLL_SPEED * frame.delta);
        }

        self.scene.advance_light(frame.time);

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        match renderer.render(&mut self.camera, &mut self.scene, window, !self.cli.no_ui) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.size();
                renderer.resize(size);
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Geometry shapes")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            if self.cli.mouse_look {
                window.set_cursor_visible(false);
            }

            let renderer = match pollster::block_on(ShapeRenderer::new(window.clone(), &self.scene))
            {
                Ok(r) => r,
                Err(e) => {
                    log::error!("failed to initialize renderer: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_keyboard(&event),
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.handle_scroll(y_delta);
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.update_and_render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("controls: WASD move, Q/E roll shape, scroll tilt/zoom, Escape quits");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
