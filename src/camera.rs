use crate::types::ShapeUniforms;
use glam::{Mat4, Vec3};
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 5.5;
pub const DEFAULT_SENSITIVITY: f32 = 1.0;
pub const DEFAULT_ZOOM: f32 = 90.0;

pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Discrete movement commands issued by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Held-key flags, one per movement command
#[derive(Default, Clone, Copy)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementState {
    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyW => self.forward = is_pressed,
                KeyCode::KeyS => self.backward = is_pressed,
                KeyCode::KeyA => self.left = is_pressed,
                KeyCode::KeyD => self.right = is_pressed,
                _ => {}
            }
        }
    }
}

/// First-person fly camera.
///
/// Yaw and pitch are stored in degrees. The basis vectors `front`, `right`
/// and `up` are always derived from yaw/pitch/`world_up` and never set
/// directly; every path that edits the angles must call
/// [`refresh_basis`](Camera::refresh_basis) afterwards.
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub sensitivity: f32,
    pub zoom: f32,
    pub movement: MovementState,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: world_up,
            world_up,
            yaw,
            pitch,
            movement_speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            movement: MovementState::default(),
        };
        camera.refresh_basis();
        camera
    }

    /// World-to-camera transform looking along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Displace along the basis; orientation is untouched and the position
    /// is unconstrained in world space.
    pub fn advance(&mut self, direction: MoveDirection, delta: f32) {
        let velocity = self.movement_speed * delta;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Fold the held-key flags into movement for this frame.
    pub fn apply_movement(&mut self, delta: f32) {
        if self.movement.forward {
            self.advance(MoveDirection::Forward, delta);
        }
        if self.movement.backward {
            self.advance(MoveDirection::Backward, delta);
        }
        if self.movement.left {
            self.advance(MoveDirection::Left, delta);
        }
        if self.movement.right {
            self.advance(MoveDirection::Right, delta);
        }
    }

    /// Continuous look input. Deltas are scaled by sensitivity; pitch is
    /// clamped to keep the basis away from the poles unless the caller
    /// opts out.
    pub fn adjust_orientation(&mut self, x_delta: f32, y_delta: f32, constrain_pitch: bool) {
        self.yaw += x_delta * self.sensitivity;
        self.pitch += y_delta * self.sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.refresh_basis();
    }

    /// Scroll zoom, clamped to keep the projection well-defined.
    pub fn adjust_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Re-derive `front`/`right`/`up` from the current yaw/pitch.
    ///
    /// Public because the UI panel edits the yaw/pitch fields directly and
    /// calls this afterwards; that path skips the pitch clamp, so the two
    /// update paths intentionally differ. `right` degenerates if `front`
    /// ends up parallel to `world_up`. The clamp on the continuous path
    /// keeps that unreachable there; direct assignment is not guarded.
    pub fn refresh_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Perspective transform from the current zoom and viewport aspect.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, 0.1, 100.0)
    }

    pub fn to_uniforms(&self, model: Mat4, aspect: f32) -> ShapeUniforms {
        ShapeUniforms::new(
            model,
            self.view_matrix(),
            self.projection_matrix(aspect),
            self.position,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
