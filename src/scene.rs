use crate::light::{Light, ShadingModel};
use crate::material::MaterialKind;
use crate::mesh::ShapeKind;
use glam::{Mat4, Vec3};

/// Degrees per second for the Q/E roll keys
pub const SHAPE_ROLL_SPEED: f32 = 80.0;
/// Degrees of tilt per scroll step in the scroll-rotates variant
pub const SHAPE_TILT_STEP: f32 = 5.0;

/// All per-frame mutable demo state outside the camera, gathered into one
/// struct owned by the frame loop instead of process-wide globals.
pub struct SceneState {
    pub shape: ShapeKind,
    pub light_shape: ShapeKind,
    pub material: MaterialKind,
    pub shading: ShadingModel,
    pub light: Light,
    pub rotate_light: bool,
    pub show_light_direction: bool,
    pub shape_transform: Mat4,
    /// Nominal shape position; only the direction line targets it.
    pub shape_position: Vec3,
}

impl SceneState {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            light_shape: ShapeKind::Cube,
            material: MaterialKind::Coral,
            shading: ShadingModel::Phong,
            light: Light::default(),
            rotate_light: false,
            show_light_direction: true,
            shape_transform: Mat4::IDENTITY,
            shape_position: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Roll the shape about its local Z axis (Q/E keys).
    pub fn roll_shape(&mut self, degrees: f32) {
        self.shape_transform *= Mat4::from_rotation_z(degrees.to_radians());
    }

    /// Tilt the shape about its local X axis (scroll wheel variant).
    pub fn tilt_shape(&mut self, degrees: f32) {
        self.shape_transform *= Mat4::from_rotation_x(degrees.to_radians());
    }

    /// Advance the light orbit when enabled. Returns true if the light
    /// moved.
    pub fn advance_light(&mut self, time: f32) -> bool {
        if self.rotate_light {
            self.light.position = Light::orbit_position(time);
        }
        self.rotate_light
    }

    /// Model transform for the small marker drawn at the light position.
    pub fn light_model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.light.position)
            * Mat4::from_scale(Vec3::splat(0.3))
            * Mat4::from_axis_angle(Vec3::X, 55.0_f32.to_radians())
    }

    /// Endpoints of the light-direction line in world space.
    pub fn light_line(&self) -> [Vec3; 2] {
        [self.light.position, self.shape_position]
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(ShapeKind::Cube)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let scene = SceneState::default();
        assert_eq!(scene.shape, ShapeKind::Cube);
        assert_eq!(scene.material, MaterialKind::Coral);
        assert_eq!(scene.shading, ShadingModel::Phong);
        assert!(!scene.rotate_light);
        assert!(scene.show_light_direction);
        assert_eq!(scene.shape_transform, Mat4::IDENTITY);
    }

    #[test]
    fn test_roll_round_trip() {
        let mut scene = SceneState::default();
        scene.roll_shape(30.0);
        scene.roll_shape(-30.0);
        let got = scene.shape_transform.to_cols_array();
        let want = Mat4::IDENTITY.to_cols_array();
        for (a, b) in got.iter().zip(want.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_static_light_does_not_move() {
        let mut scene = SceneState::default();
        let before = scene.light.position;
        assert!(!scene.advance_light(3.0));
        assert_eq!(scene.light.position, before);
    }

    #[test]
    fn test_orbiting_light_moves() {
        let mut scene = SceneState::default();
        scene.rotate_light = true;
        assert!(scene.advance_light(1.0));
        assert_ne!(scene.light.position, Light::default().position);
    }

    #[test]
    fn test_light_marker_sits_at_light() {
        let scene = SceneState::default();
        let marker = scene.light_model_matrix().transform_point3(Vec3::ZERO);
        assert!((marker - scene.light.position).length() < 1e-5);
    }

    #[test]
    fn test_light_line_tracks_light() {
        let mut scene = SceneState::default();
        scene.light.position = Vec3::new(4.0, 0.0, 2.0);
        let [from, to] = scene.light_line();
        assert_eq!(from, Vec3::new(4.0, 0.0, 2.0));
        assert_eq!(to, scene.shape_position);
    }
}
