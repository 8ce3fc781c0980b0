use glam::{Mat4, Vec3};
use shape_lab::camera::{Camera, MoveDirection, MAX_ZOOM, MIN_ZOOM, PITCH_LIMIT};
use shape_lab::scene::SceneState;

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_camera_at_origin_of_scene_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 1.0, 5.0));

        assert!((camera.front - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!((camera.right - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-4);
        assert!((camera.up - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_large_look_delta_clamps_pitch_instead_of_wrapping() {
        let mut camera = Camera::new(Vec3::ZERO);

        camera.adjust_orientation(0.0, 200.0, true);

        assert_eq!(camera.pitch, PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_never_leaves_its_bounds() {
        let mut camera = Camera::new(Vec3::ZERO);

        for delta in [0.5, -3.0, 100.0, -100.0, 44.0, -0.25] {
            camera.adjust_zoom(delta);
            assert!(camera.zoom >= MIN_ZOOM);
            assert!(camera.zoom <= MAX_ZOOM);
        }
    }

    #[test]
    fn test_walking_forward_then_back_returns_home() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.0, 5.0));
        camera.adjust_orientation(33.0, -12.0, true);
        let home = camera.position;

        camera.advance(MoveDirection::Forward, 0.25);
        camera.advance(MoveDirection::Backward, 0.25);

        assert!((camera.position - home).length() < 1e-4);
    }

    #[test]
    fn test_view_transform_centers_the_camera() {
        let camera = Camera::with_orientation(Vec3::new(-3.0, 2.0, 8.0), Vec3::Y, 140.0, 25.0);
        let view = camera.view_matrix();

        let eye = view.transform_point3(camera.position);
        assert!(eye.length() < 1e-4);

        let ahead = view.transform_point3(camera.position + camera.front);
        assert!(ahead.x.abs() < 1e-4);
        assert!(ahead.y.abs() < 1e-4);
        assert!(ahead.z < 0.0);
    }

    #[test]
    fn test_uniforms_carry_view_position_and_model() {
        let camera = Camera::new(Vec3::new(0.0, 1.0, 5.0));
        let mut scene = SceneState::default();
        scene.roll_shape(45.0);

        let uniforms = camera.to_uniforms(scene.shape_transform, 1.5);

        assert_eq!(uniforms.view_pos, [0.0, 1.0, 5.0]);
        assert_eq!(
            uniforms.model,
            Mat4::from_rotation_z(45.0_f32.to_radians()).to_cols_array_2d()
        );
    }

    #[test]
    fn test_basis_survives_a_long_look_session() {
        let mut camera = Camera::new(Vec3::ZERO);

        for step in 0..500 {
            let x = ((step * 7) % 23) as f32 - 11.0;
            let y = ((step * 13) % 17) as f32 - 8.0;
            camera.adjust_orientation(x, y, true);

            assert!(camera.pitch.abs() <= PITCH_LIMIT);
            assert!((camera.front.length() - 1.0).abs() < 1e-4);
            assert!(camera.front.dot(camera.right).abs() < 1e-4);
            assert!(camera.front.dot(camera.up).abs() < 1e-4);
        }
    }
}
