use crate::types::LightUniform;
use glam::Vec3;

/// How the selected shape is shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    Phong,
    Gouraud,
}

impl ShadingModel {
    pub const ALL: [ShadingModel; 2] = [ShadingModel::Phong, ShadingModel::Gouraud];

    pub fn label(&self) -> &'static str {
        match self {
            ShadingModel::Phong => "Phong",
            ShadingModel::Gouraud => "Gouraud",
        }
    }
}

/// Point light with per-term intensities
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    /// Orbit position for the animated mode, bounded in [-2, 2] per axis.
    pub fn orbit_position(time: f32) -> Vec3 {
        Vec3::new(
            (time * 2.0).sin() * 2.0,
            (time * 0.7).sin() * 2.0,
            (time * 1.3).sin() * 2.0,
        )
    }

    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: self.position.to_array(),
            _pad1: 0.0,
            color: self.color.to_array(),
            _pad2: 0.0,
            ambient: self.ambient.to_array(),
            _pad3: 0.0,
            diffuse: self.diffuse.to_array(),
            _pad4: 0.0,
            specular: self.specular.to_array(),
            _pad5: 0.0,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.2, 1.85, -1.0),
            color: Vec3::new(2.0, 1.0, 1.0),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_stays_bounded() {
        let mut t = 0.0;
        while t < 20.0 {
            let p = Light::orbit_position(t);
            assert!(p.abs().max_element() <= 2.0 + 1e-5);
            t += 0.05;
        }
    }

    #[test]
    fn test_orbit_actually_moves() {
        assert!(Light::orbit_position(0.0).distance(Light::orbit_position(0.5)) > 0.1);
    }

    #[test]
    fn test_default_light() {
        let light = Light::default();
        assert_eq!(light.position, Vec3::new(1.2, 1.85, -1.0));
        assert_eq!(light.ambient, Vec3::splat(0.2));
    }
}
