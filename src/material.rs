use crate::types::MaterialUniform;
use glam::Vec3;

/// Phong material coefficients. `color` is only used for the UI swatch;
/// the lit pipelines read the ambient/diffuse/specular terms.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub color: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ambient: self.ambient.to_array(),
            _pad1: 0.0,
            diffuse: self.diffuse.to_array(),
            _pad2: 0.0,
            specular: self.specular.to_array(),
            shininess: self.shininess,
        }
    }
}

/// The closed set of material presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Coral,
    Emerald,
    Gold,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Coral, MaterialKind::Emerald, MaterialKind::Gold];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::Coral => "Coral",
            MaterialKind::Emerald => "Emerald",
            MaterialKind::Gold => "Gold",
        }
    }

    pub fn material(&self) -> Material {
        match self {
            MaterialKind::Coral => Material {
                color: Vec3::new(1.0, 0.5, 0.31),
                ambient: Vec3::new(1.0, 0.5, 0.31),
                diffuse: Vec3::new(1.0, 0.5, 0.31),
                specular: Vec3::splat(0.5),
                shininess: 32.0,
            },
            MaterialKind::Emerald => Material {
                color: Vec3::new(80.0, 200.0, 120.0) / 255.0,
                ambient: Vec3::new(0.0215, 0.1745, 0.0215),
                diffuse: Vec3::new(0.07568, 0.61424, 0.07568),
                specular: Vec3::new(0.633, 0.727811, 0.633),
                shininess: 76.0,
            },
            MaterialKind::Gold => Material {
                color: Vec3::new(255.0, 215.0, 0.0) / 255.0,
                ambient: Vec3::new(0.24725, 0.1995, 0.0745),
                diffuse: Vec3::new(0.75164, 0.60648, 0.22648),
                specular: Vec3::new(0.628281, 0.555802, 0.366065),
                shininess: 0.4,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_have_labels() {
        let labels: Vec<_> = MaterialKind::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, ["Coral", "Emerald", "Gold"]);
    }

    #[test]
    fn test_preset_shininess() {
        assert_eq!(MaterialKind::Coral.material().shininess, 32.0);
        assert_eq!(MaterialKind::Emerald.material().shininess, 76.0);
        assert_eq!(MaterialKind::Gold.material().shininess, 0.4);
    }

    #[test]
    fn test_swatch_colors_are_normalized() {
        for kind in MaterialKind::ALL {
            let color = kind.material().color;
            assert!(color.max_element() <= 1.0);
            assert!(color.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_uniform_carries_coefficients() {
        let uniform = MaterialKind::Emerald.material().to_uniform();
        assert_eq!(uniform.ambient, [0.0215, 0.1745, 0.0215]);
        assert_eq!(uniform.shininess, 76.0);
    }
}
