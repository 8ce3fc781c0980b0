use glam::{Mat3, Mat4, Vec3};

/// Per-draw transforms for the lit pipelines.
///
/// The 3x3 normal matrix is stored as three vec4 columns to satisfy WGSL's
/// mat3x3 alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub view_pos: [f32; 3],
    pub _pad: f32,
}

impl ShapeUniforms {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4, view_pos: Vec3) -> Self {
        let normal = Mat3::from_mat4(model).inverse().transpose();

        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            normal: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
            view_pos: view_pos.to_array(),
            _pad: 0.0,
        }
    }
}

/// Point light data for the lit pipelines
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub _pad1: f32,
    pub color: [f32; 3],
    pub _pad2: f32,
    pub ambient: [f32; 3],
    pub _pad3: f32,
    pub diffuse: [f32; 3],
    pub _pad4: f32,
    pub specular: [f32; 3],
    pub _pad5: f32,
}

/// Material coefficients for the lit pipelines
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 3],
    pub _pad1: f32,
    pub diffuse: [f32; 3],
    pub _pad2: f32,
    pub specular: [f32; 3],
    pub shininess: f32,
}

/// MVP + flat color for the solid pipelines (light marker, direction line)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SolidUniform {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub _pad: f32,
}

impl SolidUniform {
    pub fn new(mvp: Mat4, color: Vec3) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            color: color.to_array(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<ShapeUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<MaterialUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<SolidUniform>() % 16, 0);
    }

    #[test]
    fn test_normal_matrix_of_identity_model() {
        let uniforms = ShapeUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO);
        assert_eq!(uniforms.normal[0][..3], [1.0, 0.0, 0.0]);
        assert_eq!(uniforms.normal[1][..3], [0.0, 1.0, 0.0]);
        assert_eq!(uniforms.normal[2][..3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_normal_matrix_undoes_nonuniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let uniforms = ShapeUniforms::new(model, Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO);

        // A +X face normal must stay +X after the inverse-transpose, only
        // its length changes before renormalization in the shader.
        let n = Vec3::new(
            uniforms.normal[0][0],
            uniforms.normal[0][1],
            uniforms.normal[0][2],
        );
        let n = n.normalize();
        assert!((n - Vec3::X).length() < 1e-5);
    }
}
