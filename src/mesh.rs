use glam::Vec3;

/// Vertex layout shared by every pipeline: position + normal
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// The closed set of primitives the demo can display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Cuboid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Pyramid, ShapeKind::Cuboid];

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Pyramid => "Pyramid",
            ShapeKind::Cuboid => "Cuboid",
        }
    }

    /// Triangle-list mesh with per-face normals, centered at the origin.
    pub fn vertices(&self) -> Vec<Vertex> {
        match self {
            ShapeKind::Cube => cuboid(Vec3::splat(0.5)),
            ShapeKind::Cuboid => cuboid(Vec3::new(0.75, 0.5, 0.35)),
            ShapeKind::Pyramid => pyramid(0.5, 1.0),
        }
    }

    /// Index into the renderer's per-shape vertex buffer table.
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::Cube => 0,
            ShapeKind::Pyramid => 1,
            ShapeKind::Cuboid => 2,
        }
    }
}

fn push_triangle(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3) {
    let normal = (b - a).cross(c - a).normalize().to_array();
    for p in [a, b, c] {
        out.push(Vertex {
            position: p.to_array(),
            normal,
        });
    }
}

fn push_quad(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
    push_triangle(out, a, b, c);
    push_triangle(out, a, c, d);
}

/// Axis-aligned box from half extents: 6 faces, 36 vertices.
fn cuboid(h: Vec3) -> Vec<Vertex> {
    let mut v = Vec::with_capacity(36);

    // corners: +/- h on each axis
    let p = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);

    // front (+Z) and back (-Z)
    push_quad(&mut v, p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.));
    push_quad(&mut v, p(1., -1., -1.), p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.));
    // left (-X) and right (+X)
    push_quad(&mut v, p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.));
    push_quad(&mut v, p(1., -1., 1.), p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.));
    // top (+Y) and bottom (-Y)
    push_quad(&mut v, p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.), p(-1., 1., -1.));
    push_quad(&mut v, p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.));

    v
}

/// Square-based pyramid: 4 sides + 2 base triangles, 18 vertices.
fn pyramid(half_base: f32, height: f32) -> Vec<Vertex> {
    let mut v = Vec::with_capacity(18);

    let y0 = -height / 2.0;
    let apex = Vec3::new(0.0, height / 2.0, 0.0);

    let fl = Vec3::new(-half_base, y0, half_base);
    let fr = Vec3::new(half_base, y0, half_base);
    let br = Vec3::new(half_base, y0, -half_base);
    let bl = Vec3::new(-half_base, y0, -half_base);

    push_triangle(&mut v, fl, fr, apex);
    push_triangle(&mut v, fr, br, apex);
    push_triangle(&mut v, br, bl, apex);
    push_triangle(&mut v, bl, fl, apex);

    // base faces downwards
    push_quad(&mut v, bl, br, fr, fl);

    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(kind: ShapeKind) -> Vec<Vec3> {
        kind.vertices()
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect()
    }

    #[test]
    fn test_vertex_counts() {
        assert_eq!(ShapeKind::Cube.vertices().len(), 36);
        assert_eq!(ShapeKind::Cuboid.vertices().len(), 36);
        assert_eq!(ShapeKind::Pyramid.vertices().len(), 18);
    }

    #[test]
    fn test_triangle_lists() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.vertices().len() % 3, 0, "{}", kind.label());
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        for kind in ShapeKind::ALL {
            for vertex in kind.vertices() {
                let n = Vec3::from_array(vertex.normal);
                assert!((n.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_normals_match_face_winding() {
        for kind in ShapeKind::ALL {
            let vertices = kind.vertices();
            for tri in vertices.chunks(3) {
                let a = Vec3::from_array(tri[0].position);
                let b = Vec3::from_array(tri[1].position);
                let c = Vec3::from_array(tri[2].position);
                let face = (b - a).cross(c - a).normalize();
                for v in tri {
                    assert!(face.dot(Vec3::from_array(v.normal)) > 0.999);
                }
            }
        }
    }

    #[test]
    fn test_meshes_are_centered_at_origin() {
        for kind in ShapeKind::ALL {
            let pts = positions(kind);
            let min = pts.iter().copied().fold(Vec3::splat(f32::MAX), Vec3::min);
            let max = pts.iter().copied().fold(Vec3::splat(f32::MIN), Vec3::max);
            assert!((min + max).length() < 1e-5, "{}", kind.label());
        }
    }

    #[test]
    fn test_cube_bounds() {
        let pts = positions(ShapeKind::Cube);
        for p in pts {
            assert!(p.abs().max_element() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_cuboid_is_not_a_cube() {
        let pts = positions(ShapeKind::Cuboid);
        let max = pts.iter().copied().fold(Vec3::splat(f32::MIN), Vec3::max);
        assert!(max.x > max.y && max.y > max.z);
    }
}
