//! 把 `BoxShape` 展开成三角形，另外提供地面网格

use cgmath::{InnerSpace, Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3};

use crate::shed::BoxShape;
use crate::vertex::{ColoredVertex, Material, Triangle};

// 每个面：四个角（逆时针，从外面看）和法线
#[rustfmt::skip]
const BOX_FACES: [([[f32; 3]; 4], [f32; 3]); 6] = [
    // +X
    ([[1., -1., 1.], [1., -1., -1.], [1., 1., -1.], [1., 1., 1.]], [1., 0., 0.]),
    // -X
    ([[-1., -1., -1.], [-1., -1., 1.], [-1., 1., 1.], [-1., 1., -1.]], [-1., 0., 0.]),
    // +Y
    ([[-1., 1., 1.], [1., 1., 1.], [1., 1., -1.], [-1., 1., -1.]], [0., 1., 0.]),
    // -Y
    ([[-1., -1., -1.], [1., -1., -1.], [1., -1., 1.], [-1., -1., 1.]], [0., -1., 0.]),
    // +Z
    ([[-1., -1., 1.], [1., -1., 1.], [1., 1., 1.], [-1., 1., 1.]], [0., 0., 1.]),
    // -Z
    ([[1., -1., -1.], [-1., -1., -1.], [-1., 1., -1.], [1., 1., -1.]], [0., 0., -1.]),
];

const FACE_UVS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];

/// 长方体的模型矩阵：先绕 X 轴旋转再平移
pub fn box_transform(shape: &BoxShape) -> Mat4<f32> {
    Mat4::from_translation(shape.position) * Mat4::from_angle_x(shape.rotation_x)
}

/// 12 个三角形，顶点已经在世界坐标里
pub fn box_triangles(shape: &BoxShape, color: Vec3<f32>, material: Material) -> Vec<Triangle> {
    let transform = box_transform(shape);
    let half = shape.size / 2.0;
    let mut triangles = Vec::with_capacity(12);

    for (corners, normal) in BOX_FACES.iter() {
        let normal = (transform * Vec3::from(*normal).extend(0.0)).truncate().normalize();
        let verts: Vec<ColoredVertex> = corners
            .iter()
            .zip(FACE_UVS.iter())
            .map(|(c, uv)| {
                let local = Vec3::new(c[0] * half.x, c[1] * half.y, c[2] * half.z);
                ColoredVertex {
                    pos: (transform * local.extend(1.0)).truncate(),
                    color,
                    normal,
                    uv: Vec2::new(uv[0], uv[1]),
                }
            })
            .collect();

        triangles.push(Triangle::new(verts[0], verts[1], verts[2], material));
        triangles.push(Triangle::new(verts[2], verts[3], verts[0], material));
    }
    triangles
}

/// 以原点为中心的棋盘格地面，略低于 y=0 避免和墙底重叠
pub fn ground_plane(half_extent: f32, cells: usize) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(cells * cells * 2);
    let cell_size = half_extent * 2.0 / cells as f32;
    let y = -0.01;
    let normal = Vec3::new(0.0, 1.0, 0.0);

    let color1 = Vec3::new(0.42, 0.55, 0.36);
    let color2 = Vec3::new(0.38, 0.50, 0.33);

    for z_idx in 0..cells {
        for x_idx in 0..cells {
            let x0 = -half_extent + x_idx as f32 * cell_size;
            let x1 = x0 + cell_size;
            let z0 = -half_extent + z_idx as f32 * cell_size;
            let z1 = z0 + cell_size;
            let color = if (x_idx + z_idx) % 2 == 0 { color1 } else { color2 };

            let corner = |x: f32, z: f32, u: f32, v: f32| ColoredVertex {
                pos: Vec3::new(x, y, z),
                color,
                normal,
                uv: Vec2::new(u, v),
            };
            let v0 = corner(x0, z1, 0.0, 0.0);
            let v1 = corner(x1, z1, 1.0, 0.0);
            let v2 = corner(x1, z0, 1.0, 1.0);
            let v3 = corner(x0, z0, 0.0, 1.0);

            triangles.push(Triangle::new(v0, v1, v2, Material::matte()));
            triangles.push(Triangle::new(v2, v3, v0, Material::matte()));
        }
    }
    triangles
}
