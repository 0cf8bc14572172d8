use crate::vertex::RasterPoint;
use cgmath::{Vector2 as Vec2, Vector3 as Vec3, dot};

/// 返回 (u, v, w)，分别对应顶点 0、1、2 的权重
pub fn get_barycentric_coords(
    vertices: &[Vec2<f32>; 3],
    p: &Vec2<f32>,
) -> Option<(f32, f32, f32)> {
    let v0 = vertices[1] - vertices[0];
    let v1 = vertices[2] - vertices[0];
    let v2 = *p - vertices[0];

    let d00 = dot(v0, v0);
    let d01 = dot(v0, v1);
    let d11 = dot(v1, v1);
    let d20 = dot(v2, v0);
    let d21 = dot(v2, v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-6 {
        return None; // 三角形面积为零，无法计算重心坐标
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    Some((u, v, w))
}

pub fn interpolate_depth(points: &[RasterPoint; 3], bary: (f32, f32, f32)) -> f32 {
    let (u, v, w) = bary;
    points[0].z * u + points[1].z * v + points[2].z * w
}

/// 透视校正后的重心坐标：先按 1/w 加权再归一化
pub fn perspective_weights(points: &[RasterPoint; 3], bary: (f32, f32, f32)) -> (f32, f32, f32) {
    let (u, v, w) = bary;
    let a = u * points[0].inv_w;
    let b = v * points[1].inv_w;
    let c = w * points[2].inv_w;
    let sum = a + b + c;
    if sum.abs() < f32::EPSILON {
        return bary;
    }
    (a / sum, b / sum, c / sum)
}

pub fn interpolate_color(points: &[RasterPoint; 3], weights: (f32, f32, f32)) -> Vec3<f32> {
    let (u, v, w) = weights;
    points[0].color * u + points[1].color * v + points[2].color * w
}

pub fn interpolate_normal(points: &[RasterPoint; 3], weights: (f32, f32, f32)) -> Vec3<f32> {
    let (u, v, w) = weights;
    points[0].normal * u + points[1].normal * v + points[2].normal * w
}

pub fn interpolate_uv(points: &[RasterPoint; 3], weights: (f32, f32, f32)) -> Vec2<f32> {
    let (u, v, w) = weights;
    points[0].uv * u + points[1].uv * v + points[2].uv * w
}

pub fn interpolate_world_pos(points: &[RasterPoint; 3], weights: (f32, f32, f32)) -> Vec3<f32> {
    let (u, v, w) = weights;
    points[0].world_pos * u + points[1].world_pos * v + points[2].world_pos * w
}

/// 包围盒，裁剪到 [0, width) x [0, height)；完全在屏幕外时返回 None
pub fn get_box(
    vertices: &[Vec2<f32>; 3],
    width: usize,
    height: usize,
) -> Option<(usize, usize, usize, usize)> {
    let mut min_x = vertices[0].x;
    let mut max_x = vertices[0].x;
    let mut min_y = vertices[0].y;
    let mut max_y = vertices[0].y;

    for v in vertices.iter().skip(1) {
        min_x = min_x.min(v.x);
        max_x = max_x.max(v.x);
        min_y = min_y.min(v.y);
        max_y = max_y.max(v.y);
    }

    if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_x < 0.0 || max_y < 0.0 || min_x >= width as f32 || min_y >= height as f32 {
        return None;
    }

    Some((
        min_x.floor().max(0.0) as usize,
        min_y.floor().max(0.0) as usize,
        (max_x.ceil() as usize).min(width.saturating_sub(1)),
        (max_y.ceil() as usize).min(height.saturating_sub(1)),
    ))
}

pub fn is_inside_triangle(vertices: &[Vec2<f32>; 3], p: &Vec2<f32>) -> bool {
    let v0 = vertices[1] - vertices[0];
    let v1 = vertices[2] - vertices[1];
    let v2 = vertices[0] - vertices[2];

    let p0 = *p - vertices[0];
    let p1 = *p - vertices[1];
    let p2 = *p - vertices[2];

    let cross0 = v0.x * p0.y - v0.y * p0.x;
    let cross1 = v1.x * p1.y - v1.y * p1.x;
    let cross2 = v2.x * p2.y - v2.y * p2.x;

    (cross0 >= 0.0 && cross1 >= 0.0 && cross2 >= 0.0)
        || (cross0 <= 0.0 && cross1 <= 0.0 && cross2 <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vec2<f32>; 3] {
        [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)]
    }

    #[test]
    fn barycentric_weights_match_vertices() {
        let (u, v, w) = get_barycentric_coords(&tri(), &Vec2::new(10.0, 0.0)).unwrap();
        assert!((u - 0.0).abs() < 1e-6 && (v - 1.0).abs() < 1e-6 && w.abs() < 1e-6);
        let (u, _, _) = get_barycentric_coords(&tri(), &Vec2::new(0.0, 0.0)).unwrap();
        assert!((u - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_triangle_has_no_coords() {
        let flat = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        assert!(get_barycentric_coords(&flat, &Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn inside_test_ignores_winding() {
        let mut t = tri();
        assert!(is_inside_triangle(&t, &Vec2::new(2.0, 2.0)));
        t.swap(1, 2);
        assert!(is_inside_triangle(&t, &Vec2::new(2.0, 2.0)));
        assert!(!is_inside_triangle(&t, &Vec2::new(8.0, 8.0)));
    }

    #[test]
    fn box_is_clipped_to_viewport() {
        let big = [Vec2::new(-50.0, -20.0), Vec2::new(500.0, 3.0), Vec2::new(4.0, 900.0)];
        assert_eq!(get_box(&big, 100, 80), Some((0, 0, 99, 79)));
        let off = [Vec2::new(-50.0, -20.0), Vec2::new(-5.0, 3.0), Vec2::new(-4.0, 9.0)];
        assert_eq!(get_box(&off, 100, 80), None);
    }
}
