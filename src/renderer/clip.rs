use crate::camera::NEAR_PLANE;
use crate::vertex::ClipSpaceVertex;

pub trait Clipper {
    // 接收一个裁剪空间的三角形
    // 返回一个 Vec，其中包含裁剪后产生的零个、一个或多个三角形
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]>;
}

// 只做"丢弃"的裁剪器：任意顶点穿过近平面就整个丢掉
pub struct SimpleClipper;

impl Clipper for SimpleClipper {
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]> {
        if triangle.iter().any(|v| v.position.w < NEAR_PLANE) {
            vec![]
        } else {
            vec![*triangle]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4, Zero};

    fn vertex(w: f32) -> ClipSpaceVertex {
        ClipSpaceVertex {
            position: Vec4::new(0.0, 0.0, 0.0, w),
            world_pos: Vec3::zero(),
            normal: Vec3::unit_y(),
            uv: Vec2::zero(),
            color: Vec3::zero(),
        }
    }

    #[test]
    fn drops_triangles_crossing_near_plane() {
        let clipper = SimpleClipper;
        assert_eq!(clipper.clip_triangle(&[vertex(2.0), vertex(3.0), vertex(4.0)]).len(), 1);
        assert!(clipper.clip_triangle(&[vertex(2.0), vertex(-1.0), vertex(4.0)]).is_empty());
    }
}
