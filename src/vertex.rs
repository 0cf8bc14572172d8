use cgmath::{InnerSpace, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4, Zero};

/// 材质参数（高光部分）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub specular: Vec3<f32>,
    pub specular_strength: f32,
    pub shininess: f32,
}

impl Material {
    /// 镀锌板，高光比较集中
    pub fn metal() -> Self {
        Self {
            specular: Vec3::new(0.9, 0.92, 0.95),
            specular_strength: 0.6,
            shininess: 48.0,
        }
    }

    pub fn wood() -> Self {
        Self {
            specular: Vec3::new(0.3, 0.25, 0.2),
            specular_strength: 0.1,
            shininess: 8.0,
        }
    }

    /// 地面，几乎没有高光
    pub fn matte() -> Self {
        Self {
            specular: Vec3::new(1.0, 1.0, 1.0),
            specular_strength: 0.02,
            shininess: 4.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::matte()
    }
}

/// 带颜色信息的顶点（用于插值计算）
#[derive(Debug, Clone, Copy)]
pub struct ColoredVertex {
    pub pos: Vec3<f32>,
    pub color: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
}

impl Default for ColoredVertex {
    fn default() -> Self {
        ColoredVertex {
            pos: Vec3::zero(),
            color: Vec3::zero(),
            normal: Vec3::new(0.0, 1.0, 0.0),
            uv: Vec2::zero(),
        }
    }
}

/// 顶点着色之后、裁剪之前的顶点
#[derive(Debug, Clone, Copy)]
pub struct ClipSpaceVertex {
    pub position: Vec4<f32>,
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>,
}

/// 光栅化阶段的 2D 点（带颜色和深度）
#[derive(Debug, Clone, Copy)]
pub struct RasterPoint {
    pub pos: Vec2<f32>,
    pub z: f32,
    /// 1/w，用于透视校正插值
    pub inv_w: f32,
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>,
}

#[derive(Debug, Clone, Copy)]
pub struct RasterTriangle {
    pub vertices: [RasterPoint; 3],
    pub material: Material,
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [ColoredVertex; 3],
    pub normal: Vec3<f32>,
    pub material: Material,
}

impl Triangle {
    fn compute_normal(v0: &ColoredVertex, v1: &ColoredVertex, v2: &ColoredVertex) -> Vec3<f32> {
        let edge1 = v1.pos - v0.pos;
        let edge2 = v2.pos - v0.pos;
        edge1.cross(edge2).normalize()
    }

    pub fn new(v0: ColoredVertex, v1: ColoredVertex, v2: ColoredVertex, material: Material) -> Self {
        let normal = Self::compute_normal(&v0, &v1, &v2);
        Self {
            vertices: [v0, v1, v2],
            normal,
            material,
        }
    }

    pub fn get_center(&self) -> Vec3<f32> {
        (self.vertices[0].pos + self.vertices[1].pos + self.vertices[2].pos) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> ColoredVertex {
        ColoredVertex {
            pos: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    #[test]
    fn normal_follows_winding() {
        let tri = Triangle::new(
            vertex(0.0, 0.0, 0.0),
            vertex(1.0, 0.0, 0.0),
            vertex(0.0, 1.0, 0.0),
            Material::default(),
        );
        assert_eq!(tri.normal, Vec3::new(0.0, 0.0, 1.0));
        assert!((tri.get_center() - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).magnitude() < 1e-6);
    }
}
