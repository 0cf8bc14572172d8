use crate::vertex::{ClipSpaceVertex, ColoredVertex, Triangle};
use cgmath::{InnerSpace, Matrix, Matrix4 as Mat4, SquareMatrix};

/// 一次绘制调用内不变的矩阵
pub struct VertexShaderUniforms {
    pub model: Mat4<f32>,
    pub mvp: Mat4<f32>,
    /// 模型矩阵的逆转置，模型矩阵不可逆时退化为单位阵
    pub normal: Mat4<f32>,
}

impl VertexShaderUniforms {
    pub fn new(model: &Mat4<f32>, view_proj: &Mat4<f32>) -> Self {
        Self {
            model: *model,
            mvp: view_proj * model,
            normal: model.invert().unwrap_or(Mat4::identity()).transpose(),
        }
    }
}

pub trait VertexShader {
    fn shade_vertex(&self, vertex: &ColoredVertex, uniforms: &VertexShaderUniforms) -> ClipSpaceVertex;

    fn shade_triangle(&self, triangle: &Triangle, uniforms: &VertexShaderUniforms) -> [ClipSpaceVertex; 3] {
        triangle.vertices.map(|v| self.shade_vertex(&v, uniforms))
    }
}

pub struct DefaultVertexShader;

impl VertexShader for DefaultVertexShader {
    fn shade_vertex(&self, v: &ColoredVertex, uniforms: &VertexShaderUniforms) -> ClipSpaceVertex {
        let pos = v.pos.extend(1.0);
        ClipSpaceVertex {
            position: uniforms.mvp * pos,
            world_pos: (uniforms.model * pos).truncate(),
            normal: (uniforms.normal * v.normal.extend(0.0)).truncate().normalize(),
            uv: v.uv,
            color: v.color,
        }
    }
}
