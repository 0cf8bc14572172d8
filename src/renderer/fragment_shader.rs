use cgmath::{ElementWise, InnerSpace, Vector2 as Vec2, Vector3 as Vec3};

use crate::renderer::Light; // 从 renderer 模块导入 Light
use crate::texture::Texture;
use crate::vertex::Material;

#[derive(Debug)]
pub struct FragmentData<'a> {
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>, // 顶点颜色插值结果
    pub texture: Option<&'a Texture>,
    pub material: &'a Material,
    pub camera_pos: Vec3<f32>,
}

impl FragmentData<'_> {
    // 有纹理时纹理色乘以顶点色
    fn base_color(&self) -> Vec3<f32> {
        match self.texture {
            Some(tex) => tex.sample(self.uv).mul_element_wise(self.color),
            None => self.color,
        }
    }
}

// 定义 Shader 的通用行为
pub trait FragmentShader: Sync {
    // 输入插值后的片元数据，输出最终的颜色 (0.0 ~ 1.0 范围的 Vec3)
    fn shade(&self, data: FragmentData) -> Vec3<f32>;
}

fn specular(light: &Light, data: &FragmentData, normal: Vec3<f32>) -> Vec3<f32> {
    let light_dir = light.direction.normalize();
    // 视线方向（从像素到相机）
    let view_dir = (data.camera_pos - data.world_pos).normalize();
    let half_dir = (-light_dir + view_dir).normalize();
    let spec = normal.dot(half_dir).max(0.0).powf(data.material.shininess);
    light.color.mul_element_wise(data.material.specular) * data.material.specular_strength * spec
}

fn clamp_color(mut color: Vec3<f32>) -> Vec3<f32> {
    color.x = color.x.clamp(0.0, 1.0);
    color.y = color.y.clamp(0.0, 1.0);
    color.z = color.z.clamp(0.0, 1.0);
    color
}

//经典冯模型
pub struct PhongShader {
    pub light: Light,
}

impl FragmentShader for PhongShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        let normal = data.normal.normalize();
        let base_color = data.base_color();

        let ambient = self.light.ambient_color * self.light.ambient_strength;
        let diff = normal.dot(-self.light.direction.normalize()).max(0.0);
        let diffuse = self.light.color * self.light.intensity * diff;
        let specular = specular(&self.light, &data, normal);

        clamp_color(base_color.mul_element_wise(ambient + diffuse) + specular)
    }
}

//非线性漫反射：卡通风格渲染
pub struct ToonShader {
    pub light: Light,
}

impl FragmentShader for ToonShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        let normal = data.normal.normalize();
        let base_color = data.base_color();

        let ambient = self.light.ambient_color * self.light.ambient_strength;
        let diff = normal.dot(-self.light.direction.normalize()).max(0.0);
        let diffuse = if diff > 0.6 {
            self.light.color * self.light.intensity * 1.1
        } else if diff > 0.2 {
            self.light.color * self.light.intensity * 0.8
        } else {
            self.light.color * self.light.intensity * 0.5
        };

        let split_level = 4.0;
        let s = specular(&self.light, &data, normal);
        let s = Vec3::new(
            (s.x * split_level).floor() / split_level,
            (s.y * split_level).floor() / split_level,
            (s.z * split_level).floor() / split_level,
        );

        clamp_color(base_color.mul_element_wise(ambient + diffuse) + s)
    }
}

pub struct NormalDebugShader;

impl FragmentShader for NormalDebugShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        (data.normal.normalize() + Vec3::new(1.0, 1.0, 1.0)) * 0.5
    }
}
