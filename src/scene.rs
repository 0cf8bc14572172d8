//! 场景更新：把 `shed::build` 的纯数据结果挂到场景上
//!
//! 每次重建都丢弃上一批物体，不做增量比较。墙面纹理只在启动时生成一次，
//! 之后只改平铺次数；屋顶纹理每次重建都重新生成（新的随机颗粒）。

use cgmath::{Matrix4 as Mat4, SquareMatrix, Vector3 as Vec3};
use rand::Rng;
use tracing::debug;

use crate::mesh;
use crate::params::ShedParameters;
use crate::renderer::Renderer;
use crate::renderer::fragment_shader::FragmentShader;
use crate::shed::{self, ShedModel, ShedPart};
use crate::texture::{CorrugationParams, Texture};
use crate::vertex::{Material, Triangle};

const WALL_TINT: Vec3<f32> = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
const BEAM_COLOR: Vec3<f32> = Vec3 { x: 0.42, y: 0.30, z: 0.20 };
const ROOF_TINT: Vec3<f32> = Vec3 { x: 0.95, y: 0.97, z: 1.0 };

pub struct SceneObject {
    pub part: ShedPart,
    pub triangles: Vec<Triangle>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSettings {
    pub wall: CorrugationParams,
    pub roof: CorrugationParams,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            wall: CorrugationParams::wall(),
            roof: CorrugationParams::roof(),
        }
    }
}

pub struct ShedScene {
    objects: Vec<SceneObject>,
    ground: Vec<Triangle>,
    wall_texture: Texture,
    roof_texture: Texture,
    roof_params: CorrugationParams,
    model: Option<ShedModel>,
}

impl ShedScene {
    pub fn new<R: Rng>(settings: TextureSettings, rng: &mut R) -> Self {
        Self {
            objects: Vec::new(),
            ground: Vec::new(),
            wall_texture: Texture::corrugated(&settings.wall, rng),
            roof_texture: Texture::corrugated(&settings.roof, rng),
            roof_params: settings.roof,
            model: None,
        }
    }

    /// 重建整个棚屋，返回新的模型描述
    pub fn rebuild<R: Rng>(&mut self, params: &ShedParameters, rng: &mut R) -> &ShedModel {
        let model = shed::build(params);
        debug!(
            angle_deg = model.roof_angle.0.to_degrees(),
            ridge_rise = model.ridge_rise,
            roof_y = model.roof_y,
            panel_width = model.panel_width,
            roof_length = model.roof_length,
            "重建棚屋"
        );

        self.objects.clear();
        for shape in model.shapes() {
            let (color, material) = match shape.part {
                ShedPart::Walls => (WALL_TINT, Material::wood()),
                ShedPart::Beam => (BEAM_COLOR, Material::wood()),
                ShedPart::Roof => (ROOF_TINT, Material::metal()),
            };
            self.objects.push(SceneObject {
                part: shape.part,
                triangles: mesh::box_triangles(shape, color, material),
            });
        }

        self.wall_texture
            .set_repeat(params.length() / 4.0, params.height() / 2.0);

        let roof_params = self.roof_params;
        let mut roof_texture = Texture::corrugated(&roof_params, rng);
        roof_texture.set_repeat(model.roof_length / 4.0, model.panel_width / 2.0);
        self.roof_texture = roof_texture;

        // 地面跟着占地面积变大
        let half_extent = params.length().max(params.width()) * 1.5;
        self.ground = mesh::ground_plane(half_extent, 12);

        self.model.insert(model)
    }

    pub fn model(&self) -> Option<&ShedModel> {
        self.model.as_ref()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn wall_texture(&self) -> &Texture {
        &self.wall_texture
    }

    pub fn roof_texture(&self) -> &Texture {
        &self.roof_texture
    }

    fn texture_for(&self, part: ShedPart) -> Option<&Texture> {
        match part {
            ShedPart::Walls => Some(&self.wall_texture),
            ShedPart::Roof => Some(&self.roof_texture),
            ShedPart::Beam => None,
        }
    }

    /// 画一帧，不关心几何体是否变化
    pub fn draw(&self, renderer: &mut Renderer, shader: &dyn FragmentShader) {
        let identity = Mat4::identity();
        renderer.render_triangles(&self.ground, &identity, None, shader);
        for object in &self.objects {
            renderer.render_triangles(&object.triangles, &identity, self.texture_for(object.part), shader);
        }
    }
}
