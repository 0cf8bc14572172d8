pub mod clip;
pub mod fragment_shader;
pub mod vertex_shader;

use std::str::FromStr;

use crate::camera::Camera;
use crate::framebuffer::FrameBuffer;
use crate::rasterizer;
use crate::texture::Texture;
use crate::vertex::{ClipSpaceVertex, Material, RasterPoint, RasterTriangle, Triangle};
use cgmath::{InnerSpace, Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3};
use fragment_shader::{FragmentData, FragmentShader, NormalDebugShader, PhongShader, ToonShader};

use self::clip::{Clipper, SimpleClipper};
use self::vertex_shader::{DefaultVertexShader, VertexShader, VertexShaderUniforms};

pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub direction: Vec3<f32>,
    pub color: Vec3<f32>,
    pub intensity: f32,
    pub ambient_strength: f32,
    pub ambient_color: Vec3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.4, -1.0, -0.6).normalize(),
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 0.8,
            ambient_strength: 0.45,                  // 默认环境光强度
            ambient_color: Vec3::new(1.0, 1.0, 1.0), // 白色环境光
        }
    }
}

impl Light {
    pub fn set_light(&mut self, color: [f32; 3], direction: [f32; 3]) {
        self.color = Vec3::new(color[0], color[1], color[2]);
        let direction = Vec3::new(direction[0], direction[1], direction[2]);
        // 零向量没法归一化，保持原方向
        if direction.magnitude2() > f32::EPSILON {
            self.direction = direction.normalize();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderKind {
    #[default]
    Phong,
    Toon,
    Normal,
}

impl FromStr for ShaderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phong" => Ok(ShaderKind::Phong),
            "toon" => Ok(ShaderKind::Toon),
            "normal" => Ok(ShaderKind::Normal),
            other => Err(format!("unknown shader `{other}`")),
        }
    }
}

pub struct Renderer {
    pub(crate) camera: Camera,
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) viewport: Viewport,
    pub(crate) light: Light,
}

impl Renderer {
    pub fn new(camera: Camera, w: usize, h: usize) -> Self {
        let framebuffer = FrameBuffer::new(w, h);
        Self {
            camera,
            framebuffer,
            viewport: Viewport {
                x: 0,
                y: 0,
                w: w as i32,
                h: h as i32,
            },
            light: Light::default(),
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn light_mut(&mut self) -> &mut Light {
        &mut self.light
    }

    /// 帧缓冲、视口、投影宽高比一起更新
    pub fn resize(&mut self, w: usize, h: usize) {
        let (w, h) = (w.max(1), h.max(1));
        self.framebuffer.resize(w, h);
        self.viewport = Viewport {
            x: 0,
            y: 0,
            w: w as i32,
            h: h as i32,
        };
        self.camera.set_aspect(w as f32 / h as f32);
    }

    pub fn clear(&mut self, color: u32) {
        self.framebuffer.clear(color);
    }

    pub fn shader(&self, kind: ShaderKind) -> Box<dyn FragmentShader> {
        match kind {
            ShaderKind::Phong => Box::new(PhongShader { light: self.light }),
            ShaderKind::Toon => Box::new(ToonShader { light: self.light }),
            ShaderKind::Normal => Box::new(NormalDebugShader),
        }
    }

    // 完整渲染管线
    pub fn render_triangles(
        &mut self,
        triangles: &[Triangle],
        model: &Mat4<f32>,
        texture: Option<&Texture>,
        fragment_shader: &dyn FragmentShader,
    ) {
        // 统一运算矩阵
        let uniforms = VertexShaderUniforms::new(model, &self.camera.get_view_proj_mat());
        let vertex_shader = DefaultVertexShader;
        let clipper = SimpleClipper;

        for triangle in triangles {
            // 管线阶段 1: 背面剔除
            let world_pos = (uniforms.model * triangle.vertices[0].pos.extend(1.0)).truncate();
            let view_dir = (self.camera.eye - world_pos).normalize();
            let tri_normal = (uniforms.normal * triangle.normal.extend(0.0)).truncate();
            if view_dir.dot(tri_normal) <= 0.0 {
                continue;
            }

            // 管线阶段 2: 顶点着色
            let clip_space_triangle = vertex_shader.shade_triangle(triangle, &uniforms);

            // 管线阶段 3: 裁剪
            for clipped in clipper.clip_triangle(&clip_space_triangle) {
                // 阶段 4: 屏幕映射
                let raster_triangle = self.viewport_transform(&clipped, triangle.material);

                // 阶段 5: 光栅化和像素着色
                self.rasterize_triangle(&raster_triangle, texture, fragment_shader);
            }
        }
    }

    // 视口变换
    fn viewport_transform(
        &self,
        clip_triangle: &[ClipSpaceVertex; 3],
        material: Material,
    ) -> RasterTriangle {
        let raster_vertices = clip_triangle.map(|clip_v| {
            let inv_w = 1.0 / clip_v.position.w;
            // 透视除法
            let ndc_pos = clip_v.position * inv_w;

            let screen_x = (ndc_pos.x + 1.0) * 0.5 * self.viewport.w as f32 + self.viewport.x as f32;
            let screen_y = self.viewport.h as f32 - (ndc_pos.y + 1.0) * 0.5 * self.viewport.h as f32
                + self.viewport.y as f32;

            RasterPoint {
                pos: Vec2::new(screen_x, screen_y),
                z: (ndc_pos.z + 1.0) * 0.5,
                inv_w,
                world_pos: clip_v.world_pos,
                normal: clip_v.normal,
                uv: clip_v.uv,
                color: clip_v.color,
            }
        });

        RasterTriangle {
            vertices: raster_vertices,
            material,
        }
    }

    // 进行光栅化
    fn rasterize_triangle(
        &mut self,
        triangle: &RasterTriangle,
        texture: Option<&Texture>,
        shader: &dyn FragmentShader,
    ) {
        let points = &triangle.vertices;
        let screen = [points[0].pos, points[1].pos, points[2].pos];
        let Some((min_x, min_y, max_x, max_y)) =
            rasterizer::get_box(&screen, self.framebuffer.width, self.framebuffer.height)
        else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !rasterizer::is_inside_triangle(&screen, &p) {
                    continue;
                }
                let Some(bary) = rasterizer::get_barycentric_coords(&screen, &p) else {
                    continue;
                };

                let depth = rasterizer::interpolate_depth(points, bary);
                let idx = y * self.framebuffer.width + x;
                // 提前深度测试，被挡住的片元不必着色
                if !(0.0..self.framebuffer.depth[idx]).contains(&depth) {
                    continue;
                }

                let weights = rasterizer::perspective_weights(points, bary);
                let fragment_data = FragmentData {
                    world_pos: rasterizer::interpolate_world_pos(points, weights),
                    normal: rasterizer::interpolate_normal(points, weights),
                    uv: rasterizer::interpolate_uv(points, weights),
                    color: rasterizer::interpolate_color(points, weights),
                    texture,
                    material: &triangle.material,
                    camera_pos: self.camera.eye,
                };

                let c = shader.shade(fragment_data);
                let color = 0xFF000000
                    | ((c.x * 255.0) as u32) << 16
                    | ((c.y * 255.0) as u32) << 8
                    | ((c.z * 255.0) as u32);

                self.framebuffer.put_pixel(x, y, color, depth);
            }
        }
    }
}
