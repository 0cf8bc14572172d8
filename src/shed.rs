use cgmath::{Rad, Vector3 as Vec3};

use crate::params::ShedParameters;

/// 屋檐两端各伸出的长度
pub const OVERHANG: f32 = 2.0;
pub const ROOF_THICKNESS: f32 = 0.6;
pub const BEAM_SIZE: f32 = 1.0;
/// 立柱贴着墙角内收，不突出墙面
pub const BEAM_INSET: f32 = BEAM_SIZE / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShedPart {
    Walls,
    Beam,
    Roof,
}

/// 一个长方体：以中心定位，先绕 X 轴（长度方向）旋转再平移
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub part: ShedPart,
    /// (x 长度, y 高度, z 深度)
    pub size: Vec3<f32>,
    pub position: Vec3<f32>,
    pub rotation_x: Rad<f32>,
}

impl BoxShape {
    fn axis_aligned(part: ShedPart, size: Vec3<f32>, position: Vec3<f32>) -> Self {
        Self {
            part,
            size,
            position,
            rotation_x: Rad(0.0),
        }
    }
}

/// 由参数推导出的整棚模型，每次重建都完整生成
#[derive(Debug, Clone, PartialEq)]
pub struct ShedModel {
    pub params: ShedParameters,
    pub roof_angle: Rad<f32>,
    pub ridge_rise: f32,
    pub roof_y: f32,
    pub roof_length: f32,
    pub panel_width: f32,
    /// 墙体、四根立柱、两块屋顶板，顺序固定
    shapes: Vec<BoxShape>,
}

impl ShedModel {
    pub fn shapes(&self) -> &[BoxShape] {
        &self.shapes
    }

    /// 墙体由 `build` 第一个放入，之后不可修改
    pub fn walls(&self) -> &BoxShape {
        &self.shapes[0]
    }

    pub fn beams(&self) -> impl Iterator<Item = &BoxShape> {
        self.parts(ShedPart::Beam)
    }

    pub fn roof_panels(&self) -> impl Iterator<Item = &BoxShape> {
        self.parts(ShedPart::Roof)
    }

    pub fn parts(&self, part: ShedPart) -> impl Iterator<Item = &BoxShape> {
        self.shapes.iter().filter(move |s| s.part == part)
    }
}

/// 参数 -> 墙体、四根角柱、两块屋顶板
pub fn build(params: &ShedParameters) -> ShedModel {
    let l = params.length();
    let w = params.width();
    let h = params.height();

    let mut shapes = Vec::with_capacity(7);

    // 墙体底面贴地
    shapes.push(BoxShape::axis_aligned(
        ShedPart::Walls,
        Vec3::new(l, h, w),
        Vec3::new(0.0, h / 2.0, 0.0),
    ));

    let bx = l / 2.0 - BEAM_INSET;
    let bz = w / 2.0 - BEAM_INSET;
    for (sx, sz) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
        shapes.push(BoxShape::axis_aligned(
            ShedPart::Beam,
            Vec3::new(BEAM_SIZE, h, BEAM_SIZE),
            Vec3::new(sx * bx, h / 2.0, sz * bz),
        ));
    }

    let angle = params.roof_angle();
    let half_width = w / 2.0;
    let ridge_rise = angle.tan() * half_width;
    let roof_y = h + ridge_rise / 2.0;
    let roof_length = l + 2.0 * OVERHANG;
    // 板的水平投影等于半个宽度
    let panel_width = (half_width * half_width + ridge_rise * ridge_rise).sqrt();

    // 右手系下绕 X 正转会压低 +Z 一侧，所以 +angle 的板放在 +Z 半边，外沿落到屋檐
    for sign in [1.0f32, -1.0] {
        shapes.push(BoxShape {
            part: ShedPart::Roof,
            size: Vec3::new(roof_length, ROOF_THICKNESS, panel_width),
            position: Vec3::new(0.0, roof_y, sign * half_width / 2.0),
            rotation_x: Rad(sign * angle),
        });
    }

    ShedModel {
        params: *params,
        roof_angle: Rad(angle),
        ridge_rise,
        roof_y,
        roof_length,
        panel_width,
        shapes,
    }
}
