use cgmath::{Vector2 as Vec2, Vector3 as Vec3};
use rand::Rng;
use serde::Deserialize;

/// 程序生成纹理的边长
pub const TEXTURE_SIZE: usize = 256;

const HIGHLIGHT_SHARE: f32 = 0.6;
const HIGHLIGHT_ALPHA: f32 = 0.25;
const SHADOW_ALPHA: f32 = 0.15;
const GRAIN_AMPLITUDE: f32 = 5.0;

// 渐变两端颜色：金属偏冷，非金属偏暖
const METAL_STOPS: ([f32; 3], [f32; 3]) = ([217.0, 220.0, 223.0], [184.0, 189.0, 194.0]);
const PAINTED_STOPS: ([f32; 3], [f32; 3]) = ([230.0, 228.0, 223.0], [207.0, 204.0, 196.0]);

/// 波纹板参数，单位为像素
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CorrugationParams {
    pub stripe: f32,
    pub gap: f32,
    pub metal: bool,
}

impl CorrugationParams {
    pub fn wall() -> Self {
        Self {
            stripe: 6.0,
            gap: 4.0,
            metal: false,
        }
    }

    pub fn roof() -> Self {
        Self {
            stripe: 10.0,
            gap: 6.0,
            metal: true,
        }
    }
}

impl Default for CorrugationParams {
    fn default() -> Self {
        Self::wall()
    }
}

/// 像素格式：R<<24 | G<<16 | B<<8 | A
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    /// 平铺次数，采样时 uv 先乘以它再取小数部分
    pub repeat: Vec2<f32>,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0xFFFFFFFF; width * height],
            repeat: Vec2::new(1.0, 1.0),
        }
    }

    /// 完整的波纹板纹理：渐变 + 明暗条纹 + 随机颗粒
    pub fn corrugated<R: Rng>(params: &CorrugationParams, rng: &mut R) -> Self {
        let mut texture = Self::corrugated_pattern(params);
        texture.apply_grain(rng);
        texture
    }

    /// 不含颗粒的部分，相同参数下结果完全一致
    pub fn corrugated_pattern(params: &CorrugationParams) -> Self {
        let size = TEXTURE_SIZE;
        let (top, bottom) = if params.metal { METAL_STOPS } else { PAINTED_STOPS };
        let stripe = params.stripe.max(0.0);
        let period = (stripe + params.gap.max(0.0)).max(1.0);
        let highlight = stripe * HIGHLIGHT_SHARE;

        let mut texture = Self::new(size, size);
        for x in 0..size {
            // 这一列被高光/阴影覆盖的比例（处理小数宽度）
            let mut lit = 0.0f32;
            let mut shade = 0.0f32;
            let mut start = 0.0f32;
            while start < size as f32 {
                lit += coverage(x as f32, start, start + highlight);
                shade += coverage(x as f32, start + highlight, start + stripe);
                start += period;
            }
            let lit_alpha = HIGHLIGHT_ALPHA * lit.min(1.0);
            let shade_alpha = SHADOW_ALPHA * shade.min(1.0);

            for y in 0..size {
                // 对角线渐变：左上 -> 右下
                let t = (x as f32 + y as f32 + 1.0) / (2.0 * size as f32);
                let mut rgb = [0.0f32; 3];
                for c in 0..3 {
                    let base = top[c] + (bottom[c] - top[c]) * t;
                    let over_white = base * (1.0 - lit_alpha) + 255.0 * lit_alpha;
                    rgb[c] = over_white * (1.0 - shade_alpha);
                }
                texture.set_pixel(x, y, rgb.map(|v| v.round().clamp(0.0, 255.0) as u8), 255);
            }
        }
        texture
    }

    /// RGB 三个通道加同一个 [-5, 5) 的随机量，alpha 不变
    pub fn apply_grain<R: Rng>(&mut self, rng: &mut R) {
        for pixel in self.data.iter_mut() {
            let noise = rng.random_range(-GRAIN_AMPLITUDE..GRAIN_AMPLITUDE);
            let [r, g, b, a] = pixel.to_be_bytes();
            let [r, g, b] = [r, g, b].map(|c| (c as f32 + noise).round().clamp(0.0, 255.0) as u8);
            *pixel = u32::from_be_bytes([r, g, b, a]);
        }
    }

    pub fn set_repeat(&mut self, repeat_x: f32, repeat_y: f32) {
        self.repeat = Vec2::new(repeat_x, repeat_y);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3], alpha: u8) {
        self.data[y * self.width + x] = u32::from_be_bytes([rgb[0], rgb[1], rgb[2], alpha]);
    }

    pub fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        self.data[y * self.width + x].to_be_bytes()
    }

    /// 平铺采样，两个方向都重复
    pub fn sample(&self, uv: Vec2<f32>) -> Vec3<f32> {
        let u = (uv.x * self.repeat.x).rem_euclid(1.0);
        let v = (uv.y * self.repeat.y).rem_euclid(1.0);

        let x = (u * self.width as f32) as usize;
        let y = ((1.0 - v) * self.height as f32) as usize; // 翻转V轴，使UV(0,0)对应纹理左下角

        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);

        self.get_pixel_color(x, y)
    }

    fn get_pixel_color(&self, x: usize, y: usize) -> Vec3<f32> {
        let [r, g, b, _] = self.rgba(x, y);
        Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

/// 像素列 [x, x+1) 与区间 [a, b) 的重叠长度
fn coverage(x: f32, a: f32, b: f32) -> f32 {
    (b.min(x + 1.0) - a.max(x)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pattern_is_deterministic() {
        let params = CorrugationParams::roof();
        assert_eq!(
            Texture::corrugated_pattern(&params),
            Texture::corrugated_pattern(&params)
        );
    }

    #[test]
    fn metal_flag_changes_base_color() {
        let metal = Texture::corrugated_pattern(&CorrugationParams { metal: true, ..CorrugationParams::wall() });
        let painted = Texture::corrugated_pattern(&CorrugationParams { metal: false, ..CorrugationParams::wall() });
        assert_ne!(metal.rgba(8, 0), painted.rgba(8, 0));
    }

    #[test]
    fn bands_repeat_with_period() {
        // stripe 10 + gap 6：0..6 高光，6..10 阴影，10..16 原色
        let tex = Texture::corrugated_pattern(&CorrugationParams { stripe: 10.0, gap: 6.0, metal: true });
        let y = 100;
        let lit = tex.rgba(2, y)[0];
        let shaded = tex.rgba(8, y)[0];
        let plain = tex.rgba(12, y)[0];
        assert!(lit > plain);
        assert!(shaded < plain);
        // 下一个周期同样位置也是高光
        assert!(tex.rgba(18, y)[0] > tex.rgba(28, y)[0]);
    }

    #[test]
    fn fractional_stripe_blends_partial_pixel() {
        let tex = Texture::corrugated_pattern(&CorrugationParams { stripe: 5.0, gap: 5.0, metal: false });
        // 高光宽 3 像素，阴影 [3,5)；第 3 列全部阴影
        let y = 0;
        assert!(tex.rgba(2, y)[0] > tex.rgba(3, y)[0]);
        assert!(tex.rgba(3, y)[0] < tex.rgba(6, y)[0]);
    }

    #[test]
    fn grain_stays_within_amplitude() {
        let params = CorrugationParams::wall();
        let pattern = Texture::corrugated_pattern(&params);
        let mut rng = StdRng::seed_from_u64(7);
        let grained = Texture::corrugated(&params, &mut rng);

        for (a, b) in pattern.data.iter().zip(grained.data.iter()) {
            let (a, b) = (a.to_be_bytes(), b.to_be_bytes());
            assert_eq!(a[3], b[3]);
            let d0 = b[0] as i32 - a[0] as i32;
            for c in 0..3 {
                let d = b[c] as i32 - a[c] as i32;
                assert!(d.abs() <= 5);
                // 三个通道的扰动相同（没有碰到边界）
                assert_eq!(d, d0);
            }
        }
        assert_ne!(pattern.data, grained.data);
    }

    #[test]
    fn seeded_grain_is_reproducible() {
        let params = CorrugationParams::roof();
        let a = Texture::corrugated(&params, &mut StdRng::seed_from_u64(42));
        let b = Texture::corrugated(&params, &mut StdRng::seed_from_u64(42));
        let c = Texture::corrugated(&params, &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sample_wraps_with_repeat() {
        let mut tex = Texture::corrugated_pattern(&CorrugationParams::roof());
        tex.set_repeat(4.0, 2.0);
        let a = tex.sample(Vec2::new(0.1, 0.3));
        let b = tex.sample(Vec2::new(0.35, 0.8));
        assert_eq!(a, b);
        // 负坐标也能平铺
        let c = tex.sample(Vec2::new(-0.15, -0.2));
        assert_eq!(a, c);
    }
}
