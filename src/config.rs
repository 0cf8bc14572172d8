use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, ShedError};
use crate::params::RawShedParameters;
use crate::renderer::ShaderKind;
use crate::scene::TextureSettings;
use crate::texture::CorrugationParams;

/// 设备像素比上限
pub const MAX_PIXEL_RATIO: f32 = 2.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub window: WindowConfig,
    pub shed: RawShedParameters,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub textures: TexturesConfig,
    pub shader: Option<String>,
    /// 背景色，0xRRGGBB
    pub background: Option<u32>,
    /// 打不开窗口时输出的静态图片
    pub fallback_image: Option<String>,
    /// `P` 键截图保存的目录
    pub screenshot_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub pixel_ratio: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 720,
            pixel_ratio: 1.0,
            title: "Shed Viewer".to_string(),
        }
    }
}

impl WindowConfig {
    /// 超采样倍数：像素比夹到 [1, 2] 后取整
    pub fn supersample(&self) -> usize {
        let ratio = if self.pixel_ratio.is_finite() { self.pixel_ratio } else { 1.0 };
        ratio.clamp(1.0, MAX_PIXEL_RATIO).round() as usize
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// 角度制
    pub yaw: f32,
    pub pitch: f32,
    pub fovy: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: 35.0,
            pitch: 25.0,
            fovy: 45.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub color: [f32; 3],
    pub direction: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            direction: [-0.4, -1.0, -0.6],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TexturesConfig {
    pub wall: CorrugationParams,
    pub roof: CorrugationParams,
}

impl Default for TexturesConfig {
    fn default() -> Self {
        let settings = TextureSettings::default();
        Self {
            wall: settings.wall,
            roof: settings.roof,
        }
    }
}

impl From<TexturesConfig> for TextureSettings {
    fn from(config: TexturesConfig) -> Self {
        TextureSettings {
            wall: config.wall,
            roof: config.roof,
        }
    }
}

impl JsonConfig {
    pub fn shader_kind(&self) -> Result<ShaderKind> {
        match &self.shader {
            Some(name) => name.parse().map_err(ShedError::Shader),
            None => Ok(ShaderKind::default()),
        }
    }

    pub fn background_color(&self) -> u32 {
        0xFF000000 | self.background.unwrap_or(0xA9C8E6) & 0x00FFFFFF
    }

    pub fn fallback_path(&self) -> &str {
        self.fallback_image.as_deref().unwrap_or("shed_fallback.png")
    }

    pub fn screenshot_dir(&self) -> &Path {
        Path::new(self.screenshot_dir.as_deref().unwrap_or("."))
    }
}

pub fn parse_json(path: &Path) -> Result<JsonConfig> {
    let file = File::open(path)?;
    let config: JsonConfig = serde_json::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), "成功读取配置");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: JsonConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.shader_kind().unwrap(), ShaderKind::Phong);
        assert_eq!(config.background_color(), 0xFFA9C8E6);
        assert_eq!(config.textures.roof, CorrugationParams::roof());
        assert_eq!(config.screenshot_dir(), Path::new("."));
    }

    #[test]
    fn partial_config_is_merged() {
        let config: JsonConfig = serde_json::from_str(
            r#"{
                "window": { "pixel_ratio": 3.5 },
                "shed": { "length": 60 },
                "textures": { "roof": { "stripe": 12 } },
                "shader": "toon"
            }"#,
        )
        .unwrap();
        assert_eq!(config.window.supersample(), 2);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.shed.length, 60.0);
        assert_eq!(config.shed.pitch, 4.0);
        assert_eq!(config.textures.roof.stripe, 12.0);
        assert_eq!(config.shader_kind().unwrap(), ShaderKind::Toon);
    }

    #[test]
    fn unknown_shader_is_an_error() {
        let config: JsonConfig = serde_json::from_str(r#"{ "shader": "ink" }"#).unwrap();
        assert!(matches!(config.shader_kind(), Err(ShedError::Shader(_))));
    }

    #[test]
    fn pixel_ratio_is_clamped() {
        let mut window = WindowConfig::default();
        window.pixel_ratio = 0.3;
        assert_eq!(window.supersample(), 1);
        window.pixel_ratio = f32::NAN;
        assert_eq!(window.supersample(), 1);
        window.pixel_ratio = 1.6;
        assert_eq!(window.supersample(), 2);
    }
}
