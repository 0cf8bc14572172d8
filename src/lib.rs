//! 可调参数的棚屋模型：几何生成、波纹板纹理，以及一个软件光栅化查看器

pub mod app;
pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod framebuffer;
pub mod mesh;
pub mod params;
pub mod rasterizer;
pub mod renderer;
pub mod scene;
pub mod shed;
pub mod texture;
pub mod vertex;

pub use error::{Result, ShedError};
pub use params::ShedParameters;
pub use shed::{BoxShape, ShedModel, ShedPart, build};
pub use texture::{CorrugationParams, Texture};
