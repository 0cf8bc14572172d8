use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShedError {
    #[error("无法读取配置文件: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("图片保存失败: {0}")]
    Image(#[from] image::ImageError),

    #[error("无法创建窗口: {0}")]
    Window(minifb::Error),

    #[error("画面刷新失败: {0}")]
    Present(minifb::Error),

    #[error("未知的着色器: {0}")]
    Shader(String),
}

pub type Result<T> = std::result::Result<T, ShedError>;
