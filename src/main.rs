use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shed_viewer::config::{self, JsonConfig};

/// 可交互调整的棚屋模型
#[derive(Debug, Parser)]
#[command(name = "shed-viewer", version)]
struct Args {
    /// json 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 不开窗口，只渲染一张图片
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// 纹理颗粒的随机种子
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::parse_json(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => JsonConfig::default(),
    };

    shed_viewer::app::run(config, args.seed, args.snapshot.as_deref())?;
    Ok(())
}
