use std::path::Path;

use cgmath::{Deg, Rad};
use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::JsonConfig;
use crate::controls::{self, Action, DRAG_SPEED};
use crate::error::{Result, ShedError};
use crate::framebuffer::FrameBuffer;
use crate::params::ShedParameters;
use crate::renderer::Renderer;
use crate::renderer::fragment_shader::FragmentShader;
use crate::scene::ShedScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    config: JsonConfig,
    params: ShedParameters,
    scene: ShedScene,
    renderer: Renderer,
    shader: Box<dyn FragmentShader>,
    rng: StdRng,
    supersample: usize,
    background: u32,
    screenshots: usize,
}

impl App {
    pub fn new(config: JsonConfig, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let window = &config.window;
        let supersample = window.supersample();
        let (width, height) = (window.width.max(1), window.height.max(1));
        let mut camera = Camera::new(width as f32 / height as f32, Deg(config.camera.fovy));
        camera.set_rotation(Deg(config.camera.yaw), Deg(config.camera.pitch));

        let mut renderer = Renderer::new(camera, width * supersample, height * supersample);
        renderer
            .light_mut()
            .set_light(config.light.color, config.light.direction);
        let shader = renderer.shader(config.shader_kind()?);

        let params = ShedParameters::from(config.shed);
        let scene = ShedScene::new(config.textures.into(), &mut rng);
        let background = config.background_color();

        let mut app = Self {
            config,
            params,
            scene,
            renderer,
            shader,
            rng,
            supersample,
            background,
            screenshots: 0,
        };
        app.renderer.camera_mut().frame(&app.params);
        app.rebuild();
        info!(supersample, "初始化完成");
        Ok(app)
    }

    pub fn params(&self) -> &ShedParameters {
        &self.params
    }

    pub fn scene(&self) -> &ShedScene {
        &self.scene
    }

    pub fn title(&self) -> String {
        format!("{} | {}", self.config.window.title, self.params.readout())
    }

    /// 读取当前参数，整棚重建
    pub fn rebuild(&mut self) {
        self.scene.rebuild(&self.params, &mut self.rng);
        self.renderer.camera_mut().fit(&self.params);
        info!("参数更新: {}", self.params.readout());
    }

    /// 窗口尺寸（逻辑像素）变化时调整内部分辨率
    pub fn resize(&mut self, width: usize, height: usize) {
        let fb = self.renderer.framebuffer();
        let (w, h) = (width.max(1) * self.supersample, height.max(1) * self.supersample);
        if fb.width != w || fb.height != h {
            debug!(width, height, "窗口尺寸变化");
            self.renderer.resize(w, h);
        }
    }

    /// 画一帧并降采样到窗口尺寸
    pub fn render_frame(&mut self) -> FrameBuffer {
        self.renderer.clear(self.background);
        self.scene.draw(&mut self.renderer, &*self.shader);
        self.renderer.framebuffer().ssaa(self.supersample)
    }

    pub fn snapshot(&mut self, path: &Path) -> Result<()> {
        let frame = self.render_frame();
        frame.save_to_image(&path.to_string_lossy())?;
        info!(path = %path.display(), "已保存截图");
        Ok(())
    }

    /// 处理一批动作；参数有变化时只重建一次
    pub fn handle(&mut self, actions: &[Action]) -> Result<Flow> {
        if controls::apply_adjustments(&mut self.params, actions) {
            self.rebuild();
        }

        for action in actions {
            match *action {
                Action::Adjust(..) => {}
                Action::Orbit(dyaw, dpitch) => {
                    self.renderer.camera_mut().orbit(Rad(dyaw), Rad(dpitch));
                }
                Action::Zoom(factor) => self.renderer.camera_mut().zoom(factor),
                Action::Reframe => {
                    let params = self.params;
                    self.renderer.camera_mut().frame(&params);
                }
                Action::Screenshot => {
                    let path = self
                        .config
                        .screenshot_dir()
                        .join(format!("shed_{:03}.png", self.screenshots));
                    self.screenshots += 1;
                    // 截图失败不影响继续浏览
                    if let Err(err) = self.snapshot(&path) {
                        warn!(%err, path = %path.display(), "截图保存失败");
                    }
                }
                Action::Quit => return Ok(Flow::Quit),
            }
        }
        Ok(Flow::Continue)
    }

    pub fn run_window(&mut self) -> Result<()> {
        let window_config = &self.config.window;
        let mut window = Window::new(
            &self.title(),
            window_config.width,
            window_config.height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(ShedError::Window)?;
        window.set_target_fps(60);

        let mut last_mouse: Option<(f32, f32)> = None;
        let mut title = self.title();

        while window.is_open() {
            let (width, height) = window.get_size();
            self.resize(width, height);

            let mut actions: Vec<Action> = window
                .get_keys_pressed(KeyRepeat::Yes)
                .into_iter()
                .filter_map(controls::map_key)
                .collect();

            if let Some(action) = window.get_scroll_wheel().and_then(|(_, dy)| controls::scroll_zoom(dy)) {
                actions.push(action);
            }

            // 左键拖动旋转
            if window.get_mouse_down(MouseButton::Left) {
                let pos = window.get_mouse_pos(MouseMode::Pass);
                if let (Some((x, y)), Some((lx, ly))) = (pos, last_mouse) {
                    actions.push(Action::Orbit(-(x - lx) * DRAG_SPEED, (y - ly) * DRAG_SPEED));
                }
                last_mouse = pos;
            } else {
                last_mouse = None;
            }

            if self.handle(&actions)? == Flow::Quit {
                break;
            }

            let new_title = self.title();
            if new_title != title {
                window.set_title(&new_title);
                title = new_title;
            }

            let frame = self.render_frame();
            window
                .update_with_buffer(&frame.data, frame.width, frame.height)
                .map_err(ShedError::Present)?;
        }
        info!("窗口已关闭");
        Ok(())
    }
}

/// 有 `snapshot` 时只渲染一张图；否则打开窗口，打不开就退回静态图片
pub fn run(config: JsonConfig, seed: Option<u64>, snapshot: Option<&Path>) -> Result<()> {
    let mut app = App::new(config, seed)?;

    if let Some(path) = snapshot {
        return app.snapshot(path);
    }

    match app.run_window() {
        Err(ShedError::Window(err)) => {
            let fallback = app.config.fallback_path().to_string();
            warn!(%err, fallback = %fallback, "无法创建窗口，改为输出静态图片");
            app.snapshot(Path::new(&fallback))
        }
        other => other,
    }
}
