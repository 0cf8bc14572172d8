use cgmath::{Deg, InnerSpace, Matrix4 as Mat4, Point3, Rad, Vector3 as Vec3};

use crate::params::ShedParameters;
use crate::shed::OVERHANG;

pub const NEAR_PLANE: f32 = 0.5;
pub const FAR_PLANE: f32 = 2000.0;

const MIN_PITCH: Deg<f32> = Deg(-5.0);
const MAX_PITCH: Deg<f32> = Deg(85.0);
const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 600.0;

#[derive(Debug)]
pub struct Frustum {
    near: f32,
    far: f32,
    fovy: Rad<f32>,
    aspect: f32,
    mat: Mat4<f32>,
}

impl Frustum {
    #[rustfmt::skip]
    pub fn new(near: f32, aspect: f32, far: f32, fovy: Rad<f32>) -> Self {
        let tan_half_fovy = (fovy.0 / 2.0).tan();
        let a = 1.0 / (aspect * tan_half_fovy);
        let b = 1.0 / tan_half_fovy;
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        // projection
        let mat = Mat4::new(
            a,    0.0,   0.0,   0.0,
            0.0,  b,     0.0,   0.0,
            0.0,  0.0,   c,    -1.0,
            0.0,  0.0,   d,     0.0,
        );

        Self { near, far, fovy, aspect, mat }
    }

    pub fn get_mat(&self) -> &Mat4<f32> {
        &self.mat
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn with_aspect(&self, aspect: f32) -> Self {
        Self::new(self.near, aspect, self.far, self.fovy)
    }
}

/// 围绕目标点旋转的相机（轨道控制）
pub struct Camera {
    frustum: Frustum,
    pub(crate) eye: Vec3<f32>,
    pub(crate) target: Vec3<f32>,
    pub(crate) yaw: Rad<f32>,
    pub(crate) pitch: Rad<f32>,
    pub(crate) distance: f32,
    /// 拉近的下限，随棚屋尺寸变化
    pub(crate) min_distance: f32,
}

impl Camera {
    pub fn new(aspect: f32, fovy: Deg<f32>) -> Self {
        let mut camera = Self {
            frustum: Frustum::new(NEAR_PLANE, aspect, FAR_PLANE, fovy.into()),
            eye: Vec3::new(0.0, 0.0, 0.0),
            target: Vec3::new(0.0, 0.0, 0.0),
            yaw: Deg(35.0).into(),
            pitch: Deg(25.0).into(),
            distance: 60.0,
            min_distance: MIN_DISTANCE,
        };
        camera.update_eye();
        camera
    }

    pub fn get_frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if (self.frustum.aspect() - aspect).abs() > f32::EPSILON {
            self.frustum = self.frustum.with_aspect(aspect);
        }
    }

    pub fn set_rotation(&mut self, yaw: Deg<f32>, pitch: Deg<f32>) {
        self.yaw = yaw.into();
        self.pitch = Rad::from(pitch).clamp_pitch();
        self.update_eye();
    }

    /// 拖动或方向键：水平、竖直方向旋转
    pub fn orbit(&mut self, dyaw: Rad<f32>, dpitch: Rad<f32>) {
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp_pitch();
        self.update_eye();
    }

    /// factor < 1 拉近，> 1 拉远
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, MAX_DISTANCE);
        self.update_eye();
    }

    /// 把整个棚屋放进视野
    pub fn frame(&mut self, params: &ShedParameters) {
        let roof_top = roof_top(params);
        self.target = Vec3::new(0.0, roof_top / 2.0, 0.0);
        let extent = params.length().max(params.width()).max(roof_top);
        self.distance = (extent * 1.6).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.fit(params);
    }

    /// 按棚屋的包围球更新拉近下限，眼睛始终在棚屋外面
    pub fn fit(&mut self, params: &ShedParameters) {
        let roof_top = roof_top(params);
        let half = Vec3::new(
            params.length() / 2.0 + OVERHANG,
            roof_top / 2.0,
            params.width() / 2.0 + OVERHANG,
        );
        let center = Vec3::new(0.0, roof_top / 2.0, 0.0);
        let radius = (center - self.target).magnitude() + half.magnitude();
        self.min_distance = (radius + NEAR_PLANE).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.distance = self.distance.clamp(self.min_distance, MAX_DISTANCE);
        self.update_eye();
    }

    fn update_eye(&mut self) {
        let (sy, cy) = self.yaw.0.sin_cos();
        let (sp, cp) = self.pitch.0.sin_cos();
        self.eye = self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance;
    }

    pub fn get_view_mat(&self) -> Mat4<f32> {
        Mat4::look_at_rh(
            Point3::new(self.eye.x, self.eye.y, self.eye.z),
            Point3::new(self.target.x, self.target.y, self.target.z),
            Vec3::new(0., 1., 0.),
        )
    }

    pub fn get_view_proj_mat(&self) -> Mat4<f32> {
        self.frustum.get_mat() * self.get_view_mat()
    }
}

fn roof_top(params: &ShedParameters) -> f32 {
    params.height() + params.roof_angle().tan() * params.width() / 2.0
}

trait ClampPitch {
    fn clamp_pitch(self) -> Self;
}

impl ClampPitch for Rad<f32> {
    fn clamp_pitch(self) -> Self {
        let min: Rad<f32> = MIN_PITCH.into();
        let max: Rad<f32> = MAX_PITCH.into();
        Rad(self.0.clamp(min.0, max.0))
    }
}
