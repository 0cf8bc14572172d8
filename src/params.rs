use serde::Deserialize;

/// 单个参数的取值范围（相当于网页上的滑块）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub step: f32,
}

impl ParamRange {
    /// 非有限值（NaN、无穷）先回退到默认值，再夹紧到范围内
    pub fn clamp(&self, value: f32) -> f32 {
        let value = if value.is_finite() { value } else { self.default };
        value.clamp(self.min, self.max)
    }
}

pub const LENGTH_RANGE: ParamRange = ParamRange { min: 10.0, max: 150.0, default: 40.0, step: 1.0 };
pub const WIDTH_RANGE: ParamRange = ParamRange { min: 10.0, max: 100.0, default: 24.0, step: 1.0 };
pub const HEIGHT_RANGE: ParamRange = ParamRange { min: 8.0, max: 80.0, default: 10.0, step: 1.0 };
pub const PITCH_RANGE: ParamRange = ParamRange { min: 0.0, max: 12.0, default: 4.0, step: 0.5 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShedField {
    Length,
    Width,
    Height,
    Pitch,
}

impl ShedField {
    pub fn range(self) -> ParamRange {
        match self {
            ShedField::Length => LENGTH_RANGE,
            ShedField::Width => WIDTH_RANGE,
            ShedField::Height => HEIGHT_RANGE,
            ShedField::Pitch => PITCH_RANGE,
        }
    }
}

/// 棚屋的四个参数，单位为"英尺"，pitch 为每 12 单位水平距离的升高
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShedParameters {
    length: f32,
    width: f32,
    height: f32,
    pitch: f32,
}

impl Default for ShedParameters {
    fn default() -> Self {
        Self {
            length: LENGTH_RANGE.default,
            width: WIDTH_RANGE.default,
            height: HEIGHT_RANGE.default,
            pitch: PITCH_RANGE.default,
        }
    }
}

impl ShedParameters {
    pub fn new(length: f32, width: f32, height: f32, pitch: f32) -> Self {
        Self {
            length: LENGTH_RANGE.clamp(length),
            width: WIDTH_RANGE.clamp(width),
            height: HEIGHT_RANGE.clamp(height),
            pitch: PITCH_RANGE.clamp(pitch),
        }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn get(&self, field: ShedField) -> f32 {
        match field {
            ShedField::Length => self.length,
            ShedField::Width => self.width,
            ShedField::Height => self.height,
            ShedField::Pitch => self.pitch,
        }
    }

    pub fn set(&mut self, field: ShedField, value: f32) {
        let value = field.range().clamp(value);
        match field {
            ShedField::Length => self.length = value,
            ShedField::Width => self.width = value,
            ShedField::Height => self.height = value,
            ShedField::Pitch => self.pitch = value,
        }
    }

    /// 按步长移动某个参数，返回值是否真的改变（到边界后不再触发重建）
    pub fn adjust(&mut self, field: ShedField, steps: i32) -> bool {
        let before = self.get(field);
        self.set(field, before + steps as f32 * field.range().step);
        self.get(field) != before
    }

    /// 屋顶角度（弧度）
    pub fn roof_angle(&self) -> f32 {
        (self.pitch / 12.0).atan()
    }

    pub fn readout(&self) -> String {
        format!(
            "L {:.0} ft | W {:.0} ft | H {:.0} ft | pitch {:.1}/12",
            self.length, self.width, self.height, self.pitch
        )
    }
}

/// json 里读到的原始参数，缺省字段用默认值
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RawShedParameters {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub pitch: f32,
}

impl Default for RawShedParameters {
    fn default() -> Self {
        let p = ShedParameters::default();
        Self {
            length: p.length,
            width: p.width,
            height: p.height,
            pitch: p.pitch,
        }
    }
}

impl From<RawShedParameters> for ShedParameters {
    fn from(raw: RawShedParameters) -> Self {
        ShedParameters::new(raw.length, raw.width, raw.height, raw.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_length_to_bounds() {
        assert_eq!(ShedParameters::new(5.0, 24.0, 10.0, 4.0).length(), 10.0);
        assert_eq!(ShedParameters::new(200.0, 24.0, 10.0, 4.0).length(), 150.0);
        assert_eq!(ShedParameters::new(12.0, 24.0, 10.0, 4.0).length(), 12.0);
    }

    #[test]
    fn clamps_other_fields_to_bounds() {
        let low = ShedParameters::new(40.0, 1.0, 1.0, -3.0);
        assert_eq!((low.width(), low.height(), low.pitch()), (10.0, 8.0, 0.0));

        let high = ShedParameters::new(40.0, 500.0, 500.0, 50.0);
        assert_eq!((high.width(), high.height(), high.pitch()), (100.0, 80.0, 12.0));

        let mid = ShedParameters::new(40.0, 12.0, 12.0, 12.0);
        assert_eq!((mid.width(), mid.height(), mid.pitch()), (12.0, 12.0, 12.0));
    }

    #[test]
    fn non_finite_input_falls_back_to_default() {
        let p = ShedParameters::new(f32::NAN, f32::INFINITY, f32::NEG_INFINITY, f32::NAN);
        assert_eq!(p, ShedParameters::default());
    }

    #[test]
    fn adjust_reports_change_only_inside_range() {
        let mut p = ShedParameters::new(149.0, 24.0, 10.0, 11.5);
        assert!(p.adjust(ShedField::Length, 1));
        assert_eq!(p.length(), 150.0);
        assert!(!p.adjust(ShedField::Length, 1));

        assert!(p.adjust(ShedField::Pitch, 1));
        assert_eq!(p.pitch(), 12.0);
        assert!(!p.adjust(ShedField::Pitch, 3));

        assert!(p.adjust(ShedField::Height, -5));
        assert_eq!(p.height(), 8.0);
    }

    #[test]
    fn flat_pitch_has_zero_angle() {
        let p = ShedParameters::new(40.0, 24.0, 10.0, 0.0);
        assert_eq!(p.roof_angle(), 0.0);
    }

    #[test]
    fn raw_parameters_are_clamped_on_conversion() {
        let raw: RawShedParameters = serde_json::from_str(r#"{ "length": 400, "pitch": 2 }"#).unwrap();
        let p = ShedParameters::from(raw);
        assert_eq!(p.length(), 150.0);
        assert_eq!(p.width(), 24.0);
        assert_eq!(p.pitch(), 2.0);
    }
}
