use minifb::Key;

use crate::params::{ShedField, ShedParameters};

/// 一次按键对应的动作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// 参数滑块移动若干步
    Adjust(ShedField, i32),
    /// 水平、竖直旋转（弧度）
    Orbit(f32, f32),
    Zoom(f32),
    Reframe,
    Screenshot,
    Quit,
}

const ORBIT_STEP: f32 = 0.05;
const ZOOM_STEP: f32 = 0.92;
/// 鼠标拖动每像素旋转的弧度
pub const DRAG_SPEED: f32 = 0.008;

pub fn map_key(key: Key) -> Option<Action> {
    let action = match key {
        Key::Q => Action::Adjust(ShedField::Length, 1),
        Key::A => Action::Adjust(ShedField::Length, -1),
        Key::W => Action::Adjust(ShedField::Width, 1),
        Key::S => Action::Adjust(ShedField::Width, -1),
        Key::E => Action::Adjust(ShedField::Height, 1),
        Key::D => Action::Adjust(ShedField::Height, -1),
        Key::R => Action::Adjust(ShedField::Pitch, 1),
        Key::F => Action::Adjust(ShedField::Pitch, -1),
        Key::Left => Action::Orbit(-ORBIT_STEP, 0.0),
        Key::Right => Action::Orbit(ORBIT_STEP, 0.0),
        Key::Up => Action::Orbit(0.0, ORBIT_STEP),
        Key::Down => Action::Orbit(0.0, -ORBIT_STEP),
        Key::Z => Action::Zoom(ZOOM_STEP),
        Key::X => Action::Zoom(1.0 / ZOOM_STEP),
        Key::C => Action::Reframe,
        Key::P => Action::Screenshot,
        Key::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// 滚轮：向上拉近
pub fn scroll_zoom(delta: f32) -> Option<Action> {
    if delta == 0.0 || !delta.is_finite() {
        return None;
    }
    let factor = if delta > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
    Some(Action::Zoom(factor))
}

/// 把一批参数动作作用到参数上，返回是否需要重建
pub fn apply_adjustments(params: &mut ShedParameters, actions: &[Action]) -> bool {
    let mut changed = false;
    for action in actions {
        if let Action::Adjust(field, steps) = *action {
            changed |= params.adjust(field, steps);
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_keys_map_to_fields() {
        assert_eq!(map_key(Key::Q), Some(Action::Adjust(ShedField::Length, 1)));
        assert_eq!(map_key(Key::F), Some(Action::Adjust(ShedField::Pitch, -1)));
        assert_eq!(map_key(Key::Escape), Some(Action::Quit));
        assert_eq!(map_key(Key::Key7), None);
    }

    #[test]
    fn adjustments_trigger_rebuild_only_on_change() {
        let mut params = ShedParameters::default();
        let actions = [Action::Adjust(ShedField::Width, 2), Action::Zoom(0.5)];
        assert!(apply_adjustments(&mut params, &actions));
        assert_eq!(params.width(), 26.0);

        let mut at_max = ShedParameters::new(150.0, 24.0, 10.0, 4.0);
        assert!(!apply_adjustments(&mut at_max, &[Action::Adjust(ShedField::Length, 1)]));
        assert!(!apply_adjustments(&mut at_max, &[Action::Reframe]));
    }

    #[test]
    fn scroll_direction_sets_zoom() {
        assert_eq!(scroll_zoom(0.0), None);
        assert_eq!(scroll_zoom(3.0), Some(Action::Zoom(ZOOM_STEP)));
        assert_eq!(scroll_zoom(-1.0), Some(Action::Zoom(1.0 / ZOOM_STEP)));
    }
}
