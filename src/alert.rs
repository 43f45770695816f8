//! Alert evaluation over periodically sampled sensor values

use crate::board::{LedColor, Vector3};
use crate::config::{LOW_LIGHT_LUX, MOTION_THRESHOLD, TEMP_ALERT_TENTHS};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AlertLevel {
    #[default]
    None = 0,
    MotionLowLight = 1,
    HighTemp = 2,
    Both = 3,
}

impl AlertLevel {
    /// Ordered decision table, first match wins
    pub fn classify(temperature_tenths: u16, motion: bool, light: u32) -> Self {
        let hot = temperature_tenths > TEMP_ALERT_TENTHS;
        let dark = light < LOW_LIGHT_LUX;

        if hot && motion && dark {
            AlertLevel::Both
        } else if hot {
            AlertLevel::HighTemp
        } else if motion && dark {
            AlertLevel::MotionLowLight
        } else {
            AlertLevel::None
        }
    }

    /// LED color shown during the "on" half of a blink
    pub const fn color(self) -> LedColor {
        match self {
            AlertLevel::None => LedColor::OFF,
            AlertLevel::MotionLowLight => LedColor::BLUE,
            AlertLevel::HighTemp => LedColor::RED,
            AlertLevel::Both => LedColor::RED_AND_BLUE,
        }
    }
}

/// `true` iff any axis moved strictly more than the motion threshold
pub fn is_motion(current: &Vector3, baseline: &Vector3) -> bool {
    current.max_axis_delta(baseline) > MOTION_THRESHOLD as u16
}

/// Holds the motion baseline and the last computed level between cycles
#[derive(Debug, Default)]
pub struct AlertEvaluator {
    baseline: Vector3,
    level: AlertLevel,
}

impl AlertEvaluator {
    /// The baseline starts at rest, which is what the zero offset makes
    /// the first reading look like.
    pub const fn new() -> Self {
        Self {
            baseline: Vector3::ZERO,
            level: AlertLevel::None,
        }
    }

    /// Run one evaluation cycle and roll the baseline forward.
    pub fn evaluate(&mut self, temperature_tenths: u16, light: u32, accel: Vector3) -> AlertLevel {
        let motion = is_motion(&accel, &self.baseline);
        self.level = AlertLevel::classify(temperature_tenths, motion, light);
        self.baseline = accel;
        self.level
    }

    #[inline]
    pub fn level(&self) -> AlertLevel {
        self.level
    }

    #[inline]
    pub fn baseline(&self) -> Vector3 {
        self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_table() {
        assert_eq!(AlertLevel::classify(270, true, 40), AlertLevel::Both);
        assert_eq!(AlertLevel::classify(270, false, 80), AlertLevel::HighTemp);
        assert_eq!(AlertLevel::classify(200, true, 10), AlertLevel::MotionLowLight);
        assert_eq!(AlertLevel::classify(200, false, 80), AlertLevel::None);
    }

    #[test]
    fn hot_and_moving_in_bright_light_is_only_high_temp() {
        assert_eq!(AlertLevel::classify(270, true, 80), AlertLevel::HighTemp);
    }

    #[test]
    fn threshold_edges_are_exclusive() {
        assert_eq!(AlertLevel::classify(260, false, 0), AlertLevel::None);
        assert_eq!(AlertLevel::classify(261, false, 0), AlertLevel::HighTemp);
        assert_eq!(AlertLevel::classify(200, true, 50), AlertLevel::None);
        assert_eq!(AlertLevel::classify(200, true, 49), AlertLevel::MotionLowLight);
    }

    #[test]
    fn motion_boundary() {
        let rest = Vector3::ZERO;
        assert!(!is_motion(&Vector3::new(15, 0, 0), &rest));
        assert!(!is_motion(&Vector3::new(0, -15, 15), &rest));
        assert!(is_motion(&Vector3::new(0, 0, 16), &rest));
        assert!(is_motion(&Vector3::new(0, -16, 0), &rest));
    }

    #[test]
    fn baseline_rolls_forward_once_per_cycle() {
        let mut evaluator = AlertEvaluator::new();

        let level = evaluator.evaluate(200, 10, Vector3::new(20, 0, 0));
        assert_eq!(level, AlertLevel::MotionLowLight);
        assert_eq!(evaluator.baseline(), Vector3::new(20, 0, 0));

        // Holding still at the new position is not motion.
        let level = evaluator.evaluate(200, 10, Vector3::new(25, 0, 0));
        assert_eq!(level, AlertLevel::None);
        assert_eq!(evaluator.level(), AlertLevel::None);
    }

    #[test]
    fn level_colors() {
        assert_eq!(AlertLevel::None.color(), LedColor::OFF);
        assert_eq!(AlertLevel::MotionLowLight.color(), LedColor::BLUE);
        assert_eq!(AlertLevel::HighTemp.color(), LedColor::RED);
        assert_eq!(AlertLevel::Both.color(), LedColor::RED_AND_BLUE);
    }
}
