use crate::config::AutoscrollConfig;
use crate::scale::clamp_scroll;

/// Cubic ease-out on `[0, 1]`; inputs outside are clamped.
pub fn ease_out_cubic(t: f64) -> f64 {
    let p = 1.0 - t.clamp(0.0, 1.0);
    1.0 - p * p * p
}

#[derive(Clone, Debug)]
pub struct Autoscroll {
    config: AutoscrollConfig,
    /// Pointer x relative to the viewport; `None` once it has left.
    pointer_x: Option<f64>,
}

impl Autoscroll {
    pub fn new(config: AutoscrollConfig) -> Self {
        Self {
            config,
            pointer_x: None,
        }
    }

    pub fn config(&self) -> &AutoscrollConfig {
        &self.config
    }

    pub fn pointer_moved(&mut self, x: f64) {
        self.pointer_x = Some(x).filter(|x| x.is_finite() && *x >= 0.0);
    }

    pub fn pointer_left(&mut self) {
        self.pointer_x = None;
    }

    pub fn pointer_x(&self) -> Option<f64> {
        self.pointer_x
    }

    /// Signed velocity in px/s: negative inside the left zone, positive
    /// inside the right zone, zero elsewhere or while `suppressed`.
    pub fn velocity(&self, viewport_width: f64, suppressed: bool) -> f64 {
        let Some(x) = self.pointer_x else { return 0.0 };
        if suppressed || self.config.edge_zone <= 0.0 {
            return 0.0;
        }
        let zone = self.config.edge_zone;
        if x < zone {
            let t = 1.0 - x / zone;
            -self.config.max_speed * ease_out_cubic(t)
        } else if x > viewport_width - zone {
            let t = 1.0 - (viewport_width - x) / zone;
            self.config.max_speed * ease_out_cubic(t)
        } else {
            0.0
        }
    }

    /// Integrate one frame. Returns the new scroll offset, or `None` when it
    /// would not move.
    pub fn step(
        &self,
        scroll_left: f64,
        dt_secs: f64,
        viewport_width: f64,
        content_width: f64,
        suppressed: bool,
    ) -> Option<f64> {
        let speed = self.velocity(viewport_width, suppressed);
        if speed == 0.0 || dt_secs <= 0.0 {
            return None;
        }
        let next = clamp_scroll(scroll_left + speed * dt_secs, content_width, viewport_width);
        (next != scroll_left).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(x: f64) -> Autoscroll {
        let mut a = Autoscroll::new(AutoscrollConfig::default());
        a.pointer_moved(x);
        a
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_zero_between_zones() {
        for x in [140.5, 300.0, 500.0, 659.5] {
            assert_eq!(engine_at(x).velocity(800.0, false), 0.0, "x={x}");
        }
    }

    #[test]
    fn test_direction_and_peak() {
        assert_eq!(engine_at(0.0).velocity(800.0, false), -1200.0);
        assert_eq!(engine_at(800.0).velocity(800.0, false), 1200.0);
        let left = engine_at(70.0).velocity(800.0, false);
        let right = engine_at(730.0).velocity(800.0, false);
        assert!(left < 0.0 && right > 0.0);
        assert!((left + right).abs() < 1e-9);
    }

    #[test]
    fn test_outside_and_suppressed() {
        let mut a = engine_at(10.0);
        assert_eq!(a.velocity(800.0, true), 0.0);
        a.pointer_left();
        assert_eq!(a.velocity(800.0, false), 0.0);
    }

    #[test]
    fn test_step_uses_elapsed_time() {
        let a = engine_at(800.0);
        // Same elapsed time, different frame splits
        let one = a.step(1000.0, 0.1, 800.0, 10_000.0, false).unwrap();
        let mut two = 1000.0;
        for _ in 0..4 {
            two = a.step(two, 0.025, 800.0, 10_000.0, false).unwrap();
        }
        assert!((one - two).abs() < 1e-9);
        assert!((one - 1120.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_clamps_to_content() {
        let a = engine_at(0.0);
        assert_eq!(a.step(10.0, 1.0, 800.0, 5000.0, false), Some(0.0));
        assert_eq!(a.step(0.0, 1.0, 800.0, 5000.0, false), None);
        let b = engine_at(799.0);
        assert_eq!(b.step(4100.0, 1.0, 800.0, 5000.0, false), Some(4200.0));
    }
}
