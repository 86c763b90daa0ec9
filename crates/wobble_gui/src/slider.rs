use crate::renderer::{GuiBatch, GuiQuad};
use crate::widget::{rect_hit, Widget};

/// Horizontal slider bound to a named numeric control.
///
/// The value lives in real units, snapped to the control's step and clamped
/// to `[min, max]`. Dragging anywhere on the track moves the thumb; the
/// panel collects changes through [`Slider::take_changed`].
#[derive(Debug, Clone)]
pub struct Slider {
    pub name: String,
    /// x, y, width, height in window pixels.
    pub rect: [f32; 4],
    pub min: f32,
    pub max: f32,
    pub step: f32,
    value: f32,
    dragging: bool,
    changed: bool,
}

impl Slider {
    pub fn new(name: &str, rect: [f32; 4], min: f32, max: f32, step: f32, initial: f32) -> Self {
        let mut s = Self {
            name: name.to_owned(),
            rect,
            min,
            max,
            step,
            value: initial,
            dragging: false,
            changed: false,
        };
        s.value = s.snap(initial);
        s
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Programmatic value write (e.g. after a reset action). Does not raise
    /// a change notification; the caller already knows the new value.
    pub fn set_value(&mut self, raw: f32) {
        self.value = self.snap(raw);
    }

    /// Returns the new value if the user moved the slider since last asked.
    pub fn take_changed(&mut self) -> Option<f32> {
        if self.changed {
            self.changed = false;
            Some(self.value)
        } else {
            None
        }
    }

    fn snap(&self, raw: f32) -> f32 {
        let stepped = if self.step > 0.0 {
            self.min + ((raw - self.min) / self.step).round() * self.step
        } else {
            raw
        };
        stepped.clamp(self.min, self.max)
    }

    fn drag_to(&mut self, mx: f64) {
        let rel = ((mx as f32 - self.rect[0]) / self.rect[2]).clamp(0.0, 1.0);
        let snapped = self.snap(self.min + rel * (self.max - self.min));
        if snapped != self.value {
            self.value = snapped;
            self.changed = true;
        }
    }

    fn thumb_rect(&self) -> [f32; 4] {
        let thumb_w = self.rect[2] * 0.08;
        let rel = if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        };
        let tx = self.rect[0] + (self.rect[2] - thumb_w) * rel;
        [tx, self.rect[1], thumb_w, self.rect[3]]
    }
}

impl Widget for Slider {
    fn draw(&self, batch: &mut GuiBatch) {
        // track
        batch.push(GuiQuad {
            pos: [self.rect[0], self.rect[1]],
            size: [self.rect[2], self.rect[3]],
            color: [0.15, 0.15, 0.18, 0.9],
        });
        // thumb
        let thumb = self.thumb_rect();
        batch.push(GuiQuad {
            pos: [thumb[0], thumb[1]],
            size: [thumb[2], thumb[3]],
            color: [0.75, 0.75, 0.8, 1.0],
        });
    }

    fn hit(&self, mx: f64, my: f64) -> bool {
        rect_hit(self.rect, mx, my)
    }

    fn mouse_move(&mut self, mx: f64, _my: f64) {
        if self.dragging {
            self.drag_to(mx);
        }
    }

    fn mouse_input(&mut self, mx: f64, my: f64, pressed: bool) {
        if pressed {
            if self.hit(mx, my) {
                self.dragging = true;
                self.drag_to(mx);
            }
        } else {
            self.dragging = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> Slider {
        Slider::new("bumpiness", [0.0, 0.0, 100.0, 16.0], 1.0, 10.0, 1.0, 3.0)
    }

    #[test]
    fn values_snap_to_step_and_clamp() {
        let mut s = slider();
        s.set_value(4.4);
        assert_eq!(s.value(), 4.0);
        s.set_value(4.6);
        assert_eq!(s.value(), 5.0);
        s.set_value(42.0);
        assert_eq!(s.value(), 10.0);
        s.set_value(-3.0);
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn drag_reports_change_once() {
        let mut s = slider();
        s.mouse_input(99.0, 8.0, true);
        assert_eq!(s.value(), 10.0);
        assert_eq!(s.take_changed(), Some(10.0));
        assert_eq!(s.take_changed(), None);
    }

    #[test]
    fn programmatic_write_is_silent() {
        let mut s = slider();
        s.set_value(7.0);
        assert_eq!(s.take_changed(), None);
    }

    #[test]
    fn drag_outside_track_does_nothing() {
        let mut s = slider();
        s.mouse_input(300.0, 300.0, true);
        s.mouse_move(50.0, 8.0);
        assert_eq!(s.take_changed(), None);
    }

    #[test]
    fn fractional_steps_snap() {
        let mut s = Slider::new(
            "movingFrequency",
            [0.0, 0.0, 100.0, 16.0],
            0.005,
            0.05,
            0.001,
            0.005,
        );
        s.set_value(0.0123);
        assert!((s.value() - 0.012).abs() < 1e-6);
    }
}
