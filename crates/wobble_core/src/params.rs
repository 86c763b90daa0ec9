//! The live parameter block shared between the control panel, the renderer
//! and the deform material.
//!
//! There is exactly one `SimParams` value per application; it is owned by the
//! viewer and handed to consumers by reference each frame. The control panel
//! writes it through the setters below, the frame loop reads it. Both run on
//! the event-loop thread, so reads and writes are strictly ordered.

/// Default noise frequency restored by [`SimParams::reset`].
pub const DEFAULT_FREQUENCY: f32 = 0.005;
/// Default bumpiness restored by [`SimParams::reset`].
pub const DEFAULT_BUMPINESS: f32 = 3.0;
/// Default deformation intensity restored by [`SimParams::reset`].
pub const DEFAULT_INTENSITY: f32 = 1.0;
/// Default subdivision level for the icosphere.
pub const DEFAULT_TESSELLATION: u32 = 5;

/// Upper bound on the icosphere subdivision level. Each level quadruples the
/// triangle count (20 * 4^n), so 8 is already a 1.3M-triangle mesh.
pub const MAX_TESSELLATION: u32 = 8;

/// Live deformation parameters plus the frame counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    /// Icosphere subdivision level, `0..=MAX_TESSELLATION`. Changing this
    /// invalidates the sphere's GPU mesh.
    pub tessellation: u32,
    /// How fast the noise field drifts over time.
    pub moving_frequency: f32,
    /// Spatial scale of the noise field.
    pub bumpiness: f32,
    /// Displacement amplitude along the vertex normal.
    pub intensity: f32,
    /// Monotonic frame counter, pushed to shaders as `time`.
    pub time: i32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            tessellation: DEFAULT_TESSELLATION,
            moving_frequency: DEFAULT_FREQUENCY,
            bumpiness: DEFAULT_BUMPINESS,
            intensity: DEFAULT_INTENSITY,
            time: 0,
        }
    }
}

impl SimParams {
    pub fn new() -> Self {
        Default::default()
    }

    /// Restores frequency, bumpiness and intensity to their defaults.
    ///
    /// Tessellation and the frame counter are deliberately left untouched:
    /// resetting the deformation must not retessellate the sphere or rewind
    /// the animation.
    pub fn reset(&mut self) {
        self.moving_frequency = DEFAULT_FREQUENCY;
        self.bumpiness = DEFAULT_BUMPINESS;
        self.intensity = DEFAULT_INTENSITY;
    }

    /// Advances the frame counter. Called once per frame tick.
    pub fn advance_frame(&mut self) {
        self.time = self.time.wrapping_add(1);
    }

    /// Sets the subdivision level, clamping to `MAX_TESSELLATION`.
    pub fn set_tessellation(&mut self, level: u32) {
        if level > MAX_TESSELLATION {
            log::warn!(
                "tessellation {} above maximum, clamping to {}",
                level,
                MAX_TESSELLATION
            );
        }
        self.tessellation = level.min(MAX_TESSELLATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_deform_defaults_only() {
        let mut p = SimParams::new();
        p.set_tessellation(7);
        p.moving_frequency = 0.042;
        p.bumpiness = 9.0;
        p.intensity = 6.0;
        for _ in 0..3 {
            p.advance_frame();
        }

        p.reset();

        assert_eq!(p.moving_frequency, DEFAULT_FREQUENCY);
        assert_eq!(p.bumpiness, DEFAULT_BUMPINESS);
        assert_eq!(p.intensity, DEFAULT_INTENSITY);
        // untouched by reset
        assert_eq!(p.tessellation, 7);
        assert_eq!(p.time, 3);
    }

    #[test]
    fn tessellation_clamped_at_upper_bound() {
        let mut p = SimParams::new();
        p.set_tessellation(20);
        assert_eq!(p.tessellation, MAX_TESSELLATION);
        p.set_tessellation(0);
        assert_eq!(p.tessellation, 0);
    }

    #[test]
    fn frame_counter_is_monotonic() {
        let mut p = SimParams::new();
        assert_eq!(p.time, 0);
        p.advance_frame();
        p.advance_frame();
        assert_eq!(p.time, 2);
    }
}
