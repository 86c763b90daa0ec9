use wobble_core::{InputState, Time};
use wobble_gui::{ControlPanel, PanelEvent};

/// Per-frame context passed to every [`crate::WobbleApp`] callback.
pub struct AppContext<'a> {
    /// Keyboard and mouse state for this frame.
    pub input: &'a InputState,

    /// Frame timing snapshot.
    pub time: Time,

    /// Current window size in physical pixels.
    pub window_size: (u32, u32),

    /// The control panel, for pushing programmatic value changes back into
    /// the UI (the panel's own events arrive via `panel_events`).
    pub panel: &'a mut ControlPanel,

    /// Panel notifications drained at the start of this frame.
    pub panel_events: &'a [PanelEvent],

    pub(crate) exit_requested: bool,
}

impl<'a> AppContext<'a> {
    /// Stops the event loop after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Aspect ratio (width / height); 1.0 for a degenerate window.
    pub fn aspect(&self) -> f32 {
        let (w, h) = self.window_size;
        if h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }
}
