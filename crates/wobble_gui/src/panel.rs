//! The control panel: named numeric controls, action buttons, change
//! notifications and the command table.

use winit::event::{ElementState, WindowEvent};

use wobble_core::InputState;

use crate::button::Button;
use crate::renderer::{GuiBatch, GuiQuad};
use crate::slider::Slider;
use crate::widget::Widget;

const PANEL_X: f32 = 10.0;
const PANEL_Y: f32 = 10.0;
const ROW_WIDTH: f32 = 200.0;
const ROW_HEIGHT: f32 = 18.0;
const ROW_GAP: f32 = 8.0;
const PANEL_PAD: f32 = 8.0;

/// Notification drained by the application once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A named numeric control changed to `value`.
    Control { name: String, value: f32 },
    /// An action button was clicked.
    Action(String),
}

/// On-screen panel of sliders and buttons, anchored top-left.
///
/// Controls are laid out in registration order. The panel owns no
/// application state: it reports changes as [`PanelEvent`]s and the app
/// applies them to its own parameter block.
#[derive(Default)]
pub struct ControlPanel {
    sliders: Vec<Slider>,
    buttons: Vec<Button>,
    events: Vec<PanelEvent>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Default::default()
    }

    fn next_row_rect(&self) -> [f32; 4] {
        let row = self.sliders.len() + self.buttons.len();
        let y = PANEL_Y + PANEL_PAD + row as f32 * (ROW_HEIGHT + ROW_GAP);
        [PANEL_X + PANEL_PAD, y, ROW_WIDTH, ROW_HEIGHT]
    }

    /// Registers a numeric control with bounds, step and initial value.
    pub fn bind_control(&mut self, name: &str, min: f32, max: f32, step: f32, initial: f32) {
        let rect = self.next_row_rect();
        self.sliders.push(Slider::new(name, rect, min, max, step, initial));
    }

    /// Registers a zero-argument action button.
    pub fn bind_action(&mut self, name: &str) {
        let rect = self.next_row_rect();
        self.buttons.push(Button::new(name, rect));
    }

    /// Current value of a named control.
    pub fn value(&self, name: &str) -> Option<f32> {
        self.sliders.iter().find(|s| s.name == name).map(|s| s.value())
    }

    /// Writes a control's value without raising a notification. Used to
    /// push programmatic state changes (e.g. reset) back into the UI.
    pub fn set_value(&mut self, name: &str, value: f32) {
        match self.sliders.iter_mut().find(|s| s.name == name) {
            Some(s) => s.set_value(value),
            None => log::warn!("set_value on unknown control `{name}`"),
        }
    }

    // ── Event routing ─────────────────────────────────────────────────────

    /// Feeds a winit event into the widgets and the shared input state.
    pub fn handle_window_event(&mut self, event: &WindowEvent, input: &mut InputState) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                input.set_mouse_position(position.x, position.y);
                self.mouse_move(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                input.update_mouse_button(*button, pressed);
                let (mx, my) = input.mouse_position();
                self.mouse_input(mx, my, pressed);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(code) = event.physical_key {
                    input.update_key(code, event.state == ElementState::Pressed);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn mouse_move(&mut self, mx: f64, my: f64) {
        for s in &mut self.sliders {
            s.mouse_move(mx, my);
        }
        self.collect();
    }

    pub(crate) fn mouse_input(&mut self, mx: f64, my: f64, pressed: bool) {
        for s in &mut self.sliders {
            s.mouse_input(mx, my, pressed);
        }
        for b in &mut self.buttons {
            b.mouse_input(mx, my, pressed);
        }
        self.collect();
    }

    fn collect(&mut self) {
        for s in &mut self.sliders {
            if let Some(value) = s.take_changed() {
                self.events.push(PanelEvent::Control {
                    name: s.name.clone(),
                    value,
                });
            }
        }
        for b in &mut self.buttons {
            if b.take_clicked() {
                self.events.push(PanelEvent::Action(b.name.clone()));
            }
        }
    }

    /// Takes the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    pub fn draw(&self, batch: &mut GuiBatch) {
        let rows = self.sliders.len() + self.buttons.len();
        if rows == 0 {
            return;
        }
        // backdrop
        batch.push(GuiQuad {
            pos: [PANEL_X, PANEL_Y],
            size: [
                ROW_WIDTH + 2.0 * PANEL_PAD,
                rows as f32 * (ROW_HEIGHT + ROW_GAP) - ROW_GAP + 2.0 * PANEL_PAD,
            ],
            color: [0.05, 0.05, 0.07, 0.7],
        });
        for s in &self.sliders {
            s.draw(batch);
        }
        for b in &self.buttons {
            b.draw(batch);
        }
    }
}

// ── Command table ─────────────────────────────────────────────────────────────

/// What a command asks the application to do after mutating the parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandEffect {
    /// Rebuild all scene meshes from the current parameters.
    pub rebuild_scene: bool,
}

/// Explicit mapping from action names to handler functions over the
/// application's parameter block, replacing ad-hoc function pointers
/// attached to GUI entries.
pub struct CommandTable<P> {
    entries: Vec<(String, fn(&mut P) -> CommandEffect)>,
}

impl<P> CommandTable<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &str, handler: fn(&mut P) -> CommandEffect) {
        self.entries.push((name.to_owned(), handler));
    }

    /// Runs the handler registered under `name`, or logs and returns `None`
    /// for an unknown action.
    pub fn dispatch(&self, name: &str, params: &mut P) -> Option<CommandEffect> {
        match self.entries.iter().find(|(n, _)| n == name) {
            Some((_, handler)) => Some(handler(params)),
            None => {
                log::warn!("no command registered for action `{name}`");
                None
            }
        }
    }
}

impl<P> Default for CommandTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        let mut p = ControlPanel::new();
        p.bind_control("bumpiness", 1.0, 10.0, 1.0, 3.0);
        p.bind_action("Reset");
        p
    }

    #[test]
    fn slider_drag_emits_control_event() {
        let mut p = panel();
        // press at the right edge of the first slider row
        let rect = [PANEL_X + PANEL_PAD, PANEL_Y + PANEL_PAD, ROW_WIDTH, ROW_HEIGHT];
        p.mouse_input((rect[0] + rect[2]) as f64, (rect[1] + 2.0) as f64, true);
        p.mouse_input((rect[0] + rect[2]) as f64, (rect[1] + 2.0) as f64, false);

        let events = p.drain_events();
        assert_eq!(
            events,
            vec![PanelEvent::Control {
                name: "bumpiness".into(),
                value: 10.0
            }]
        );
        assert_eq!(p.value("bumpiness"), Some(10.0));
        // drained
        assert!(p.drain_events().is_empty());
    }

    #[test]
    fn button_click_emits_action_event() {
        let mut p = panel();
        let y = (PANEL_Y + PANEL_PAD + ROW_HEIGHT + ROW_GAP + 2.0) as f64;
        let x = (PANEL_X + PANEL_PAD + 5.0) as f64;
        p.mouse_input(x, y, true);
        p.mouse_input(x, y, false);
        assert_eq!(p.drain_events(), vec![PanelEvent::Action("Reset".into())]);
    }

    #[test]
    fn set_value_is_silent_and_readable() {
        let mut p = panel();
        p.set_value("bumpiness", 8.0);
        assert_eq!(p.value("bumpiness"), Some(8.0));
        assert!(p.drain_events().is_empty());
    }

    #[test]
    fn command_table_dispatches_by_name() {
        #[derive(Default)]
        struct Params {
            resets: u32,
        }

        let mut table = CommandTable::new();
        table.register("Reset", |p: &mut Params| {
            p.resets += 1;
            CommandEffect::default()
        });
        table.register("Load Scene", |_p: &mut Params| CommandEffect {
            rebuild_scene: true,
        });

        let mut params = Params::default();
        assert_eq!(
            table.dispatch("Reset", &mut params),
            Some(CommandEffect::default())
        );
        assert_eq!(params.resets, 1);
        assert_eq!(
            table.dispatch("Load Scene", &mut params).map(|e| e.rebuild_scene),
            Some(true)
        );
        assert_eq!(table.dispatch("missing", &mut params), None);
    }
}
