//! Minimal control-panel widget library.
//!
//! The panel exposes a generic "bind a named numeric control / action, get
//! change notifications" surface: the application registers controls with
//! bounds and step, routes window events through the panel, and drains
//! [`panel::PanelEvent`]s each frame. Rendering goes through an instanced
//! quad pipeline ([`GuiRenderer`]) drawn on top of the 3-D passes.

pub mod button;
pub mod panel;
pub mod renderer;
pub mod slider;
pub mod widget;

pub use button::Button;
pub use panel::{CommandEffect, CommandTable, ControlPanel, PanelEvent};
pub use renderer::{GuiBatch, GuiQuad, GuiRenderer};
pub use slider::Slider;
pub use widget::Widget;
