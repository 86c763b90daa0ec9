use crate::renderer::GuiBatch;

/// Any panel element that can draw itself and react to the mouse.
///
/// Widgets emit plain quads into a [`GuiBatch`] instead of talking to the
/// GPU; the panel converts the batch once per frame.
pub trait Widget {
    fn draw(&self, batch: &mut GuiBatch);

    /// Whether the point (window pixels) falls inside the widget.
    fn hit(&self, mx: f64, my: f64) -> bool;

    #[allow(unused_variables)]
    fn mouse_move(&mut self, mx: f64, my: f64) {}

    #[allow(unused_variables)]
    fn mouse_input(&mut self, mx: f64, my: f64, pressed: bool) {}
}

/// Shared hit test for rectangular widgets (`rect` = x, y, w, h).
pub(crate) fn rect_hit(rect: [f32; 4], mx: f64, my: f64) -> bool {
    let (x, y) = (mx as f32, my as f32);
    x >= rect[0] && x <= rect[0] + rect[2] && y >= rect[1] && y <= rect[1] + rect[3]
}
