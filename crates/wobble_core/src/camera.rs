use glam::{Mat4, Vec3};

/// Perspective camera with lazily cached view and projection matrices.
///
/// Mutating any view parameter (eye, target, up) or projection parameter
/// (fovy, aspect, near, far) only marks the matching matrix dirty; the
/// recompute happens in [`Camera::update`], which the frame loop calls once
/// per tick. `update` is a cheap no-op when nothing changed, so callers do
/// not need to track dirtiness themselves.
///
/// On a viewport resize the caller must pair [`Camera::set_aspect_ratio`]
/// with [`Camera::update_projection_matrix`] (or rely on the next `update`)
/// before reading `proj()` again, otherwise the cached projection is stale.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    fovy: f32,
    aspect: f32,
    znear: f32,
    zfar: f32,

    view: Mat4,
    proj: Mat4,
    view_dirty: bool,
    proj_dirty: bool,
}

impl Camera {
    /// Creates a camera at `eye` looking at `target`, with a 45 degree
    /// vertical field of view. The aspect ratio starts at 1.0 and should be
    /// set from the real viewport before the first frame.
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let mut cam = Self {
            eye,
            target,
            up: Vec3::Y,
            fovy: 45.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_dirty: true,
            proj_dirty: true,
        };
        cam.update();
        cam
    }

    // ── View parameters ───────────────────────────────────────────────────

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
        self.view_dirty = true;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.view_dirty = true;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
        self.view_dirty = true;
    }

    // ── Projection parameters ─────────────────────────────────────────────

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    /// Updates the aspect ratio (width / height). Call together with
    /// [`Camera::update_projection_matrix`] when the viewport resizes.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.proj_dirty = true;
    }

    pub fn set_fovy(&mut self, radians: f32) {
        self.fovy = radians;
        self.proj_dirty = true;
    }

    pub fn set_clip_planes(&mut self, znear: f32, zfar: f32) {
        self.znear = znear;
        self.zfar = zfar;
        self.proj_dirty = true;
    }

    // ── Recompute ─────────────────────────────────────────────────────────

    /// Recomputes whichever cached matrices were invalidated since the last
    /// call. Cheap to call every frame.
    pub fn update(&mut self) {
        if self.view_dirty {
            self.view = Mat4::look_at_rh(self.eye, self.target, self.up);
            self.view_dirty = false;
        }
        if self.proj_dirty {
            self.update_projection_matrix();
        }
    }

    /// Forces the projection matrix recompute from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        self.proj_dirty = false;
    }

    // ── Read-only matrix access ───────────────────────────────────────────

    /// World-to-camera transform, as of the last recompute.
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Camera-to-clip transform, as of the last recompute.
    pub fn proj(&self) -> Mat4 {
        self.proj
    }

    /// Combined projection * view, the matrix shaders consume.
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_projection_before_next_read() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.set_aspect_ratio(800.0 / 600.0);
        cam.update_projection_matrix();
        let wide = cam.proj();

        cam.set_aspect_ratio(1920.0 / 600.0);
        cam.update_projection_matrix();
        assert_eq!(cam.aspect_ratio(), 1920.0 / 600.0);
        assert_ne!(cam.proj(), wide);
    }

    #[test]
    fn update_is_lazy() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let view = cam.view();
        // no parameter changed, update must not alter the cached matrix
        cam.update();
        assert_eq!(cam.view(), view);

        cam.set_eye(Vec3::new(0.0, 2.0, 5.0));
        // stale until update() is called
        assert_eq!(cam.view(), view);
        cam.update();
        assert_ne!(cam.view(), view);
    }

    #[test]
    fn view_proj_composes_both_matrices() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.set_aspect_ratio(2.0);
        cam.update();
        assert_eq!(cam.view_proj(), cam.proj() * cam.view());
    }

    #[test]
    fn look_at_points_down_negative_z() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.update();
        // the target should land in front of the camera (negative view z)
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!(p.z < 0.0);
    }
}
