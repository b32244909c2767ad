use egui::Pos2;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 10.0;
pub const DEFAULT_ZOOM_STEP: f32 = 1.1;

/// Uniform display scale applied to the container holding both surfaces.
///
/// The pixel buffers are never rescaled; pointer positions are divided by
/// the scale to get back to surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewScale {
    scale: f32,
    step: f32,
}

impl Default for ViewScale {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_STEP)
    }
}

impl ViewScale {
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 1.0 { step } else { DEFAULT_ZOOM_STEP };
        Self { scale: 1.0, step }
    }

    pub fn get(&self) -> f32 {
        self.scale
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Set the scale, clamped to [MIN_SCALE, MAX_SCALE]. Non-finite values are ignored.
    pub fn set(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set(self.scale * self.step);
    }

    pub fn zoom_out(&mut self) {
        self.set(self.scale / self.step);
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
    }

    /// Map a position relative to the scaled container into surface space
    pub fn to_surface(&self, screen: Pos2) -> Pos2 {
        Pos2::new(screen.x / self.scale, screen.y / self.scale)
    }

    /// Map a surface-space length into screen space
    pub fn to_screen_len(&self, len: f32) -> f32 {
        len * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_never_exceeds_max() {
        let mut view = ViewScale::default();
        for _ in 0..200 {
            view.zoom_in();
            assert!(view.get() <= MAX_SCALE);
        }
        assert_eq!(view.get(), MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_never_goes_below_min() {
        let mut view = ViewScale::default();
        for _ in 0..200 {
            view.zoom_out();
            assert!(view.get() >= MIN_SCALE);
        }
        assert_eq!(view.get(), MIN_SCALE);
    }

    #[test]
    fn test_zoom_steps_by_factor() {
        let mut view = ViewScale::default();
        view.zoom_in();
        assert!((view.get() - 1.1).abs() < 1e-6);
        view.zoom_out();
        assert!((view.get() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_ignores_nan() {
        let mut view = ViewScale::default();
        view.set(2.0);
        view.set(f32::NAN);
        assert_eq!(view.get(), 2.0);
        view.set(1000.0);
        assert_eq!(view.get(), MAX_SCALE);
    }

    #[test]
    fn test_to_surface_divides_by_scale() {
        let mut view = ViewScale::default();
        view.set(2.0);
        assert_eq!(view.to_surface(Pos2::new(20.0, 40.0)), Pos2::new(10.0, 20.0));
    }

    #[test]
    fn test_invalid_step_falls_back_to_default() {
        assert_eq!(ViewScale::new(0.5).step(), DEFAULT_ZOOM_STEP);
        assert_eq!(ViewScale::new(f32::NAN).step(), DEFAULT_ZOOM_STEP);
        assert_eq!(ViewScale::new(1.25).step(), 1.25);
    }
}
