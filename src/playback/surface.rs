use super::state::Binding;

/// The native player a controller drives.
///
/// Implementations load and decode on their own schedule and report progress
/// as `MediaEvent`s tagged with the `Binding` they belong to.
pub trait PlaybackSurface {
    /// Drop whatever is loaded and start loading `binding.path`.
    fn bind(&mut self, binding: &Binding);
    /// Drop whatever is loaded.
    fn unbind(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    /// Current position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Length in seconds, NaN while unknown.
    fn duration(&self) -> f64;
}

/// Clamp a target position to `[0, duration]`. An unknown duration only
/// bounds the start.
pub fn clamp_position(target: f64, duration: f64) -> f64 {
    let target = if target.is_nan() { 0.0 } else { target.max(0.0) };
    if duration.is_finite() && duration >= 0.0 {
        target.min(duration)
    } else {
        target
    }
}
