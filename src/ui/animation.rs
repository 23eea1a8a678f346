//! Animation primitives for the toast overlay
//!
//! Terminals have no alpha channel and no sub-cell positioning, so the
//! "opacity" and "position" of an animated element are expressed as a single
//! progress value in `0.0..=1.0` that the renderer maps onto row offsets and
//! colour blending.

use ratatui::style::Color;
use tokio::time::{Duration, Instant};

/// Lowest and highest frame rate the render loop will run at
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;

/// Easing curves used by the toast transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInCubic,
}

impl Easing {
    /// Map linear time `t` in `0.0..=1.0` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInCubic => t.powi(3),
        }
    }
}

/// Linear interpolation between two values
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Interpolation of a single value over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Value of the tween at `now`; before `start` this is `from`
    pub fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Durations of the enter/exit transitions and the frame interval of the
/// render loop that drives them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub enter: Duration,
    pub exit: Duration,
    pub frame_interval: Duration,
}

impl AnimationTiming {
    pub fn new(enter: Duration, exit: Duration, fps: u32) -> Self {
        Self {
            enter,
            exit,
            frame_interval: Self::frame_interval_for(fps),
        }
    }

    /// Zero-length transitions: the toast appears and disappears in one frame
    pub fn instant(fps: u32) -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, fps)
    }

    /// Frame interval for a requested frame rate, clamped to a rate the
    /// terminal can keep up with
    pub fn frame_interval_for(fps: u32) -> Duration {
        let fps = fps.clamp(MIN_FPS, MAX_FPS);
        Duration::from_millis(1000 / u64::from(fps))
    }

    pub fn is_instant(&self) -> bool {
        self.enter.is_zero() && self.exit.is_zero()
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), Duration::from_millis(200), 30)
    }
}

/// Blend `from` towards `to` by `t`.
///
/// RGB colours are interpolated per channel. Named and indexed colours can't
/// be mixed, so they switch over at the halfway point.
pub fn blend_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => Color::Rgb(
            blend_channel(r1, r2, t),
            blend_channel(g1, g2, t),
            blend_channel(b1, b2, t),
        ),
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn blend_channel(from: u8, to: u8, t: f32) -> u8 {
    lerp(f32::from(from), f32::from(to), t).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
            assert_eq!(easing.apply(-1.0), 0.0);
        }
        // Ease-out front-loads the movement
        assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
        assert!(Easing::EaseInCubic.apply(0.5) < 0.5);
    }

    #[test]
    fn test_tween_progression() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 1.0, start, Duration::from_millis(100), Easing::Linear);

        assert_eq!(tween.value_at(start), 0.0);
        assert!((tween.value_at(start + Duration::from_millis(50)) - 0.5).abs() < 1e-3);
        assert_eq!(tween.value_at(start + Duration::from_millis(150)), 1.0);
        assert!(!tween.is_finished(start + Duration::from_millis(99)));
        assert!(tween.is_finished(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_zero_duration_tween_is_immediately_done() {
        let start = Instant::now();
        let tween = Tween::new(0.3, 0.0, start, Duration::ZERO, Easing::EaseInCubic);

        assert!(tween.is_finished(start));
        assert_eq!(tween.value_at(start), 0.0);
    }

    #[test]
    fn test_frame_interval_is_clamped() {
        assert_eq!(AnimationTiming::frame_interval_for(0), Duration::from_millis(1000));
        assert_eq!(AnimationTiming::frame_interval_for(30), Duration::from_millis(33));
        assert_eq!(AnimationTiming::frame_interval_for(500), Duration::from_millis(16));
        assert!(AnimationTiming::instant(30).is_instant());
        assert!(!AnimationTiming::default().is_instant());
    }

    #[test]
    fn test_blend_color() {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);

        assert_eq!(blend_color(black, white, 0.0), black);
        assert_eq!(blend_color(black, white, 1.0), white);
        assert_eq!(blend_color(black, white, 0.5), Color::Rgb(128, 128, 128));

        assert_eq!(blend_color(Color::Black, Color::Green, 0.25), Color::Black);
        assert_eq!(blend_color(Color::Black, Color::Green, 0.75), Color::Green);
    }
}
