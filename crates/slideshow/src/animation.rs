use std::time::{Duration, Instant};

pub const ENTRY_DURATION: Duration = Duration::from_millis(600);

/// Distance, in logical pixels at 1080p, that sliding elements travel.
const SLIDE_DISTANCE: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationRole {
    FadeIn,
    SlideUp,
    SlideLeft,
    SlideRight,
}

impl AnimationRole {
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "fade-in" => Some(Self::FadeIn),
            "slide-up" => Some(Self::SlideUp),
            "slide-left" => Some(Self::SlideLeft),
            "slide-right" => Some(Self::SlideRight),
            _ => None,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::FadeIn => "fade-in",
            Self::SlideUp => "slide-up",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
        }
    }

    /// Offset at the very start of the animation. Every role also fades in.
    pub fn start_offset(&self) -> (f32, f32) {
        match self {
            Self::FadeIn => (0.0, 0.0),
            Self::SlideUp => (0.0, SLIDE_DISTANCE),
            Self::SlideLeft => (SLIDE_DISTANCE, 0.0),
            Self::SlideRight => (-SLIDE_DISTANCE, 0.0),
        }
    }
}

/// Clock for one element's entry animation.
///
/// An animation that was never started (or was cleared and not restarted)
/// shows its element at rest.
#[derive(Debug, Clone)]
pub struct EntryAnimation {
    pub role: AnimationRole,
    started: Option<Instant>,
}

impl EntryAnimation {
    pub fn new(role: AnimationRole) -> Self {
        Self {
            role,
            started: None,
        }
    }

    pub fn clear(&mut self) {
        self.started = None;
    }

    pub fn restart(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(start) = self.started else {
            return 1.0;
        };
        let elapsed = now.saturating_duration_since(start).as_secs_f32();
        ease_in_out((elapsed / ENTRY_DURATION.as_secs_f32()).clamp(0.0, 1.0))
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|start| now.saturating_duration_since(start) < ENTRY_DURATION)
    }

    /// Opacity and `(dx, dy)` offset for the current frame.
    pub fn pose(&self, now: Instant) -> (f32, (f32, f32)) {
        let t = self.progress(now);
        let (dx, dy) = self.role.start_offset();
        (t, (dx * (1.0 - t), dy * (1.0 - t)))
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
