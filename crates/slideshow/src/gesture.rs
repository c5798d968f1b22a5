//! Touch swipe detection.

/// Minimum horizontal travel, in logical pixels, for a touch to count as a
/// swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the next slide.
    Left,
    /// Finger moved right: show the previous slide.
    Right,
}

/// Classify a finished touch. Horizontal travel must dominate vertical
/// travel and exceed `threshold`.
pub fn classify(start: Point, end: Point, threshold: f32) -> Option<Swipe> {
    let diff_x = start.x - end.x;
    let diff_y = start.y - end.y;

    if diff_x.abs() > diff_y.abs() && diff_x.abs() > threshold {
        if diff_x > 0.0 {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    } else {
        None
    }
}

/// Remembers where the current touch started.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<Point>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    pub fn touch_start(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// Finish the current touch. The start point is always forgotten
    /// afterwards. A start whose x or y is exactly zero counts as no start.
    pub fn touch_end(&mut self, at: Point) -> Option<Swipe> {
        let start = self.start.take()?;
        if start.x == 0.0 || start.y == 0.0 {
            return None;
        }
        classify(start, at, self.threshold)
    }
}
