//! Handles the controller writes derived UI state into.
//!
//! The controller never looks the UI up by itself; the host hands it one
//! [`Panel`] per slide and a single [`Chrome`] for everything around them.

/// One slide's visual content block.
pub trait Panel {
    fn set_active(&mut self, active: bool);

    /// Clear every entry animation on this panel and start it again from
    /// the beginning.
    fn replay_entry_animations(&mut self);
}

/// Counter, progress indicator and the previous/next controls.
pub trait Chrome {
    fn set_counter_text(&mut self, text: &str);

    /// Width of the progress indicator as a percentage in `(0, 100]`.
    fn set_progress_width(&mut self, percent: f32);

    fn set_prev_disabled(&mut self, disabled: bool);

    fn set_next_disabled(&mut self, disabled: bool);
}

/// Everything shown around the panels, computed from the cursor alone.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub counter: String,
    /// Fraction of the deck shown so far, `(cursor + 1) / len`.
    pub progress: f32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl StatusView {
    pub fn compute(cursor: usize, len: usize) -> Self {
        let shown = cursor + 1;
        Self {
            counter: format!("{shown} / {len}"),
            progress: shown as f32 / len as f32,
            prev_disabled: cursor == 0,
            next_disabled: cursor + 1 == len,
        }
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress * 100.0
    }

    pub fn write_to(&self, chrome: &mut impl Chrome) {
        chrome.set_counter_text(&self.counter);
        chrome.set_progress_width(self.progress_percent());
        chrome.set_prev_disabled(self.prev_disabled);
        chrome.set_next_disabled(self.next_disabled);
    }
}
