//! Recording stand-ins for the UI handles.

use crate::controller::Controller;
use crate::surface::{Chrome, Panel};

#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub active: bool,
    pub replays: usize,
}

impl Panel for RecordingPanel {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn replay_entry_animations(&mut self) {
        self.replays += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingChrome {
    pub counter: String,
    pub progress: f32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    /// Number of times the counter text was written.
    pub writes: usize,
}

impl Chrome for RecordingChrome {
    fn set_counter_text(&mut self, text: &str) {
        self.counter = text.to_string();
        self.writes += 1;
    }

    fn set_progress_width(&mut self, percent: f32) {
        self.progress = percent;
    }

    fn set_prev_disabled(&mut self, disabled: bool) {
        self.prev_disabled = disabled;
    }

    fn set_next_disabled(&mut self, disabled: bool) {
        self.next_disabled = disabled;
    }
}

/// A controller over `len` recording panels.
pub fn controller(len: usize) -> Controller<RecordingPanel, RecordingChrome> {
    let panels = (0..len).map(|_| RecordingPanel::default()).collect();
    match Controller::new(panels, RecordingChrome::default()) {
        Ok(ctl) => ctl,
        Err(e) => panic!("failed to build controller over {len} panels: {e}"),
    }
}
