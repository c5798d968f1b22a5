use tracing::{debug, trace};

use crate::error::SlideshowError;
use crate::surface::{Chrome, Panel, StatusView};

/// Owns the cursor into a fixed sequence of panels and keeps every derived
/// view in sync with it.
///
/// Exactly one panel is active at any time, the one at `current_slide`.
pub struct Controller<P: Panel, C: Chrome> {
    panels: Vec<P>,
    chrome: C,
    current_slide: usize,
}

impl<P: Panel, C: Chrome> Controller<P, C> {
    /// Take over the panels and chrome, show the first panel and replay its
    /// entry animations.
    pub fn new(panels: Vec<P>, chrome: C) -> Result<Self, SlideshowError> {
        if panels.is_empty() {
            return Err(SlideshowError::EmptyDeck);
        }
        let mut controller = Self {
            panels,
            chrome,
            current_slide: 0,
        };
        controller.show_current();
        debug!(slides = controller.len(), "slideshow initialized");
        Ok(controller)
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn status(&self) -> StatusView {
        StatusView::compute(self.current_slide, self.len())
    }

    pub fn panels(&self) -> &[P] {
        &self.panels
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    /// Show slide `n`, clamped into `0..len`. Out of range input is not an
    /// error.
    pub fn go_to_slide(&mut self, n: isize) {
        let last = self.len() - 1;
        self.current_slide = if n < 0 {
            0
        } else {
            (n as usize).min(last)
        };
        if self.current_slide as isize != n {
            trace!(requested = n, clamped = self.current_slide, "slide index clamped");
        }
        self.show_current();
    }

    /// Move one slide forward. Does nothing on the last slide.
    pub fn advance(&mut self) -> bool {
        if self.current_slide + 1 >= self.len() {
            trace!("advance ignored on last slide");
            return false;
        }
        self.current_slide += 1;
        self.show_current();
        true
    }

    /// Move one slide back. Does nothing on the first slide.
    pub fn retreat(&mut self) -> bool {
        if self.current_slide == 0 {
            trace!("retreat ignored on first slide");
            return false;
        }
        self.current_slide -= 1;
        self.show_current();
        true
    }

    fn show_current(&mut self) {
        let current = self.current_slide;
        for panel in &mut self.panels {
            panel.set_active(false);
        }
        let panel = &mut self.panels[current];
        panel.set_active(true);
        panel.replay_entry_animations();

        let status = self.status();
        status.write_to(&mut self.chrome);
        debug!(slide = current + 1, total = self.len(), "showing slide");
    }
}
