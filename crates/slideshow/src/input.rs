//! Input bindings: every user intent funnels through [`Bindings::dispatch`].

use tracing::trace;

use crate::controller::Controller;
use crate::gesture::{Point, Swipe, SwipeTracker};
use crate::surface::{Chrome, Panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PrevActivated,
    NextActivated,
    KeyDown(Key),
    TouchStart(Point),
    TouchEnd(Point),
    /// Secondary click / long press.
    ContextMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Advance,
    Retreat,
}

/// What happened to an event after it was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disposition {
    /// The cursor moved.
    pub navigated: bool,
    /// The host must not run its own default action for the event.
    pub default_prevented: bool,
}

impl Disposition {
    const IGNORED: Self = Self {
        navigated: false,
        default_prevented: false,
    };
}

/// Map a key press to an intent. The second value is whether the key's
/// default action (page scroll for space and arrow-down) is suppressed.
pub fn key_intent(key: Key) -> (Option<Intent>, bool) {
    match key {
        Key::ArrowLeft | Key::ArrowUp => (Some(Intent::Retreat), false),
        Key::ArrowRight | Key::ArrowDown | Key::Space => (Some(Intent::Advance), true),
        Key::Other => (None, false),
    }
}

/// Input state that outlives a single event. Only the touch flow needs any.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    swipe: SwipeTracker,
}

impl Bindings {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn dispatch<P: Panel, C: Chrome>(
        &mut self,
        controller: &mut Controller<P, C>,
        event: InputEvent,
    ) -> Disposition {
        let (intent, default_prevented) = match event {
            InputEvent::PrevActivated => (Some(Intent::Retreat), false),
            InputEvent::NextActivated => (Some(Intent::Advance), false),
            InputEvent::KeyDown(key) => key_intent(key),
            InputEvent::TouchStart(at) => {
                self.swipe.touch_start(at);
                (None, false)
            }
            InputEvent::TouchEnd(at) => {
                let intent = self.swipe.touch_end(at).map(|swipe| match swipe {
                    Swipe::Left => Intent::Advance,
                    Swipe::Right => Intent::Retreat,
                });
                (intent, false)
            }
            InputEvent::ContextMenu => (None, true),
        };

        let Some(intent) = intent else {
            trace!(?event, "no navigation for event");
            return Disposition {
                default_prevented,
                ..Disposition::IGNORED
            };
        };

        let navigated = match intent {
            Intent::Advance => controller.advance(),
            Intent::Retreat => controller.retreat(),
        };
        Disposition {
            navigated,
            default_prevented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::controller;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_intent(Key::ArrowLeft), (Some(Intent::Retreat), false));
        assert_eq!(key_intent(Key::ArrowUp), (Some(Intent::Retreat), false));
        assert_eq!(key_intent(Key::ArrowRight), (Some(Intent::Advance), true));
        assert_eq!(key_intent(Key::ArrowDown), (Some(Intent::Advance), true));
        assert_eq!(key_intent(Key::Space), (Some(Intent::Advance), true));
        assert_eq!(key_intent(Key::Other), (None, false));
    }

    #[test]
    fn test_buttons_navigate() {
        let mut ctl = controller(3);
        let mut bindings = Bindings::default();

        let d = bindings.dispatch(&mut ctl, InputEvent::NextActivated);
        assert!(d.navigated);
        assert_eq!(ctl.current_slide(), 1);

        let d = bindings.dispatch(&mut ctl, InputEvent::PrevActivated);
        assert!(d.navigated);
        assert_eq!(ctl.current_slide(), 0);

        let d = bindings.dispatch(&mut ctl, InputEvent::PrevActivated);
        assert!(!d.navigated);
        assert_eq!(ctl.current_slide(), 0);
    }

    #[test]
    fn test_space_prevents_default_even_on_last_slide() {
        let mut ctl = controller(2);
        let mut bindings = Bindings::default();
        bindings.dispatch(&mut ctl, InputEvent::KeyDown(Key::Space));
        assert_eq!(ctl.current_slide(), 1);

        let d = bindings.dispatch(&mut ctl, InputEvent::KeyDown(Key::ArrowDown));
        assert!(!d.navigated);
        assert!(d.default_prevented);
        assert_eq!(ctl.chrome().counter, "2 / 2");
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut ctl = controller(3);
        let mut bindings = Bindings::default();
        let d = bindings.dispatch(&mut ctl, InputEvent::KeyDown(Key::Other));
        assert_eq!(d, Disposition::IGNORED);
        assert_eq!(ctl.current_slide(), 0);
    }

    #[test]
    fn test_swipe_left_advances_and_right_retreats() {
        let mut ctl = controller(3);
        let mut bindings = Bindings::default();

        bindings.dispatch(&mut ctl, InputEvent::TouchStart(Point::new(200.0, 100.0)));
        let d = bindings.dispatch(&mut ctl, InputEvent::TouchEnd(Point::new(100.0, 100.0)));
        assert!(d.navigated);
        assert_eq!(ctl.current_slide(), 1);

        bindings.dispatch(&mut ctl, InputEvent::TouchStart(Point::new(100.0, 100.0)));
        bindings.dispatch(&mut ctl, InputEvent::TouchEnd(Point::new(300.0, 120.0)));
        assert_eq!(ctl.current_slide(), 0);
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut ctl = controller(3);
        let mut bindings = Bindings::default();
        bindings.dispatch(&mut ctl, InputEvent::TouchStart(Point::new(120.0, 100.0)));
        let d = bindings.dispatch(&mut ctl, InputEvent::TouchEnd(Point::new(100.0, 100.0)));
        assert!(!d.navigated);
        assert_eq!(ctl.current_slide(), 0);
    }

    #[test]
    fn test_context_menu_always_suppressed() {
        let mut ctl = controller(3);
        let mut bindings = Bindings::default();
        let d = bindings.dispatch(&mut ctl, InputEvent::ContextMenu);
        assert!(d.default_prevented);
        assert!(!d.navigated);
        ctl.go_to_slide(2);
        let d = bindings.dispatch(&mut ctl, InputEvent::ContextMenu);
        assert!(d.default_prevented);
        assert_eq!(ctl.current_slide(), 2);
    }
}
