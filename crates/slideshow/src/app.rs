use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::animation::EntryAnimation;
use crate::config::Config;
use crate::controller::Controller;
use crate::deck::{self, ElementKind, SlideContent};
use crate::error::SlideshowError;
use crate::gesture::Point;
use crate::input::{Bindings, InputEvent, Key};
use crate::surface::{Chrome, Panel};
use crate::theme::Theme;

/// Height of the bottom control bar at 1080p.
const BAR_HEIGHT: f32 = 72.0;
const PROGRESS_HEIGHT: f32 = 6.0;
const BUTTON_SIZE: f32 = 48.0;

/// A slide panel backed by parsed deck content.
pub struct DeckPanel {
    content: SlideContent,
    active: bool,
    /// One clock per element; `None` for elements without an entry animation.
    animations: Vec<Option<EntryAnimation>>,
}

impl DeckPanel {
    pub fn new(content: SlideContent) -> Self {
        let animations = content
            .elements
            .iter()
            .map(|e| e.animation.map(EntryAnimation::new))
            .collect();
        Self {
            content,
            active: false,
            animations,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animations
            .iter()
            .flatten()
            .any(|anim| anim.is_running(now))
    }
}

impl Panel for DeckPanel {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn replay_entry_animations(&mut self) {
        let now = Instant::now();
        for anim in self.animations.iter_mut().flatten() {
            trace!(role = anim.role.class_name(), "replaying entry animation");
            anim.clear();
            anim.restart(now);
        }
    }
}

/// Counter, progress bar and button state as last written by the controller.
#[derive(Debug, Default)]
pub struct WindowChrome {
    counter: String,
    progress_percent: f32,
    prev_disabled: bool,
    next_disabled: bool,
}

impl Chrome for WindowChrome {
    fn set_counter_text(&mut self, text: &str) {
        self.counter.clear();
        self.counter.push_str(text);
    }

    fn set_progress_width(&mut self, percent: f32) {
        self.progress_percent = percent;
    }

    fn set_prev_disabled(&mut self, disabled: bool) {
        self.prev_disabled = disabled;
    }

    fn set_next_disabled(&mut self, disabled: bool) {
        self.next_disabled = disabled;
    }
}

struct SlideshowApp {
    controller: Controller<DeckPanel, WindowChrome>,
    bindings: Bindings,
    theme: Theme,
}

impl SlideshowApp {
    /// Build the controller over `panels` and open it on `start_slide`
    /// (1-indexed). Called once the window exists so the first slide's entry
    /// animations run while they can be seen.
    fn new(
        panels: Vec<DeckPanel>,
        start_slide: Option<usize>,
        bindings: Bindings,
        theme: Theme,
    ) -> Result<Self, SlideshowError> {
        let mut controller = Controller::new(panels, WindowChrome::default())?;
        if let Some(n) = start_slide {
            controller.go_to_slide(start_index(n));
        }
        Ok(Self {
            controller,
            bindings,
            theme,
        })
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: InputEvent) {
        let disposition = self.bindings.dispatch(&mut self.controller, event);
        if disposition.default_prevented {
            // keep egui from also treating the key as widget focus/activation
            if let InputEvent::KeyDown(key) = event {
                if let Some(key) = egui_key(key) {
                    ctx.input_mut(|i| {
                        i.consume_key(egui::Modifiers::NONE, key);
                    });
                }
            }
        }
        if disposition.navigated {
            ctx.request_repaint();
        }
    }

    fn draw_panel(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32, now: Instant) {
        let Some(panel) = self.controller.panels().iter().find(|p| p.is_active()) else {
            return;
        };

        let padding = 96.0 * scale;
        let width = rect.width() - padding * 2.0;
        let mut y = rect.top() + padding;

        for (element, anim) in panel.content.elements.iter().zip(&panel.animations) {
            let (opacity, (dx, dy)) = anim
                .as_ref()
                .map_or((1.0, (0.0, 0.0)), |anim| anim.pose(now));

            let (font, color, gap) = match element.kind {
                ElementKind::Heading(level) => (
                    egui::FontId::proportional(self.theme.heading_size(level) * scale),
                    self.theme.heading,
                    32.0,
                ),
                ElementKind::Paragraph | ElementKind::Bullet => (
                    egui::FontId::proportional(self.theme.sizes.body * scale),
                    self.theme.text,
                    20.0,
                ),
                ElementKind::Code => (
                    egui::FontId::monospace(self.theme.sizes.code * scale),
                    self.theme.code_text,
                    28.0,
                ),
            };
            let color = Theme::faded(color, opacity);

            let (text, indent) = match element.kind {
                ElementKind::Bullet => (format!("\u{2022}  {}", element.text), 24.0 * scale),
                _ => (element.text.clone(), 0.0),
            };

            let galley = ui
                .painter()
                .layout(text, font, color, width - indent);

            let inset = if element.kind == ElementKind::Code {
                16.0 * scale
            } else {
                0.0
            };
            y += inset;
            let pos = egui::pos2(rect.left() + padding + indent + dx * scale, y + dy * scale);
            if inset > 0.0 {
                let bg = egui::Rect::from_min_size(pos, galley.rect.size()).expand(inset);
                ui.painter().rect_filled(
                    bg,
                    6.0 * scale,
                    Theme::faded(self.theme.code_fill, opacity),
                );
            }

            y += galley.rect.height() + inset + gap * scale;
            ui.painter().galley(pos, galley, color);
        }
    }

    /// Draw the progress bar, counter and previous/next buttons. Returns the
    /// button activations to dispatch.
    fn draw_chrome(&self, ui: &mut egui::Ui, rect: egui::Rect, scale: f32) -> Vec<InputEvent> {
        let chrome = self.controller.chrome();
        let mut events = Vec::new();

        let bar = egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.bottom() - BAR_HEIGHT * scale),
            rect.max,
        );

        let track = egui::Rect::from_min_size(
            bar.min,
            egui::vec2(bar.width(), PROGRESS_HEIGHT * scale),
        );
        ui.painter()
            .rect_filled(track, 0.0, self.theme.track);
        let fill = egui::Rect::from_min_size(
            track.min,
            egui::vec2(
                track.width() * chrome.progress_percent / 100.0,
                track.height(),
            ),
        );
        ui.painter().rect_filled(fill, 0.0, self.theme.progress);

        let counter_color = self.theme.counter;
        let counter_galley = ui.painter().layout_no_wrap(
            chrome.counter.clone(),
            egui::FontId::monospace(self.theme.sizes.counter * scale),
            counter_color,
        );
        let counter_pos = egui::pos2(
            bar.center().x - counter_galley.rect.width() / 2.0,
            bar.center().y - counter_galley.rect.height() / 2.0,
        );
        ui.painter()
            .galley(counter_pos, counter_galley, counter_color);

        let size = egui::vec2(BUTTON_SIZE * scale, BUTTON_SIZE * scale);
        let margin = 24.0 * scale;
        let prev_rect = egui::Rect::from_center_size(
            egui::pos2(bar.left() + margin + size.x / 2.0, bar.center().y),
            size,
        );
        let next_rect = egui::Rect::from_center_size(
            egui::pos2(bar.right() - margin - size.x / 2.0, bar.center().y),
            size,
        );

        let font = egui::FontId::proportional(28.0 * scale);
        let mut prev_ui = ui.new_child(egui::UiBuilder::new().max_rect(prev_rect).id_salt("prev"));
        let prev = prev_ui.add_enabled(
            !chrome.prev_disabled,
            egui::Button::new(egui::RichText::new("\u{2039}").font(font.clone()))
                .min_size(size),
        );
        if prev.clicked() {
            events.push(InputEvent::PrevActivated);
        }

        let mut next_ui = ui.new_child(egui::UiBuilder::new().max_rect(next_rect).id_salt("next"));
        let next = next_ui.add_enabled(
            !chrome.next_disabled,
            egui::Button::new(egui::RichText::new("\u{203A}").font(font)).min_size(size),
        );
        if next.clicked() {
            events.push(InputEvent::NextActivated);
        }

        events
    }
}

impl eframe::App for SlideshowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut events: Vec<InputEvent> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            events.extend(i.events.iter().filter_map(input_event));
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        for event in events {
            self.dispatch(ctx, event);
        }

        let now = Instant::now();
        let bg = self.theme.background;
        let mut clicks = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = Self::compute_scale(rect);

                let slide_rect = egui::Rect::from_min_max(
                    rect.min,
                    egui::pos2(rect.right(), rect.bottom() - BAR_HEIGHT * scale),
                );
                let child_ui = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(slide_rect)
                        .id_salt("slide_clip"),
                );
                self.draw_panel(&child_ui, slide_rect, scale, now);
                clicks = self.draw_chrome(ui, rect, scale);
            });

        for event in clicks {
            self.dispatch(ctx, event);
        }

        let current = self.controller.current_slide();
        if self.controller.panels()[current].is_animating(now) {
            ctx.request_repaint();
        }
    }
}

/// Translate a raw window event into slideshow input, if it is one.
fn input_event(event: &egui::Event) -> Option<InputEvent> {
    match event {
        egui::Event::Key {
            key, pressed: true, ..
        } => Some(InputEvent::KeyDown(slideshow_key(*key))),
        egui::Event::Touch { phase, pos, .. } => match phase {
            egui::TouchPhase::Start => Some(InputEvent::TouchStart(Point::new(pos.x, pos.y))),
            egui::TouchPhase::End => Some(InputEvent::TouchEnd(Point::new(pos.x, pos.y))),
            egui::TouchPhase::Move | egui::TouchPhase::Cancel => None,
        },
        egui::Event::PointerButton {
            button: egui::PointerButton::Secondary,
            pressed: true,
            ..
        } => Some(InputEvent::ContextMenu),
        _ => None,
    }
}

fn slideshow_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::Space => Key::Space,
        _ => Key::Other,
    }
}

fn egui_key(key: Key) -> Option<egui::Key> {
    match key {
        Key::ArrowLeft => Some(egui::Key::ArrowLeft),
        Key::ArrowUp => Some(egui::Key::ArrowUp),
        Key::ArrowRight => Some(egui::Key::ArrowRight),
        Key::ArrowDown => Some(egui::Key::ArrowDown),
        Key::Space => Some(egui::Key::Space),
        Key::Other => None,
    }
}

/// Cursor index for a 1-indexed slide number. Slide 0 is treated as 1 and
/// anything past `isize::MAX` lands on the last slide.
fn start_index(n: usize) -> isize {
    isize::try_from(n.saturating_sub(1)).unwrap_or(isize::MAX)
}

fn window_title(file: &Path, title: Option<&str>) -> String {
    title.map(str::to_string).unwrap_or_else(|| {
        format!(
            "slideshow \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    })
}

pub fn run(file: PathBuf, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let deck = deck::load(&file)?;
    let config = Config::load_or_default();

    let theme_name = deck.meta.theme.as_deref().unwrap_or(config.theme());
    let theme = Theme::from_name(theme_name);
    let title = window_title(&file, deck.meta.title.as_deref());

    let panels: Vec<DeckPanel> = deck.slides.into_iter().map(DeckPanel::new).collect();
    // CLI flag overrides config; both are 1-indexed
    let start_slide = start_slide.or_else(|| config.start_slide());

    info!(
        file = %file.display(),
        slides = panels.len(),
        theme = %theme.name,
        "starting slideshow"
    );
    debug!(threshold = config.swipe_threshold(), "swipe threshold");

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let bindings = Bindings::new(config.swipe_threshold());
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            let app = SlideshowApp::new(panels, start_slide, bindings, theme)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
