use eframe::egui::Color32;

/// Font sizes in logical pixels at 1080p; scaled with the window.
#[derive(Debug, Clone, Copy)]
pub struct TypeScale {
    pub headings: [f32; 3],
    pub body: f32,
    pub code: f32,
    pub counter: f32,
}

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            headings: [88.0, 64.0, 48.0],
            body: 40.0,
            code: 28.0,
            counter: 20.0,
        }
    }
}

/// Colours for the slide surface and the control bar beneath it.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub text: Color32,
    pub heading: Color32,
    pub code_fill: Color32,
    pub code_text: Color32,
    /// Filled part of the progress bar.
    pub progress: Color32,
    /// Unfilled part of the progress bar.
    pub track: Color32,
    pub counter: Color32,
    pub sizes: TypeScale,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x12, 0x16, 0x20),
            text: Color32::from_rgb(0xD6, 0xDB, 0xE4),
            heading: Color32::from_rgb(0xF4, 0xF6, 0xFA),
            code_fill: Color32::from_rgb(0x1C, 0x22, 0x30),
            code_text: Color32::from_rgb(0xB8, 0xE0, 0xC8),
            progress: Color32::from_rgb(0xF0, 0xA2, 0x3B),
            track: Color32::from_rgb(0x26, 0x2D, 0x3B),
            counter: Color32::from_rgb(0x8A, 0x93, 0xA6),
            sizes: TypeScale::default(),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFA, 0xF8, 0xF4),
            text: Color32::from_rgb(0x2B, 0x2D, 0x33),
            heading: Color32::from_rgb(0x11, 0x1A, 0x2C),
            code_fill: Color32::from_rgb(0xEE, 0xEB, 0xE4),
            code_text: Color32::from_rgb(0x3A, 0x3F, 0x4B),
            progress: Color32::from_rgb(0xD9, 0x5D, 0x2B),
            track: Color32::from_rgb(0xE6, 0xE1, 0xD8),
            counter: Color32::from_rgb(0x7A, 0x76, 0x6E),
            sizes: TypeScale::default(),
        }
    }

    /// Unknown names get the light theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn faded(color: Color32, opacity: f32) -> Color32 {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }

    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1..=3 => self.sizes.headings[usize::from(level - 1)],
            _ => self.sizes.body,
        }
    }
}
