use crate::session::NotificationKind;
use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub surface: Color32,
    pub surface_muted: Color32,
    pub primary: Color32,
    pub primary_muted: Color32,
    pub secondary: Color32,
    pub error: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub radius_12: u8,
    pub cell_size: f32,
    pub toggle_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            surface: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            surface_muted: Color32::from_rgb(0xFA, 0xFA, 0xFA),
            primary: Color32::from_rgb(0x25, 0x63, 0xEB),
            primary_muted: Color32::from_rgb(0x3B, 0x82, 0xF6),
            secondary: Color32::from_rgb(0xF5, 0x9E, 0x0B),
            error: Color32::from_rgb(0xEF, 0x44, 0x44),
            text_primary: Color32::from_rgb(0x11, 0x18, 0x27),
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            text_on_accent: Color32::WHITE,
            border_subtle: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            spacing_12: Self::P12,
            spacing_16: Self::P16,
            radius_12: Self::R12,
            cell_size: 100.0,
            toggle_size: 56.0,
        }
    }
}

impl Theme {
    pub const R12: u8 = 12;
    pub const P12: f32 = 12.0;
    pub const P16: f32 = 16.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.background;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface;
        visuals.widgets.noninteractive.weak_bg_fill = self.surface;
        visuals.widgets.inactive.bg_fill = self.surface;
        visuals.widgets.inactive.weak_bg_fill = self.surface;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.primary_muted);
        visuals.widgets.active.bg_fill = self.primary_muted;
        visuals.selection.bg_fill = self.primary_muted;
        visuals.hyperlink_color = self.primary;
        visuals.window_fill = self.surface;
        visuals.window_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.window_corner_radius = CornerRadius::same(16);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_rgba_premultiplied(0, 0, 0, 32),
        };
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(24.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32, inner_padding: i8) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(inner_padding))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::new(1.0, self.border_subtle))
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 18,
                spread: 0,
                color: Color32::from_rgba_premultiplied(0, 0, 0, 20),
            })
    }

    pub fn card_frame(&self) -> Frame {
        self.panel_frame(self.surface, self.spacing_16 as i8 + 8)
    }

    /// Chat bubble: user messages on the accent color, assistant on white.
    pub fn bubble_frame(&self, from_user: bool) -> Frame {
        let fill = if from_user { self.primary } else { self.surface };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(self.spacing_12 as i8, 10))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    pub fn bubble_text_color(&self, from_user: bool) -> Color32 {
        if from_user {
            self.text_on_accent
        } else {
            self.text_primary
        }
    }

    pub fn transcript_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_muted)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
    }

    pub fn toast_frame(&self, kind: NotificationKind) -> Frame {
        let fill = match kind {
            NotificationKind::Error => self.error,
            NotificationKind::Info => self.secondary,
        };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(14, 10))
            .corner_radius(CornerRadius::same(self.radius_12))
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .stroke(Stroke::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn transcript_frame_uses_muted_surface() {
        let theme = Theme::default();
        let frame = theme.transcript_frame();
        assert_eq!(frame.fill, theme.surface_muted);
        assert_ne!(frame.fill, theme.surface);
    }
}
