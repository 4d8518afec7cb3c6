//! Outcome card: success / error / info with an attached message

use eframe::egui::{self, Color32, RichText, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Success,
    Error,
    Info,
}

/// One rendered outcome; replaced wholesale whenever a new attempt settles.
#[derive(Debug, Clone)]
pub struct ResultCard {
    pub kind: CardKind,
    pub title: String,
    pub body: Option<String>,
}

impl ResultCard {
    pub fn success(title: impl Into<String>, body: Option<String>) -> Self {
        Self {
            kind: CardKind::Success,
            title: title.into(),
            body,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: CardKind::Error,
            title: message.into(),
            body: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: CardKind::Info,
            title: message.into(),
            body: None,
        }
    }

    pub fn ui(&self, ui: &mut Ui) {
        let (fill, accent) = match self.kind {
            CardKind::Success => (Color32::from_rgb(18, 60, 40), Color32::LIGHT_GREEN),
            CardKind::Error => (Color32::from_rgb(80, 20, 20), Color32::LIGHT_RED),
            CardKind::Info => (Color32::from_rgb(18, 40, 70), Color32::LIGHT_BLUE),
        };

        ui.add_space(10.0);
        egui::Frame::new()
            .fill(fill)
            .inner_margin(10.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.title).color(accent).strong());
                if let Some(ref body) = self.body {
                    ui.add_space(4.0);
                    ui.label(body);
                }
            });
    }
}
