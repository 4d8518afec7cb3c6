//! Start screen: choose the estimation method

use crate::app::Screen;
use eframe::egui::{self, Color32, RichText, Ui};

/// Render the start screen; returns the chosen screen, if any.
pub fn ui(ui: &mut Ui) -> Option<Screen> {
    let mut selected = None;

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new("🐐").size(64.0));
        ui.add_space(8.0);
        ui.heading("Calculadora Caprina IA");
        ui.add_space(4.0);
        ui.label(
            RichText::new("Escolha o método para estimar o peso do seu animal.")
                .color(Color32::GRAY),
        );
        ui.add_space(24.0);
    });

    if method_button(
        ui,
        "📏",
        "Medida Manual",
        "Use a fita métrica.",
    ) {
        selected = Some(Screen::Manual);
    }

    ui.add_space(10.0);

    if method_button(
        ui,
        "📸",
        "Análise com IA",
        "Envie uma foto do animal.",
    ) {
        selected = Some(Screen::Photo);
    }

    selected
}

fn method_button(ui: &mut Ui, icon: &str, title: &str, subtitle: &str) -> bool {
    let text = format!("{}  {}\n{}", icon, title, subtitle);
    ui.add_sized(
        [ui.available_width(), 64.0],
        egui::Button::new(RichText::new(text).size(15.0)),
    )
    .clicked()
}
