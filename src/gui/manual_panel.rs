//! Manual measurement screen: chest-girth (CT) weight formula

use crate::result_card::ResultCard;
use caprino_checker::formula;
use eframe::egui::{self, Color32, RichText, Ui};

pub struct ManualPanel {
    /// Girth input as typed
    girth_input: String,
    /// Last calculation outcome
    result: Option<ResultCard>,
}

impl ManualPanel {
    pub fn new() -> Self {
        Self {
            girth_input: String::new(),
            result: None,
        }
    }

    /// Clear input and outcome (called on navigation)
    pub fn reset(&mut self) {
        self.girth_input.clear();
        self.result = None;
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Medida Manual 📏");
            ui.label(RichText::new("Use a Circunferência Torácica.").color(Color32::GRAY));
        });
        ui.add_space(16.0);

        ui.label("Informe a Circunferência Torácica (em cm):");
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.girth_input)
                .hint_text("Ex: 80.5")
                .desired_width(f32::INFINITY),
        );
        // Editing the measurement invalidates a displayed result
        if response.changed() && self.result.is_some() {
            self.result = None;
        }

        ui.add_space(16.0);

        let can_calculate = !self.girth_input.trim().is_empty();
        let button = egui::Button::new(RichText::new("Calcular Peso").size(15.0));
        if ui
            .add_enabled(can_calculate, button.min_size([ui.available_width(), 36.0].into()))
            .clicked()
        {
            self.result = Some(self.calculate());
        }

        if let Some(ref card) = self.result {
            card.ui(ui);
        }
    }

    fn calculate(&self) -> ResultCard {
        let girth = match formula::parse_girth(&self.girth_input) {
            Ok(girth) => girth,
            Err(e) => return ResultCard::error(e.user_message()),
        };
        match formula::weight_from_girth(girth) {
            Ok(weight) => ResultCard::success(
                format!("Peso Estimado: {:.2} kg", weight),
                Some(format!("Baseado em CT de {:.1} cm.", girth)),
            ),
            Err(e) => ResultCard::error(e.user_message()),
        }
    }
}

impl Default for ManualPanel {
    fn default() -> Self {
        Self::new()
    }
}
