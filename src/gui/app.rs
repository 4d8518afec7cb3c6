//! Main application structure with screen navigation

use caprino_checker::config::Config;
use eframe::egui;

use crate::manual_panel::ManualPanel;
use crate::photo_panel::PhotoPanel;
use crate::start_panel;

/// Application screen selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    Manual,
    Photo,
}

/// Main application state
pub struct CaprinoApp {
    /// Currently selected screen
    screen: Screen,
    /// Manual measurement panel state
    manual_panel: ManualPanel,
    /// Photo analysis panel; created on entry, dropped on leave so the
    /// camera stream is released with it
    photo_panel: Option<PhotoPanel>,
    /// Application configuration
    config: Config,
}

impl CaprinoApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Snappier feedback for a single-screen tool
        let mut style = (*cc.egui_ctx.style()).clone();
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_default();

        Self {
            screen: Screen::default(),
            manual_panel: ManualPanel::new(),
            photo_panel: None,
            config,
        }
    }

    fn navigate(&mut self, target: Screen) {
        if target == Screen::Photo && self.photo_panel.is_none() {
            self.photo_panel = Some(PhotoPanel::new(&self.config));
        }
        if target != Screen::Photo {
            // Leaving the photo screen tears the workflow down
            self.photo_panel = None;
        }
        if target == Screen::Manual {
            self.manual_panel.reset();
        }
        self.screen = target;
    }

    /// Render the back button; returns true when clicked
    fn back_button(ui: &mut egui::Ui) -> bool {
        ui.add(egui::Button::new("← Voltar").frame(false)).clicked()
    }
}

impl eframe::App for CaprinoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.screen {
                Screen::Start => {
                    if let Some(target) = start_panel::ui(ui) {
                        self.navigate(target);
                    }
                }
                Screen::Manual => {
                    if Self::back_button(ui) {
                        self.navigate(Screen::Start);
                        return;
                    }
                    self.manual_panel.ui(ui);
                }
                Screen::Photo => {
                    if Self::back_button(ui) {
                        self.navigate(Screen::Start);
                        return;
                    }
                    if let Some(ref mut panel) = self.photo_panel {
                        panel.ui(ui);
                    }
                }
            });
        });
    }
}
