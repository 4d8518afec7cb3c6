//! Photo analysis screen
//!
//! Drives the capture workflow: camera start on entry, single-frame capture,
//! AI analysis on a background thread, retake, and outcome display. The
//! panel owns the workflow; dropping the panel releases the camera.

use crate::result_card::ResultCard;
use caprino_checker::camera::DefaultCamera;
use caprino_checker::capture::{CaptureState, PhotoWorkflow};
use caprino_checker::config::Config;
use caprino_checker::error::Error;
use caprino_checker::types::{CaptureOutcome, WeightEstimate};
use caprino_checker::vision::{GeminiEstimator, WeightEstimator};
use eframe::egui::{self, Color32, RichText, Ui};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

/// Status message from the analysis thread
enum AnalysisStatus {
    CallingAi,
    Done {
        attempt: u64,
        result: Result<WeightEstimate, Error>,
    },
}

pub struct PhotoPanel {
    workflow: PhotoWorkflow<DefaultCamera>,
    /// Receiver for analysis status from the background thread
    status_receiver: Option<Receiver<AnalysisStatus>>,
    /// Attempt counter echoed by the in-flight analysis
    analyzing_attempt: Option<u64>,
    /// Current status line shown while analyzing
    current_status: Option<String>,
    /// Analysis start time
    start_time: Option<Instant>,
    /// URI of the preview texture for the captured frame
    preview_uri: Option<String>,
    config: Config,
}

impl PhotoPanel {
    pub fn new(config: &Config) -> Self {
        let mut workflow = PhotoWorkflow::new(DefaultCamera::from_config(config));
        // Entering the screen starts the camera; a failure lands the
        // workflow in Done(Error) and the card shows the message.
        let _ = workflow.start_camera();

        Self {
            workflow,
            status_receiver: None,
            analyzing_attempt: None,
            current_status: None,
            start_time: None,
            preview_uri: None,
            config: config.clone(),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        self.poll_status(ui.ctx());

        ui.vertical_centered(|ui| {
            ui.heading("Análise com IA 📸");
            ui.label(RichText::new("Aponte a câmera para o animal.").color(Color32::GRAY));
        });
        ui.add_space(12.0);

        self.render_preview(ui);
        ui.add_space(12.0);
        self.render_controls(ui);
        self.render_progress(ui);
        self.render_outcome(ui);
    }

    /// Poll for status updates from the background analysis thread
    fn poll_status(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.status_receiver.take() else {
            return;
        };

        loop {
            match receiver.try_recv() {
                Ok(AnalysisStatus::CallingAi) => {
                    self.current_status = Some("A IA está analisando a imagem...".to_string());
                }
                Ok(AnalysisStatus::Done { attempt, result }) => {
                    self.workflow.finish_analysis(attempt, result);
                    self.clear_analysis_tracking();
                    return;
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => {
                    // Not settled yet; keep the channel and repaint to check again
                    self.status_receiver = Some(receiver);
                    ctx.request_repaint();
                    return;
                }
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    let attempt = self.analyzing_attempt.unwrap_or_default();
                    self.workflow.finish_analysis(
                        attempt,
                        Err(Error::AiTransport("analysis thread died".to_string())),
                    );
                    self.clear_analysis_tracking();
                    return;
                }
            }
        }
    }

    fn clear_analysis_tracking(&mut self) {
        self.status_receiver = None;
        self.analyzing_attempt = None;
        self.current_status = None;
        self.start_time = None;
    }

    fn is_analyzing(&self) -> bool {
        *self.workflow.state() == CaptureState::Analyzing
    }

    fn render_preview(&mut self, ui: &mut Ui) {
        if let (Some(frame), Some(uri)) = (self.workflow.frame(), self.preview_uri.clone()) {
            ui.add(
                egui::Image::from_bytes(uri, frame.as_ref().clone())
                    .max_height(260.0)
                    .maintain_aspect_ratio(true),
            );
            return;
        }

        let (text, spinner) = match self.workflow.state() {
            CaptureState::CameraStarting => ("Iniciando câmera...", true),
            CaptureState::CameraActive => ("Câmera ativa. Pronto para capturar.", false),
            _ => ("Sem imagem.", false),
        };

        egui::Frame::new()
            .fill(Color32::from_gray(20))
            .inner_margin(24.0)
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    if spinner {
                        ui.spinner();
                        ui.add_space(6.0);
                    }
                    ui.label(RichText::new(text).color(Color32::GRAY));
                });
            });
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        let analyzing = self.is_analyzing();
        let has_frame = self.workflow.frame().is_some();
        let camera_active = self.workflow.is_camera_active();

        if !has_frame {
            let capture = egui::Button::new(RichText::new("Tirar Foto").size(15.0));
            if ui
                .add_enabled(
                    camera_active && !analyzing,
                    capture.min_size([ui.available_width(), 36.0].into()),
                )
                .clicked()
            {
                self.capture(ui.ctx());
            }
        } else {
            let analyze = egui::Button::new(RichText::new("Analisar com IA").size(15.0));
            if ui
                .add_enabled(!analyzing, analyze.min_size([ui.available_width(), 36.0].into()))
                .clicked()
            {
                self.start_analysis();
            }

            ui.add_space(6.0);

            let retake = egui::Button::new("Tirar Outra Foto");
            if ui
                .add_enabled(!analyzing, retake.min_size([ui.available_width(), 32.0].into()))
                .clicked()
            {
                self.retake(ui.ctx());
            }
        }

        // File fallback for devices without a usable camera
        if !analyzing && !camera_active && !has_frame {
            ui.add_space(6.0);
            if ui.button("Escolher arquivo...").clicked() {
                self.pick_file(ui.ctx());
            }
        }
    }

    fn render_progress(&self, ui: &mut Ui) {
        if !self.is_analyzing() {
            return;
        }

        ui.add_space(8.0);
        egui::Frame::new()
            .fill(Color32::from_gray(30))
            .inner_margin(10.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        self.current_status
                            .as_deref()
                            .unwrap_or("A IA está analisando a imagem..."),
                    );
                });
                if let Some(start) = self.start_time {
                    ui.label(
                        RichText::new(format!(
                            "Isso pode levar alguns segundos. ({:.0} s)",
                            start.elapsed().as_secs_f32()
                        ))
                        .color(Color32::GRAY)
                        .small(),
                    );
                }
            });
    }

    fn render_outcome(&self, ui: &mut Ui) {
        if let CaptureState::Done(outcome) = self.workflow.state() {
            let card = match outcome {
                CaptureOutcome::Success(estimate) => ResultCard::success(
                    format!("Peso Estimado: {:.2} kg", estimate.estimated_weight_kg),
                    Some(format!("Justificativa da IA: {}", estimate.reasoning)),
                ),
                CaptureOutcome::Error(message) => ResultCard::error(message.clone()),
            };
            card.ui(ui);
        }
    }

    fn capture(&mut self, ctx: &egui::Context) {
        if self.workflow.capture_frame().is_ok() {
            self.refresh_preview(ctx);
        }
    }

    fn retake(&mut self, ctx: &egui::Context) {
        self.forget_preview(ctx);
        let _ = self.workflow.retake();
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Imagens", &["jpg", "jpeg", "png", "gif", "bmp", "webp"])
            .pick_file()
        else {
            return;
        };

        match std::fs::read(&path) {
            Ok(bytes) => {
                self.forget_preview(ctx);
                self.workflow.use_frame(bytes);
                self.refresh_preview(ctx);
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "could not read picked file");
            }
        }
    }

    /// Point the preview at the current frame under a fresh URI so the
    /// texture cache never shows a previous capture.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        self.forget_preview(ctx);
        self.preview_uri = Some(format!("bytes://captura-{}.jpg", self.workflow.attempt()));
    }

    fn forget_preview(&mut self, ctx: &egui::Context) {
        if let Some(uri) = self.preview_uri.take() {
            ctx.forget_image(&uri);
        }
    }

    fn start_analysis(&mut self) {
        let Ok(ticket) = self.workflow.begin_analysis() else {
            return;
        };

        let estimator = match GeminiEstimator::from_config(&self.config) {
            Ok(estimator) => estimator,
            Err(e) => {
                // Missing credential fails the analyze step only
                let attempt = ticket.attempt;
                self.workflow.finish_analysis(attempt, Err(e));
                return;
            }
        };

        let (sender, receiver): (Sender<AnalysisStatus>, Receiver<AnalysisStatus>) = channel();
        self.status_receiver = Some(receiver);
        self.analyzing_attempt = Some(ticket.attempt);
        self.start_time = Some(Instant::now());
        self.current_status = Some("A IA está analisando a imagem...".to_string());

        thread::spawn(move || {
            let _ = sender.send(AnalysisStatus::CallingAi);
            let result = estimator.estimate(&ticket.frame);
            let _ = sender.send(AnalysisStatus::Done {
                attempt: ticket.attempt,
                result,
            });
        });
    }
}
