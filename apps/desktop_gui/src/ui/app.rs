use std::{collections::VecDeque, path::PathBuf};

use chrono::{DateTime, Local};
use client_core::{DesignModal, LineChart};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::DEFAULT_THEME;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{
    chart::show_line_chart,
    theme::{theme_label, visuals_for_theme_class, THEME_CHOICES},
};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub settings_db_path: PathBuf,
}

impl AppPaths {
    pub fn from_startup(startup: &StartupConfig) -> anyhow::Result<Self> {
        let root = if let Some(p) = &startup.data_dir {
            p.clone()
        } else {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("no local data directory for this platform"))?
                .join("co2_dashboard")
        };
        Ok(Self {
            settings_db_path: root.join("settings.db"),
            data_root: root,
        })
    }

    pub fn settings_database_url(&self) -> String {
        format!(
            "sqlite://{}",
            self.settings_db_path.to_string_lossy().replace('\\', "/")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AppView {
    Dashboard,
    FeedbackResult { location: String, message: String },
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    status: String,
    view: AppView,
    pending_alerts: VecDeque<String>,
    feedback_in_flight: bool,
    chart: LineChart,
    chart_updated_at: Option<DateTime<Local>>,
    design_modal: DesignModal,
    theme_class: String,
    applied_theme_class: Option<String>,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: server_url.into(),
            status: "Starting...".to_string(),
            view: AppView::Dashboard,
            pending_alerts: VecDeque::new(),
            feedback_in_flight: false,
            chart: LineChart::default(),
            chart_updated_at: None,
            design_modal: DesignModal::default(),
            theme_class: DEFAULT_THEME.to_string(),
            applied_theme_class: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Alert(message) => {
                    self.pending_alerts.push_back(message);
                }
                UiEvent::Navigate(location) => {
                    let message = feedback_message_from_location(&location).unwrap_or_default();
                    tracing::info!(%location, "showing feedback result page");
                    self.view = AppView::FeedbackResult { location, message };
                }
                UiEvent::ThemeApplied(class) => {
                    self.theme_class = class;
                }
                UiEvent::ChartUpdated(chart) => {
                    self.chart = chart;
                    self.chart_updated_at = Some(Local::now());
                }
                UiEvent::FeedbackFinished => {
                    self.feedback_in_flight = false;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = err.status_line();
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme_class.as_deref() == Some(self.theme_class.as_str()) {
            return;
        }
        ctx.set_visuals(visuals_for_theme_class(&self.theme_class));
        self.applied_theme_class = Some(self.theme_class.clone());
    }

    fn submit_feedback(&mut self, is_correct: &str) {
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitFeedback {
                is_correct: is_correct.to_string(),
            },
            &mut self.status,
        );
        self.feedback_in_flight = queued;
    }

    fn set_theme(&mut self, name: &str) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SetTheme {
                name: name.to_string(),
            },
            &mut self.status,
        );
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("CO2 Dashboard");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Design").clicked() {
                        self.design_modal.open();
                    }
                    ui.label(
                        egui::RichText::new(theme_label(&self.theme_class)).weak(),
                    );
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status).small());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.server_url).small().weak());
                });
            });
        });
    }

    fn show_dashboard(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(egui::RichText::new("CO2 Levels").strong());
            match self.chart_updated_at {
                Some(at) => ui.small(format!("Updated {}", at.format("%H:%M:%S"))),
                None => ui.small("No data received yet"),
            };
            if let Some((label, value)) = self.chart.series().latest() {
                ui.label(format!("Latest: {value:.0} ppm at {label}"));
            }
            show_line_chart(ui, &self.chart, 260.0);

            ui.add_space(16.0);
            ui.separator();
            ui.label(egui::RichText::new("Was the ventilation prediction correct?").strong());
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!self.feedback_in_flight, |ui| {
                    if ui.button("Yes, correct").clicked() {
                        self.submit_feedback("1");
                    }
                    if ui.button("No, incorrect").clicked() {
                        self.submit_feedback("0");
                    }
                });
                if self.feedback_in_flight {
                    ui.spinner();
                }
            });
        });
    }

    fn show_feedback_result(&mut self, ctx: &egui::Context) {
        let AppView::FeedbackResult { location, message } = &self.view else {
            return;
        };
        let mut back = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Feedback");
            ui.label(message.as_str());
            ui.add_space(8.0);
            ui.small(format!("{}{location}", self.server_url));
            ui.add_space(16.0);
            back = ui.button("Back to dashboard").clicked();
        });
        if back {
            self.view = AppView::Dashboard;
        }
    }

    fn show_design_modal(&mut self, ctx: &egui::Context) {
        if !self.design_modal.is_visible() {
            return;
        }

        let mut chosen = None;
        let mut close_requested = false;
        egui::Window::new("Design")
            .id(egui::Id::new(self.design_modal.element_id()))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Choose a theme");
                ui.horizontal(|ui| {
                    for (label, class) in THEME_CHOICES {
                        let selected = self.theme_class == *class;
                        if ui.add(egui::Button::new(*label).selected(selected)).clicked() {
                            chosen = Some(*class);
                        }
                    }
                });
                ui.separator();
                close_requested = ui.button("Close").clicked();
            });

        if let Some(class) = chosen {
            self.set_theme(class);
        }
        if close_requested {
            self.design_modal.close();
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.pending_alerts.front() else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new("Message")
            .id(egui::Id::new("alert_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                acknowledged = ui.button("OK").clicked();
            });
        if acknowledged {
            self.pending_alerts.pop_front();
        }
    }
}

/// Extracts the decoded `message` query value from `/feedback?message=..`.
fn feedback_message_from_location(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "message")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        match self.view {
            AppView::Dashboard => self.show_dashboard(ctx),
            AppView::FeedbackResult { .. } => self.show_feedback_result(ctx),
        }
        self.show_design_modal(ctx);
        self.show_alert(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::ChartSeries;

    fn app() -> (DashboardApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (
            DashboardApp::new(cmd_tx, ui_rx, "http://127.0.0.1:5000"),
            ui_tx,
            cmd_rx,
        )
    }

    #[test]
    fn decodes_message_from_feedback_location() {
        assert_eq!(
            feedback_message_from_location("/feedback?message=Danke%20f%C3%BCr%20Dein%20Feedback%21")
                .as_deref(),
            Some("Danke für Dein Feedback!")
        );
        assert_eq!(feedback_message_from_location("/feedback"), None);
    }

    #[test]
    fn alert_then_navigation_queues_popup_and_switches_view() {
        let (mut app, ui_tx, _cmd_rx) = app();
        ui_tx.send(UiEvent::Alert("X".into())).expect("send");
        ui_tx
            .send(UiEvent::Navigate("/feedback?message=X".into()))
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.pending_alerts, VecDeque::from(vec!["X".to_string()]));
        assert_eq!(
            app.view,
            AppView::FeedbackResult {
                location: "/feedback?message=X".into(),
                message: "X".into()
            }
        );
    }

    #[test]
    fn chart_and_theme_events_update_local_state() {
        let (mut app, ui_tx, _cmd_rx) = app();
        let mut chart = LineChart::default();
        chart.replace_series(ChartSeries {
            labels: vec!["t1".into(), "t2".into()],
            values: vec![400.0, 420.0],
        });
        ui_tx.send(UiEvent::ChartUpdated(chart)).expect("send");
        ui_tx
            .send(UiEvent::ThemeApplied("theme-dark".into()))
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.chart.series().values, vec![400.0, 420.0]);
        assert!(app.chart_updated_at.is_some());
        assert_eq!(app.theme_class, "theme-dark");
    }

    #[test]
    fn feedback_buttons_queue_submission_and_block_resubmit_until_finished() {
        let (mut app, ui_tx, cmd_rx) = app();
        app.submit_feedback("1");
        assert!(app.feedback_in_flight);
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::SubmitFeedback { is_correct }) if is_correct == "1"
        ));

        ui_tx.send(UiEvent::FeedbackFinished).expect("send");
        app.process_ui_events();
        assert!(!app.feedback_in_flight);
    }

    #[test]
    fn design_modal_starts_hidden() {
        let (mut app, _ui_tx, cmd_rx) = app();
        assert!(!app.design_modal.is_visible());
        app.set_theme("theme-dark");
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::SetTheme { name }) if name == "theme-dark"
        ));
    }

    #[test]
    fn settings_database_lives_under_data_dir() {
        let paths = AppPaths::from_startup(&StartupConfig {
            server_url: "http://127.0.0.1:5000".into(),
            data_dir: Some(PathBuf::from("/tmp/co2")),
        })
        .expect("paths");
        assert_eq!(paths.settings_database_url(), "sqlite:///tmp/co2/settings.db");
    }
}
