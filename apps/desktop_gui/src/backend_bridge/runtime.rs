//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    ChartPoller, ClientSettings, DashboardApi, FeedbackForm, FeedbackSubmitter,
    MemorySettingsStore, SettingsService, SettingsStore, SubmitEvent, ThemeManager,
};
use crossbeam_channel::{Receiver, Sender};
use storage::Storage;

use crate::backend_bridge::{
    adapters::{ChannelChartRenderer, ChannelNotifier, ChannelThemeTarget},
    commands::BackendCommand,
};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub struct BackendConfig {
    pub settings: ClientSettings,
    pub settings_database_url: String,
}

pub fn launch(config: BackendConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_backend(config, cmd_rx, ui_tx));
    });
}

async fn open_settings_store(
    database_url: &str,
    ui_tx: &Sender<UiEvent>,
) -> Arc<dyn SettingsStore> {
    match Storage::new(database_url).await {
        Ok(storage) => Arc::new(storage),
        Err(err) => {
            tracing::error!("settings database unavailable, theme changes will not persist: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("settings database unavailable; theme changes will not persist: {err}"),
            )));
            Arc::new(MemorySettingsStore::new())
        }
    }
}

async fn run_backend(
    config: BackendConfig,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let settings = config.settings;
    let store = open_settings_store(&config.settings_database_url, &ui_tx).await;

    let theme_manager = ThemeManager::new(
        SettingsService::new(store).with_default_theme(settings.default_theme()),
        Arc::new(ChannelThemeTarget::new(ui_tx.clone())),
    );
    if let Err(err) = theme_manager.initialize().await {
        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
            UiErrorContext::Theme,
            format!("{err:#}"),
        )));
    }

    let api = DashboardApi::new(settings.server_url.clone());
    let poller = Arc::new(
        ChartPoller::new(api.clone(), Arc::new(ChannelChartRenderer::new(ui_tx.clone())))
            .with_interval(settings.poll_interval()),
    );
    let _poll_task = poller.spawn();

    let submitter = Arc::new(
        FeedbackSubmitter::new(api, Arc::new(ChannelNotifier::new(ui_tx.clone())))
            .with_messages(settings.feedback_messages())
            .with_local_acknowledgement(settings.local_acknowledgement),
    );

    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::SubmitFeedback { is_correct } => {
                let submitter = submitter.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let form = FeedbackForm::with_is_correct(is_correct);
                    if let Err(err) = submitter.submit(&mut SubmitEvent::new(), &form).await {
                        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                            UiErrorContext::Feedback,
                            err.to_string(),
                        )));
                    }
                    let _ = ui_tx.try_send(UiEvent::FeedbackFinished);
                });
            }
            BackendCommand::SetTheme { name } => {
                if let Err(err) = theme_manager.set_theme(name).await {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Theme,
                        format!("{err:#}"),
                    )));
                }
            }
        }
    }

    tracing::info!("ui command queue closed; backend worker stopping");
}
