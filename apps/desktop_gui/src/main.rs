use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::ClientSettings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{
    commands::BackendCommand,
    runtime::{launch, BackendConfig},
};
use crate::controller::events::UiEvent;
use crate::ui::{AppPaths, DashboardApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Directory holding the local settings database.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn resolve_settings_database_url(settings: &ClientSettings, startup: &StartupConfig) -> String {
    // An explicit override in config or environment wins over the per-user data dir.
    if settings.settings_database_url != ClientSettings::default().settings_database_url
        && startup.data_dir.is_none()
    {
        return settings.settings_database_url.clone();
    }
    match AppPaths::from_startup(startup) {
        Ok(paths) => {
            tracing::debug!(data_root = %paths.data_root.display(), "resolved dashboard data dir");
            paths.settings_database_url()
        }
        Err(err) => {
            tracing::warn!("falling back to configured settings database: {err:#}");
            settings.settings_database_url.clone()
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = client_core::load_settings().unwrap_or_else(|err| {
        tracing::error!("failed to load client settings, using defaults: {err:#}");
        ClientSettings::default()
    });
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let startup = StartupConfig {
        server_url: settings.server_url.clone(),
        data_dir: args.data_dir,
    };
    let settings_database_url = resolve_settings_database_url(&settings, &startup);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    launch(
        BackendConfig {
            settings,
            settings_database_url,
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CO2 Dashboard")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CO2 Dashboard",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DashboardApp::new(
                cmd_tx,
                ui_rx,
                startup.server_url,
            )))
        }),
    )
}
