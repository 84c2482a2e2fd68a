//! UI layer for the dashboard: app shell, chart painting, and theme visuals.

pub mod app;
pub mod chart;
pub mod theme;

pub use app::{AppPaths, DashboardApp, StartupConfig};
