//! Client behaviours of the CO2 dashboard: feedback submission, chart
//! polling, and theme persistence.

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod feedback;
pub mod theme;

pub use api::{DashboardApi, FeedbackOutcome};
pub use chart::{ChartPoller, ChartRenderer, LineChart, NoopRenderer};
pub use config::{load_settings, ClientSettings};
pub use error::{ChartRefreshError, FeedbackError};
pub use feedback::{FeedbackForm, FeedbackMessages, FeedbackSubmitter, SubmitEvent, UserNotifier};
pub use theme::{
    DesignModal, MemorySettingsStore, ModalDisplay, SettingsService, SettingsStore, ThemeManager,
    ThemeTarget,
};
