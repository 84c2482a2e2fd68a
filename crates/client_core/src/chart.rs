//! CO2 line chart model and the `/data` poller that keeps it fresh.

use std::{sync::Arc, time::Duration};

use shared::domain::{ChartSeries, CO2_CHART_CANVAS_ID};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{api::DashboardApi, error::ChartRefreshError};

pub const CO2_DATASET_LABEL: &str = "CO2 Levels";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: [u8; 3],
    pub tension: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub y_begin_at_zero: bool,
}

/// Line chart bound to a canvas. Labels and the first dataset are replaced
/// wholesale on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    canvas_id: String,
    labels: Vec<String>,
    datasets: Vec<ChartDataset>,
    options: ChartOptions,
    revision: u64,
}

impl LineChart {
    pub fn co2(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            labels: Vec::new(),
            datasets: vec![ChartDataset {
                label: CO2_DATASET_LABEL.to_string(),
                data: Vec::new(),
                border_color: [75, 192, 192],
                tension: 0.1,
            }],
            options: ChartOptions {
                y_begin_at_zero: true,
            },
            revision: 0,
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn datasets(&self) -> &[ChartDataset] {
        &self.datasets
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Number of redraws performed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn series(&self) -> ChartSeries {
        ChartSeries {
            labels: self.labels.clone(),
            values: self
                .datasets
                .first()
                .map(|dataset| dataset.data.clone())
                .unwrap_or_default(),
        }
    }

    pub fn replace_series(&mut self, series: ChartSeries) {
        self.labels = series.labels;
        if let Some(dataset) = self.datasets.first_mut() {
            dataset.data = series.values;
        }
    }

    /// Lower and upper bound of the value axis.
    pub fn value_range(&self) -> (f64, f64) {
        let values = self
            .datasets
            .iter()
            .flat_map(|dataset| dataset.data.iter().copied())
            .filter(|value| value.is_finite());
        let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if self.options.y_begin_at_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if (max - min).abs() < f64::EPSILON {
            max = min + 1.0;
        }
        (min, max)
    }

    pub fn update(&mut self, renderer: &dyn ChartRenderer) {
        self.revision = self.revision.wrapping_add(1);
        renderer.redraw(self);
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::co2(CO2_CHART_CANVAS_ID)
    }
}

/// Draws the chart after its data changed.
pub trait ChartRenderer: Send + Sync {
    fn redraw(&self, chart: &LineChart);
}

/// Renderer for headless use.
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn redraw(&self, _chart: &LineChart) {}
}

pub struct ChartPoller {
    api: DashboardApi,
    chart: Arc<Mutex<LineChart>>,
    renderer: Arc<dyn ChartRenderer>,
    interval: Duration,
}

impl ChartPoller {
    pub fn new(api: DashboardApi, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            api,
            chart: Arc::new(Mutex::new(LineChart::default())),
            renderer,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the poll period. A zero period is raised to one millisecond.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_canvas(self, canvas_id: impl Into<String>) -> Self {
        Self {
            chart: Arc::new(Mutex::new(LineChart::co2(canvas_id))),
            ..self
        }
    }

    pub fn chart(&self) -> Arc<Mutex<LineChart>> {
        self.chart.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch `/data` and replace the chart contents, redrawing once.
    ///
    /// On any failure the chart keeps its previous data and is not redrawn.
    pub async fn refresh(&self) -> Result<ChartSeries, ChartRefreshError> {
        let series = self.api.fetch_sensor_data().await?.into_series()?;

        let mut chart = self.chart.lock().await;
        chart.replace_series(series.clone());
        chart.update(self.renderer.as_ref());
        debug!(
            points = series.len(),
            revision = chart.revision(),
            "co2 chart refreshed"
        );
        Ok(series)
    }

    /// Start refreshing on a fixed timer. The first refresh fires one period
    /// after the call; a tick waits for the previous refresh to finish.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(&self) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            server_url = self.api.server_url(),
            "co2 chart polling started"
        );
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(err) = self.refresh().await {
                warn!("co2 chart refresh failed: {err}");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/chart_tests.rs"]
mod tests;
