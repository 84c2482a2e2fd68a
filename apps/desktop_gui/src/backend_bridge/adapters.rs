//! Client-core seams implemented on top of the UI event queue.

use client_core::{ChartRenderer, LineChart, ThemeTarget, UserNotifier};
use crossbeam_channel::Sender;

use crate::controller::events::UiEvent;

fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.try_send(event).is_err() {
        tracing::warn!("ui event queue unavailable; dropping event");
    }
}

pub struct ChannelNotifier {
    ui_tx: Sender<UiEvent>,
}

impl ChannelNotifier {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl UserNotifier for ChannelNotifier {
    fn alert(&self, message: &str) {
        forward(&self.ui_tx, UiEvent::Alert(message.to_string()));
    }

    fn navigate(&self, location: &str) {
        forward(&self.ui_tx, UiEvent::Navigate(location.to_string()));
    }
}

pub struct ChannelThemeTarget {
    ui_tx: Sender<UiEvent>,
}

impl ChannelThemeTarget {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl ThemeTarget for ChannelThemeTarget {
    fn set_root_class(&self, class: &str) {
        forward(&self.ui_tx, UiEvent::ThemeApplied(class.to_string()));
    }
}

pub struct ChannelChartRenderer {
    ui_tx: Sender<UiEvent>,
}

impl ChannelChartRenderer {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl ChartRenderer for ChannelChartRenderer {
    fn redraw(&self, chart: &LineChart) {
        forward(&self.ui_tx, UiEvent::ChartUpdated(chart.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn notifier_forwards_alert_then_navigation_in_order() {
        let (tx, rx) = bounded(4);
        let notifier = ChannelNotifier::new(tx);
        notifier.alert("X");
        notifier.navigate("/feedback?message=X");

        assert!(matches!(rx.try_recv(), Ok(UiEvent::Alert(message)) if message == "X"));
        assert!(matches!(
            rx.try_recv(),
            Ok(UiEvent::Navigate(location)) if location == "/feedback?message=X"
        ));
    }

    #[test]
    fn renderer_ships_chart_snapshot() {
        let (tx, rx) = bounded(1);
        let mut chart = LineChart::default();
        chart.replace_series(shared::domain::ChartSeries {
            labels: vec!["t1".into()],
            values: vec![400.0],
        });
        chart.update(&ChannelChartRenderer::new(tx));

        match rx.try_recv() {
            Ok(UiEvent::ChartUpdated(snapshot)) => {
                assert_eq!(snapshot.revision(), 1);
                assert_eq!(snapshot.labels(), ["t1"]);
            }
            _ => panic!("expected chart update"),
        }
    }

    #[test]
    fn full_queue_drops_event_without_panicking() {
        let (tx, _rx) = bounded(0);
        ChannelThemeTarget::new(tx).set_root_class("theme-dark");
    }
}
