//! Line chart painter for the CO2 series.

use client_core::LineChart;
use eframe::egui;

const AXIS_MARGIN_LEFT: f32 = 48.0;
const AXIS_MARGIN_BOTTOM: f32 = 22.0;
const Y_TICKS: usize = 4;

pub fn show_line_chart(ui: &mut egui::Ui, chart: &LineChart, height: f32) {
    let width = ui.available_width();
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let rect = response.rect;
    let visuals = ui.visuals();

    painter.rect_filled(rect, 4.0, visuals.extreme_bg_color);

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + AXIS_MARGIN_LEFT, rect.top() + 8.0),
        egui::pos2(rect.right() - 8.0, rect.bottom() - AXIS_MARGIN_BOTTOM),
    );
    let axis_color = visuals.weak_text_color();
    let (y_min, y_max) = chart.value_range();

    for tick in 0..=Y_TICKS {
        let t = tick as f32 / Y_TICKS as f32;
        let y = plot.bottom() - t * plot.height();
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(1.0, axis_color.gamma_multiply(0.3)),
        );
        let value = y_min + f64::from(t) * (y_max - y_min);
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("{value:.0}"),
            egui::FontId::proportional(10.0),
            axis_color,
        );
    }

    let Some(dataset) = chart.datasets().first() else {
        return;
    };
    let [r, g, b] = dataset.border_color;
    let line_color = egui::Color32::from_rgb(r, g, b);

    painter.text(
        egui::pos2(plot.right(), rect.top() + 4.0),
        egui::Align2::RIGHT_TOP,
        &dataset.label,
        egui::FontId::proportional(11.0),
        line_color,
    );

    let count = dataset.data.len();
    if count == 0 {
        painter.text(
            plot.center(),
            egui::Align2::CENTER_CENTER,
            "Waiting for data...",
            egui::FontId::proportional(12.0),
            axis_color,
        );
        return;
    }

    let x_for = |index: usize| {
        if count == 1 {
            plot.center().x
        } else {
            plot.left() + plot.width() * index as f32 / (count - 1) as f32
        }
    };
    let y_for = |value: f64| {
        let t = ((value - y_min) / (y_max - y_min)).clamp(0.0, 1.0) as f32;
        plot.bottom() - t * plot.height()
    };

    let points: Vec<egui::Pos2> = dataset
        .data
        .iter()
        .enumerate()
        .map(|(index, value)| egui::pos2(x_for(index), y_for(*value)))
        .collect();
    let stroke = egui::Stroke::new(2.0, line_color);
    for segment in curve_segments(&points, dataset.tension) {
        painter.add(egui::epaint::CubicBezierShape::from_points_stroke(
            segment,
            false,
            egui::Color32::TRANSPARENT,
            stroke,
        ));
    }
    for point in &points {
        painter.circle_filled(*point, 2.5, line_color);
    }

    let labels = chart.labels();
    for index in label_indices(labels.len()) {
        painter.text(
            egui::pos2(x_for(index), plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &labels[index],
            egui::FontId::proportional(10.0),
            axis_color,
        );
    }
}

/// Cubic segments through `points`. Control points follow the neighbouring
/// points scaled by `tension`; zero tension gives straight lines.
fn curve_segments(points: &[egui::Pos2], tension: f32) -> Vec<[egui::Pos2; 4]> {
    let tangent = |index: usize| {
        let prev = points[index.saturating_sub(1)];
        let next = points[(index + 1).min(points.len() - 1)];
        (next - prev) * (tension / 2.0)
    };
    points
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            [
                pair[0],
                pair[0] + tangent(index),
                pair[1] - tangent(index + 1),
                pair[1],
            ]
        })
        .collect()
}

/// Label positions along the x axis: first, middle, last.
fn label_indices(len: usize) -> Vec<usize> {
    match len {
        0 => Vec::new(),
        1 => vec![0],
        2 => vec![0, 1],
        _ => vec![0, len / 2, len - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::{curve_segments, label_indices};
    use eframe::egui::pos2;

    #[test]
    fn labels_first_middle_and_last_points() {
        assert!(label_indices(0).is_empty());
        assert_eq!(label_indices(1), vec![0]);
        assert_eq!(label_indices(2), vec![0, 1]);
        assert_eq!(label_indices(9), vec![0, 4, 8]);
    }

    #[test]
    fn zero_tension_draws_straight_segments() {
        let points = [pos2(0.0, 0.0), pos2(10.0, 5.0), pos2(20.0, 0.0)];
        let segments = curve_segments(&points, 0.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], [points[0], points[0], points[1], points[1]]);
        assert_eq!(segments[1], [points[1], points[1], points[2], points[2]]);
    }

    #[test]
    fn tension_bends_control_points_toward_neighbours() {
        let points = [pos2(0.0, 0.0), pos2(10.0, 10.0), pos2(20.0, 0.0)];
        let segments = curve_segments(&points, 0.1);
        // tangent at the middle point is (20, 0) * 0.05
        assert_eq!(segments[0][2], pos2(9.0, 10.0));
        assert_eq!(segments[1][1], pos2(11.0, 10.0));
        assert!(curve_segments(&points[..1], 0.1).is_empty());
    }
}
