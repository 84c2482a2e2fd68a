//! Mapping from the applied root class to egui visuals.

use eframe::egui;

/// Themes offered in the design modal: (label, root class).
pub const THEME_CHOICES: &[(&str, &str)] = &[("Light", "theme-light"), ("Dark", "theme-dark")];

pub fn theme_label(class: &str) -> &str {
    THEME_CHOICES
        .iter()
        .find(|(_, choice)| *choice == class)
        .map(|(label, _)| *label)
        .unwrap_or(class)
}

/// Unknown classes keep light visuals; the class itself is still recorded.
pub fn visuals_for_theme_class(class: &str) -> egui::Visuals {
    match class {
        "theme-dark" => {
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(230, 232, 235));
            v.window_fill = egui::Color32::from_rgb(36, 39, 45);
            v.panel_fill = egui::Color32::from_rgb(29, 31, 36);
            v.extreme_bg_color = egui::Color32::from_rgb(20, 22, 26);
            v.faint_bg_color = egui::Color32::from_rgb(44, 48, 55);
            v
        }
        _ => egui::Visuals::light(),
    }
}
