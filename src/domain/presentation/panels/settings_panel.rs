use bevy_egui::egui;

use crate::domain::simulation::{DriftConfig, SimSettings};

/// Edits `draft` and commits it to `config` only while it validates.
/// Returns true when the player asked to go back.
pub fn show_settings_panel(
    ctx: &mut egui::Context,
    draft: &mut DriftConfig,
    config: &mut DriftConfig,
    settings: &mut SimSettings,
) -> bool {
    let mut back = false;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Settings");
        ui.separator();

        ui.label("Drift");
        ui.add(egui::Slider::new(&mut draft.max_speed, 1.0..=60.0).text("Max Speed"));
        ui.add(egui::Slider::new(&mut draft.base_speed, 0.0..=60.0).text("Base Speed"));
        ui.add(
            egui::Slider::new(&mut draft.acceleration_rate, 0.0..=20.0).text("Acceleration Rate"),
        );
        ui.add(
            egui::Slider::new(&mut draft.max_turning_radius, 0.0..=180.0)
                .text("Max Turning Radius"),
        );
        ui.add(egui::Slider::new(&mut draft.sensitivity, 0.0..=1.0).text("Sensitivity"));

        match draft.validate() {
            Ok(()) => {
                if draft != config {
                    *config = draft.clone();
                }
            }
            Err(err) => {
                ui.colored_label(egui::Color32::RED, err.to_string());
            }
        }

        ui.separator();

        ui.label("Physics");
        ui.add(egui::Slider::new(&mut settings.linear_damping, 0.0..=5.0).text("Linear Damping"));
        ui.add(
            egui::Slider::new(&mut settings.angular_damping, 0.0..=10.0).text("Angular Damping"),
        );
        ui.add(egui::Slider::new(&mut settings.time_scale, 0.25..=4.0).text("Time Scale"));

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Defaults").clicked() {
                *draft = DriftConfig::default();
            }
            if ui.button("Back").clicked() {
                back = true;
            }
        });
    });
    back
}
