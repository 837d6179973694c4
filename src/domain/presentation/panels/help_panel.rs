use bevy_egui::egui;

use crate::domain::simulation::SimSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &SimSettings) {
    if settings.show_help {
        egui::Window::new("Help")
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .show(ctx, |ui| {
                ui.label("Left thumb: left half of the screen");
                ui.label("Right thumb: right half of the screen");
                ui.label("Drag both thumbs down: accelerate");
                ui.label("Hold one thumb higher: drift toward the lower side");
                ui.separator();
                ui.label("Space: Pause");
                ui.label("[/]: Adjust Sim Speed");
                ui.label("F: Toggle Camera Follow");
                ui.label("Esc: Main Menu");
                ui.label("H: Toggle Help");
                ui.label("F3: Diagnostics");
            });
    }
}
