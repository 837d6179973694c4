use bevy_egui::egui::{self, FontId, RichText};

use crate::domain::controls::NavAction;

/// Draws the title screen and returns the button pressed this frame, if any.
pub fn show_main_menu(ctx: &mut egui::Context) -> Option<NavAction> {
    let mut chosen = None;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("Thumb Drift").font(FontId::proportional(48.0)));
            ui.add_space(32.0);
            for action in NavAction::ALL {
                let button = egui::Button::new(RichText::new(action.label()).size(22.0));
                if ui.add_sized([260.0, 52.0], button).clicked() {
                    chosen = Some(action);
                }
                ui.add_space(10.0);
            }
        });
    });
    chosen
}
