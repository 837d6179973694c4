use bevy_egui::egui;

use crate::domain::simulation::{DriftController, Scene, Side, SimSettings, ThumbState};

/// Returns true when the "Menu" button was pressed.
pub fn show_hud_panel(
    ctx: &mut egui::Context,
    scene: Scene,
    controller: Option<&DriftController>,
    settings: &SimSettings,
) -> bool {
    let mut menu = false;
    egui::Window::new(scene.name())
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .resizable(false)
        .show(ctx, |ui| {
            if let Some(controller) = controller {
                for line in hud_lines(controller) {
                    ui.label(line);
                }
            }
            if !settings.running {
                ui.label("Paused");
            }
            menu = ui.button("Menu").clicked();
        });
    menu
}

fn hud_lines(controller: &DriftController) -> Vec<String> {
    vec![
        format!(
            "Speed: {:.1}{}",
            controller.speed(),
            if controller.is_accelerating() { " (boost)" } else { "" }
        ),
        format!("Drift: {:+.1}", controller.drift_angle()),
        thumb_line(Side::Left, controller.thumb(Side::Left)),
        thumb_line(Side::Right, controller.thumb(Side::Right)),
    ]
}

fn thumb_line(side: Side, thumb: &ThumbState) -> String {
    match thumb.finger {
        Some(finger) => format!("{:?}: {:.2} (finger {})", side, thumb.position, finger),
        None => format!("{:?}: {:.2} (free)", side, thumb.position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_controller_hud() {
        let lines = hud_lines(&DriftController::default());
        assert_eq!(
            lines,
            vec![
                "Speed: 5.0".to_string(),
                "Drift: +0.0".to_string(),
                "Left: 0.00 (free)".to_string(),
                "Right: 0.00 (free)".to_string(),
            ]
        );
    }

    #[test]
    fn bound_thumb_shows_finger() {
        let thumb = ThumbState {
            position: 0.25,
            previous: 0.3,
            finger: Some(4),
        };
        assert_eq!(thumb_line(Side::Right, &thumb), "Right: 0.25 (finger 4)");
    }
}
