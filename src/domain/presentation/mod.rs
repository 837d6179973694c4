pub mod panels;

use bevy::app::AppExit;
use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::navigation;
use crate::domain::simulation::{
    in_gameplay, DriftConfig, DriftController, Scene, SimSettings, Vehicle,
};
use panels::{
    diagnostics_panel::show_diagnostics_panel, help_panel::show_help_panel,
    hud_panel::show_hud_panel, main_menu_panel::show_main_menu,
    settings_panel::show_settings_panel,
};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<SettingsDraft>()
            .add_systems(OnExit(Scene::Settings), clear_settings_draft)
            .add_systems(Update, main_menu_ui.run_if(in_state(Scene::MainMenu)))
            .add_systems(Update, settings_ui.run_if(in_state(Scene::Settings)))
            .add_systems(Update, hud_ui.run_if(in_gameplay))
            .add_systems(Update, overlay_ui);
    }
}

fn main_menu_ui(
    mut contexts: EguiContexts,
    mut next_scene: ResMut<NextState<Scene>>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(action) = show_main_menu(contexts.ctx_mut()) {
        action.request(&mut next_scene, &mut exit);
    }
}

/// Unsaved edits from the Settings scene. Dropped whenever the scene is left,
/// so a fresh visit starts from the live config.
#[derive(Resource, Default)]
pub struct SettingsDraft(pub Option<DriftConfig>);

fn settings_ui(
    mut contexts: EguiContexts,
    mut config: ResMut<DriftConfig>,
    mut settings: ResMut<SimSettings>,
    mut next_scene: ResMut<NextState<Scene>>,
    mut draft: ResMut<SettingsDraft>,
) {
    let edit = draft.0.get_or_insert_with(|| config.clone());
    if show_settings_panel(contexts.ctx_mut(), edit, &mut config, &mut settings) {
        navigation::return_to_menu(Scene::Settings, &mut next_scene);
    }
}

fn clear_settings_draft(mut draft: ResMut<SettingsDraft>) {
    draft.0 = None;
}

fn hud_ui(
    mut contexts: EguiContexts,
    scene: Res<State<Scene>>,
    settings: Res<SimSettings>,
    vehicles: Query<&DriftController, With<Vehicle>>,
    mut next_scene: ResMut<NextState<Scene>>,
) {
    let current = *scene.get();
    let controller = vehicles.get_single().ok();
    if show_hud_panel(contexts.ctx_mut(), current, controller, &settings) {
        navigation::return_to_menu(current, &mut next_scene);
    }
}

fn overlay_ui(
    mut contexts: EguiContexts,
    settings: Res<SimSettings>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let ctx = contexts.ctx_mut();
    show_help_panel(ctx, &settings);
    show_diagnostics_panel(ctx, &diagnostics, &settings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn leaving_settings_drops_the_draft() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<Scene>()
            .init_resource::<SettingsDraft>()
            .add_systems(OnExit(Scene::Settings), clear_settings_draft);

        app.world_mut()
            .resource_mut::<NextState<Scene>>()
            .set(Scene::Settings);
        app.update();

        // An invalid edit left behind by Escape.
        app.world_mut().resource_mut::<SettingsDraft>().0 = Some(DriftConfig {
            base_speed: 50.0,
            ..default()
        });
        app.world_mut()
            .resource_mut::<NextState<Scene>>()
            .set(Scene::MainMenu);
        app.update();

        assert_eq!(*app.world().resource::<State<Scene>>().get(), Scene::MainMenu);
        assert!(app.world().resource::<SettingsDraft>().0.is_none());
    }
}
