use bevy::app::AppExit;
use bevy::prelude::*;

use crate::domain::simulation::Scene;

/// Menu button actions. Each one maps to a single scene change or to quitting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavAction {
    Singleplayer,
    Freeplay,
    Race,
    Settings,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavTarget {
    Scene(Scene),
    Quit,
}

impl NavAction {
    pub const ALL: [NavAction; 5] = [
        NavAction::Singleplayer,
        NavAction::Freeplay,
        NavAction::Race,
        NavAction::Settings,
        NavAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavAction::Singleplayer => "Singleplayer",
            NavAction::Freeplay => "Freeplay",
            NavAction::Race => "Race",
            NavAction::Settings => "Settings",
            NavAction::Quit => "Quit",
        }
    }

    pub fn target(self) -> NavTarget {
        match self {
            NavAction::Singleplayer => NavTarget::Scene(Scene::Singleplayer),
            NavAction::Freeplay => NavTarget::Scene(Scene::Freeplay),
            NavAction::Race => NavTarget::Scene(Scene::Race),
            NavAction::Settings => NavTarget::Scene(Scene::Settings),
            NavAction::Quit => NavTarget::Quit,
        }
    }

    pub fn request(self, next_scene: &mut NextState<Scene>, exit: &mut EventWriter<AppExit>) {
        match self.target() {
            NavTarget::Scene(scene) => {
                info!("Scene change requested: {}", scene.name());
                next_scene.set(scene);
            }
            NavTarget::Quit => {
                info!("Quit requested");
                exit.send(AppExit::Success);
            }
        }
    }
}

pub fn return_to_menu(current: Scene, next_scene: &mut NextState<Scene>) {
    if current != Scene::MainMenu {
        info!("Leaving {} for the main menu", current.name());
        next_scene.set(Scene::MainMenu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<NextState<Scene>>();
        world.init_resource::<Events<AppExit>>();
        world
    }

    #[test]
    fn actions_map_to_scenes() {
        assert_eq!(
            NavAction::Singleplayer.target(),
            NavTarget::Scene(Scene::Singleplayer)
        );
        assert_eq!(NavAction::Freeplay.target(), NavTarget::Scene(Scene::Freeplay));
        assert_eq!(NavAction::Race.target(), NavTarget::Scene(Scene::Race));
        assert_eq!(NavAction::Settings.target(), NavTarget::Scene(Scene::Settings));
        assert_eq!(NavAction::Quit.target(), NavTarget::Quit);
    }

    #[test]
    fn scene_action_requests_one_transition() {
        let mut world = world();
        world.run_system_once(
            |mut next: ResMut<NextState<Scene>>, mut exit: EventWriter<AppExit>| {
                NavAction::Race.request(&mut next, &mut exit);
            },
        );
        assert!(matches!(
            world.resource::<NextState<Scene>>(),
            NextState::Pending(Scene::Race)
        ));
        assert!(world.resource::<Events<AppExit>>().is_empty());
    }

    #[test]
    fn quit_sends_exit_and_leaves_scene_alone() {
        let mut world = world();
        world.run_system_once(
            |mut next: ResMut<NextState<Scene>>, mut exit: EventWriter<AppExit>| {
                NavAction::Quit.request(&mut next, &mut exit);
            },
        );
        assert!(matches!(
            world.resource::<NextState<Scene>>(),
            NextState::Unchanged
        ));
        assert_eq!(world.resource::<Events<AppExit>>().len(), 1);
    }

    #[test]
    fn menu_does_not_return_to_itself() {
        let mut next = NextState::<Scene>::default();
        return_to_menu(Scene::MainMenu, &mut next);
        assert!(matches!(next, NextState::Unchanged));

        return_to_menu(Scene::Freeplay, &mut next);
        assert!(matches!(next, NextState::Pending(Scene::MainMenu)));
    }
}
