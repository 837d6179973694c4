pub mod body;
pub mod drift;

use bevy::app::AppExit;
use bevy::prelude::*;

pub use body::RigidBody;
pub use drift::{
    DriftConfig, DriftController, DriftError, Side, ThumbState, TouchPhase, TouchSample,
};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scene {
    #[default]
    MainMenu,
    Singleplayer,
    Freeplay,
    Race,
    Settings,
}

impl Scene {
    pub const GAMEPLAY: [Scene; 3] = [Scene::Singleplayer, Scene::Freeplay, Scene::Race];

    pub fn name(self) -> &'static str {
        match self {
            Scene::MainMenu => "MainMenu",
            Scene::Singleplayer => "Singleplayer",
            Scene::Freeplay => "Freeplay",
            Scene::Race => "Race",
            Scene::Settings => "Settings",
        }
    }

    pub fn is_gameplay(self) -> bool {
        Self::GAMEPLAY.contains(&self)
    }
}

/// Run condition for systems that only make sense with a vehicle on screen.
pub fn in_gameplay(scene: Res<State<Scene>>) -> bool {
    scene.get().is_gameplay()
}

#[derive(Resource, Clone)]
pub struct SimSettings {
    pub running: bool,
    pub time_scale: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub follow_vehicle: bool,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            running: true,
            time_scale: 1.0,
            linear_damping: 0.8,
            angular_damping: 2.0,
            follow_vehicle: true,
            show_help: true,
            show_diagnostics: false,
        }
    }
}

impl SimSettings {
    pub fn scaled_dt(&self, time: &Time) -> f32 {
        if self.running {
            time.delta_seconds() * self.time_scale
        } else {
            0.0
        }
    }
}

#[derive(Component)]
pub struct Vehicle;

#[derive(Component)]
pub struct MainCamera;

/// Ordering for the per-frame vehicle update.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleSet {
    Drive,
    Integrate,
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Scene>()
            .enable_state_scoped_entities::<Scene>()
            .init_resource::<SimSettings>()
            .init_resource::<DriftConfig>()
            .configure_sets(
                Update,
                (VehicleSet::Drive, VehicleSet::Integrate)
                    .chain()
                    .run_if(in_gameplay),
            )
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                check_drift_bodies
                    .pipe(exit_on_drift_error)
                    .before(VehicleSet::Drive),
            )
            .add_systems(Update, integrate_bodies.in_set(VehicleSet::Integrate));

        for scene in Scene::GAMEPLAY {
            app.add_systems(OnEnter(scene), spawn_arena);
        }
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 18.0, 22.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
}

fn spawn_arena(
    scene: Res<State<Scene>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<DriftConfig>,
) {
    let scene = *scene.get();
    info!("Loading scene {}", scene.name());

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Plane3d::default().mesh().size(400.0, 400.0)),
            material: materials.add(Color::srgb(0.22, 0.24, 0.26)),
            ..default()
        },
        StateScoped(scene),
    ));

    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                illuminance: 8_000.0,
                shadows_enabled: true,
                ..default()
            },
            transform: Transform::from_xyz(20.0, 40.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        StateScoped(scene),
    ));

    commands.spawn((
        Vehicle,
        RigidBody::new(1.0, 1.0),
        DriftController::new(&config),
        PbrBundle {
            mesh: meshes.add(Cuboid::new(1.6, 0.8, 3.2)),
            material: materials.add(Color::srgb(0.9, 0.3, 0.2)),
            transform: Transform::from_xyz(0.0, 0.4, 0.0),
            ..default()
        },
        StateScoped(scene),
    ));
}

/// Every drift-controlled entity needs a body to push; without one the
/// controller would silently do nothing, so the app stops instead.
pub fn check_drift_bodies(
    added: Query<(Entity, Has<RigidBody>), Added<DriftController>>,
) -> Result<(), DriftError> {
    for (entity, has_body) in &added {
        if !has_body {
            return Err(DriftError::MissingBody(entity));
        }
    }
    Ok(())
}

fn exit_on_drift_error(In(result): In<Result<(), DriftError>>, mut exit: EventWriter<AppExit>) {
    if let Err(err) = result {
        error!("{err}");
        exit.send(AppExit::error());
    }
}

fn integrate_bodies(
    time: Res<Time>,
    settings: Res<SimSettings>,
    mut q: Query<(&mut RigidBody, &mut Transform)>,
) {
    let dt = settings.scaled_dt(&time);
    for (mut body, mut t) in &mut q {
        body.integrate(dt, &mut t, settings.linear_damping, settings.angular_damping);
        // Keep the car on the ground plane.
        t.translation.y = t.translation.y.max(0.4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn scene_names_match_navigation_targets() {
        assert_eq!(Scene::Singleplayer.name(), "Singleplayer");
        assert_eq!(Scene::Freeplay.name(), "Freeplay");
        assert_eq!(Scene::Race.name(), "Race");
        assert_eq!(Scene::Settings.name(), "Settings");
        assert!(Scene::Race.is_gameplay());
        assert!(!Scene::Settings.is_gameplay());
        assert!(!Scene::MainMenu.is_gameplay());
    }

    #[test]
    fn controller_without_body_fails_fast() {
        let mut world = World::new();
        let orphan = world.spawn(DriftController::default()).id();
        let result = world.run_system_once(check_drift_bodies);
        assert_eq!(result, Err(DriftError::MissingBody(orphan)));
    }

    #[test]
    fn controller_with_body_passes() {
        let mut world = World::new();
        world.spawn((DriftController::default(), RigidBody::default()));
        assert_eq!(world.run_system_once(check_drift_bodies), Ok(()));
    }

    fn exits_after_check(world: &mut World) -> Vec<AppExit> {
        world.init_resource::<Events<AppExit>>();
        world.run_system_once(check_drift_bodies.pipe(exit_on_drift_error));
        world
            .resource::<Events<AppExit>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    #[test]
    fn orphan_controller_requests_error_exit() {
        let mut world = World::new();
        world.spawn(DriftController::default());
        assert_eq!(exits_after_check(&mut world), vec![AppExit::error()]);
    }

    #[test]
    fn healthy_vehicle_does_not_exit() {
        let mut world = World::new();
        world.spawn((DriftController::default(), RigidBody::default()));
        assert!(exits_after_check(&mut world).is_empty());
    }

    #[test]
    fn paused_sim_has_zero_dt() {
        let mut time = Time::<()>::default();
        time.advance_by(std::time::Duration::from_millis(100));
        let settings = SimSettings {
            running: false,
            ..default()
        };
        assert_eq!(settings.scaled_dt(&time), 0.0);

        let settings = SimSettings {
            time_scale: 2.0,
            ..default()
        };
        assert!((settings.scaled_dt(&time) - 0.2).abs() < 1e-6);
    }
}
