pub mod navigation;

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::utils::HashMap;
use bevy::window::PrimaryWindow;

use crate::domain::simulation::{
    in_gameplay, DriftConfig, DriftController, MainCamera, RigidBody, Scene, Side, SimSettings,
    TouchPhase, TouchSample, Vehicle, VehicleSet,
};
pub use navigation::NavAction;

const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 14.0, 18.0);

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TouchTracker>()
            .add_systems(Update, drive_vehicles.in_set(VehicleSet::Drive))
            .add_systems(
                Update,
                camera_follow
                    .after(VehicleSet::Integrate)
                    .run_if(in_gameplay),
            )
            .add_systems(
                Update,
                (
                    pause_toggle,
                    follow_toggle,
                    time_scale_toggle,
                    help_toggle,
                    diagnostics_toggle,
                    back_to_menu,
                ),
            );
    }
}

/// Last position seen for every active touch, so a held finger can be told
/// apart from a moving one. Bevy's `Touch::delta` only refreshes when a move
/// event arrives, so it keeps reporting the last move on idle frames.
#[derive(Resource, Default)]
pub struct TouchTracker {
    last_seen: HashMap<u64, Vec2>,
}

impl TouchTracker {
    /// Collects this frame's contacts in bottom-left screen space. Active
    /// touches come first, then the ones released or canceled this frame.
    pub fn sample(&mut self, touches: &Touches, window_height: f32) -> Vec<TouchSample> {
        let flip = |p: Vec2| Vec2::new(p.x, window_height - p.y);
        let mut samples = Vec::new();

        for touch in touches.iter() {
            let position = touch.position();
            let phase = if touches.just_pressed(touch.id()) {
                TouchPhase::Began
            } else if self.last_seen.get(&touch.id()) == Some(&position) {
                TouchPhase::Stationary
            } else {
                TouchPhase::Moved
            };
            self.last_seen.insert(touch.id(), position);
            samples.push(TouchSample {
                id: touch.id(),
                position: flip(position),
                phase,
            });
        }

        let ended = touches
            .iter_just_released()
            .map(|touch| (touch, TouchPhase::Ended));
        let canceled = touches
            .iter_just_canceled()
            .map(|touch| (touch, TouchPhase::Canceled));
        for (touch, phase) in ended.chain(canceled) {
            self.last_seen.remove(&touch.id());
            samples.push(TouchSample {
                id: touch.id(),
                position: flip(touch.position()),
                phase,
            });
        }
        samples
    }
}

fn drive_vehicles(
    time: Res<Time>,
    settings: Res<SimSettings>,
    config: Res<DriftConfig>,
    touches: Res<Touches>,
    mut tracker: ResMut<TouchTracker>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut vehicles: Query<(Entity, &mut DriftController, &mut RigidBody, &Transform)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let screen = Vec2::new(window.width(), window.height());
    let samples = tracker.sample(&touches, screen.y);
    let dt = settings.scaled_dt(&time);

    for (entity, mut controller, mut body, t) in &mut vehicles {
        let before = [Side::Left, Side::Right].map(|side| controller.thumb(side).finger);

        // Fingers still land and lift while paused; only the physics stops.
        if settings.running {
            let out = controller.advance(&config, dt, &samples, screen, *t.forward());
            body.add_force(out.force);
            body.add_torque(out.torque);
        } else {
            controller.sample(&samples, screen);
        }

        for (side, prev) in [Side::Left, Side::Right].into_iter().zip(before) {
            let now = controller.thumb(side).finger;
            if now != prev {
                debug!("{:?} {:?} thumb finger {:?} -> {:?}", entity, side, prev, now);
            }
        }
    }
}

fn camera_follow(
    time: Res<Time>,
    settings: Res<SimSettings>,
    vehicles: Query<&Transform, (With<Vehicle>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    if !settings.follow_vehicle {
        return;
    }
    let (Ok(target), Ok(mut cam)) = (vehicles.get_single(), cameras.get_single_mut()) else {
        return;
    };
    let lerp_factor = (1.0 - (-2.0 * time.delta_seconds()).exp()).clamp(0.0, 1.0);
    let desired = target.translation + CAMERA_OFFSET;
    cam.translation = cam.translation.lerp(desired, lerp_factor);
    cam.look_at(target.translation, Vec3::Y);
}

fn pause_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::Space) {
        settings.running = !settings.running;
    }
}

fn follow_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyF) {
        settings.follow_vehicle = !settings.follow_vehicle;
    }
}

fn time_scale_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::BracketRight) {
        settings.time_scale = (settings.time_scale * 2.0).clamp(0.25, 4.0);
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        settings.time_scale = (settings.time_scale / 2.0).clamp(0.25, 4.0);
    }
}

fn help_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_help = !settings.show_help;
    }
}

fn diagnostics_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}

fn back_to_menu(
    keys: Res<ButtonInput<KeyCode>>,
    scene: Res<State<Scene>>,
    mut next_scene: ResMut<NextState<Scene>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        navigation::return_to_menu(*scene.get(), &mut next_scene);
    }
}
