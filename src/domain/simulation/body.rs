use bevy::prelude::*;

/// Minimal rigid body the drift controller pushes around. Forces and torques
/// are continuous: they accumulate over a frame and are consumed by
/// `integrate`.
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub mass: f32,
    /// Moment of inertia about the vertical axis.
    pub inertia: f32,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub(crate) force: Vec3,
    pub(crate) torque: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl RigidBody {
    pub fn new(mass: f32, inertia: f32) -> Self {
        Self {
            mass,
            inertia,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    pub fn add_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Semi-implicit Euler step. Damping is a per-second fraction, same as a
    /// drag coefficient.
    pub fn integrate(
        &mut self,
        dt: f32,
        transform: &mut Transform,
        linear_damping: f32,
        angular_damping: f32,
    ) {
        if dt <= 0.0 {
            return;
        }

        self.velocity += self.force / self.mass.max(1e-3) * dt;
        self.angular_velocity += self.torque / self.inertia.max(1e-3) * dt;

        self.velocity *= (1.0 - linear_damping * dt).clamp(0.0, 1.0);
        self.angular_velocity *= (1.0 - angular_damping * dt).clamp(0.0, 1.0);

        transform.translation += self.velocity * dt;
        let spin = self.angular_velocity * dt;
        if spin.length_squared() > 0.0 {
            transform.rotate(Quat::from_scaled_axis(spin));
        }

        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }
}
