//! Two-thumb drift model.
//!
//! Each screen half carries one thumb. Dragging both thumbs downward at the
//! same time accelerates the vehicle, the height difference between the
//! thumbs steers it. The controller is plain data: the host feeds it touch
//! samples once per frame and applies the returned force and torque.

use bevy::prelude::*;
use thiserror::Error;

/// Rate at which the drift angle chases its target, scaled by frame time.
const DRIFT_SMOOTHING: f32 = 10.0;

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct DriftConfig {
    pub max_speed: f32,
    /// Cruising speed the vehicle snaps back to when not accelerating.
    pub base_speed: f32,
    pub max_turning_radius: f32,
    /// Minimum thumb height difference before the vehicle starts turning.
    pub sensitivity: f32,
    pub acceleration_rate: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            max_speed: 20.0,
            base_speed: 5.0,
            max_turning_radius: 45.0,
            sensitivity: 0.5,
            acceleration_rate: 2.0,
        }
    }
}

impl DriftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("base_speed", self.base_speed),
            ("max_turning_radius", self.max_turning_radius),
            ("sensitivity", self.sensitivity),
            ("acceleration_rate", self.acceleration_rate),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if self.base_speed > self.max_speed {
            return Err(ConfigError::BaseAboveMax {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative, got {value}")]
    Invalid { field: &'static str, value: f32 },
    #[error("base speed {base} is above max speed {max}")]
    BaseAboveMax { base: f32, max: f32 },
}

#[derive(Debug, Error, PartialEq)]
pub enum DriftError {
    #[error("drift controller on {0:?} has no rigid body to drive")]
    MissingBody(Entity),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Canceled)
    }
}

/// One contact as seen this frame. `position` is in screen pixels with the
/// origin at the bottom-left corner.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TouchSample {
    pub id: u64,
    pub position: Vec2,
    pub phase: TouchPhase,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct ThumbState {
    /// Normalized height in [0, 1].
    pub position: f32,
    pub previous: f32,
    pub finger: Option<u64>,
}

impl ThumbState {
    pub const NEUTRAL: f32 = 0.5;

    pub fn is_moving_down(&self) -> bool {
        self.position < self.previous
    }

    fn track(&mut self, finger: u64, position: f32) {
        match self.finger {
            None => {
                self.finger = Some(finger);
                self.position = position;
            }
            Some(bound) if bound == finger => self.position = position,
            Some(_) => {}
        }
    }

    fn release(&mut self, finger: u64) {
        if self.finger == Some(finger) {
            self.finger = None;
            self.position = Self::NEUTRAL;
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct DriftOutput {
    pub force: Vec3,
    pub torque: Vec3,
}

#[derive(Component, Clone, Debug)]
pub struct DriftController {
    left: ThumbState,
    right: ThumbState,
    speed: f32,
    drift_angle: f32,
    accelerating: bool,
}

impl Default for DriftController {
    fn default() -> Self {
        Self::new(&DriftConfig::default())
    }
}

impl DriftController {
    pub fn new(config: &DriftConfig) -> Self {
        Self {
            left: ThumbState::default(),
            right: ThumbState::default(),
            speed: config.base_speed,
            drift_angle: 0.0,
            accelerating: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// True when both thumbs moved down on the last frame.
    pub fn is_accelerating(&self) -> bool {
        self.accelerating
    }

    /// Smoothed steering value; positive turns right.
    pub fn drift_angle(&self) -> f32 {
        self.drift_angle
    }

    pub fn thumb(&self, side: Side) -> &ThumbState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn thumb_mut(&mut self, side: Side) -> &mut ThumbState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Runs one frame of the drift model and returns the force and torque to
    /// apply to the vehicle body. `forward` is the body's current facing
    /// direction in world space.
    pub fn advance(
        &mut self,
        config: &DriftConfig,
        dt: f32,
        touches: &[TouchSample],
        screen: Vec2,
        forward: Vec3,
    ) -> DriftOutput {
        let dt = dt.max(0.0);
        self.sample(touches, screen);

        self.accelerating = self.left.is_moving_down() && self.right.is_moving_down();
        self.speed = if self.accelerating {
            (self.speed + config.acceleration_rate * dt)
                .min(config.max_speed)
                .max(config.base_speed)
        } else {
            config.base_speed
        };

        let target = self.steering_target(config);
        let t = (DRIFT_SMOOTHING * dt).clamp(0.0, 1.0);
        self.drift_angle += (target - self.drift_angle) * t;

        self.left.previous = self.left.position;
        self.right.previous = self.right.position;

        DriftOutput {
            // Y is up and rotation is counter-clockwise, so a right turn is negative yaw.
            torque: Vec3::NEG_Y * self.drift_angle,
            force: forward * self.speed,
        }
    }

    /// Binds, updates and releases thumbs from this frame's touches without
    /// touching speed or steering. `advance` calls this first.
    pub fn sample(&mut self, touches: &[TouchSample], screen: Vec2) {
        for touch in touches {
            let side = if touch.position.x < screen.x * 0.5 {
                Side::Left
            } else {
                Side::Right
            };
            let height = normalized_height(touch.position.y, screen.y);
            self.thumb_mut(side).track(touch.id, height);

            if touch.phase.is_terminal() {
                self.left.release(touch.id);
                self.right.release(touch.id);
            }
        }
    }

    fn steering_target(&self, config: &DriftConfig) -> f32 {
        let delta = self.left.position - self.right.position;
        if delta.abs() > config.sensitivity {
            config.max_turning_radius * delta.abs() * delta.signum()
        } else {
            0.0
        }
    }
}

fn normalized_height(y: f32, screen_height: f32) -> f32 {
    if screen_height > 0.0 {
        (y / screen_height).clamp(0.0, 1.0)
    } else {
        ThumbState::NEUTRAL
    }
}
