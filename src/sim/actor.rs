//! The player-controlled square

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::error::ConfigError;
use crate::settings::ActorConfig;

/// Runner state integrated every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Center position
    pub position: Vec2,
    pub velocity: Vec2,
    /// Visual edge length
    pub size: f32,
    /// Collision box, smaller than the visual square
    pub hitbox_size: Vec2,
    pub is_jumping: bool,
    pub on_ground: bool,
    pub on_platform: bool,
    pub gravity: f32,
    pub jump_force: f32,
    pub max_fall_speed: f32,
    pub ground_level: f32,
    start: Vec2,
}

impl Actor {
    pub fn new(config: &ActorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let edge = config.hitbox_edge();
        Ok(Self {
            position: config.start,
            velocity: Vec2::ZERO,
            size: config.size,
            hitbox_size: Vec2::splat(edge),
            is_jumping: false,
            on_ground: false,
            on_platform: false,
            gravity: config.gravity,
            jump_force: config.jump_force,
            max_fall_speed: config.max_fall_speed,
            ground_level: config.ground_level,
            start: config.start,
        })
    }

    /// Integrate gravity and velocity, then clamp to the ground line
    pub fn advance(&mut self, dt: f32) {
        if self.on_platform {
            self.velocity.y = 0.0;
        } else {
            self.velocity.y = (self.velocity.y - self.gravity * dt).max(-self.max_fall_speed);
        }

        self.position += self.velocity * dt;

        let half_height = self.hitbox_size.y / 2.0;
        if self.position.y - half_height <= self.ground_level {
            self.position.y = self.ground_level + half_height;
            self.velocity.y = 0.0;
            self.is_jumping = false;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        if !self.on_ground && !self.on_platform {
            self.is_jumping = true;
        }
    }

    /// Jump if supported. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.is_supported() {
            return false;
        }
        self.velocity.y = self.jump_force;
        self.is_jumping = true;
        self.on_ground = false;
        self.on_platform = false;
        true
    }

    /// Standing on the ground line or on top of a platform
    pub fn is_supported(&self) -> bool {
        self.on_ground || self.on_platform
    }

    /// Min-corner collision box
    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.position, self.hitbox_size.x, self.hitbox_size.y)
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Override the spawn point (tile maps can carry their own)
    pub fn set_start(&mut self, start: Vec2) {
        self.start = start;
    }

    /// Back to the spawn point, at rest, with every flag cleared
    pub fn reset(&mut self) {
        self.position = self.start;
        self.velocity = Vec2::ZERO;
        self.is_jumping = false;
        self.on_ground = false;
        self.on_platform = false;
    }
}
