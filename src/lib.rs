//! Neon Dash - runtime core of a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Actor kinematics, collision resolution, world objects and the tick driver
//! - `level`: ASCII tile compiler, procedural segments and fragment composition
//! - `settings`: Data-driven physics and level tuning
//! - `error`: Configuration errors
//! - `platform`: Browser bindings (wasm32 only)

pub mod error;
pub mod level;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Approximate duration of the previous frame, used to reconstruct where
    /// the actor's feet were one frame ago when classifying landings
    pub const PRIOR_FRAME_DT: f32 = 0.016;
    /// Tolerance band around a platform top inside which a landing registers
    pub const LANDING_GRACE: f32 = 0.1;
    /// Fraction of the actor hitbox width that counts as "too close to the edge"
    pub const EDGE_FALL_FRACTION: f32 = 0.3;
    /// Upward speed is scaled by this after bumping a platform underside, then capped at zero
    pub const CEILING_DAMPING: f32 = 0.5;
    /// Jump pads without their own force launch at this multiple of the actor's jump force
    pub const JUMP_PAD_MULTIPLIER: f32 = 1.5;
    /// Distance from the portal center at which the level counts as completed
    pub const PORTAL_COMPLETION_RADIUS: f32 = 3.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 1.0;
    /// Hitbox is 90% of the visual size
    pub const HITBOX_SCALE: f32 = 0.9;
    pub const GRAVITY: f32 = 25.0;
    pub const JUMP_FORCE: f32 = 17.0;
    pub const MAX_FALL_SPEED: f32 = 30.0;
    pub const START_X: f32 = -5.0;
    pub const START_Y: f32 = 3.0;

    /// World defaults
    pub const GROUND_Y: f32 = -8.0;
    pub const GROUND_WIDTH: f32 = 200.0;
    pub const GROUND_THICKNESS: f32 = 0.3;
    pub const SEGMENT_WIDTH: f32 = 30.0;
    /// Narrower segments stop the generation cursor from advancing in f32
    pub const MIN_SEGMENT_WIDTH: f32 = 1.0;
    pub const LEVEL_LENGTH: f32 = 300.0;
    pub const SEGMENTS_AHEAD: u32 = 15;
    /// Extra run-out appended after the last authored column
    pub const LEVEL_TAIL: f32 = 100.0;

    /// Hazard and pickup sizes
    pub const SPIKE_SIZE: f32 = 0.7;
    /// Spikes sit slightly above the ground line
    pub const SPIKE_LIFT: f32 = 0.15;
    pub const SPIKE_HITBOX_WIDTH: f32 = 0.6;
    pub const SPIKE_HITBOX_HEIGHT: f32 = 0.7;
    pub const SAW_SIZE: f32 = 2.0;
    pub const SAW_RADIUS_FRACTION: f32 = 0.4;
    pub const PORTAL_SIZE: f32 = 4.0;
    /// Height of a generated portal above the ground line
    pub const PORTAL_HEIGHT: f32 = 6.0;
    /// How far ahead of the actor the end-of-level portal opens
    pub const PORTAL_LEAD: f32 = 50.0;
    /// How far ahead of the actor the "all items collected" portal opens
    pub const PICKUP_PORTAL_LEAD: f32 = 15.0;
    pub const PICKUP_SIZE: f32 = 0.8;
    pub const JUMP_PAD_WIDTH: f32 = 2.0;
    pub const JUMP_PAD_HEIGHT: f32 = 0.5;
    pub const COIN_VALUE: u32 = 10;

    /// Run speed (units/s) on level 1, plus the increment per level
    pub const BASE_RUN_SPEED: f32 = 7.0;
    pub const RUN_SPEED_PER_LEVEL: f32 = 0.5;
}

/// True if the value is finite and strictly positive
#[inline]
pub fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
