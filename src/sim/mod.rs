//! Runner simulation
//!
//! All gameplay logic lives here:
//! - Frame-driven: the host passes the elapsed time each tick
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (insertion order, first hit wins)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{Contact, Pickup, Resolution, check_portal, resolve};
pub use geometry::{Bounds, HazardShape, Rect, circle_distance, rectangles_intersect};
pub use state::{
    Collectible, CollectibleKind, Decoration, EntityId, GameEvent, Hazard, HazardAnchor,
    HazardKind, Level, Platform, PlatformKind, Portal, Side,
};
pub use tick::{LevelPlan, Phase, Session, TickInput, tick};
