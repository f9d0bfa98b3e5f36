//! World objects and the per-level collections that own them
//!
//! Every entity stores its center point; collision code converts through
//! `Bounds::aabb`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, HazardShape, Rect, saw_radius, spike_hitbox};
use crate::consts::*;
use crate::settings::LevelConfig;

/// Stable entity handle, unique within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    /// The always-present floor; never blocks sideways
    Ground,
    #[default]
    Platform,
}

/// A solid rectangle the actor can stand on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: EntityId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    /// Launches the actor instead of holding it
    #[serde(default)]
    pub is_jump_pad: bool,
    /// Launch speed; `None` uses 1.5x the actor's jump force
    #[serde(default)]
    pub jump_force: Option<f32>,
}

impl Platform {
    pub fn top(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

impl Bounds for Platform {
    fn aabb(&self) -> Rect {
        Rect::from_center(self.pos, self.width, self.height)
    }
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Spike,
    Saw,
    /// Visual portal ring placed among hazards; never lethal
    Portal,
}

/// Ties a hazard to a platform so it follows the platform around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardAnchor {
    pub platform: EntityId,
    /// Hazard center minus platform center
    pub offset: Vec2,
}

/// Something that kills on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: HazardKind,
    #[serde(default)]
    pub anchor: Option<HazardAnchor>,
}

impl Hazard {
    /// Collision footprint for this hazard kind
    pub fn shape(&self) -> HazardShape {
        match self.kind {
            HazardKind::Spike => HazardShape::Rect(spike_hitbox(&self.aabb())),
            HazardKind::Saw => HazardShape::Circle {
                center: self.pos,
                radius: saw_radius(self.width),
            },
            HazardKind::Portal => HazardShape::Never,
        }
    }
}

impl Bounds for Hazard {
    fn aabb(&self) -> Rect {
        Rect::from_center(self.pos, self.width, self.height)
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Key,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: CollectibleKind,
    pub value: u32,
    /// Flips to true once and stays there
    pub collected: bool,
}

impl Bounds for Collectible {
    fn aabb(&self) -> Rect {
        Rect::from_center(self.pos, self.width, self.height)
    }
}

/// Level exit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub pos: Vec2,
    pub size: f32,
}

/// Non-colliding scenery; only the presentation layer cares
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: Vec2,
    pub size: f32,
}

/// Which face of a platform was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    /// The platform's left face (actor came from the left)
    Left,
    /// The platform's right face (actor came from the right)
    Right,
}

/// Abstract events for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { number: u32 },
    Jumped,
    Landed { platform: EntityId, jump_pad: bool },
    HitSide { platform: EntityId, side: Side },
    Died { hazard: EntityId },
    Collected { kind: CollectibleKind, value: u32 },
    PortalOpened { pos: Vec2 },
    PortalEntered,
}

/// One level instance: every world object plus the generation cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    /// Uncollected pickups; collected ones are removed
    pub collectibles: Vec<Collectible>,
    pub decorations: Vec<Decoration>,
    pub portal: Option<Portal>,
    pub portal_exists: bool,
    pub is_level_completed: bool,
    /// Rolling generation cursor (world x of the next segment's left edge)
    pub current_position: f32,
    pub segment_width: f32,
    pub ground_y: f32,
    pub level_length: f32,
    pub segments_ahead: u32,
    /// Spawn point recorded by an `@` tile
    pub start_position: Option<Vec2>,
    /// Built from authored tiles; no rolling generation
    pub authored: bool,
    pub has_key: bool,
    /// Sum of coin values picked up in this level
    pub score: u64,
    pub collected_items: u32,
    /// Number of pickups placed at build time
    pub total_items: u32,
    next_id: u32,
}

impl Level {
    /// Empty level with only the ground platform
    pub fn new(config: &LevelConfig) -> Self {
        let mut level = Self {
            platforms: Vec::new(),
            hazards: Vec::new(),
            collectibles: Vec::new(),
            decorations: Vec::new(),
            portal: None,
            portal_exists: false,
            is_level_completed: false,
            current_position: 0.0,
            segment_width: config.segment_width,
            ground_y: config.ground_y,
            level_length: config.level_length,
            segments_ahead: config.segments_ahead,
            start_position: None,
            authored: false,
            has_key: false,
            score: 0,
            collected_items: 0,
            total_items: 0,
            next_id: 1,
        };
        level.create_ground();
        level
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn create_ground(&mut self) {
        if self.platforms.iter().any(|p| p.kind == PlatformKind::Ground) {
            return;
        }
        let id = self.next_entity_id();
        self.platforms.push(Platform {
            id,
            pos: Vec2::new(0.0, self.ground_y),
            width: GROUND_WIDTH,
            height: GROUND_THICKNESS,
            kind: PlatformKind::Ground,
            is_jump_pad: false,
            jump_force: None,
        });
    }

    pub fn ground(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.kind == PlatformKind::Ground)
    }

    /// Add a regular platform centered at `pos`
    pub fn add_platform(&mut self, pos: Vec2, width: f32, height: f32) -> EntityId {
        let id = self.next_entity_id();
        self.platforms.push(Platform {
            id,
            pos,
            width: width.max(0.0),
            height: height.max(0.0),
            kind: PlatformKind::Platform,
            is_jump_pad: false,
            jump_force: None,
        });
        id
    }

    pub fn add_jump_pad(
        &mut self,
        pos: Vec2,
        width: f32,
        height: f32,
        jump_force: Option<f32>,
    ) -> EntityId {
        let id = self.add_platform(pos, width, height);
        if let Some(pad) = self.platforms.last_mut() {
            pad.is_jump_pad = true;
            pad.jump_force = jump_force;
        }
        id
    }

    /// Add a spike whose base sits at `base_y`
    pub fn add_spike(&mut self, x: f32, base_y: f32, size: f32) -> EntityId {
        let size = size.max(0.0);
        self.push_hazard(
            HazardKind::Spike,
            Vec2::new(x, base_y + size / 2.0),
            size,
            None,
        )
    }

    /// Add a spike riding on a platform
    pub fn add_attached_spike(
        &mut self,
        platform: EntityId,
        x: f32,
        base_y: f32,
        size: f32,
    ) -> EntityId {
        let size = size.max(0.0);
        let pos = Vec2::new(x, base_y + size / 2.0);
        let anchor = self
            .platform(platform)
            .map(|p| HazardAnchor {
                platform,
                offset: pos - p.pos,
            });
        self.push_hazard(HazardKind::Spike, pos, size, anchor)
    }

    pub fn add_saw(&mut self, pos: Vec2, size: f32) -> EntityId {
        self.push_hazard(HazardKind::Saw, pos, size.max(0.0), None)
    }

    fn push_hazard(
        &mut self,
        kind: HazardKind,
        pos: Vec2,
        size: f32,
        anchor: Option<HazardAnchor>,
    ) -> EntityId {
        let id = self.next_entity_id();
        self.hazards.push(Hazard {
            id,
            pos,
            width: size,
            height: size,
            kind,
            anchor,
        });
        id
    }

    pub fn add_collectible(&mut self, kind: CollectibleKind, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let value = match kind {
            CollectibleKind::Coin => COIN_VALUE,
            CollectibleKind::Key => 0,
        };
        self.collectibles.push(Collectible {
            id,
            pos,
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
            kind,
            value,
            collected: false,
        });
        self.total_items += 1;
        id
    }

    pub fn add_decoration(&mut self, pos: Vec2, size: f32) {
        self.decorations.push(Decoration {
            pos,
            size: size.max(0.0),
        });
    }

    /// Place the level exit. Returns false if a portal already exists.
    pub fn create_portal(&mut self, pos: Vec2, size: f32) -> bool {
        if self.portal_exists {
            return false;
        }
        self.portal = Some(Portal { pos, size });
        self.portal_exists = true;
        log::info!("Created portal at ({:.1}, {:.1})", pos.x, pos.y);
        true
    }

    pub fn platform(&self, id: EntityId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn platform_mut(&mut self, id: EntityId) -> Option<&mut Platform> {
        self.platforms.iter_mut().find(|p| p.id == id)
    }

    /// Move attached hazards to their platform's current position
    pub fn sync_attached_hazards(&mut self) {
        let platforms = &self.platforms;
        for hazard in &mut self.hazards {
            if let Some(anchor) = hazard.anchor {
                if let Some(platform) = platforms.iter().find(|p| p.id == anchor.platform) {
                    hazard.pos = platform.pos + anchor.offset;
                }
            }
        }
    }

    /// Farthest x reached by a hazard or non-ground platform
    pub fn farthest_obstacle_x(&self) -> f32 {
        let hazards = self.hazards.iter().map(|h| h.pos.x);
        let platforms = self
            .platforms
            .iter()
            .filter(|p| p.kind != PlatformKind::Ground)
            .map(|p| p.pos.x);
        hazards.chain(platforms).fold(0.0, f32::max)
    }

    /// Release every object and reset the level flags
    pub fn clear(&mut self) {
        self.platforms.clear();
        self.hazards.clear();
        self.collectibles.clear();
        self.decorations.clear();
        self.portal = None;
        self.portal_exists = false;
        self.is_level_completed = false;
        self.current_position = 0.0;
        self.start_position = None;
        self.authored = false;
        self.has_key = false;
        self.score = 0;
        self.collected_items = 0;
        self.total_items = 0;
    }

    /// Clear and recreate the ground so the level can be rebuilt
    pub fn reset(&mut self) {
        self.clear();
        self.create_ground();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::new(&LevelConfig::default())
    }

    #[test]
    fn test_new_level_has_single_ground() {
        let mut level = level();
        assert_eq!(level.platforms.len(), 1);
        let ground = level.ground().unwrap();
        assert_eq!(ground.kind, PlatformKind::Ground);
        assert_eq!(ground.pos.y, GROUND_Y);

        level.reset();
        let grounds = level
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Ground)
            .count();
        assert_eq!(grounds, 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut level = level();
        let a = level.add_platform(Vec2::new(1.0, 0.0), 2.0, 1.0);
        let b = level.add_spike(3.0, GROUND_Y, SPIKE_SIZE);
        let c = level.add_collectible(CollectibleKind::Coin, Vec2::ZERO);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_spike_center_is_above_base() {
        let mut level = level();
        level.add_spike(4.0, -8.0, 1.0);
        let spike = &level.hazards[0];
        assert_eq!(spike.pos, Vec2::new(4.0, -7.5));
        assert_eq!(spike.aabb().bottom(), -8.0);
    }

    #[test]
    fn test_attached_spike_follows_platform() {
        let mut level = level();
        let platform = level.add_platform(Vec2::new(10.0, 0.0), 4.0, 1.0);
        level.add_attached_spike(platform, 11.0, 0.5, 1.0);
        let offset = level.hazards[0].anchor.unwrap().offset;
        assert_eq!(offset, Vec2::new(1.0, 1.0));

        level.platform_mut(platform).unwrap().pos = Vec2::new(20.0, 2.0);
        level.sync_attached_hazards();
        assert_eq!(level.hazards[0].pos, Vec2::new(21.0, 3.0));
    }

    #[test]
    fn test_portal_created_once() {
        let mut level = level();
        assert!(level.create_portal(Vec2::new(5.0, 0.0), PORTAL_SIZE));
        assert!(!level.create_portal(Vec2::new(50.0, 0.0), PORTAL_SIZE));
        assert_eq!(level.portal.unwrap().pos, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_collectibles_count_toward_total() {
        let mut level = level();
        level.add_collectible(CollectibleKind::Coin, Vec2::ZERO);
        level.add_collectible(CollectibleKind::Key, Vec2::ONE);
        assert_eq!(level.total_items, 2);
        assert_eq!(level.collectibles[0].value, COIN_VALUE);
        assert_eq!(level.collectibles[1].value, 0);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut level = level();
        level.add_platform(Vec2::new(1.0, 0.0), 2.0, 1.0);
        level.add_saw(Vec2::new(2.0, 0.0), SAW_SIZE);
        level.add_decoration(Vec2::ZERO, 1.0);
        level.create_portal(Vec2::ZERO, PORTAL_SIZE);
        level.clear();
        assert!(level.platforms.is_empty());
        assert!(level.hazards.is_empty());
        assert!(level.decorations.is_empty());
        assert!(!level.portal_exists);
    }

    #[test]
    fn test_farthest_obstacle_ignores_ground() {
        let mut level = level();
        assert_eq!(level.farthest_obstacle_x(), 0.0);
        level.add_platform(Vec2::new(12.0, 0.0), 2.0, 1.0);
        level.add_spike(30.0, GROUND_Y, SPIKE_SIZE);
        assert_eq!(level.farthest_obstacle_x(), 30.0);
    }

    #[test]
    fn test_portal_hazard_never_collides() {
        let hazard = Hazard {
            id: EntityId(1),
            pos: Vec2::ZERO,
            width: 4.0,
            height: 4.0,
            kind: HazardKind::Portal,
            anchor: None,
        };
        assert_eq!(hazard.shape(), HazardShape::Never);
    }
}
