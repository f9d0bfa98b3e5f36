//! Collision detection and response for the runner
//!
//! One pass per tick: platforms first (landing, ceiling bumps, side hits),
//! then hazards, then pickups. Any platform contact ends the pass so the
//! actor is never killed by a spike it was just snapped away from.

use glam::Vec2;

use super::actor::Actor;
use super::geometry::{Bounds, Rect, circle_distance, rectangles_intersect};
use super::state::{CollectibleKind, EntityId, Level, PlatformKind, Side};
use crate::consts::*;

/// What the actor ran into this pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Contact {
    #[default]
    None,
    Landed {
        platform: EntityId,
        jump_pad: bool,
    },
    HitSide {
        platform: EntityId,
        side: Side,
    },
    Died {
        hazard: EntityId,
    },
}

/// A collectible picked up this pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: CollectibleKind,
    pub value: u32,
}

/// Result of a resolution pass
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub contact: Contact,
    pub collected: Vec<Pickup>,
    /// Picking up the last item opened the level exit
    pub portal_opened: bool,
}

impl Resolution {
    pub fn died(&self) -> bool {
        matches!(self.contact, Contact::Died { .. })
    }
}

/// Resolve the actor against every platform, hazard and collectible
pub fn resolve(actor: &mut Actor, level: &mut Level) -> Resolution {
    actor.on_platform = false;
    level.sync_attached_hazards();

    let mut resolution = Resolution::default();

    if let Some(contact) = resolve_platforms(actor, level) {
        resolution.contact = contact;
        return resolution;
    }

    let hitbox = actor.hitbox();

    if let Some(hazard) = level.hazards.iter().find(|h| h.shape().hits(&hitbox)) {
        log::info!(
            "Actor hit {:?} at ({:.1}, {:.1})",
            hazard.kind,
            hazard.pos.x,
            hazard.pos.y
        );
        resolution.contact = Contact::Died { hazard: hazard.id };
    }

    resolution.collected = collect(&hitbox, level);

    if !resolution.collected.is_empty()
        && level.collected_items == level.total_items
        && !level.portal_exists
    {
        let pos = Vec2::new(
            actor.position.x + PICKUP_PORTAL_LEAD,
            level.ground_y + PORTAL_HEIGHT,
        );
        resolution.portal_opened = level.create_portal(pos, PORTAL_SIZE);
    }

    resolution
}

/// Mark the level completed the first time the actor reaches the portal
pub fn check_portal(actor: &Actor, level: &mut Level) -> bool {
    if level.is_level_completed || !level.portal_exists {
        return false;
    }
    let Some(portal) = level.portal else {
        return false;
    };
    if circle_distance(actor.position, portal.pos) < PORTAL_COMPLETION_RADIUS {
        level.is_level_completed = true;
        log::info!("Portal reached at x={:.1}", portal.pos.x);
        return true;
    }
    false
}

fn resolve_platforms(actor: &mut Actor, level: &Level) -> Option<Contact> {
    let hitbox = actor.hitbox();
    let half = actor.hitbox_size / 2.0;

    for platform in &level.platforms {
        if platform.kind == PlatformKind::Ground {
            continue;
        }
        let bounds = platform.aabb();
        let Some(side) = classify(&hitbox, actor.velocity.y, &bounds) else {
            continue;
        };

        let contact = match side {
            Side::Top => {
                actor.position.y = bounds.top() + half.y;
                actor.on_ground = false;
                if platform.is_jump_pad {
                    actor.velocity.y = platform
                        .jump_force
                        .unwrap_or(actor.jump_force * JUMP_PAD_MULTIPLIER);
                    actor.is_jumping = true;
                    actor.on_platform = false;
                } else {
                    actor.velocity.y = 0.0;
                    actor.is_jumping = false;
                    actor.on_platform = true;
                }

                let margin = actor.hitbox_size.x * EDGE_FALL_FRACTION;
                if actor.position.x < bounds.left() + margin
                    || actor.position.x > bounds.right() - margin
                {
                    actor.on_platform = false;
                }

                Contact::Landed {
                    platform: platform.id,
                    jump_pad: platform.is_jump_pad,
                }
            }
            Side::Bottom => {
                actor.position.y = bounds.bottom() - half.y;
                actor.velocity.y = (actor.velocity.y * CEILING_DAMPING).min(0.0);
                Contact::HitSide {
                    platform: platform.id,
                    side,
                }
            }
            Side::Left => {
                actor.position.x = bounds.left() - half.x;
                Contact::HitSide {
                    platform: platform.id,
                    side,
                }
            }
            Side::Right => {
                actor.position.x = bounds.right() + half.x;
                Contact::HitSide {
                    platform: platform.id,
                    side,
                }
            }
        };
        return Some(contact);
    }

    None
}

/// Which face of `platform` the hitbox struck, if any.
///
/// Landings get a small grace band so an actor resting on a top, or one
/// that sank slightly into it during the last frame, still registers.
fn classify(hitbox: &Rect, vy: f32, platform: &Rect) -> Option<Side> {
    if platform.width <= 0.0 || platform.height <= 0.0 {
        return None;
    }

    let top = platform.top();
    let prev_bottom = hitbox.bottom() - vy * PRIOR_FRAME_DT;
    let overlaps_horizontally =
        hitbox.left() < platform.right() && hitbox.right() > platform.left();
    if overlaps_horizontally
        && prev_bottom >= top - LANDING_GRACE
        && (hitbox.bottom() - top).abs() <= LANDING_GRACE
    {
        return Some(Side::Top);
    }

    if !rectangles_intersect(hitbox, platform) {
        return None;
    }

    let overlap_left = hitbox.right() - platform.left();
    let overlap_right = platform.right() - hitbox.left();
    let overlap_top = platform.top() - hitbox.bottom();
    let overlap_bottom = hitbox.top() - platform.bottom();
    let min = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min == overlap_top && vy <= 0.0 {
        Some(Side::Top)
    } else if min == overlap_bottom && vy > 0.0 {
        Some(Side::Bottom)
    } else if min == overlap_left {
        Some(Side::Left)
    } else if min == overlap_right {
        Some(Side::Right)
    } else {
        None
    }
}

fn collect(hitbox: &Rect, level: &mut Level) -> Vec<Pickup> {
    let mut picked = Vec::new();
    for item in &mut level.collectibles {
        if item.collected || !rectangles_intersect(hitbox, &item.aabb()) {
            continue;
        }
        item.collected = true;
        picked.push(Pickup {
            id: item.id,
            kind: item.kind,
            value: item.value,
        });
    }
    if picked.is_empty() {
        return picked;
    }

    level.collectibles.retain(|c| !c.collected);
    for pickup in &picked {
        match pickup.kind {
            CollectibleKind::Coin => level.score += u64::from(pickup.value),
            CollectibleKind::Key => level.has_key = true,
        }
        level.collected_items += 1;
        log::debug!("Collected {:?} worth {}", pickup.kind, pickup.value);
    }
    picked
}
