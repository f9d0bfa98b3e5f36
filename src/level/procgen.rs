//! Procedural segment generation
//!
//! Each archetype fills one segment of `segment_width` centered on a given x.
//! Geometry is randomized within fixed ranges; only the structure is stable.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::Level;

/// Segment archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// 1-3 groups of ground spikes
    Spikes,
    /// Raised platforms, regular or zigzag
    Platforms,
    /// A spike group followed by a raised block
    Combined,
    /// Scenery only
    Empty,
    Stairs,
    /// Two raised platforms with a spike pit between them
    CentralSpikes,
    /// Wide raised platform over a row of spikes
    ElevatedWithSpikes,
    /// Small floating platform, sometimes flanked by spikes
    GapWithFloating,
    /// Twin pillars with spikes outside them
    VerticalChallenge,
}

impl Archetype {
    pub const ALL: [Archetype; 9] = [
        Archetype::Spikes,
        Archetype::Platforms,
        Archetype::Combined,
        Archetype::Empty,
        Archetype::Stairs,
        Archetype::CentralSpikes,
        Archetype::ElevatedWithSpikes,
        Archetype::GapWithFloating,
        Archetype::VerticalChallenge,
    ];

    /// Uniform pick
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Place one archetype centered at `x` without moving the cursor
pub fn generate_segment<R: Rng + ?Sized>(
    level: &mut Level,
    archetype: Archetype,
    x: f32,
    rng: &mut R,
) {
    match archetype {
        Archetype::Spikes => spike_groups(level, x, rng),
        Archetype::Platforms => {
            if rng.random_bool(0.6) {
                regular_platforms(level, x, rng);
            } else {
                zigzag_platforms(level, x, rng);
            }
        }
        Archetype::Combined => combined(level, x, rng),
        Archetype::Empty => decorations(level, x, rng),
        Archetype::Stairs => stairs(level, x, rng),
        Archetype::CentralSpikes => central_spikes(level, x),
        Archetype::ElevatedWithSpikes => elevated_with_spikes(level, x),
        Archetype::GapWithFloating => gap_with_floating(level, x, rng),
        Archetype::VerticalChallenge => vertical_challenge(level, x),
    }
}

/// Generate a random archetype for the segment at the cursor and advance
/// the cursor by one segment
pub fn generate_next_segment<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) -> Archetype {
    let x = level.current_position + level.segment_width / 2.0;
    let archetype = Archetype::random(rng);
    generate_segment(level, archetype, x, rng);
    level.current_position += level.segment_width;
    log::debug!("Generated {:?} segment at x={:.1}", archetype, x);
    archetype
}

/// Evenly spaced ground spikes centered on `center_x`
fn spike_row<R: Rng + ?Sized>(
    level: &mut Level,
    center_x: f32,
    count: u32,
    spacing: f32,
    sizes: std::ops::Range<f32>,
    rng: &mut R,
) {
    let start = center_x - (count.saturating_sub(1) as f32 * spacing) / 2.0;
    let base = level.ground_y + SPIKE_LIFT;
    for i in 0..count {
        let size = rng.random_range(sizes.clone());
        level.add_spike(start + i as f32 * spacing, base, size);
    }
}

fn spike_groups<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    let width = level.segment_width;
    let groups = rng.random_range(1..=3u32);
    let group_spacing = width / (groups + 1) as f32;

    for g in 0..groups {
        let group_x = x - width / 2.0 + group_spacing * (g + 1) as f32;
        let count = rng.random_range(3..=5);
        spike_row(level, group_x, count, 0.7, 0.8..1.4, rng);
    }
}

fn regular_platforms<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    let width = level.segment_width;
    let count = rng.random_range(1..=3u32);

    for i in 0..count {
        let px = x - width / 3.0 + (width / 2.0) * (i as f32 / count as f32);
        let height = rng.random_range(2.0..5.0);
        let platform_width = rng.random_range(2.0..4.0);
        let y = level.ground_y + height;
        let platform = level.add_platform(Vec2::new(px, y), platform_width, 1.5);

        if rng.random_bool(0.5) {
            let spikes = rng.random_range(2..=3u32);
            let spacing = 0.6;
            let start = px - ((spikes - 1) as f32 * spacing) / 2.0;
            for j in 0..spikes {
                let size = rng.random_range(0.7..1.0);
                level.add_attached_spike(platform, start + j as f32 * spacing, y + 0.9, size);
            }
        }
    }
}

/// Platforms alternating either side of `x`, each a step higher
pub fn zigzag_platforms<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    let count = rng.random_range(2..=4u32);
    let base_height = rng.random_range(2.0..4.0);

    for i in 0..count {
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        let px = x + side * 4.0;
        let y = level.ground_y + base_height + i as f32 * 1.2;
        let platform = level.add_platform(Vec2::new(px, y), 2.5, 1.0);

        if rng.random_bool(0.3) {
            level.add_attached_spike(platform, px, y + 0.6, 0.8);
        }
    }
}

fn combined<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    let width = level.segment_width;
    let count = rng.random_range(3..=5);
    spike_row(level, x - width / 4.0, count, 0.7, 0.8..1.2, rng);

    let height = rng.random_range(3.0..7.0);
    let y = level.ground_y + height;
    level.add_platform(Vec2::new(x + width / 4.0, y), 3.0, 2.0);
}

fn decorations<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    let width = level.segment_width;
    let count = rng.random_range(1..=3);
    for _ in 0..count {
        let dx = x - width / 2.0 + width * rng.random::<f32>();
        let dy = rng.random_range(-3.0..7.0);
        let size = rng.random_range(0.5..2.0);
        level.add_decoration(Vec2::new(dx, dy), size);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StairPattern {
    Standard,
    Zigzag,
    Floating,
}

fn stairs<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    let steps = rng.random_range(3..=5u32);
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let mut height = if direction > 0.0 {
        2.0
    } else {
        rng.random_range(5.0..7.0)
    };
    let step_width = rng.random_range(2.0..3.0);
    let spacing = rng.random_range(2.0..3.5);
    let pattern = match rng.random_range(0..3) {
        0 => StairPattern::Standard,
        1 => StairPattern::Zigzag,
        _ => StairPattern::Floating,
    };
    let start = x - ((steps - 1) as f32 * spacing) / 2.0;

    for i in 0..steps {
        let x_offset = match pattern {
            StairPattern::Standard => 0.0,
            StairPattern::Zigzag if i % 2 == 0 => -rng.random_range(2.0..3.0),
            StairPattern::Zigzag => rng.random_range(2.0..3.0),
            StairPattern::Floating => rng.random_range(-2.0..2.0),
        };
        let height_offset = match pattern {
            StairPattern::Floating => rng.random_range(-1.0..1.0),
            _ => 0.0,
        };

        let px = start + i as f32 * spacing + x_offset;
        let y = level.ground_y + height + height_offset;
        let platform_width = step_width * rng.random_range(0.8..1.2);
        let platform_height = rng.random_range(0.8..1.2);
        let platform = level.add_platform(Vec2::new(px, y), platform_width, platform_height);

        if rng.random_bool(0.2) {
            let spikes = rng.random_range(1..=2u32);
            for j in 0..spikes {
                let sx = px + (j as f32 - (spikes - 1) as f32 / 2.0) * 0.5;
                let size = rng.random_range(0.5..0.7);
                level.add_attached_spike(platform, sx, y + platform_height / 2.0 + 0.05, size);
            }
        }

        height += match pattern {
            StairPattern::Standard => direction * rng.random_range(1.0..1.5),
            StairPattern::Zigzag => {
                let step = rng.random_range(0.0..1.5);
                if i % 2 == 0 { step } else { -step }
            }
            StairPattern::Floating => direction * rng.random_range(-0.5..1.5),
        };
    }
}

/// Authored staircase: evenly spaced one-unit steps climbing (`direction`
/// 1.0) or descending (-1.0) across the segment
pub fn designed_stairs<R: Rng + ?Sized>(level: &mut Level, x: f32, direction: f32, rng: &mut R) {
    let steps = rng.random_range(3..=5u32);
    let step_width = rng.random_range(2.0..3.0);
    let spacing = rng.random_range(2.0..3.5);
    let mut height = if direction > 0.0 {
        2.0
    } else {
        rng.random_range(5.0..7.0)
    };
    let start = x - ((steps - 1) as f32 * spacing) / 2.0;

    for i in 0..steps {
        let px = start + i as f32 * spacing;
        let y = level.ground_y + height;
        let platform = level.add_platform(Vec2::new(px, y), step_width, 1.0);

        if rng.random_bool(0.2) {
            level.add_attached_spike(platform, px, y + 0.6, 0.6);
        }

        height += direction * rng.random_range(1.0..1.5);
    }
}

pub fn central_spikes(level: &mut Level, x: f32) {
    let gap = 6.0;
    let platform_width = (level.segment_width - gap) / 2.0;
    let y = level.ground_y + 2.5;
    let offset = gap / 2.0 + platform_width / 2.0;
    level.add_platform(Vec2::new(x - offset, y), platform_width, 1.0);
    level.add_platform(Vec2::new(x + offset, y), platform_width, 1.0);

    let count = (gap / 0.8).floor() as u32;
    let spacing = gap / count as f32;
    let base = level.ground_y + SPIKE_LIFT;
    for i in 0..count {
        let sx = x - gap / 2.0 + (i as f32 + 0.5) * spacing;
        level.add_spike(sx, base, SPIKE_SIZE);
    }
}

pub fn elevated_with_spikes(level: &mut Level, x: f32) {
    let width = 7.0;
    level.add_platform(Vec2::new(x, level.ground_y + 3.0), width, 1.5);

    let count = (width / 0.8).floor() as u32 - 1;
    let spacing = width / (count + 1) as f32;
    let base = level.ground_y + SPIKE_LIFT;
    for i in 0..count {
        let sx = x - width / 2.0 + (i + 1) as f32 * spacing;
        level.add_spike(sx, base, SPIKE_SIZE);
    }
}

pub fn gap_with_floating<R: Rng + ?Sized>(level: &mut Level, x: f32, rng: &mut R) {
    level.add_platform(Vec2::new(x, level.ground_y + 3.5), 3.0, 1.0);

    if rng.random_bool(0.5) {
        let base = level.ground_y + SPIKE_LIFT;
        level.add_spike(x - 3.5, base, SPIKE_SIZE);
        level.add_spike(x + 3.5, base, SPIKE_SIZE);
    }
}

pub fn vertical_challenge(level: &mut Level, x: f32) {
    let gap = 7.0;
    let pillar_width = 2.0;
    let pillar_height = 6.0;
    let y = level.ground_y + pillar_height / 2.0;
    let offset = gap / 2.0 - pillar_width / 2.0;
    level.add_platform(Vec2::new(x - offset, y), pillar_width, pillar_height);
    level.add_platform(Vec2::new(x + offset, y), pillar_width, pillar_height);

    let base = level.ground_y + SPIKE_LIFT;
    for i in 0..2 {
        let step = i as f32 * 1.2;
        level.add_spike(x - gap - 1.0 + step, base, SPIKE_SIZE);
        level.add_spike(x + gap + 1.0 - step, base, SPIKE_SIZE);
    }
}
