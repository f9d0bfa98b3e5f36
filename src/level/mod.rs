//! Level construction
//!
//! Two ways to fill a `Level`: the ASCII tile compiler for authored maps and
//! the procedural segment generator for endless runs. Authored maps can also
//! be stitched together from JSON tile fragments.

pub mod ascii;
pub mod designs;
pub mod fragments;
pub mod procgen;

pub use ascii::{TileCompiler, compile};
pub use fragments::{ComposedLevel, FragmentLibrary, Theme, TileFragment};
pub use procgen::{Archetype, generate_next_segment, generate_segment};

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::settings::LevelConfig;
use crate::sim::state::Level;

/// Fresh procedural level with the first window of segments generated
pub fn build_procedural<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Level {
    let mut level = Level::new(config);
    for _ in 0..level.segments_ahead {
        if level.current_position >= level.level_length {
            break;
        }
        generate_next_segment(&mut level, rng);
    }
    log::info!(
        "Built procedural level: {} platforms, {} hazards",
        level.platforms.len(),
        level.hazards.len()
    );
    level
}

impl Level {
    /// Keep segments generated ahead of the actor and open the exit once the
    /// actor nears the end. Returns true if the exit opened this call.
    ///
    /// At most `segments_ahead` segments are generated per call; a window
    /// that falls further behind catches up over the following ticks.
    pub fn update<R: Rng + ?Sized>(&mut self, actor_x: f32, rng: &mut R) -> bool {
        if !self.authored {
            let horizon = actor_x + self.segments_ahead as f32 * self.segment_width;
            for _ in 0..self.segments_ahead.max(1) {
                if self.current_position >= horizon || self.current_position >= self.level_length {
                    break;
                }
                generate_next_segment(self, rng);
            }
        }

        if !self.portal_exists && actor_x > self.level_length - LEVEL_TAIL {
            let pos = Vec2::new(actor_x + PORTAL_LEAD, self.ground_y + PORTAL_HEIGHT);
            return self.create_portal(pos, PORTAL_SIZE);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_build_procedural_stops_at_level_length() {
        let mut rng = Pcg32::seed_from_u64(7);
        let level = build_procedural(&LevelConfig::default(), &mut rng);
        // 300 units of 30-unit segments
        assert_eq!(level.current_position, LEVEL_LENGTH);
        assert!(!level.authored);
        assert!(level.ground().is_some());
    }

    #[test]
    fn test_update_generates_ahead() {
        let config = LevelConfig {
            level_length: 3000.0,
            segments_ahead: 2,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut level = build_procedural(&config, &mut rng);
        assert_eq!(level.current_position, 60.0);

        // Window reaches 160; two segments per call
        level.update(100.0, &mut rng);
        assert_eq!(level.current_position, 120.0);
        level.update(100.0, &mut rng);
        assert_eq!(level.current_position, 180.0);
        level.update(100.0, &mut rng);
        assert_eq!(level.current_position, 180.0);
    }

    #[test]
    fn test_update_is_bounded_for_degenerate_width() {
        let config = LevelConfig {
            segment_width: 1e-6,
            level_length: 3000.0,
            segments_ahead: 3,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut level = build_procedural(&config, &mut rng);
        let before = level.platforms.len() + level.hazards.len() + level.decorations.len();
        level.update(10.0, &mut rng);
        let after = level.platforms.len() + level.hazards.len() + level.decorations.len();
        // Each segment adds at most 2 + 5 * 2 hazards, 5 platforms or 3 decorations
        assert!(after - before <= 3 * 15);
        assert!(level.current_position < 1.0);
    }

    #[test]
    fn test_end_portal_opens_near_level_end() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut level = build_procedural(&LevelConfig::default(), &mut rng);

        assert!(!level.update(150.0, &mut rng));
        assert!(!level.portal_exists);

        assert!(level.update(201.0, &mut rng));
        let portal = level.portal.unwrap();
        assert_eq!(portal.pos, Vec2::new(201.0 + PORTAL_LEAD, GROUND_Y + PORTAL_HEIGHT));

        // Only once
        assert!(!level.update(250.0, &mut rng));
    }

    #[test]
    fn test_authored_levels_do_not_grow() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut level = compile("#3..", &LevelConfig::default(), &mut rng);
        let platforms = level.platforms.len();
        let cursor = level.current_position;
        level.update(10.0, &mut rng);
        assert_eq!(level.platforms.len(), platforms);
        assert_eq!(level.current_position, cursor);
    }
}
