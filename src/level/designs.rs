//! Built-in authored levels
//!
//! See `LEGEND` for the tile codes.

use rand::Rng;

pub const TUTORIAL: &str = r"
..............
..............
.....#4.......
...#2...#3....
#1............
.......^...^..
";

pub const GEOMETRY_DASH: &str = r"
................
.......#5.......
................
.GG.FF...EE..VV.
................
^^^^............
";

pub const ZIGZAG_STAIRS: &str = r"
................
...#5...........
................
.ZZ....//...\\..
................
^...^...........
";

pub const CHALLENGE: &str = r"
.....................
........P............
.#8..................
.....#6...............
...#4..................
.#2...................
....^^^....#2....GG...
^^......^^......^^^...
";

/// Pickups and launchers: coins along the route, a key on a ledge, pads to reach it
pub const COLLECTOR: &str = r"
....................
.........K3.........
....C.C......C.C....
..#2....J...#2......
@1..........S.......
.....^^........^^...
";

/// Every built-in design in selection order; the first one opens a run
pub const DESIGNS: [(&str, &str); 5] = [
    ("tutorial", TUTORIAL),
    ("geometry_dash", GEOMETRY_DASH),
    ("zigzag_stairs", ZIGZAG_STAIRS),
    ("challenge", CHALLENGE),
    ("collector", COLLECTOR),
];

pub const LEGEND: &str = r"
LEVEL DESIGN LEGEND:
-------------------
. = Empty space
# = Regular platform (followed by a number 0-9 for height)
B = Solid block (same as #)
^ = Ground spike
/ = Slope up (three rising steps); // = upward stairs pattern
\\ = Downward stairs pattern
ZZ = Zigzag platform pattern
GG = Ground with central spikes pattern
EE = Elevated platform with spikes below
FF = Gap with floating platform
VV = Vertical challenge with pillars
P = Portal (level end)
@ = Player start
J = Jump pad
S = Saw blade obstacle
C = Coin
K = Key
D = Decoration

NOTE:
- Each column represents one segment
- Numbers after a code indicate its height
- Special patterns use two consecutive letters (GG, FF, etc.)
";

/// Look up a design by name
pub fn by_name(name: &str) -> Option<&'static str> {
    DESIGNS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, text)| *text)
}

/// Design for a 1-based level number: the tutorial first, then a random
/// pick from the rest
pub fn for_level<R: Rng + ?Sized>(level_number: u32, rng: &mut R) -> (&'static str, &'static str) {
    if level_number <= 1 {
        return DESIGNS[0];
    }
    DESIGNS[rng.random_range(1..DESIGNS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ascii::compile;
    use crate::settings::LevelConfig;
    use crate::sim::state::{CollectibleKind, PlatformKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_every_design_compiles() {
        let mut rng = Pcg32::seed_from_u64(77);
        for (name, text) in DESIGNS {
            let level = compile(text, &LevelConfig::default(), &mut rng);
            let raised = level
                .platforms
                .iter()
                .filter(|p| p.kind != PlatformKind::Ground)
                .count();
            assert!(raised > 0, "{} has no platforms", name);
            assert!(level.level_length > 100.0, "{} is empty", name);
        }
    }

    #[test]
    fn test_challenge_has_portal() {
        let mut rng = Pcg32::seed_from_u64(1);
        let level = compile(CHALLENGE, &LevelConfig::default(), &mut rng);
        assert!(level.portal_exists);
    }

    #[test]
    fn test_zigzag_stairs_has_double_backslash() {
        assert!(ZIGZAG_STAIRS.contains(r"\\"));
    }

    #[test]
    fn test_collector_contents() {
        let mut rng = Pcg32::seed_from_u64(1);
        let level = compile(COLLECTOR, &LevelConfig::default(), &mut rng);
        assert!(level.start_position.is_some());
        assert!(level.platforms.iter().any(|p| p.is_jump_pad));
        let keys = level
            .collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Key)
            .count();
        assert_eq!(keys, 1);
        assert_eq!(level.total_items, 5);
    }

    #[test]
    fn test_tutorial_opens_the_run() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(for_level(1, &mut rng).0, "tutorial");
        for n in 2..20 {
            assert_ne!(for_level(n, &mut rng).0, "tutorial");
        }
        assert_eq!(by_name("challenge"), Some(CHALLENGE));
        assert_eq!(by_name("nope"), None);
    }
}
