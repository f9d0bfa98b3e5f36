//! Tile fragments stitched into whole levels
//!
//! A fragment is a small hand-drawn ASCII block shipped as JSON. Levels are
//! composed as start + a random run of middle fragments + end, glued side by
//! side and aligned on their bottom rows.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ascii::EMPTY_TILE;

pub const START_ID: &str = "start";
pub const END_ID: &str = "end";

/// Share of the previous selection that is kept out of the next one
const AVOID_FRACTION: f32 = 0.7;

/// Level color scheme as CSS hex strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub platforms: String,
    pub player: String,
    pub accent: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#000000".to_string(),
            platforms: "#0088ff".to_string(),
            player: "#ff4500".to_string(),
            accent: "#00ff88".to_string(),
        }
    }
}

/// One authored block of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileFragment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub width: usize,
    pub height: usize,
    pub layout: Vec<String>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl TileFragment {
    /// Stand-in used when a fragment cannot be loaded
    pub fn fallback(id: &str) -> Self {
        Self {
            title: format!("Fallback {}", id),
            description: "Emergency fallback level".to_string(),
            width: 10,
            height: 5,
            layout: [
                "...........",
                "...........",
                "....C......",
                "...BBB.....",
                "...........",
            ]
            .iter()
            .map(|row| row.to_string())
            .collect(),
            theme: None,
        }
    }

    /// Column count once padded: the declared width or the longest row
    pub fn columns(&self) -> usize {
        self.layout
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.width)
    }
}

/// A stitched level ready for the tile compiler
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedLevel {
    pub layout: String,
    pub theme: Theme,
    /// Middle fragment ids in placement order
    pub sections: Vec<String>,
}

/// Registered fragments plus the memory of the last selection
#[derive(Debug, Clone, Default)]
pub struct FragmentLibrary {
    /// Registration order
    fragments: Vec<(String, TileFragment)>,
    previous: Vec<String>,
}

impl FragmentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fragment from JSON. A missing source or bad JSON registers
    /// the fallback fragment instead.
    pub fn register_json(&mut self, id: &str, source: Option<&str>) {
        let fragment = match source {
            Some(json) => match serde_json::from_str::<TileFragment>(json) {
                Ok(fragment) => {
                    log::info!("Loaded tile fragment {}: {}", id, fragment.title);
                    fragment
                }
                Err(e) => {
                    log::warn!("Bad tile fragment {}: {}; using fallback", id, e);
                    TileFragment::fallback(id)
                }
            },
            None => {
                log::warn!("Missing tile fragment {}; using fallback", id);
                TileFragment::fallback(id)
            }
        };
        self.register(id, fragment);
    }

    /// Register or replace a fragment
    pub fn register(&mut self, id: &str, fragment: TileFragment) {
        if let Some(slot) = self.fragments.iter_mut().find(|(k, _)| k == id) {
            slot.1 = fragment;
        } else {
            self.fragments.push((id.to_string(), fragment));
        }
    }

    pub fn get(&self, id: &str) -> Option<&TileFragment> {
        self.fragments.iter().find(|(k, _)| k == id).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of middle sections for a difficulty rating
    pub fn section_count(difficulty: u32) -> usize {
        2 + ((difficulty as f32 * 0.8).floor() as usize).min(4)
    }

    fn middles(&self) -> impl Iterator<Item = &(String, TileFragment)> {
        self.fragments
            .iter()
            .filter(|(id, _)| id != START_ID && id != END_ID)
    }

    /// Stitch start, middles and end into one ASCII map
    pub fn compose<R: Rng + ?Sized>(
        &mut self,
        level_number: u32,
        difficulty: u32,
        rng: &mut R,
    ) -> ComposedLevel {
        let start = self
            .get(START_ID)
            .cloned()
            .unwrap_or_else(|| TileFragment::fallback(START_ID));
        let end = self
            .get(END_ID)
            .cloned()
            .unwrap_or_else(|| TileFragment::fallback(END_ID));

        let count = Self::section_count(difficulty);
        let avoid = &self.previous[..(self.previous.len() as f32 * AVOID_FRACTION) as usize];
        let fresh: Vec<&String> = self
            .middles()
            .map(|(id, _)| id)
            .filter(|id| !avoid.contains(*id))
            .collect();
        let mut pool: Vec<&String> = if fresh.len() >= count {
            fresh
        } else {
            self.middles().map(|(id, _)| id).collect()
        };

        let mut sections = Vec::with_capacity(count);
        while sections.len() < count && !pool.is_empty() {
            let pick = rng.random_range(0..pool.len());
            sections.push(pool.remove(pick).clone());
        }

        let mut parts = vec![&start];
        parts.extend(sections.iter().filter_map(|id| self.get(id)));
        parts.push(&end);
        let layout = stitch(&parts);

        let themes: Vec<&Theme> = std::iter::once(&start)
            .chain(self.middles().map(|(_, f)| f))
            .chain(std::iter::once(&end))
            .filter_map(|f| f.theme.as_ref())
            .collect();
        let theme = if themes.is_empty() {
            Theme::default()
        } else {
            themes[(level_number.saturating_sub(1) as usize) % themes.len()].clone()
        };

        log::info!(
            "Composed level {} from {} sections: {:?}",
            level_number,
            sections.len(),
            sections
        );
        self.previous = sections.clone();

        ComposedLevel {
            layout,
            theme,
            sections,
        }
    }
}

/// Place fragments side by side, bottom-aligned, padding each to its own
/// column count and the tallest fragment's height
fn stitch(parts: &[&TileFragment]) -> String {
    let height = parts.iter().map(|f| f.layout.len()).max().unwrap_or(0);
    let mut rows = vec![String::new(); height];

    for fragment in parts {
        let columns = fragment.columns();
        let top = height - fragment.layout.len();
        for (i, row) in rows.iter_mut().enumerate() {
            let line = if i >= top {
                fragment.layout[i - top].as_str()
            } else {
                ""
            };
            row.push_str(line);
            let pad = columns - line.chars().count();
            row.extend(std::iter::repeat_n(EMPTY_TILE, pad));
        }
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fragment(title: &str, layout: &[&str]) -> TileFragment {
        TileFragment {
            title: title.to_string(),
            description: String::new(),
            width: layout.iter().map(|r| r.len()).max().unwrap_or(0),
            height: layout.len(),
            layout: layout.iter().map(|r| r.to_string()).collect(),
            theme: None,
        }
    }

    fn library(middles: usize) -> FragmentLibrary {
        let mut lib = FragmentLibrary::new();
        lib.register(START_ID, fragment("Start", &["@."]));
        lib.register(END_ID, fragment("End", &["P", "."]));
        for i in 0..middles {
            lib.register(&format!("title{}", i + 1), fragment("Mid", &["#", "^"]));
        }
        lib
    }

    #[test]
    fn test_register_json() {
        let mut lib = FragmentLibrary::new();
        let json = r##"{
            "title": "Spike Run",
            "description": "Spikes",
            "width": 4,
            "height": 2,
            "layout": ["..#.", "^^.^"],
            "theme": {"background": "#111111", "platforms": "#222222", "player": "#333333", "accent": "#444444"}
        }"##;
        lib.register_json("title1", Some(json));
        let f = lib.get("title1").unwrap();
        assert_eq!(f.title, "Spike Run");
        assert_eq!(f.theme.as_ref().unwrap().accent, "#444444");
    }

    #[test]
    fn test_bad_json_uses_fallback() {
        let mut lib = FragmentLibrary::new();
        lib.register_json("title2", Some("{ broken"));
        lib.register_json("title3", None);
        assert_eq!(lib.get("title2").unwrap().title, "Fallback title2");
        assert_eq!(lib.get("title3").unwrap().layout.len(), 5);
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn test_section_count() {
        assert_eq!(FragmentLibrary::section_count(1), 2);
        assert_eq!(FragmentLibrary::section_count(3), 4);
        assert_eq!(FragmentLibrary::section_count(5), 6);
        assert_eq!(FragmentLibrary::section_count(50), 6);
    }

    #[test]
    fn test_stitch_bottom_aligns_and_pads() {
        let a = fragment("a", &["#", "^"]);
        let b = fragment("b", &["C"]);
        let mut c = fragment("c", &["..", "K"]);
        c.width = 3;
        assert_eq!(stitch(&[&a, &b, &c]), "#....\n^CK..");
    }

    #[test]
    fn test_compose_picks_without_replacement() {
        let mut lib = library(8);
        let mut rng = Pcg32::seed_from_u64(21);
        let composed = lib.compose(1, 3, &mut rng);
        assert_eq!(composed.sections.len(), 4);
        let mut unique = composed.sections.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);
        assert!(composed.sections.iter().all(|s| s.starts_with("title")));

        // start (2) + 4 middles (1) + end (1)
        let rows: Vec<&str> = composed.layout.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "..####P");
        assert_eq!(rows[1], "@.^^^^.");
    }

    #[test]
    fn test_compose_avoids_previous_selection() {
        let mut lib = library(10);
        let mut rng = Pcg32::seed_from_u64(8);
        let first = lib.compose(1, 3, &mut rng);
        let second = lib.compose(2, 3, &mut rng);
        // floor(4 * 0.7) = 2 of the previous picks are excluded
        for id in &first.sections[..2] {
            assert!(!second.sections.contains(id));
        }
    }

    #[test]
    fn test_small_pool_reuses_everything() {
        let mut lib = library(2);
        let mut rng = Pcg32::seed_from_u64(2);
        lib.compose(1, 5, &mut rng);
        let second = lib.compose(2, 5, &mut rng);
        assert_eq!(second.sections.len(), 2);
    }

    #[test]
    fn test_theme_rotates_by_level() {
        let mut lib = library(0);
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(lib.compose(1, 1, &mut rng).theme, Theme::default());

        let red = Theme {
            background: "#ff0000".into(),
            ..Theme::default()
        };
        let blue = Theme {
            background: "#0000ff".into(),
            ..Theme::default()
        };
        let mut start = fragment("Start", &["@"]);
        start.theme = Some(red.clone());
        let mut end = fragment("End", &["P"]);
        end.theme = Some(blue.clone());
        lib.register(START_ID, start);
        lib.register(END_ID, end);

        assert_eq!(lib.compose(1, 1, &mut rng).theme, red);
        assert_eq!(lib.compose(2, 1, &mut rng).theme, blue);
        assert_eq!(lib.compose(3, 1, &mut rng).theme, red);
    }

    #[test]
    fn test_missing_start_and_end_fall_back() {
        let mut lib = FragmentLibrary::new();
        let mut rng = Pcg32::seed_from_u64(4);
        let composed = lib.compose(1, 1, &mut rng);
        assert!(composed.sections.is_empty());
        assert_eq!(composed.layout.lines().count(), 5);
        assert!(composed.layout.contains("BBB"));
    }
}
