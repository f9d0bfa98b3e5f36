//! ASCII tile compiler
//!
//! Each text column is one slice of world space. The bottom text line is the
//! ground row; a digit right after a code overrides that cell's height.
//! Elements advance the generation cursor by different fractions of a
//! segment, so dense rows of small elements pack more tightly than rows of
//! platforms. Authored maps depend on that drift, so it is kept exact.

use glam::Vec2;
use rand::Rng;

use super::procgen;
use crate::consts::*;
use crate::settings::LevelConfig;
use crate::sim::state::{CollectibleKind, Level};

/// Filler used to pad short rows
pub const EMPTY_TILE: char = '.';

/// Two-column motifs and the generator each one runs, in match priority
const MOTIFS: [(char, Motif); 7] = [
    ('Z', Motif::Zigzag),
    ('/', Motif::StairsUp),
    ('\\', Motif::StairsDown),
    ('G', Motif::CentralSpikes),
    ('E', Motif::ElevatedSpikes),
    ('F', Motif::FloatingGap),
    ('V', Motif::Pillars),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motif {
    Zigzag,
    StairsUp,
    StairsDown,
    CentralSpikes,
    ElevatedSpikes,
    FloatingGap,
    Pillars,
}

/// Single-cell codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Platform,
    Slope,
    Portal,
    Start,
    JumpPad,
    Key,
    Saw,
    Coin,
    Spike,
    Decoration,
    /// Height suffix for the cell to its left
    Digit,
    Empty,
    Unknown,
}

impl Tile {
    pub fn from_char(c: char) -> Self {
        match c {
            '#' | 'B' => Tile::Platform,
            '/' => Tile::Slope,
            'P' => Tile::Portal,
            '@' => Tile::Start,
            'J' => Tile::JumpPad,
            'K' => Tile::Key,
            'S' => Tile::Saw,
            'C' => Tile::Coin,
            '^' => Tile::Spike,
            'D' => Tile::Decoration,
            '0'..='9' => Tile::Digit,
            '.' | ' ' => Tile::Empty,
            _ => Tile::Unknown,
        }
    }

    /// Fraction of a segment the cursor moves after emitting this tile
    pub fn advance(self) -> f32 {
        match self {
            Tile::Platform | Tile::Slope | Tile::Portal | Tile::Start => 1.0,
            Tile::JumpPad | Tile::Key => 1.0 / 2.0,
            Tile::Saw | Tile::Coin => 1.0 / 3.0,
            Tile::Spike | Tile::Decoration | Tile::Unknown => 1.0 / 4.0,
            Tile::Digit | Tile::Empty => 0.0,
        }
    }
}

/// Padded character grid ready to compile
#[derive(Debug, Clone)]
pub struct TileCompiler {
    /// Text order: `rows[0]` is the top line
    rows: Vec<Vec<char>>,
    width: usize,
}

impl TileCompiler {
    pub fn new(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());
        let mut rows: Vec<Vec<char>> = match (first, last) {
            (Some(first), Some(last)) => lines[first..=last]
                .iter()
                .map(|line| line.trim_end_matches('\r').chars().collect())
                .collect(),
            _ => Vec::new(),
        };
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, EMPTY_TILE);
        }
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, col: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(EMPTY_TILE)
    }

    /// `code` repeated at `col` and `col + 1` in any row
    fn has_motif(&self, col: usize, code: char) -> bool {
        col + 1 < self.width
            && (0..self.rows.len()).any(|row| {
                self.cell(row, col) == code && self.cell(row, col + 1) == code
            })
    }

    /// Compile every column into `level`, continuing from its cursor
    pub fn compile_into<R: Rng + ?Sized>(&self, level: &mut Level, rng: &mut R) {
        level.authored = true;
        for col in 0..self.width {
            self.compile_column(level, col, rng);
        }
        level.level_length = level.current_position + LEVEL_TAIL;
        level.total_items = level.collectibles.len() as u32;
        log::info!(
            "Compiled {}x{} tile map: {} platforms, {} hazards, {} pickups, length {:.1}",
            self.width,
            self.rows.len(),
            level.platforms.len(),
            level.hazards.len(),
            level.total_items,
            level.level_length
        );
    }

    fn compile_column<R: Rng + ?Sized>(&self, level: &mut Level, col: usize, rng: &mut R) {
        let width = level.segment_width;
        let segment_x = level.current_position + width / 2.0;

        if let Some(motif) = MOTIFS
            .iter()
            .find(|(code, _)| self.has_motif(col, *code))
            .map(|(_, motif)| *motif)
        {
            run_motif(level, motif, segment_x, rng);
            level.current_position += width;
            return;
        }

        let mut occupied = false;
        let rows = self.rows.len();
        for row in 0..rows {
            let tile = Tile::from_char(self.cell(row, col));
            if tile == Tile::Empty {
                continue;
            }
            occupied = true;

            let suffix = self.cell(row, col + 1).to_digit(10);
            let height = suffix.map_or((rows - 1 - row) as f32, |d| d as f32);
            let scaled = level.ground_y + height + 1.0;
            emit(level, tile, Vec2::new(segment_x, scaled), rng);
            level.current_position += width * tile.advance();
        }

        if !occupied {
            level.current_position += width;
        }
    }
}

fn run_motif<R: Rng + ?Sized>(level: &mut Level, motif: Motif, x: f32, rng: &mut R) {
    match motif {
        Motif::Zigzag => procgen::zigzag_platforms(level, x, rng),
        Motif::StairsUp => procgen::designed_stairs(level, x, 1.0, rng),
        Motif::StairsDown => procgen::designed_stairs(level, x, -1.0, rng),
        Motif::CentralSpikes => procgen::central_spikes(level, x),
        Motif::ElevatedSpikes => procgen::elevated_with_spikes(level, x),
        Motif::FloatingGap => procgen::gap_with_floating(level, x, rng),
        Motif::Pillars => procgen::vertical_challenge(level, x),
    }
}

/// Create the world object for one cell at `at` (segment center, scaled height)
fn emit<R: Rng + ?Sized>(level: &mut Level, tile: Tile, at: Vec2, rng: &mut R) {
    let width = level.segment_width;
    match tile {
        Tile::Platform => {
            level.add_platform(at, width * 0.8, 1.0);
        }
        Tile::Slope => {
            let step = width * 0.8 / 3.0;
            for i in 0..3 {
                let offset = Vec2::new((i as f32 - 1.0) * step, i as f32);
                level.add_platform(at + offset, step, 1.0);
            }
        }
        Tile::Portal => {
            level.create_portal(at, PORTAL_SIZE);
        }
        Tile::Start => {
            level.start_position = Some(at + Vec2::Y);
        }
        Tile::JumpPad => {
            level.add_jump_pad(at, JUMP_PAD_WIDTH, JUMP_PAD_HEIGHT, None);
        }
        Tile::Key => {
            level.add_collectible(CollectibleKind::Key, at);
        }
        Tile::Saw => {
            level.add_saw(at, SAW_SIZE);
        }
        Tile::Coin => {
            level.add_collectible(CollectibleKind::Coin, at);
        }
        Tile::Spike => {
            level.add_spike(at.x, level.ground_y + SPIKE_LIFT, SPIKE_SIZE);
        }
        Tile::Decoration => {
            let size = rng.random_range(0.5..2.0);
            level.add_decoration(at, size);
        }
        Tile::Digit | Tile::Empty | Tile::Unknown => {}
    }
}

/// Build a fresh level from ASCII text
pub fn compile<R: Rng + ?Sized>(text: &str, config: &LevelConfig, rng: &mut R) -> Level {
    let mut level = Level::new(config);
    TileCompiler::new(text).compile_into(&mut level, rng);
    level
}
