//! Host-loop driver
//!
//! One `tick` advances the actor, keeps the level generated ahead of it,
//! resolves collisions and checks the exit portal. Everything the
//! presentation layer needs to react to is queued as a `GameEvent`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::{Contact, check_portal, resolve};
use super::state::{EntityId, GameEvent, Level};
use crate::error::ConfigError;
use crate::level::{FragmentLibrary, Theme, build_procedural, compile, designs};
use crate::settings::Settings;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space / tap)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
    /// Portal reached; the next level is loaded on the following tick
    LevelComplete,
}

/// Where levels come from
#[derive(Debug, Clone)]
pub enum LevelPlan {
    /// Endless random segments
    Procedural,
    /// Tutorial first, then random built-in designs
    Designs,
    /// The same ASCII map every level
    Custom(String),
    /// Stitched tile fragments
    Fragments(FragmentLibrary),
}

/// One run: the actor, the current level and the run totals
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub seed: u64,
    pub actor: Actor,
    pub level: Level,
    pub phase: Phase,
    /// 1-based
    pub level_number: u32,
    /// Horizontal run speed (units/s)
    pub speed: f32,
    /// Distance covered this run
    pub distance: f32,
    /// Coin value carried across levels
    pub score: u64,
    pub time_ticks: u64,
    /// Theme of the current fragment-composed level
    pub theme: Option<Theme>,
    plan: LevelPlan,
    rng: Pcg32,
    events: Vec<GameEvent>,
    /// Platform the actor landed on last tick, so resting emits one `Landed`
    support: Option<EntityId>,
}

impl Session {
    pub fn new(settings: Settings, seed: u64, plan: LevelPlan) -> Result<Self, ConfigError> {
        settings.validate()?;
        let actor = Actor::new(&settings.actor)?;
        let level = Level::new(&settings.level);
        let speed = settings.run.speed_for_level(1);
        let mut session = Self {
            settings,
            seed,
            actor,
            level,
            phase: Phase::Playing,
            level_number: 1,
            speed,
            distance: 0.0,
            score: 0,
            time_ticks: 0,
            theme: None,
            plan,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            support: None,
        };
        session.load_level();
        Ok(session)
    }

    /// Build the level for `level_number` and put the actor on its spawn
    fn load_level(&mut self) {
        let config = &self.settings.level;
        self.theme = None;
        self.level = match &mut self.plan {
            LevelPlan::Procedural => build_procedural(config, &mut self.rng),
            LevelPlan::Designs => {
                let (name, text) = designs::for_level(self.level_number, &mut self.rng);
                log::info!("Level {}: design {}", self.level_number, name);
                compile(text, config, &mut self.rng)
            }
            LevelPlan::Custom(text) => compile(text, config, &mut self.rng),
            LevelPlan::Fragments(library) => {
                let rating = self.settings.run.difficulty.rating();
                let composed = library.compose(self.level_number, rating, &mut self.rng);
                self.theme = Some(composed.theme);
                compile(&composed.layout, config, &mut self.rng)
            }
        };

        let start = self.level.start_position.unwrap_or(self.settings.actor.start);
        self.actor.set_start(start);
        self.actor.reset();
        self.support = None;
        self.speed = self.settings.run.speed_for_level(self.level_number);
        self.events.push(GameEvent::LevelStarted {
            number: self.level_number,
        });
        log::info!(
            "Level {} ready: speed {:.1}, length {:.1}",
            self.level_number,
            self.speed,
            self.level.level_length
        );
    }

    /// Advance to the next level, keeping the run totals
    pub fn next_level(&mut self) {
        self.level.clear();
        self.level_number += 1;
        self.load_level();
        self.phase = Phase::Playing;
    }

    /// Start over from level 1
    pub fn restart(&mut self) {
        self.level.clear();
        self.level_number = 1;
        self.distance = 0.0;
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
        self.load_level();
        self.phase = Phase::Playing;
    }

    /// Hand queued events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score of the current level plus everything banked before it
    pub fn total_score(&self) -> u64 {
        self.score + self.level.score
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.pause {
        match session.phase {
            Phase::Playing => {
                session.phase = Phase::Paused;
                return;
            }
            Phase::Paused => session.phase = Phase::Playing,
            _ => {}
        }
    }

    match session.phase {
        Phase::Paused | Phase::GameOver => return,
        Phase::LevelComplete => {
            session.score += session.level.score;
            session.next_level();
            return;
        }
        Phase::Playing => {}
    }

    session.time_ticks += 1;

    if input.jump && session.actor.jump() {
        session.events.push(GameEvent::Jumped);
    }

    session.actor.velocity.x = session.speed;
    session.actor.advance(dt);

    let actor_x = session.actor.position.x;
    if session.level.update(actor_x, &mut session.rng) {
        if let Some(portal) = session.level.portal {
            session.events.push(GameEvent::PortalOpened { pos: portal.pos });
        }
    }

    let resolution = resolve(&mut session.actor, &mut session.level);
    let previous_support = session.support.take();
    match resolution.contact {
        Contact::None => {}
        Contact::Landed { platform, jump_pad } => {
            if previous_support != Some(platform) {
                session
                    .events
                    .push(GameEvent::Landed { platform, jump_pad });
            }
            session.support = Some(platform);
        }
        Contact::HitSide { platform, side } => {
            session.events.push(GameEvent::HitSide { platform, side });
        }
        Contact::Died { hazard } => {
            session.events.push(GameEvent::Died { hazard });
        }
    }
    for pickup in &resolution.collected {
        session.events.push(GameEvent::Collected {
            kind: pickup.kind,
            value: pickup.value,
        });
    }
    if resolution.portal_opened {
        if let Some(portal) = session.level.portal {
            session.events.push(GameEvent::PortalOpened { pos: portal.pos });
        }
    }

    if resolution.died() {
        session.phase = Phase::GameOver;
        session.score += session.level.score;
        session.level.score = 0;
        log::info!(
            "Game over on level {} at distance {:.1}, score {} ({} ticks)",
            session.level_number,
            session.distance,
            session.score,
            session.time_ticks
        );
        return;
    }

    session.distance += session.speed * dt;

    if check_portal(&session.actor, &mut session.level) {
        session.events.push(GameEvent::PortalEntered);
        session.phase = Phase::LevelComplete;
        log::info!(
            "Level {} complete at tick {}",
            session.level_number,
            session.time_ticks
        );
    }
}
