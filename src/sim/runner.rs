//! Runner-dodge mode: a side-scroller where the player jumps or ducks past
//! approaching animals while the score ticks up every second.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SecondClock;
use super::collision::{self, Contact};
use super::entity::{Entity, EntityKind, Rect};
use super::kinds::{AIR_TABLE, GROUND_TABLE, ObstacleKind};
use super::mode::{GameMode, GameOverReport, InputCommand};
use super::snapshot::{EntityView, RenderSnapshot};
use super::spawn::{SpawnBand, TickSpawner, pick};
use super::state::{GameSession, REASON_NO_LIVES, SessionCommand};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::dispatcher::ModeId;
use crate::settings::RunnerTuning;

/// Runner posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalState {
    #[default]
    Run,
    /// Airborne until the physics step lands it
    Jump,
    Duck,
}

/// The player avatar
#[derive(Debug, Clone)]
pub struct Runner {
    pub y: f32,
    pub height: f32,
    pub state: VerticalState,
    /// Vertical velocity while airborne (negative is up)
    pub jump_velocity: f32,
    /// Duck input currently held (honored on landing)
    pub duck_held: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            y: RUNNER_BASE_Y,
            height: RUNNER_HEIGHT,
            state: VerticalState::Run,
            jump_velocity: 0.0,
            duck_held: false,
        }
    }
}

impl Runner {
    pub fn rect(&self) -> Rect {
        Rect::new(RUNNER_X, self.y, RUNNER_WIDTH, self.height)
    }

    pub fn is_airborne(&self) -> bool {
        self.state == VerticalState::Jump
    }

    fn stand(&mut self) {
        self.state = VerticalState::Run;
        self.height = RUNNER_HEIGHT;
        self.y = RUNNER_BASE_Y;
    }

    fn crouch(&mut self) {
        self.state = VerticalState::Duck;
        self.height = RUNNER_DUCK_HEIGHT;
        self.y = RUNNER_BASE_Y + RUNNER_DUCK_DROP;
    }

    /// Leave the ground. Ducking is cancelled; a second jump mid-air is refused.
    pub fn jump(&mut self, power: f32) -> bool {
        if self.is_airborne() {
            return false;
        }
        self.duck_held = false;
        self.stand();
        self.state = VerticalState::Jump;
        self.jump_velocity = power;
        true
    }

    /// Press or release duck. While airborne only the held flag changes.
    pub fn duck(&mut self, pressed: bool) {
        self.duck_held = pressed;
        if self.is_airborne() {
            return;
        }
        if pressed {
            self.crouch();
        } else {
            self.stand();
        }
    }

    /// One physics step; returns true on the tick the runner lands
    pub fn step(&mut self, gravity: f32) -> bool {
        if !self.is_airborne() {
            return false;
        }
        self.y += self.jump_velocity;
        self.jump_velocity += gravity;

        if self.y < RUNNER_BASE_Y {
            return false;
        }
        self.jump_velocity = 0.0;
        if self.duck_held {
            self.crouch();
        } else {
            self.stand();
        }
        true
    }
}

pub struct RunnerDodgeMode {
    tuning: RunnerTuning,
    session: GameSession,
    runner: Runner,
    obstacles: Vec<Entity<ObstacleKind>>,
    spawner: TickSpawner,
    clock: SecondClock,
    /// Global scroll speed (px/tick)
    speed: f32,
    scroll_offset: f32,
    cues: Vec<AudioCue>,
    rng: Pcg32,
    next_id: u32,
}

impl RunnerDodgeMode {
    pub fn new(tuning: RunnerTuning) -> Self {
        Self::with_rng(tuning, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Fixed-seed constructor for tests
    pub fn with_seed(tuning: RunnerTuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(tuning: RunnerTuning, rng: Pcg32) -> Self {
        Self {
            speed: tuning.start_speed,
            tuning,
            session: GameSession::default(),
            runner: Runner::default(),
            obstacles: Vec::new(),
            spawner: TickSpawner::default(),
            clock: SecondClock::default(),
            scroll_offset: 0.0,
            cues: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn obstacles(&self) -> &[Entity<ObstacleKind>] {
        &self.obstacles
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn jump(&mut self) {
        if !self.session.is_active() {
            log::trace!("jump ignored: session not active");
            return;
        }
        if self.runner.jump(self.tuning.jump_power) {
            self.cues.push(AudioCue::Jump);
        } else {
            log::trace!("jump ignored: already airborne");
        }
    }

    pub fn duck(&mut self, pressed: bool) {
        if !self.session.is_active() {
            log::trace!("duck ignored: session not active");
            return;
        }
        self.runner.duck(pressed);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn spawn_obstacle(&mut self, width: f32) {
        let airborne = self.rng.random_bool(self.tuning.air_chance.clamp(0.0, 1.0));
        let table: &[SpawnBand<ObstacleKind>] = if airborne { &AIR_TABLE } else { &GROUND_TABLE };
        let roll = self.rng.random::<f32>() * 100.0;
        let Some(kind) = pick(table, roll) else {
            return;
        };
        let (y, height) = if airborne {
            (AIR_OBSTACLE_Y, AIR_OBSTACLE_HEIGHT)
        } else {
            (GROUND_OBSTACLE_Y, GROUND_OBSTACLE_HEIGHT)
        };
        let id = self.next_entity_id();
        log::debug!("spawn {} (roll {:.1})", kind.name(), roll);
        self.obstacles.push(Entity {
            id,
            pos: Vec2::new(width, kind.y_override().unwrap_or(y)),
            size: Vec2::new(OBSTACLE_WIDTH, height),
            kind,
            // Obstacles store only their offset; the scroll speed is added per tick
            speed: kind.speed_offset(),
        });
        if let Some(tag) = kind.cue() {
            self.cues.push(AudioCue::Ambient(tag));
        }
    }

    fn drain_commands(&mut self) {
        while let Some(command) = self.session.next_command() {
            match command {
                SessionCommand::SecondElapsed => {
                    self.session.score += self.tuning.score_per_second;
                    let milestone = self.tuning.speed_milestone.max(1);
                    if self.session.score % milestone == 0 {
                        self.speed += self.tuning.speed_step;
                        log::debug!("speed up to {:.1} at score {}", self.speed, self.session.score);
                    }
                }
            }
        }
    }

    fn game_over(&mut self) -> GameOverReport {
        self.session.end(REASON_NO_LIVES);
        self.clock.cancel();
        self.obstacles.clear();
        log::info!("Runner over (score {})", self.session.score);
        GameOverReport {
            mode: ModeId::RunnerDodge,
            score: self.session.score,
            reason: REASON_NO_LIVES.to_string(),
        }
    }
}

impl GameMode for RunnerDodgeMode {
    fn id(&self) -> ModeId {
        ModeId::RunnerDodge
    }

    fn start(&mut self) {
        self.session.begin(self.tuning.start_lives);
        self.speed = self.tuning.start_speed;
        self.runner = Runner::default();
        self.obstacles.clear();
        self.spawner = TickSpawner::default();
        self.scroll_offset = 0.0;
        self.cues.clear();
        self.clock.arm();
        log::info!("Runner started");
    }

    fn stop(&mut self) {
        if self.session.is_active() {
            log::info!("Runner stopped (score {})", self.session.score);
        }
        self.session.halt();
        self.clock.cancel();
        self.obstacles.clear();
    }

    fn is_active(&self) -> bool {
        self.session.is_active()
    }

    fn update(&mut self, dt: f32, width: f32, _height: f32) -> Option<GameOverReport> {
        if !self.session.is_active() {
            return None;
        }

        for _ in 0..self.clock.advance(dt) {
            self.session.enqueue(SessionCommand::SecondElapsed);
        }
        self.drain_commands();

        self.scroll_offset -= self.speed * SCROLL_FACTOR;

        if self.runner.step(self.tuning.gravity) {
            log::trace!("landed as {:?}", self.runner.state);
        }

        if self.spawner.advance(self.tuning.spawn_threshold(self.speed)) {
            self.spawn_obstacle(width);
        }

        let speed = self.speed;
        let margin = self.tuning.hit_margin;
        let body = self.runner.rect();
        let mut hits = 0;
        self.obstacles.retain_mut(|obstacle| {
            obstacle.pos.x -= speed + obstacle.speed;
            if obstacle.rect().right() < 0.0 {
                return false;
            }
            if let Some(Contact::Damage) = collision::resolve(&body, obstacle, margin) {
                hits += 1;
                return false;
            }
            true
        });

        for _ in 0..hits {
            self.cues.push(AudioCue::ObstacleHit);
            if self.session.lose_life() {
                return Some(self.game_over());
            }
        }

        None
    }

    fn dispatch_input(&mut self, command: InputCommand) {
        match command {
            InputCommand::Jump => self.jump(),
            InputCommand::DuckDown => self.duck(true),
            InputCommand::DuckUp => self.duck(false),
            InputCommand::Lane(lane) => log::trace!("runner ignores lane {:?}", lane),
        }
    }

    fn enqueue(&mut self, command: SessionCommand) -> bool {
        self.session.enqueue(command)
    }

    fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            mode: ModeId::RunnerDodge,
            phase: self.session.phase,
            player: self.runner.rect(),
            player_pose: Some(self.runner.state),
            entities: self.obstacles.iter().map(EntityView::from).collect(),
            score: self.session.score,
            lives: self.session.lives,
            level: self.session.level,
            time_left: None,
            max_time: None,
            level_up_banner: None,
            game_over_reason: self.session.game_over_reason.clone(),
            scroll_offset: Some(self.scroll_offset),
        }
    }

    fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}
