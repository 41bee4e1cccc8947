//! Lane-catch mode: a basket in one of three lanes catches falling fruit and
//! dodges bombs against a countdown.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::SecondClock;
use super::collision::{self, Contact};
use super::entity::{Entity, EntityKind, Rect};
use super::kinds::{ItemKind, item_table};
use super::mode::{GameMode, GameOverReport, InputCommand, LaneCommand};
use super::snapshot::{BannerView, EntityView, RenderSnapshot};
use super::spawn::{IntervalSpawner, pick};
use super::state::{
    GameSession, LevelUpBanner, REASON_NO_LIVES, REASON_TIME_OVER, SessionCommand,
};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::dispatcher::ModeId;
use crate::settings::LaneTuning;

/// Horizontal center of a lane
#[inline]
pub fn lane_center(lane: u8, width: f32) -> f32 {
    width / LANE_COUNT as f32 * (lane as f32 + 0.5)
}

/// The basket
#[derive(Debug, Clone)]
pub struct Basket {
    pub lane: u8,
    /// Left edge, derived from `lane` every tick
    pub x: f32,
}

impl Basket {
    fn centered(width: f32) -> Self {
        let mut basket = Self { lane: CENTER_LANE, x: 0.0 };
        basket.align(width);
        basket
    }

    fn align(&mut self, width: f32) {
        self.x = lane_center(self.lane, width) - BASKET_WIDTH / 2.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, BASKET_Y, BASKET_WIDTH, BASKET_HEIGHT)
    }
}

pub struct LaneCatchMode {
    tuning: LaneTuning,
    session: GameSession,
    basket: Basket,
    items: Vec<Entity<ItemKind>>,
    spawner: IntervalSpawner,
    clock: SecondClock,
    time_left: u32,
    max_time: u32,
    banner: Option<LevelUpBanner>,
    cues: Vec<AudioCue>,
    rng: Pcg32,
    next_id: u32,
    /// Last playfield width seen, for placing the basket before the first tick
    width: f32,
}

impl LaneCatchMode {
    pub fn new(tuning: LaneTuning) -> Self {
        Self::with_rng(tuning, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Fixed-seed constructor for tests
    pub fn with_seed(tuning: LaneTuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(tuning: LaneTuning, rng: Pcg32) -> Self {
        Self {
            spawner: IntervalSpawner::new(tuning.base_spawn_interval_ms),
            time_left: tuning.max_time,
            max_time: tuning.max_time,
            tuning,
            session: GameSession::default(),
            basket: Basket::centered(DEFAULT_PLAYFIELD_WIDTH),
            items: Vec::new(),
            clock: SecondClock::default(),
            banner: None,
            cues: Vec::new(),
            rng,
            next_id: 1,
            width: DEFAULT_PLAYFIELD_WIDTH,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn items(&self) -> &[Entity<ItemKind>] {
        &self.items
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.spawner.interval_ms
    }

    pub fn banner(&self) -> Option<LevelUpBanner> {
        self.banner
    }

    /// Move the basket one lane in the sign of `direction`
    pub fn set_lane(&mut self, direction: i8) {
        if !self.session.is_active() {
            log::trace!("lane change ignored: session not active");
            return;
        }
        let lane = (self.basket.lane as i8 + direction.signum()).clamp(0, LANE_COUNT as i8 - 1);
        self.basket.lane = lane as u8;
        self.basket.align(self.width);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn spawn_item(&mut self, width: f32) {
        let level = self.session.level;
        let table = item_table(self.tuning.hazard_chance(level));
        let Some(kind) = pick(&table, self.rng.random::<f32>()) else {
            return;
        };
        let lane = self.rng.random_range(0..LANE_COUNT);
        let id = self.next_entity_id();
        let speed = kind.base_speed() + level as f32 * self.tuning.level_speed_bonus;
        log::debug!("spawn {} in lane {} at speed {:.1}", kind.name(), lane, speed);
        self.items.push(Entity {
            id,
            pos: Vec2::new(lane_center(lane, width) - ITEM_SIZE / 2.0, ITEM_SPAWN_Y),
            size: Vec2::splat(ITEM_SIZE),
            kind,
            speed,
        });
    }

    /// Apply queued commands; returns a report if the countdown ran out
    fn drain_commands(&mut self) -> Option<GameOverReport> {
        while let Some(command) = self.session.next_command() {
            match command {
                SessionCommand::SecondElapsed => {
                    self.time_left = self.time_left.saturating_sub(1);
                    if self.time_left == 0 {
                        return Some(self.game_over(REASON_TIME_OVER));
                    }
                }
            }
        }
        None
    }

    /// Level up at most once per evaluation
    fn check_level_up(&mut self) {
        let threshold = self.session.level * self.tuning.level_score_step;
        if self.session.score < threshold {
            return;
        }
        self.session.level += 1;
        let level = self.session.level;
        self.spawner.interval_ms = self.tuning.spawn_interval_ms(level);
        self.banner = Some(LevelUpBanner {
            level,
            ticks_remaining: self.tuning.banner_ticks,
        });
        self.time_left = (self.time_left + self.tuning.level_up_time_bonus).min(self.max_time);
        self.cues.push(AudioCue::LevelUp);
        log::info!(
            "Level {} (score {}, spawn every {}ms)",
            level,
            self.session.score,
            self.spawner.interval_ms
        );
    }

    fn game_over(&mut self, reason: &str) -> GameOverReport {
        self.session.end(reason);
        self.clock.cancel();
        self.items.clear();
        self.banner = None;
        log::info!("Lane catch over: {} (score {})", reason, self.session.score);
        GameOverReport {
            mode: ModeId::LaneCatch,
            score: self.session.score,
            reason: reason.to_string(),
        }
    }
}

impl GameMode for LaneCatchMode {
    fn id(&self) -> ModeId {
        ModeId::LaneCatch
    }

    fn start(&mut self) {
        self.session.begin(self.tuning.start_lives);
        self.max_time = self.tuning.max_time;
        self.time_left = self.max_time;
        self.items.clear();
        self.basket = Basket::centered(self.width);
        self.spawner = IntervalSpawner::new(self.tuning.base_spawn_interval_ms);
        self.banner = None;
        self.cues.clear();
        self.clock.arm();
        log::info!("Lane catch started");
    }

    fn stop(&mut self) {
        if self.session.is_active() {
            log::info!("Lane catch stopped (score {})", self.session.score);
        }
        self.session.halt();
        self.clock.cancel();
        self.items.clear();
        self.banner = None;
    }

    fn is_active(&self) -> bool {
        self.session.is_active()
    }

    fn update(&mut self, dt: f32, width: f32, height: f32) -> Option<GameOverReport> {
        if !self.session.is_active() {
            return None;
        }
        self.width = width;

        for _ in 0..self.clock.advance(dt) {
            self.session.enqueue(SessionCommand::SecondElapsed);
        }
        if let Some(report) = self.drain_commands() {
            return Some(report);
        }

        self.basket.align(width);

        if self.spawner.advance(dt) {
            self.spawn_item(width);
        }

        // Fall, drop anything past the floor, pull out whatever touched the basket
        let basket = self.basket.rect();
        let mut contacts = Vec::new();
        self.items.retain_mut(|item| {
            item.pos.y += item.speed;
            if item.pos.y > height {
                return false;
            }
            match collision::resolve(&basket, item, 0.0) {
                Some(contact) => {
                    contacts.push(contact);
                    false
                }
                None => true,
            }
        });

        for contact in contacts {
            match contact {
                Contact::Damage => {
                    self.cues.push(AudioCue::HazardHit);
                    if self.session.lose_life() {
                        return Some(self.game_over(REASON_NO_LIVES));
                    }
                }
                Contact::Collect { points } => {
                    self.session.score += points;
                    self.check_level_up();
                }
            }
        }

        if let Some(banner) = self.banner.as_mut() {
            banner.ticks_remaining = banner.ticks_remaining.saturating_sub(1);
            if banner.ticks_remaining == 0 {
                self.banner = None;
            }
        }

        None
    }

    fn dispatch_input(&mut self, command: InputCommand) {
        match command {
            InputCommand::Lane(LaneCommand::Left) => self.set_lane(-1),
            InputCommand::Lane(LaneCommand::Right) => self.set_lane(1),
            InputCommand::Lane(LaneCommand::Center) => {
                let toward_center = CENTER_LANE as i8 - self.basket.lane as i8;
                self.set_lane(toward_center);
            }
            other => log::trace!("lane catch ignores {:?}", other),
        }
    }

    fn enqueue(&mut self, command: SessionCommand) -> bool {
        self.session.enqueue(command)
    }

    fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            mode: ModeId::LaneCatch,
            phase: self.session.phase,
            player: self.basket.rect(),
            player_pose: None,
            entities: self.items.iter().map(EntityView::from).collect(),
            score: self.session.score,
            lives: self.session.lives,
            level: self.session.level,
            time_left: Some(self.time_left),
            max_time: Some(self.max_time),
            level_up_banner: self.banner.map(|b| BannerView {
                active: true,
                level: b.level,
                ticks_remaining: b.ticks_remaining,
            }),
            game_over_reason: self.session.game_over_reason.clone(),
            scroll_offset: None,
        }
    }

    fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    const W: f32 = DEFAULT_PLAYFIELD_WIDTH;
    const H: f32 = DEFAULT_PLAYFIELD_HEIGHT;

    fn started() -> LaneCatchMode {
        let mut mode = LaneCatchMode::with_seed(LaneTuning::default(), 7);
        mode.start();
        mode
    }

    /// Place an item just above the basket so the next tick lands it
    fn drop_on_basket(mode: &mut LaneCatchMode, kind: ItemKind) {
        let id = mode.next_entity_id();
        let x = lane_center(mode.basket.lane, W) - ITEM_SIZE / 2.0;
        mode.items.push(Entity {
            id,
            pos: Vec2::new(x, BASKET_Y - 20.0),
            size: Vec2::splat(ITEM_SIZE),
            kind,
            speed: kind.base_speed(),
        });
    }

    #[test]
    fn test_start_resets_session() {
        let mode = started();
        assert!(mode.is_active());
        assert_eq!(mode.session().score, 0);
        assert_eq!(mode.session().lives, 3);
        assert_eq!(mode.session().level, 1);
        assert_eq!(mode.time_left(), 60);
        assert_eq!(mode.basket().lane, CENTER_LANE);
        assert!(mode.items().is_empty());
        assert_eq!(mode.spawn_interval_ms(), 1500.0);
    }

    #[test]
    fn test_set_lane_clamps_one_step() {
        let mut mode = started();
        mode.set_lane(-1);
        assert_eq!(mode.basket().lane, 0);
        mode.set_lane(-1);
        assert_eq!(mode.basket().lane, 0);
        // Large magnitudes still move a single lane
        mode.set_lane(i8::MAX);
        assert_eq!(mode.basket().lane, 1);
        mode.set_lane(5);
        mode.set_lane(5);
        assert_eq!(mode.basket().lane, 2);
    }

    #[test]
    fn test_center_steps_toward_middle() {
        let mut mode = started();
        mode.dispatch_input(InputCommand::Lane(LaneCommand::Right));
        assert_eq!(mode.basket().lane, 2);
        mode.dispatch_input(InputCommand::Lane(LaneCommand::Center));
        assert_eq!(mode.basket().lane, 1);
        mode.dispatch_input(InputCommand::Lane(LaneCommand::Center));
        assert_eq!(mode.basket().lane, 1);
        // Runner commands do nothing here
        mode.dispatch_input(InputCommand::Jump);
        assert_eq!(mode.basket().lane, 1);
    }

    #[test]
    fn test_lane_change_visible_before_tick() {
        let mut mode = started();
        mode.dispatch_input(InputCommand::Lane(LaneCommand::Right));
        let expected = lane_center(2, W) - BASKET_WIDTH / 2.0;
        assert_eq!(mode.basket().x, expected);
        assert_eq!(mode.snapshot().player.pos.x, expected);
    }

    #[test]
    fn test_basket_follows_lane() {
        let mut mode = started();
        mode.set_lane(-1);
        mode.update(FRAME_DT, W, H);
        let expected = W / 6.0 - BASKET_WIDTH / 2.0;
        assert!((mode.basket().x - expected).abs() < 0.001);
    }

    #[test]
    fn test_idle_update_is_noop() {
        let mut mode = LaneCatchMode::with_seed(LaneTuning::default(), 1);
        for _ in 0..300 {
            assert_eq!(mode.update(0.1, W, H), None);
        }
        assert!(mode.items().is_empty());
        assert_eq!(mode.time_left(), 60);
        mode.set_lane(-1);
        assert_eq!(mode.basket().lane, CENTER_LANE);
    }

    #[test]
    fn test_spawns_after_interval() {
        let mut mode = started();
        for _ in 0..15 {
            mode.update(0.1, W, H);
        }
        assert!(mode.items().is_empty());
        mode.update(0.1, W, H);
        assert_eq!(mode.items().len(), 1);
        let item = &mode.items()[0];
        assert!(item.pos.y < 0.0);
        assert!((item.speed - (item.kind.base_speed() + 0.2)).abs() < 0.001);
    }

    #[test]
    fn test_items_fall_and_leave() {
        let mut mode = started();
        let id = mode.next_entity_id();
        mode.items.push(Entity {
            id,
            pos: Vec2::new(0.0, 0.0),
            size: Vec2::splat(ITEM_SIZE),
            kind: ItemKind::Apple,
            speed: 3.0,
        });
        mode.update(FRAME_DT, W, H);
        assert_eq!(mode.items()[0].pos.y, 3.0);

        mode.items[0].pos.y = H - 1.0;
        mode.update(FRAME_DT, W, H);
        assert!(mode.items().is_empty());
    }

    #[test]
    fn test_level_up_on_catch() {
        let mut mode = started();
        mode.session.score = 400;
        mode.time_left = 40;
        drop_on_basket(&mut mode, ItemKind::Grape);

        mode.update(FRAME_DT, W, H);

        assert_eq!(mode.session().score, 600);
        assert_eq!(mode.session().level, 2);
        assert_eq!(mode.spawn_interval_ms(), 1300.0);
        assert_eq!(mode.time_left(), 45);
        let banner = mode.banner().expect("banner shown");
        assert_eq!(banner.level, 2);
        assert!(mode.items().is_empty());
        assert_eq!(mode.take_cues(), vec![AudioCue::LevelUp]);

        let snapshot = mode.snapshot();
        assert!(snapshot.level_up_banner.is_some_and(|b| b.active));
    }

    #[test]
    fn test_time_bonus_capped() {
        let mut mode = started();
        mode.session.score = 450;
        mode.time_left = 58;
        drop_on_basket(&mut mode, ItemKind::Apple);
        mode.update(FRAME_DT, W, H);
        assert_eq!(mode.session().level, 2);
        assert_eq!(mode.time_left(), 60);
    }

    #[test]
    fn test_single_level_step_per_catch() {
        let mut mode = started();
        mode.session.score = 1400;
        drop_on_basket(&mut mode, ItemKind::Grape);
        mode.update(FRAME_DT, W, H);
        assert_eq!(mode.session().score, 1600);
        assert_eq!(mode.session().level, 2);

        drop_on_basket(&mut mode, ItemKind::Apple);
        mode.update(FRAME_DT, W, H);
        assert_eq!(mode.session().level, 3);
    }

    #[test]
    fn test_banner_expires() {
        let mut mode = started();
        mode.session.score = 450;
        drop_on_basket(&mut mode, ItemKind::Apple);
        mode.update(FRAME_DT, W, H);
        assert_eq!(mode.banner().map(|b| b.ticks_remaining), Some(119));

        if let Some(banner) = mode.banner.as_mut() {
            banner.ticks_remaining = 2;
        }
        mode.update(FRAME_DT, W, H);
        assert!(mode.banner().is_some());
        mode.update(FRAME_DT, W, H);
        assert!(mode.banner().is_none());
        assert!(mode.snapshot().level_up_banner.is_none());
    }

    #[test]
    fn test_last_bomb_ends_run() {
        let mut mode = started();
        mode.session.lives = 1;
        mode.session.score = 220;
        drop_on_basket(&mut mode, ItemKind::Bomb);

        let report = mode.update(FRAME_DT, W, H).expect("game over");
        assert_eq!(report.reason, "No lives left!");
        assert_eq!(report.score, 220);
        assert_eq!(report.mode, ModeId::LaneCatch);
        assert_eq!(mode.session().lives, 0);
        assert_eq!(mode.session().phase, GamePhase::GameOver);
        assert!(mode.items().is_empty());
        assert_eq!(mode.take_cues(), vec![AudioCue::HazardHit]);

        // Terminal until restarted
        assert_eq!(mode.update(FRAME_DT, W, H), None);
        mode.start();
        assert!(mode.is_active());
        assert_eq!(mode.session().lives, 3);
    }

    #[test]
    fn test_bomb_costs_one_life() {
        let mut mode = started();
        drop_on_basket(&mut mode, ItemKind::Bomb);
        assert_eq!(mode.update(FRAME_DT, W, H), None);
        assert_eq!(mode.session().lives, 2);
        assert_eq!(mode.session().score, 0);
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut mode = started();
        mode.time_left = 2;
        assert_eq!(mode.update(1.0, W, H), None);
        assert_eq!(mode.time_left(), 1);
        let report = mode.update(1.0, W, H).expect("time over");
        assert_eq!(report.reason, "Time Over!");
        assert_eq!(
            mode.snapshot().game_over_reason.as_deref(),
            Some("Time Over!")
        );
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut mode = started();
        mode.update(0.5, W, H);
        mode.stop();
        let once = mode.snapshot();
        mode.stop();
        assert_eq!(mode.snapshot(), once);
        assert!(!mode.is_active());
        // Clock is cancelled: time does not move
        mode.update(5.0, W, H);
        assert_eq!(mode.time_left(), 60);
        assert!(!mode.enqueue(SessionCommand::SecondElapsed));
    }

    #[test]
    fn test_external_timer_commands() {
        let mut mode = started();
        assert!(mode.enqueue(SessionCommand::SecondElapsed));
        assert!(mode.enqueue(SessionCommand::SecondElapsed));
        // Queued commands are applied on the next update, not before
        assert_eq!(mode.time_left(), 60);
        mode.update(0.0, W, H);
        assert_eq!(mode.time_left(), 58);
    }
}
