//! Mode selection and routing
//!
//! The dispatcher owns one cached instance per mode and guarantees that at
//! most one of them is active. Ticks, input and snapshots go to the current
//! mode only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioSink;
use crate::settings::Settings;
use crate::sim::lane_catch::LaneCatchMode;
use crate::sim::mode::{GameMode, GameOverReport, InputCommand};
use crate::sim::runner::RunnerDodgeMode;
use crate::sim::snapshot::RenderSnapshot;

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeId {
    LaneCatch,
    RunnerDodge,
}

impl ModeId {
    pub fn name(&self) -> &'static str {
        match self {
            ModeId::LaneCatch => "lane-catch",
            ModeId::RunnerDodge => "runner-dodge",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("unknown mode: {0:?}")]
    UnknownMode(String),
}

impl FromStr for ModeId {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "lane" | "catch" | "catch-fruit" | "lane-catch" => Ok(ModeId::LaneCatch),
            "b" | "runner" | "jungle" | "jungle-survival" | "runner-dodge" => Ok(ModeId::RunnerDodge),
            _ => Err(ModeError::UnknownMode(s.to_string())),
        }
    }
}

/// What the host should draw this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Snapshot {
    NoModeSelected,
    Mode(RenderSnapshot),
}

pub struct ModeDispatcher {
    settings: Settings,
    sink: Box<dyn AudioSink>,
    /// Lazily constructed, reused across selections
    modes: Vec<Box<dyn GameMode>>,
    current: Option<ModeId>,
}

impl ModeDispatcher {
    pub fn new(settings: Settings, sink: Box<dyn AudioSink>) -> Self {
        Self {
            settings,
            sink,
            modes: Vec::new(),
            current: None,
        }
    }

    pub fn current(&self) -> Option<ModeId> {
        self.current
    }

    /// Select a mode by name. Unknown names change nothing.
    pub fn select(&mut self, name: &str) -> Option<ModeId> {
        match name.parse::<ModeId>() {
            Ok(id) => {
                self.select_mode(id);
                Some(id)
            }
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    /// Stop the current mode, then start `id` (constructing it on first use)
    pub fn select_mode(&mut self, id: ModeId) {
        self.stop();

        let index = match self.modes.iter().position(|m| m.id() == id) {
            Some(index) => index,
            None => {
                log::debug!("constructing {}", id);
                let mode = self.build(id);
                self.modes.push(mode);
                self.modes.len() - 1
            }
        };
        self.modes[index].start();
        self.current = Some(id);
        log::info!("Selected {}", id);
    }

    fn build(&self, id: ModeId) -> Box<dyn GameMode> {
        match id {
            ModeId::LaneCatch => Box::new(LaneCatchMode::new(self.settings.lane.clone())),
            ModeId::RunnerDodge => Box::new(RunnerDodgeMode::new(self.settings.runner.clone())),
        }
    }

    fn active_mut(&mut self) -> Option<&mut Box<dyn GameMode>> {
        let id = self.current?;
        self.modes.iter_mut().find(|m| m.id() == id)
    }

    fn active(&self) -> Option<&dyn GameMode> {
        let id = self.current?;
        self.modes.iter().find(|m| m.id() == id).map(|m| m.as_ref())
    }

    /// Stop the current mode, if any
    pub fn stop(&mut self) {
        if let Some(mode) = self.active_mut() {
            mode.stop();
        }
        self.current = None;
    }

    pub fn dispatch_input(&mut self, command: InputCommand) {
        match self.active_mut() {
            Some(mode) => mode.dispatch_input(command),
            None => log::trace!("input {:?} with no mode selected", command),
        }
    }

    /// Advance the current mode one frame and flush its audio cues
    pub fn tick(&mut self, dt: f32, width: f32, height: f32) -> Option<GameOverReport> {
        let id = self.current?;
        let mode = self.modes.iter_mut().find(|m| m.id() == id)?;
        let report = mode.update(dt, width, height);
        for cue in mode.take_cues() {
            self.sink.play(cue);
        }
        if let Some(report) = &report {
            log::info!("{} over: {} (score {})", report.mode, report.reason, report.score);
        }
        report
    }

    pub fn snapshot(&self) -> Snapshot {
        match self.active() {
            Some(mode) => Snapshot::Mode(mode.snapshot()),
            None => Snapshot::NoModeSelected,
        }
    }
}

impl Drop for ModeDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::{AudioCue, NullAudioSink};
    use crate::consts::*;
    use crate::sim::mode::LaneCommand;
    use crate::sim::state::GamePhase;

    #[derive(Default, Clone)]
    struct RecordingSink(Rc<RefCell<Vec<AudioCue>>>);

    impl AudioSink for RecordingSink {
        fn play(&mut self, cue: AudioCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn dispatcher() -> ModeDispatcher {
        ModeDispatcher::new(Settings::default(), Box::new(NullAudioSink))
    }

    fn mode_snapshot(d: &ModeDispatcher) -> RenderSnapshot {
        match d.snapshot() {
            Snapshot::Mode(snapshot) => snapshot,
            Snapshot::NoModeSelected => panic!("no mode selected"),
        }
    }

    #[test]
    fn test_parse_aliases() {
        for name in ["A", "a", "lane", "Catch", "catch-fruit"] {
            assert_eq!(name.parse::<ModeId>(), Ok(ModeId::LaneCatch));
        }
        for name in ["B", "runner", "JUNGLE", "jungle-survival"] {
            assert_eq!(name.parse::<ModeId>(), Ok(ModeId::RunnerDodge));
        }
        assert_eq!(
            "pong".parse::<ModeId>(),
            Err(ModeError::UnknownMode("pong".to_string()))
        );
    }

    #[test]
    fn test_switching_stops_previous() {
        let mut d = dispatcher();
        assert_eq!(d.select("A"), Some(ModeId::LaneCatch));
        d.tick(FRAME_DT, DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT);

        assert_eq!(d.select("B"), Some(ModeId::RunnerDodge));
        assert_eq!(d.current(), Some(ModeId::RunnerDodge));

        let lane = d.modes.iter().find(|m| m.id() == ModeId::LaneCatch).map(|m| m.is_active());
        assert_eq!(lane, Some(false));

        let snapshot = mode_snapshot(&d);
        assert_eq!(snapshot.mode, ModeId::RunnerDodge);
        assert_eq!(snapshot.phase, GamePhase::Active);
        assert_eq!(d.modes.iter().filter(|m| m.is_active()).count(), 1);
    }

    #[test]
    fn test_reselect_reuses_instance() {
        let mut d = dispatcher();
        d.select_mode(ModeId::LaneCatch);
        d.select_mode(ModeId::RunnerDodge);
        d.select_mode(ModeId::LaneCatch);
        assert_eq!(d.modes.len(), 2);
        // Fresh run each time
        let snapshot = mode_snapshot(&d);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.time_left, Some(60));
    }

    #[test]
    fn test_unknown_mode_changes_nothing() {
        let mut d = dispatcher();
        d.select("runner");
        assert_eq!(d.select("tetris"), None);
        assert_eq!(d.current(), Some(ModeId::RunnerDodge));
        assert!(mode_snapshot(&d).phase == GamePhase::Active);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut d = dispatcher();
        d.select("A");
        d.stop();
        d.stop();
        assert_eq!(d.current(), None);
        assert_eq!(d.snapshot(), Snapshot::NoModeSelected);
        assert!(d.modes.iter().all(|m| !m.is_active()));
    }

    #[test]
    fn test_no_mode_is_noop() {
        let mut d = dispatcher();
        d.dispatch_input(InputCommand::Jump);
        assert_eq!(d.tick(1.0, 400.0, 400.0), None);
        assert_eq!(d.snapshot(), Snapshot::NoModeSelected);
    }

    #[test]
    fn test_input_reaches_current_mode() {
        let mut d = dispatcher();
        d.select("A");
        d.dispatch_input(InputCommand::Lane(LaneCommand::Left));
        let snapshot = mode_snapshot(&d);
        let expected_x = crate::sim::lane_catch::lane_center(0, DEFAULT_PLAYFIELD_WIDTH) - BASKET_WIDTH / 2.0;
        d.tick(FRAME_DT, DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT);
        let after = mode_snapshot(&d);
        assert_eq!(after.player.pos.x, expected_x);
        assert_eq!(snapshot.lives, after.lives);
    }

    #[test]
    fn test_cues_forwarded_to_sink() {
        let sink = RecordingSink::default();
        let heard = sink.0.clone();
        let mut d = ModeDispatcher::new(Settings::default(), Box::new(sink));
        d.select("B");
        d.dispatch_input(InputCommand::Jump);
        assert!(heard.borrow().is_empty());
        d.tick(FRAME_DT, DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT);
        assert_eq!(heard.borrow().as_slice(), &[AudioCue::Jump]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut d = dispatcher();
        let json = serde_json::to_string(&d.snapshot()).expect("serialize");
        assert_eq!(json, "\"NoModeSelected\"");
        d.select("A");
        let json = serde_json::to_string(&d.snapshot()).expect("serialize");
        assert!(json.contains("\"LaneCatch\""));
    }
}
