//! Capability set every game mode provides

use serde::{Deserialize, Serialize};

use super::snapshot::RenderSnapshot;
use super::state::SessionCommand;
use crate::audio::AudioCue;
use crate::dispatcher::ModeId;

/// Discrete lane commands (keyboard arrows or a stabilized pose label)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneCommand {
    Left,
    Right,
    Center,
}

/// Input routed from the host into the active mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    Lane(LaneCommand),
    Jump,
    DuckDown,
    DuckUp,
}

/// Final result of a run, handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub mode: ModeId,
    pub score: u32,
    pub reason: String,
}

/// A self-contained game mode driven by the dispatcher
pub trait GameMode {
    fn id(&self) -> ModeId;

    /// Reset to a fresh run and arm the mode's timers
    fn start(&mut self);

    /// Halt all mutation and cancel timers (idempotent)
    fn stop(&mut self);

    fn is_active(&self) -> bool;

    /// Advance one frame. Returns a report on the tick the run ends.
    fn update(&mut self, dt: f32, width: f32, height: f32) -> Option<GameOverReport>;

    /// Apply host input; commands the mode doesn't understand are ignored
    fn dispatch_input(&mut self, command: InputCommand);

    /// Queue a session command from an external timer (dropped unless active)
    fn enqueue(&mut self, command: SessionCommand) -> bool;

    fn snapshot(&self) -> RenderSnapshot;

    /// Take the cues raised since the last call
    fn take_cues(&mut self) -> Vec<AudioCue>;
}
