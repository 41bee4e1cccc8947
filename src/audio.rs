//! Audio cue boundary
//!
//! The simulation never synthesizes sound. It raises named cues once per
//! occurrence and hands them to an [`AudioSink`]; what the sink does with them
//! (Web Audio, rodio, nothing) is up to the host.

use serde::{Deserialize, Serialize};

/// Ambient cue tags carried by runner obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueTag {
    Roar,
    Hiss,
    Screech,
    Grunt,
    Bird,
    Squeak,
    Growl,
    Sloth,
    Monkey,
    Croc,
    Whistle,
}

impl CueTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CueTag::Roar => "roar",
            CueTag::Hiss => "hiss",
            CueTag::Screech => "screech",
            CueTag::Grunt => "grunt",
            CueTag::Bird => "bird",
            CueTag::Squeak => "squeak",
            CueTag::Growl => "growl",
            CueTag::Sloth => "sloth",
            CueTag::Monkey => "monkey",
            CueTag::Croc => "croc",
            CueTag::Whistle => "whistle",
        }
    }
}

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioCue {
    /// Basket caught a bomb
    HazardHit,
    /// Lane-catch level gained
    LevelUp,
    /// Runner left the ground
    Jump,
    /// Runner ran into an obstacle
    ObstacleHit,
    /// Obstacle entered the playfield
    Ambient(CueTag),
}

impl AudioCue {
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::HazardHit => "hazardHit",
            AudioCue::LevelUp => "levelUp",
            AudioCue::Jump => "jump",
            AudioCue::ObstacleHit => "obstacleHit",
            AudioCue::Ambient(tag) => tag.as_str(),
        }
    }
}

/// Consumer of audio cues (fire-and-forget)
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sink that only logs cues
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("cue: {}", cue.name());
    }
}

/// Sink that drops every cue
#[derive(Debug, Default)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play(&mut self, _cue: AudioCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        assert_eq!(AudioCue::HazardHit.name(), "hazardHit");
        assert_eq!(AudioCue::ObstacleHit.name(), "obstacleHit");
        assert_eq!(AudioCue::Ambient(CueTag::Whistle).name(), "whistle");
    }

    #[test]
    fn test_cue_serializes_camel_case() {
        let json = serde_json::to_string(&AudioCue::LevelUp).unwrap();
        assert_eq!(json, "\"levelUp\"");
        let json = serde_json::to_string(&AudioCue::Ambient(CueTag::Croc)).unwrap();
        assert_eq!(json, r#"{"ambient":"croc"}"#);
    }
}
