//! Entity kinds for both modes and the runner's rarity tables

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::spawn::SpawnBand;
use crate::audio::CueTag;

/// Falling items in lane-catch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Apple,
    Banana,
    Grape,
    Orange,
    /// The hazard
    Bomb,
}

impl ItemKind {
    /// Non-hazard kinds, drawn uniformly once the hazard roll fails
    pub const FRUITS: [ItemKind; 4] = [
        ItemKind::Apple,
        ItemKind::Banana,
        ItemKind::Grape,
        ItemKind::Orange,
    ];

    /// Fall speed at level 0 (px/tick)
    pub fn base_speed(&self) -> f32 {
        match self {
            ItemKind::Apple => 3.0,
            ItemKind::Banana => 4.0,
            ItemKind::Grape => 3.5,
            ItemKind::Orange => 3.2,
            ItemKind::Bomb => 4.5,
        }
    }
}

impl EntityKind for ItemKind {
    fn score_value(&self) -> u32 {
        match self {
            ItemKind::Apple => 100,
            ItemKind::Banana => 150,
            ItemKind::Grape => 200,
            ItemKind::Orange => 120,
            ItemKind::Bomb => 0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ItemKind::Apple => "🍎",
            ItemKind::Banana => "🍌",
            ItemKind::Grape => "🍇",
            ItemKind::Orange => "🍊",
            ItemKind::Bomb => "💣",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ItemKind::Apple => "apple",
            ItemKind::Banana => "banana",
            ItemKind::Grape => "grape",
            ItemKind::Orange => "orange",
            ItemKind::Bomb => "bomb",
        }
    }

    fn is_hazard(&self) -> bool {
        *self == ItemKind::Bomb
    }
}

/// Build the cumulative lane-catch spawn table for a hazard probability.
///
/// Rolls are in [0, 1): the hazard band comes first, fruits split the rest.
pub fn item_table(hazard_chance: f32) -> [SpawnBand<ItemKind>; 5] {
    let share = (1.0 - hazard_chance) / ItemKind::FRUITS.len() as f32;
    let band = |i: usize| SpawnBand::new(hazard_chance + share * (i + 1) as f32, ItemKind::FRUITS[i]);
    [
        SpawnBand::new(hazard_chance, ItemKind::Bomb),
        band(0),
        band(1),
        band(2),
        // Close the table exactly so rounding never leaves a gap below 1.0
        SpawnBand::new(1.0, ItemKind::FRUITS[3]),
    ]
}

/// Runner obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    // Air
    Dragon,
    Bat,
    Eagle,
    Toucan,
    BlueBird,
    Mosquito,
    // Ground
    PinkDolphin,
    Capybara,
    GoldenFrog,
    Meerkat,
    RedPanda,
    Raccoon,
    Badger,
    Snake,
    Jaguar,
    Sloth,
    Log,
    Croc,
    Monkey,
    Boar,
    Lizard,
}

impl ObstacleKind {
    /// Added to the global scroll speed (may be negative)
    pub fn speed_offset(&self) -> f32 {
        use ObstacleKind::*;
        match self {
            PinkDolphin => 5.0,
            Dragon | Jaguar => 4.0,
            Bat | Eagle | Badger => 3.0,
            Toucan | BlueBird | Mosquito | Meerkat | RedPanda | Raccoon | Snake | Monkey => 2.0,
            Capybara | Boar | Lizard => 1.0,
            GoldenFrog | Log | Croc => 0.0,
            Sloth => -2.0,
        }
    }

    /// Cue played when the obstacle appears
    pub fn cue(&self) -> Option<CueTag> {
        use ObstacleKind::*;
        match self {
            Dragon | Jaguar => Some(CueTag::Roar),
            Bat => Some(CueTag::Screech),
            Eagle | Toucan | BlueBird | Mosquito => Some(CueTag::Bird),
            PinkDolphin => Some(CueTag::Whistle),
            Capybara | Boar => Some(CueTag::Grunt),
            Meerkat | RedPanda | Raccoon => Some(CueTag::Squeak),
            Badger => Some(CueTag::Growl),
            Snake | Lizard => Some(CueTag::Hiss),
            Sloth => Some(CueTag::Sloth),
            Croc => Some(CueTag::Croc),
            Monkey => Some(CueTag::Monkey),
            GoldenFrog | Log => None,
        }
    }

    pub fn is_airborne(&self) -> bool {
        use ObstacleKind::*;
        matches!(self, Dragon | Bat | Eagle | Toucan | BlueBird | Mosquito)
    }

    /// Vertical placement override, if the kind leaves its default band
    pub fn y_override(&self) -> Option<f32> {
        match self {
            ObstacleKind::PinkDolphin => Some(310.0),
            _ => None,
        }
    }
}

impl EntityKind for ObstacleKind {
    fn score_value(&self) -> u32 {
        0
    }

    fn label(&self) -> &'static str {
        use ObstacleKind::*;
        match self {
            Dragon => "🐉",
            Bat => "🦇",
            Eagle => "🦅",
            Toucan => "🦜",
            BlueBird => "🐦",
            Mosquito => "🦟",
            PinkDolphin => "🐬",
            Capybara => "🦦",
            GoldenFrog => "🐸",
            Meerkat => "🐿️",
            RedPanda => "🦊",
            Raccoon => "🦝",
            Badger => "🦡",
            Snake => "🐍",
            Jaguar => "🐆",
            Sloth => "🦥",
            Log => "🪵",
            Croc => "🐊",
            Monkey => "🐒",
            Boar => "🐗",
            Lizard => "🦎",
        }
    }

    fn name(&self) -> &'static str {
        use ObstacleKind::*;
        match self {
            Dragon => "Dragon",
            Bat => "Bat",
            Eagle => "Eagle",
            Toucan => "Toucan",
            BlueBird => "BlueBird",
            Mosquito => "Mosquito",
            PinkDolphin => "PinkDolphin",
            Capybara => "Capybara",
            GoldenFrog => "GoldenFrog",
            Meerkat => "Meerkat",
            RedPanda => "RedPanda",
            Raccoon => "Raccoon",
            Badger => "Badger",
            Snake => "Snake",
            Jaguar => "Jaguar",
            Sloth => "Sloth",
            Log => "Log",
            Croc => "Croc",
            Monkey => "Monkey",
            Boar => "Boar",
            Lizard => "Lizard",
        }
    }
}

/// Air rarity table (rolls in [0, 100))
pub const AIR_TABLE: [SpawnBand<ObstacleKind>; 6] = [
    SpawnBand::new(5.0, ObstacleKind::Dragon),
    SpawnBand::new(20.0, ObstacleKind::Bat),
    SpawnBand::new(50.0, ObstacleKind::Eagle),
    // Common birds share the top half evenly
    SpawnBand::new(50.0 + 50.0 / 3.0, ObstacleKind::Toucan),
    SpawnBand::new(50.0 + 100.0 / 3.0, ObstacleKind::BlueBird),
    SpawnBand::new(100.0, ObstacleKind::Mosquito),
];

/// Ground rarity table (rolls in [0, 100))
pub const GROUND_TABLE: [SpawnBand<ObstacleKind>; 15] = [
    SpawnBand::new(2.0, ObstacleKind::PinkDolphin),
    SpawnBand::new(10.0, ObstacleKind::Capybara),
    SpawnBand::new(20.0, ObstacleKind::GoldenFrog),
    SpawnBand::new(25.0, ObstacleKind::Meerkat),
    SpawnBand::new(30.0, ObstacleKind::RedPanda),
    SpawnBand::new(32.0, ObstacleKind::Raccoon),
    SpawnBand::new(40.0, ObstacleKind::Badger),
    SpawnBand::new(50.0, ObstacleKind::Snake),
    SpawnBand::new(60.0, ObstacleKind::Jaguar),
    SpawnBand::new(70.0, ObstacleKind::Sloth),
    // Commons share the top 30 evenly
    SpawnBand::new(76.0, ObstacleKind::Log),
    SpawnBand::new(82.0, ObstacleKind::Croc),
    SpawnBand::new(88.0, ObstacleKind::Monkey),
    SpawnBand::new(94.0, ObstacleKind::Boar),
    SpawnBand::new(100.0, ObstacleKind::Lizard),
];
