// src/map/template.rs

use crate::utils::{Bounds, Pose};
use serde::{Deserialize, Serialize};

/// The pools a template can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    Entrance,
    Room,
    SpecialRoom,
    AlternateEntrance,
    Hallway,
    Door,
    FillerWall,
}

impl PartCategory {
    pub fn name(&self) -> &'static str {
        match self {
            PartCategory::Entrance => "entrance",
            PartCategory::Room => "room",
            PartCategory::SpecialRoom => "special room",
            PartCategory::AlternateEntrance => "alternate entrance",
            PartCategory::Hallway => "hallway",
            PartCategory::Door => "door",
            PartCategory::FillerWall => "filler wall",
        }
    }

    /// The structural kind of a part drawn from this pool. Doors and filler
    /// walls are markers, not parts.
    pub fn part_kind(&self) -> Option<PartKind> {
        match self {
            PartCategory::Hallway => Some(PartKind::Hallway),
            PartCategory::Entrance
            | PartCategory::Room
            | PartCategory::SpecialRoom
            | PartCategory::AlternateEntrance => Some(PartKind::Room),
            PartCategory::Door | PartCategory::FillerWall => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Room,
    Hallway,
}

/// A prefabricated part as authored, everything in its local frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartTemplate {
    pub name: String,
    /// Socket poses; forward (+Z) points out of the part.
    #[serde(default)]
    pub entry_points: Vec<Pose>,
    #[serde(default)]
    pub bounds: Bounds,
    /// Filler wall template used to seal this part's unused sockets.
    #[serde(default)]
    pub filler: Option<String>,
}

impl PartTemplate {
    pub fn new(name: impl Into<String>, bounds: Bounds, entry_points: Vec<Pose>) -> Self {
        PartTemplate {
            name: name.into(),
            entry_points,
            bounds,
            filler: None,
        }
    }

    /// A template with no sockets and no volume, as used for doors and fillers.
    pub fn marker(name: impl Into<String>) -> Self {
        PartTemplate {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_filler(mut self, filler: impl Into<String>) -> Self {
        self.filler = Some(filler.into());
        self
    }
}
