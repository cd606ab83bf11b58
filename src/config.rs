// src/config.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DungeonError;
use crate::library::{PartLibrary, ALL_CATEGORIES};
use crate::map::PartCategory;
use crate::utils::util::clamp_probability;
use crate::utils::Pose;

/// Inputs read once at the start of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Total parts requested, alternate entrances included.
    pub room_count: usize,
    /// Chance that a growth step places a hallway instead of a room.
    pub hallway_chance: f64,
    /// Chance that a room step draws from the special room pool, when it has
    /// any templates.
    pub special_room_chance: f64,
    /// Fixed seed for reproducible layouts; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Where the entrance is instantiated.
    pub origin: Pose,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_count: 10,
            hallway_chance: 0.5,
            special_room_chance: 0.1,
            seed: None,
            origin: Pose::IDENTITY,
        }
    }
}

impl GeneratorConfig {
    pub fn with_room_count(mut self, room_count: usize) -> Self {
        self.room_count = room_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DungeonError> {
        let mut config: GeneratorConfig = serde_json::from_str(json)?;
        config.hallway_chance = clamp_probability(config.hallway_chance);
        config.special_room_chance = clamp_probability(config.special_room_chance);
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DungeonError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DungeonError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Iterations of the main growth loop, entrance included.
    pub fn main_iterations(&self, alternates: usize) -> usize {
        self.room_count.saturating_sub(alternates)
    }

    /// Checks that every pool a run could draw from is populated.
    pub fn validate<L: PartLibrary + ?Sized>(&self, library: &L) -> Result<(), DungeonError> {
        let alternates = library.templates_for(PartCategory::AlternateEntrance).len();
        if self.room_count <= alternates {
            return Err(DungeonError::RoomCountTooSmall {
                requested: self.room_count,
                alternates,
            });
        }

        let require = |category: PartCategory| {
            if library.templates_for(category).is_empty() {
                Err(DungeonError::MissingTemplates(category))
            } else {
                Ok(())
            }
        };

        require(PartCategory::Entrance)?;
        require(PartCategory::FillerWall)?;

        let grows = self.main_iterations(alternates) > 1;
        if grows || alternates > 0 {
            require(PartCategory::Door)?;
        }
        if grows {
            if self.hallway_chance > 0.0 {
                require(PartCategory::Hallway)?;
            }
            if self.hallway_chance < 1.0 {
                require(PartCategory::Room)?;
            }
        }

        for category in ALL_CATEGORIES {
            if category.part_kind().is_none() {
                continue;
            }
            for template in library.templates_for(category) {
                if let Some(filler) = &template.filler {
                    if library.find(PartCategory::FillerWall, filler).is_none() {
                        return Err(DungeonError::UnknownFiller {
                            template: template.name.clone(),
                            filler: filler.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
