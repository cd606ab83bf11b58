// src/library/mod.rs
//! Template pools the generator draws prefabricated parts from.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::DungeonError;
use crate::map::{PartCategory, PartTemplate};

/// Lookup of placeable templates by category.
pub trait PartLibrary {
    fn templates_for(&self, category: PartCategory) -> &[PartTemplate];

    /// Finds a template by name within one category.
    fn find(&self, category: PartCategory, name: &str) -> Option<&PartTemplate> {
        self.templates_for(category).iter().find(|t| t.name == name)
    }
}

/// A library held in memory, one list per category. Loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLibrary {
    pub entrance: Vec<PartTemplate>,
    pub rooms: Vec<PartTemplate>,
    pub special_rooms: Vec<PartTemplate>,
    pub alternate_entrances: Vec<PartTemplate>,
    pub hallways: Vec<PartTemplate>,
    pub doors: Vec<PartTemplate>,
    pub filler_walls: Vec<PartTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, DungeonError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DungeonError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DungeonError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let library = Self::from_json(&content)?;
        info!(
            "Loaded template library from {} ({} templates).",
            path.display(),
            library.len()
        );
        Ok(library)
    }

    pub fn pool_mut(&mut self, category: PartCategory) -> &mut Vec<PartTemplate> {
        match category {
            PartCategory::Entrance => &mut self.entrance,
            PartCategory::Room => &mut self.rooms,
            PartCategory::SpecialRoom => &mut self.special_rooms,
            PartCategory::AlternateEntrance => &mut self.alternate_entrances,
            PartCategory::Hallway => &mut self.hallways,
            PartCategory::Door => &mut self.doors,
            PartCategory::FillerWall => &mut self.filler_walls,
        }
    }

    /// Builder-style insertion, handy for tests and programmatic libraries.
    pub fn with(mut self, category: PartCategory, template: PartTemplate) -> Self {
        self.pool_mut(category).push(template);
        self
    }

    pub fn len(&self) -> usize {
        ALL_CATEGORIES
            .iter()
            .map(|c| self.templates_for(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartLibrary for TemplateLibrary {
    fn templates_for(&self, category: PartCategory) -> &[PartTemplate] {
        match category {
            PartCategory::Entrance => &self.entrance,
            PartCategory::Room => &self.rooms,
            PartCategory::SpecialRoom => &self.special_rooms,
            PartCategory::AlternateEntrance => &self.alternate_entrances,
            PartCategory::Hallway => &self.hallways,
            PartCategory::Door => &self.doors,
            PartCategory::FillerWall => &self.filler_walls,
        }
    }
}

pub const ALL_CATEGORIES: [PartCategory; 7] = [
    PartCategory::Entrance,
    PartCategory::Room,
    PartCategory::SpecialRoom,
    PartCategory::AlternateEntrance,
    PartCategory::Hallway,
    PartCategory::Door,
    PartCategory::FillerWall,
];
