// src/error.rs

use thiserror::Error;

use crate::map::PartCategory;

/// Failures that stop a run before it starts. Generation itself never fails;
/// its partial failures are reported as placement outcomes.
#[derive(Error, Debug)]
pub enum DungeonError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {} templates configured", .0.name())]
    MissingTemplates(PartCategory),

    #[error("Room count {requested} must exceed the {alternates} alternate entrances")]
    RoomCountTooSmall { requested: usize, alternates: usize },

    #[error("Template '{template}' names unknown filler wall '{filler}'")]
    UnknownFiller { template: String, filler: String },

    #[error("Generator has already run")]
    AlreadyGenerated,
}
