// src/map/mod.rs
pub mod door;
pub mod entry_point;
pub mod part;
pub mod template;

pub use door::{Door, FillerWall};
pub use entry_point::EntryPoint;
pub use part::DungeonPart;
pub use template::{PartCategory, PartKind, PartTemplate};

use serde::Serialize;

/// Handle of a part instantiated in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PartId(pub usize);

/// Handle of a door instantiated in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DoorId(pub usize);
