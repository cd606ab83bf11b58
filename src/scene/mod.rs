// src/scene/mod.rs
//! Collaborators the generator talks to: creating runtime objects from
//! templates and asking which placed geometry overlaps a volume.

pub mod scene;

pub use scene::Scene;

use crate::map::{DoorId, DungeonPart, PartCategory, PartId, PartTemplate};
use crate::utils::{Bounds, Pose};

/// Creates and owns runtime objects built from templates.
///
/// Handles returned by this trait stay valid for the lifetime of the
/// instantiator, even after `discard_part`. Accessing a part through a handle
/// that did not come from the same instantiator panics, like indexing.
pub trait Instantiator {
    /// Instantiates a part. Returns `None` when the template has no part
    /// behaviour (no sockets to acquire).
    fn instantiate(&mut self, template: &PartTemplate, category: PartCategory, pose: Pose) -> Option<PartId>;

    fn part(&self, id: PartId) -> &DungeonPart;

    fn part_mut(&mut self, id: PartId) -> &mut DungeonPart;

    /// Removes a part that will never join the layout. It stops taking part
    /// in overlap queries.
    fn discard_part(&mut self, id: PartId);

    fn spawn_door(&mut self, template: &PartTemplate, pose: Pose) -> DoorId;

    fn set_door_pose(&mut self, id: DoorId, pose: Pose);

    fn despawn_door(&mut self, id: DoorId);

    fn spawn_filler(&mut self, template: &PartTemplate, pose: Pose);

    /// Makes transform changes visible to subsequent spatial queries.
    fn sync_transforms(&mut self);
}

/// Overlap queries against placed geometry.
pub trait SpatialQuery {
    /// Every live part whose volume intersects `bounds`, `excluding` itself.
    fn overlapping(&self, bounds: &Bounds, excluding: PartId) -> Vec<PartId>;
}

/// Everything a generation run needs from its host.
pub trait World: Instantiator + SpatialQuery {}

impl<T: Instantiator + SpatialQuery> World for T {}
