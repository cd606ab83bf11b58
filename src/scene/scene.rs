// src/scene/scene.rs

use log::{debug, warn};

use crate::map::{Door, DoorId, DungeonPart, FillerWall, PartCategory, PartId, PartTemplate};
use crate::scene::{Instantiator, SpatialQuery};
use crate::utils::{Bounds, Pose};

#[derive(Debug, Clone)]
struct PartSlot {
    part: DungeonPart,
    live: bool,
    /// World bounds as of the last sync.
    bounds: Bounds,
}

/// In-memory world: every instantiated part, door and filler wall, plus an
/// AABB overlap index over live parts.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    parts: Vec<PartSlot>,
    doors: Vec<Option<Door>>,
    fillers: Vec<FillerWall>,
}

impl Scene {
    /// Create a new empty Scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live parts in instantiation order.
    pub fn parts(&self) -> impl Iterator<Item = (PartId, &DungeonPart)> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.live)
            .map(|(i, slot)| (PartId(i), &slot.part))
    }

    pub fn is_live(&self, id: PartId) -> bool {
        self.parts.get(id.0).is_some_and(|slot| slot.live)
    }

    pub fn live_part_count(&self) -> usize {
        self.parts.iter().filter(|slot| slot.live).count()
    }

    /// Parts ever instantiated, discarded ones included.
    pub fn instantiated_count(&self) -> usize {
        self.parts.len()
    }

    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &Door)> + '_ {
        self.doors
            .iter()
            .enumerate()
            .filter_map(|(i, door)| door.as_ref().map(|d| (DoorId(i), d)))
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0).and_then(Option::as_ref)
    }

    pub fn door_count(&self) -> usize {
        self.doors.iter().flatten().count()
    }

    pub fn fillers(&self) -> &[FillerWall] {
        &self.fillers
    }
}

impl Instantiator for Scene {
    fn instantiate(&mut self, template: &PartTemplate, category: PartCategory, pose: Pose) -> Option<PartId> {
        let part = DungeonPart::from_template(template, category, pose)?;
        let bounds = part.world_bounds();
        self.parts.push(PartSlot {
            part,
            live: true,
            bounds,
        });
        let id = PartId(self.parts.len() - 1);
        debug!("Instantiated {} '{}' as {:?}.", category.name(), template.name, id);
        Some(id)
    }

    fn part(&self, id: PartId) -> &DungeonPart {
        &self.parts[id.0].part
    }

    fn part_mut(&mut self, id: PartId) -> &mut DungeonPart {
        &mut self.parts[id.0].part
    }

    fn discard_part(&mut self, id: PartId) {
        if let Some(slot) = self.parts.get_mut(id.0) {
            debug!("Discarding '{}' ({:?}).", slot.part.template_name(), id);
            slot.live = false;
        }
    }

    fn spawn_door(&mut self, template: &PartTemplate, pose: Pose) -> DoorId {
        self.doors.push(Some(Door::new(template.name.clone(), pose)));
        DoorId(self.doors.len() - 1)
    }

    fn set_door_pose(&mut self, id: DoorId, pose: Pose) {
        match self.doors.get_mut(id.0).and_then(Option::as_mut) {
            Some(door) => door.set_pose(pose),
            None => warn!("Door {:?} does not exist.", id),
        }
    }

    fn despawn_door(&mut self, id: DoorId) {
        if let Some(slot) = self.doors.get_mut(id.0) {
            *slot = None;
        }
    }

    fn spawn_filler(&mut self, template: &PartTemplate, pose: Pose) {
        self.fillers.push(FillerWall::new(template.name.clone(), pose));
    }

    fn sync_transforms(&mut self) {
        for slot in self.parts.iter_mut().filter(|slot| slot.live) {
            slot.bounds = slot.part.world_bounds();
        }
    }
}

impl SpatialQuery for Scene {
    fn overlapping(&self, bounds: &Bounds, excluding: PartId) -> Vec<PartId> {
        self.parts
            .iter()
            .enumerate()
            .filter(|(i, slot)| slot.live && *i != excluding.0 && slot.bounds.overlaps(bounds))
            .map(|(i, _)| PartId(i))
            .collect()
    }
}
