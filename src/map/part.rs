// src/map/part.rs

use glam::{Quat, Vec3};
use log::{debug, warn};
use rand::Rng;

use crate::map::{EntryPoint, PartCategory, PartKind, PartTemplate};
use crate::utils::{sample_bounded, Bounds, Pose, MAX_ENTRY_SAMPLES};

/// A placed (or candidate) room or hallway.
///
/// The socket list is fixed when the part is built from its template and is
/// never resized. Only socket occupancy and the part transform change during
/// generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonPart {
    template: String,
    category: PartCategory,
    kind: PartKind,
    transform: Pose,
    entry_points: Vec<EntryPoint>,
    local_bounds: Bounds,
    filler: Option<String>,
}

impl DungeonPart {
    /// Builds a part from a template at `pose`. Returns `None` for marker
    /// categories (doors, filler walls), which carry no part behaviour.
    pub fn from_template(template: &PartTemplate, category: PartCategory, pose: Pose) -> Option<Self> {
        let kind = category.part_kind()?;
        let entry_points = template
            .entry_points
            .iter()
            .enumerate()
            .map(|(i, local)| EntryPoint::new(format!("{}#{}", template.name, i), *local))
            .collect();
        Some(DungeonPart {
            template: template.name.clone(),
            category,
            kind,
            transform: pose,
            entry_points,
            local_bounds: template.bounds,
            filler: template.filler.clone(),
        })
    }

    pub fn template_name(&self) -> &str {
        &self.template
    }

    pub fn category(&self) -> PartCategory {
        self.category
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    pub fn filler(&self) -> Option<&str> {
        self.filler.as_deref()
    }

    pub fn transform(&self) -> &Pose {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Pose) {
        self.transform = transform;
    }

    /// Adds `radians` to the part's yaw, leaving pitch and roll alone.
    pub fn rotate_yaw(&mut self, radians: f32) {
        self.transform.rotation = (Quat::from_rotation_y(radians) * self.transform.rotation).normalize();
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.transform.position += offset;
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    pub fn entry_point(&self, index: usize) -> Option<&EntryPoint> {
        self.entry_points.get(index)
    }

    /// World pose of a socket under the current transform.
    pub fn entry_pose(&self, index: usize) -> Option<Pose> {
        self.entry_points
            .get(index)
            .map(|entry| self.transform.transform_pose(entry.local_pose()))
    }

    pub fn local_bounds(&self) -> &Bounds {
        &self.local_bounds
    }

    pub fn world_bounds(&self) -> Bounds {
        self.local_bounds.transformed(&self.transform)
    }

    pub fn occupied_count(&self) -> usize {
        self.entry_points.iter().filter(|e| e.is_occupied()).count()
    }

    /// Finds a free socket and claims it in the same step.
    ///
    /// A single-socket part is checked directly. Otherwise socket indices are
    /// drawn with repetition, at most `MAX_ENTRY_SAMPLES` times, and the first
    /// free one wins.
    pub fn acquire_free_entry_point<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.entry_points.len() == 1 {
            let entry = &mut self.entry_points[0];
            return if entry.acquire() {
                debug!("Entry point {} is available.", entry.name());
                Some(0)
            } else {
                debug!("Entry point {} is occupied.", entry.name());
                None
            };
        }

        let entries = &mut self.entry_points;
        let len = entries.len();
        let found = sample_bounded(rng, len, MAX_ENTRY_SAMPLES, |_, index| {
            let entry = &mut entries[index];
            if entry.acquire() {
                debug!("Entry point {} is available.", entry.name());
                Some(index)
            } else {
                debug!("Entry point {} is occupied.", entry.name());
                None
            }
        });

        if found.is_none() {
            warn!(
                "No free entry point on {} after {} draws.",
                self.template, MAX_ENTRY_SAMPLES
            );
        }
        found
    }

    /// Frees a socket. Returns false (and logs) if the index is not one of
    /// this part's sockets.
    pub fn release_entry_point(&mut self, index: usize) -> bool {
        match self.entry_points.get_mut(index) {
            Some(entry) => {
                debug!("Releasing entry point {}.", entry.name());
                entry.release();
                true
            }
            None => {
                warn!("{} has no entry point {}.", self.template, index);
                false
            }
        }
    }

    /// Marks every free, not yet sealed socket as sealed and returns the world
    /// poses where filler walls must go. Occupancy is untouched, and a socket
    /// is only ever sealed once.
    pub fn seal_unused_entry_points(&mut self) -> Vec<Pose> {
        let transform = self.transform;
        self.entry_points
            .iter_mut()
            .filter(|entry| !entry.is_occupied() && !entry.is_sealed())
            .map(|entry| {
                debug!("Filling empty door at entry point {}.", entry.name());
                entry.mark_sealed();
                transform.transform_pose(entry.local_pose())
            })
            .collect()
    }
}
