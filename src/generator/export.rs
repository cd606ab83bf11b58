// src/generator/export.rs
// Serializable snapshot of a finished run, for tools downstream of the generator.

use serde::Serialize;

use crate::generator::layout::{Connection, Layout};
use crate::generator::report::GenerationReport;
use crate::map::{Door, FillerWall, PartCategory, PartId, PartKind};
use crate::scene::{Instantiator, Scene};
use crate::utils::{Bounds, Pose};

#[derive(Debug, Clone, Serialize)]
pub struct EntryExport {
    pub name: String,
    pub pose: Pose,
    pub occupied: bool,
    pub sealed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartExport {
    pub id: PartId,
    pub template: String,
    pub category: PartCategory,
    pub kind: PartKind,
    pub pose: Pose,
    pub bounds: Bounds,
    pub entry_points: Vec<EntryExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DungeonExport {
    pub parts: Vec<PartExport>,
    pub doors: Vec<Door>,
    pub fillers: Vec<FillerWall>,
    pub connections: Vec<Connection>,
    pub report: GenerationReport,
}

impl DungeonExport {
    /// Collects the placed parts (in placement order) and every live door and
    /// filler wall of `scene`.
    pub fn from_scene(layout: &Layout, scene: &Scene, report: &GenerationReport) -> Self {
        let parts = layout
            .placed_parts()
            .iter()
            .map(|&id| {
                let part = scene.part(id);
                let entry_points = part
                    .entry_points()
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| EntryExport {
                        name: entry.name().to_string(),
                        pose: part.entry_pose(i).unwrap_or(*entry.local_pose()),
                        occupied: entry.is_occupied(),
                        sealed: entry.is_sealed(),
                    })
                    .collect();
                PartExport {
                    id,
                    template: part.template_name().to_string(),
                    category: part.category(),
                    kind: part.kind(),
                    pose: *part.transform(),
                    bounds: part.world_bounds(),
                    entry_points,
                }
            })
            .collect();

        DungeonExport {
            parts,
            doors: scene.doors().map(|(_, door)| door.clone()).collect(),
            fillers: scene.fillers().to_vec(),
            connections: layout.connections().to_vec(),
            report: report.clone(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
