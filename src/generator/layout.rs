// src/generator/layout.rs

use serde::Serialize;
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::map::{DoorId, PartId};

/// One accepted link between an earlier part and the part placed onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub anchor: PartId,
    pub anchor_entry: usize,
    pub part: PartId,
    pub part_entry: usize,
    pub door: DoorId,
}

/// The generated dungeon: parts in placement order (entrance first) and the
/// links between them. Append-only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    placed_parts: Vec<PartId>,
    connections: Vec<Connection>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed_parts(&self) -> &[PartId] {
        &self.placed_parts
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn entrance(&self) -> Option<PartId> {
        self.placed_parts.first().copied()
    }

    pub fn len(&self) -> usize {
        self.placed_parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed_parts.is_empty()
    }

    pub fn contains(&self, part: PartId) -> bool {
        self.placed_parts.contains(&part)
    }

    /// The link that attached `part` to the layout, if it has one.
    pub fn connection_of(&self, part: PartId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.part == part)
    }

    pub(crate) fn place_entrance(&mut self, part: PartId) {
        debug_assert!(self.placed_parts.is_empty());
        self.placed_parts.push(part);
    }

    pub(crate) fn commit(&mut self, connection: Connection) {
        debug_assert!(self.contains(connection.anchor));
        debug_assert!(!self.contains(connection.part));
        self.placed_parts.push(connection.part);
        self.connections.push(connection);
    }

    /// True when every placed part is reachable from the entrance through
    /// recorded connections.
    pub fn is_connected(&self) -> bool {
        if self.placed_parts.len() < 2 {
            return true;
        }
        let index_of = |id: PartId| self.placed_parts.iter().position(|p| *p == id);
        let mut sets: QuickUnionUf<UnionBySize> = UnionFind::new(self.placed_parts.len());
        for connection in &self.connections {
            if let (Some(a), Some(b)) = (index_of(connection.anchor), index_of(connection.part)) {
                sets.union(a, b);
            }
        }
        let root = sets.find(0);
        (1..self.placed_parts.len()).all(|i| sets.find(i) == root)
    }
}
