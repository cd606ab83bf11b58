// src/map/entry_point.rs

use crate::utils::Pose;

/// A connection socket on a part.
///
/// The pose is stored in the owning part's local frame; the part resolves it to
/// world space. Occupancy only changes through `acquire`/`release` (or the
/// unconditional `set_occupied`), so an occupied socket always corresponds to
/// exactly one end of one link.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    name: String,
    local: Pose,
    occupied: bool,
    sealed: bool,
}

impl EntryPoint {
    pub fn new(name: impl Into<String>, local: Pose) -> Self {
        EntryPoint {
            name: name.into(),
            local,
            occupied: false,
            sealed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_pose(&self) -> &Pose {
        &self.local
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Unconditional set, used both to claim and to free the socket.
    pub fn set_occupied(&mut self, value: bool) {
        self.occupied = value;
    }

    /// Claims the socket. Returns false if it was already taken.
    pub fn acquire(&mut self) -> bool {
        if self.occupied {
            return false;
        }
        self.occupied = true;
        true
    }

    pub fn release(&mut self) {
        self.occupied = false;
    }

    /// True once a filler wall has been placed in this socket.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn mark_sealed(&mut self) {
        self.sealed = true;
    }
}
