// src/generator/align.rs

use log::debug;

use crate::map::PartId;
use crate::scene::Instantiator;
use crate::utils::{yaw_of, Pose};

/// Yaw to add to a part so that a socket facing `entry_forward` ends up facing
/// against `anchor_forward`. Only the horizontal components are considered.
pub fn yaw_correction(anchor_forward: glam::Vec3, entry_forward: glam::Vec3) -> f32 {
    let delta = yaw_of(-anchor_forward) - yaw_of(entry_forward);
    // Keep the turn in (-PI, PI] so logs read sensibly.
    let turn = std::f32::consts::TAU;
    let wrapped = delta.rem_euclid(turn);
    if wrapped > std::f32::consts::PI {
        wrapped - turn
    } else {
        wrapped
    }
}

/// Moves `part` so that its socket `part_entry` sits on the anchor's socket
/// `anchor_entry`, facing it.
///
/// The part is turned about its up axis only (pitch and roll are left as
/// they are), then translated so the two socket positions coincide. The world
/// is synced before returning so overlap queries see the new placement.
///
/// Returns the junction pose (the anchor socket's world pose), or `None` if
/// either socket index is out of range, in which case nothing moves.
pub fn align<W: Instantiator + ?Sized>(
    world: &mut W,
    anchor: PartId,
    anchor_entry: usize,
    part: PartId,
    part_entry: usize,
) -> Option<Pose> {
    let junction = world.part(anchor).entry_pose(anchor_entry)?;
    let entry = world.part(part).entry_pose(part_entry)?;

    let turn = yaw_correction(junction.forward(), entry.forward());
    let moving = world.part_mut(part);
    moving.rotate_yaw(turn);

    let turned = moving.entry_pose(part_entry)?;
    moving.translate(junction.position - turned.position);
    world.sync_transforms();

    debug!(
        "Aligned {} to {} (turned {:.1} degrees).",
        world.part(part).template_name(),
        world.part(anchor).template_name(),
        turn.to_degrees()
    );
    Some(junction)
}
