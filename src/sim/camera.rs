//! Forward-only camera tracking and entity culling
//!
//! The camera chases `player.x - view_w/3` but never scrolls backward, and
//! never past the level boundary. The culling pass that follows it is the
//! only place entities are physically removed.

use super::entity::EntityKind;
use super::state::World;
use crate::consts::*;

/// Advance the camera toward the player; monotonic, clamped at the boundary
pub fn update_camera(world: &mut World) {
    if let Some(pi) = world.player_index() {
        let p = &world.entities[pi];
        if p.active {
            let target = p.pos.x - world.config.view_w / CAMERA_LEAD;
            if target > world.camera_x {
                world.camera_x = target;
            }
        }
    }
    let max_cam = world.boundary_x - world.config.view_w + BOUNDARY_MARGIN;
    if world.camera_x > max_cam {
        world.camera_x = max_cam;
    }
}

/// Drop transient entities that died or left the window around the camera
///
/// Permanent world geometry (platforms, bridges, water, the boundary, the
/// boss) and the player are kept unconditionally, whatever the camera did.
pub fn cull_entities(world: &mut World) {
    let left = world.camera_x - CULL_MARGIN;
    let right = world.camera_x + world.config.view_w + CULL_MARGIN;
    let before = world.entities.len();
    world.entities.retain(|e| {
        if e.is_permanent() || matches!(e.kind, EntityKind::Player(_)) {
            return true;
        }
        if !e.active {
            return false;
        }
        e.pos.x + e.size.x > left && e.pos.x < right
    });
    let dropped = before - world.entities.len();
    if dropped > 0 {
        log::trace!("culled {dropped} entities (camera_x {:.0})", world.camera_x);
    }
}
