//! Player movement and life-cycle
//!
//! Movement is idle/run/duck/jump off the grounded flag and held input; the
//! life-cycle covers death, the deferred camera-anchored respawn, and the
//! invincibility window. The respawn is a scheduled-task value checked
//! against the current phase when it fires, never a callback.

use glam::Vec2;

use super::combat::spawn_explosion;
use super::entity::{EntityKind, PlayerBody, WeaponTier};
use super::state::{GameEvent, GamePhase, World};
use super::tick::TickInput;
use crate::consts::*;

/// Apply held input to the player: run, duck, jump (fresh press only)
pub fn update_movement(world: &mut World, input: &TickInput) {
    let jump_pressed = input.jump && !world.prev_jump;
    let move_speed = world.config.move_speed;
    let jump_impulse = world.config.jump_impulse;
    let camera_left = world.camera_x;
    let camera_right = world.camera_x + world.config.view_w;

    let Some(pi) = world.player_index() else {
        return;
    };
    let p = &mut world.entities[pi];
    if !p.active {
        return;
    }
    let EntityKind::Player(body) = &mut p.kind else {
        return;
    };

    if body.invincibility > 0 {
        body.invincibility -= 1;
    }

    let dir = (input.right as i32 - input.left as i32) as f32;
    if dir != 0.0 {
        p.facing = dir;
    }

    // duck shrinks the hitbox from the top; stand-up reverses it exactly
    let duck_delta = PLAYER_HEIGHT * (1.0 - DUCK_FACTOR);
    if input.down && body.grounded && !body.ducking {
        body.ducking = true;
        p.size.y = PLAYER_HEIGHT * DUCK_FACTOR;
        p.pos.y += duck_delta;
    } else if !input.down && body.ducking {
        body.ducking = false;
        p.size.y = PLAYER_HEIGHT;
        p.pos.y -= duck_delta;
    }

    p.vel.x = if body.ducking && body.grounded {
        0.0
    } else {
        dir * move_speed
    };

    // single jump per grounding, on the press edge only
    if jump_pressed && body.grounded && body.jumps == 0 {
        p.vel.y = -jump_impulse;
        body.jumps += 1;
        body.grounded = false;
    }

    // the scroll wall: no walking back out of the viewport
    p.pos.x = p.pos.x.clamp(camera_left, camera_right - p.size.x);
}

/// The player fell below the world's vertical bound this tick
pub fn fell_out_of_world(world: &World) -> bool {
    world
        .player_index()
        .map(|pi| {
            let p = &world.entities[pi];
            p.active && p.pos.y > world.config.kill_plane()
        })
        .unwrap_or(false)
}

/// Kill the player: big explosion, a life gone, respawn or game over
///
/// A no-op if the player is already inactive, so several lethal overlaps in
/// one tick cost exactly one life.
pub fn kill_player(world: &mut World, events: &mut Vec<GameEvent>) {
    let Some(pi) = world.player_index() else {
        return;
    };
    let center = {
        let p = &mut world.entities[pi];
        if !p.active {
            return;
        }
        p.active = false;
        p.vel = Vec2::ZERO;
        if let EntityKind::Player(body) = &mut p.kind {
            // dying forfeits the power-up immediately
            body.weapon = WeaponTier::Normal;
            body.fire_cooldown = 0;
        }
        p.pos + p.size * 0.5
    };
    spawn_explosion(world, center, true);

    world.lives -= 1;
    events.push(GameEvent::PlayerDied {
        lives_left: world.lives,
    });
    if world.lives < 0 {
        world.pending_respawn = None;
        world.set_phase(GamePhase::GameOver);
        events.push(GameEvent::GameOver { score: world.score });
    } else {
        world.pending_respawn = Some(world.tick + world.config.respawn_delay as u64);
        log::info!(
            "player down, {} lives left, respawn at tick {:?}",
            world.lives,
            world.pending_respawn
        );
    }
}

/// Fire the scheduled respawn if due; must be a no-op once the game ended
pub fn apply_pending_respawn(world: &mut World) {
    let Some(at) = world.pending_respawn else {
        return;
    };
    if world.tick < at {
        return;
    }
    world.pending_respawn = None;
    // the game may have ended while the respawn was pending
    if world.phase != GamePhase::Playing {
        return;
    }

    let spawn = Vec2::new(
        world.camera_x + world.config.view_w / CAMERA_LEAD,
        world.config.view_h * 0.25,
    );
    let invincibility = world.config.invincibility;
    let Some(pi) = world.player_index() else {
        return;
    };
    let p = &mut world.entities[pi];
    p.active = true;
    p.pos = spawn;
    p.vel = Vec2::ZERO;
    p.size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
    p.facing = 1.0;
    if let EntityKind::Player(body) = &mut p.kind {
        *body = PlayerBody {
            invincibility,
            ..PlayerBody::default()
        };
    }
    log::info!("respawned at x={:.0} (tick {})", spawn.x, world.tick);
}
