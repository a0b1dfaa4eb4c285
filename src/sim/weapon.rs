//! Player fire-control: cooldown gate, aim resolution, per-tier patterns

use glam::Vec2;
use rand::Rng;

use super::entity::{BulletOwner, Entity, EntityKind, WeaponTier};
use super::state::World;
use super::tick::TickInput;
use crate::consts::*;

/// Resolve the 8-way aim direction from held input
///
/// Pure horizontal, pure vertical (up/down), or a diagonal blend; `strafe`
/// locks the aim to the facing axis. A zero-direction aim (nothing held)
/// substitutes the facing direction so firing never silently no-ops.
pub fn aim_direction(input: &TickInput, facing: f32, strafe: bool) -> Vec2 {
    let mut dx = (input.right as i32 - input.left as i32) as f32;
    let mut dy = (input.down as i32 - input.up as i32) as f32;
    if strafe {
        dx = facing;
        dy = 0.0;
    }
    if dx == 0.0 && dy == 0.0 {
        dx = facing;
    }
    Vec2::new(dx, dy).normalize()
}

/// Tick the cooldown and fire the equipped pattern if requested and ready
pub fn try_fire(world: &mut World, input: &TickInput) {
    let Some(pi) = world.player_index() else {
        return;
    };
    let (center, facing, weapon) = {
        let p = &mut world.entities[pi];
        let EntityKind::Player(body) = &mut p.kind else {
            return;
        };
        if body.fire_cooldown > 0 {
            body.fire_cooldown -= 1;
        }
        if !p.active {
            return;
        }
        let wants_fire = input.fire || input.alt_fire;
        if !wants_fire || body.fire_cooldown > 0 {
            return;
        }
        body.fire_cooldown = body.weapon.cooldown();
        (p.pos + p.size * 0.5, p.facing, body.weapon)
    };

    let strafe = input.alt_fire && !input.fire;
    let dir = aim_direction(input, facing, strafe);
    let speed = world.config.bullet_speed;

    match weapon {
        WeaponTier::Normal => {
            spawn_shot(world, center, dir * speed, false);
        }
        WeaponTier::Spread => {
            // 5-shot fan centered on the aim direction
            let base = dir.y.atan2(dir.x);
            for k in 0..SPREAD_COUNT {
                let offset = (k as f32 - (SPREAD_COUNT as f32 - 1.0) / 2.0) * SPREAD_STEP;
                let angle = base + offset;
                spawn_shot(world, center, Vec2::new(angle.cos(), angle.sin()) * speed, false);
            }
        }
        WeaponTier::Machine => {
            let jitter = world.rng.random_range(-MACHINE_JITTER..MACHINE_JITTER);
            let mut vel = dir * speed;
            vel.y += jitter;
            spawn_shot(world, center, vel, false);
        }
        WeaponTier::Laser => {
            spawn_shot(world, center, dir * speed * LASER_SPEED_MULT, true);
        }
    }
}

fn spawn_shot(world: &mut World, center: Vec2, vel: Vec2, piercing: bool) {
    let id = world.next_entity_id();
    world.queue(Entity::bullet(id, BulletOwner::Player, center, vel, piercing));
}
