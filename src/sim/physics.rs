//! Physics integration and one-way platform landing
//!
//! Two passes per tick. `integrate` moves everything: plain gravity for
//! free-falling kinds, straight-line motion for bullets, and scripted paths
//! (sine flight, Lissajous capsule drift, homing rockets) for kinds that
//! recompute their position from their own rule. `resolve_platform_landing`
//! then settles grounded actors — landing only, never side or ceiling
//! contact.

use glam::Vec2;

use super::entity::{Archetype, EntityKind};
use super::state::World;
use crate::consts::*;
use crate::normalize_angle;

/// Advance positions for every active entity
pub fn integrate(world: &mut World) {
    let target = world.player_target();
    let gravity = world.config.gravity;
    let max_fall = world.config.max_fall_speed;

    for e in world.entities.iter_mut() {
        if !e.active {
            continue;
        }
        match &mut e.kind {
            EntityKind::Player(_) => {
                e.vel.y = (e.vel.y + gravity).min(max_fall);
                e.pos += e.vel;
            }
            EntityKind::Enemy(body) => {
                body.age += 1;
                match body.archetype {
                    Archetype::Runner | Archetype::Tank | Archetype::Sniper => {
                        e.vel.y = (e.vel.y + gravity).min(max_fall);
                        e.pos += e.vel;
                    }
                    Archetype::Flyer => {
                        // sine path keyed on the spawn baseline, drift in x
                        e.pos.x += e.vel.x;
                        e.pos.y = body.base_y + (body.age as f32 * FLYER_FREQ).sin() * FLYER_AMP;
                    }
                    Archetype::Boss => {
                        if body.awake {
                            e.pos.y = body.base_y
                                + (body.age as f32 * BOSS_HOVER_FREQ).sin() * BOSS_HOVER_AMP;
                        }
                    }
                    // turrets and mines hold their placed position
                    Archetype::Turret | Archetype::Mine => {}
                }
            }
            EntityKind::Bullet(body) => {
                if body.rocket {
                    if let Some(player) = target {
                        let center = e.pos + e.size * 0.5;
                        steer_rocket(&mut e.vel, center, player);
                    }
                }
                e.pos += e.vel;
            }
            EntityKind::Particle(body) => {
                body.life = body.life.saturating_sub(1);
                if body.life == 0 {
                    e.active = false;
                }
                body.rotation += body.spin;
                if body.gravity {
                    e.vel.y = (e.vel.y + gravity).min(max_fall);
                }
                e.pos += e.vel;
            }
            EntityKind::Powerup(body) => {
                body.age += 1;
                let t = body.age as f32;
                e.pos.x = body.anchor.x + (t * CAPSULE_FREQ_X).sin() * CAPSULE_AMP_X;
                e.pos.y = body.anchor.y + (t * CAPSULE_FREQ_Y).cos() * CAPSULE_AMP_Y;
            }
            EntityKind::Platform | EntityKind::Bridge | EntityKind::Water | EntityKind::Boundary => {
            }
        }
    }
}

/// Rotate a rocket's velocity toward the target, capped per tick
fn steer_rocket(vel: &mut Vec2, from: Vec2, target: Vec2) {
    let current = vel.y.atan2(vel.x);
    let to_target = target - from;
    let wanted = to_target.y.atan2(to_target.x);
    let delta = normalize_angle(wanted - current).clamp(-ROCKET_TURN_RATE, ROCKET_TURN_RATE);
    let angle = current + delta;
    *vel = Vec2::new(angle.cos(), angle.sin()) * ROCKET_SPEED;
}

/// Swept, feet-only, one-way landing against platform and bridge spans
///
/// Only catches an actor whose feet crossed a span's top edge this tick:
/// current foot at/below the top, previous foot (current minus this tick's
/// fall) at/above it. The first qualifying span in iteration order wins.
pub fn resolve_platform_landing(world: &mut World) {
    let spans: Vec<(f32, f32, f32)> = world
        .entities
        .iter()
        .filter(|e| e.active && matches!(e.kind, EntityKind::Platform | EntityKind::Bridge))
        .map(|e| (e.pos.x, e.pos.x + e.size.x, e.pos.y))
        .collect();

    for e in world.entities.iter_mut() {
        if !e.active || !e.lands_on_platforms() {
            continue;
        }
        let mut landed = false;
        // moving up: no landing check at all (one-way platforms)
        if e.vel.y >= 0.0 {
            let foot = e.pos.y + e.size.y;
            let prev_foot = foot - e.vel.y;
            for &(left, right, top) in &spans {
                // inward tolerance so actors don't catch on adjacent-tile seams
                let h_overlap =
                    e.pos.x + e.size.x > left + EDGE_TOLERANCE && e.pos.x < right - EDGE_TOLERANCE;
                if !h_overlap {
                    continue;
                }
                if foot >= top && prev_foot <= top + LANDING_TOLERANCE {
                    e.pos.y = top - e.size.y;
                    e.vel.y = 0.0;
                    landed = true;
                    break;
                }
            }
        }
        match &mut e.kind {
            EntityKind::Player(body) => {
                body.grounded = landed;
                if landed {
                    body.jumps = 0;
                }
            }
            EntityKind::Enemy(body) => body.grounded = landed,
            _ => {}
        }
    }
}
