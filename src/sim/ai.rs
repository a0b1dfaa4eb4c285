//! Per-archetype enemy behavior and the roaming spawn scheduler
//!
//! Behaviors are a state machine over frame counters and distance-to-player
//! gates. Movement is written straight onto the entity; new projectiles go
//! through the world's spawn queue so the entity list stays stable during
//! the pass.

use glam::Vec2;
use rand::Rng;

use super::entity::{Archetype, BulletOwner, Entity, EntityKind};
use super::state::World;
use crate::consts::*;

/// Drive every active enemy for one tick
pub fn run_behaviors(world: &mut World) {
    let target = world.player_target();
    let enemy_speed = world.config.enemy_speed;
    let view_w = world.config.view_w;

    for i in 0..world.entities.len() {
        // (spawn center, velocity, is-rocket)
        let mut shot: Option<(Vec2, Vec2, bool)> = None;
        {
            let e = &mut world.entities[i];
            if !e.active {
                continue;
            }
            let EntityKind::Enemy(body) = &mut e.kind else {
                continue;
            };
            let center = e.pos + e.size * 0.5;
            if body.fire_cooldown > 0 {
                body.fire_cooldown -= 1;
            }

            match body.archetype {
                Archetype::Runner => {
                    e.vel.x = enemy_speed * e.facing;
                }
                Archetype::Turret => {
                    if let Some(player) = target {
                        let dist = player.distance(center);
                        // near-but-not-too-close band
                        if dist > TURRET_NEAR && dist < TURRET_FAR && body.fire_cooldown == 0 {
                            let dir = (player - center).normalize_or_zero();
                            shot = Some((center, dir * ENEMY_SHOT_SPEED, false));
                            body.fire_cooldown = TURRET_COOLDOWN;
                        }
                    }
                }
                Archetype::Tank => {
                    e.vel.x = 0.0;
                    if let Some(player) = target {
                        let dx = player.x - center.x;
                        if dx.abs() < TANK_RANGE {
                            e.facing = if dx < 0.0 { -1.0 } else { 1.0 };
                            if body.grounded {
                                e.vel.x = TANK_CREEP_SPEED * e.facing;
                            }
                            if body.fire_cooldown == 0 {
                                let dir = (player - center).normalize_or_zero();
                                shot = Some((center, dir * TANK_SHELL_SPEED, false));
                                body.fire_cooldown = TANK_COOLDOWN;
                            }
                        }
                    }
                }
                Archetype::Sniper => {
                    if let Some(player) = target {
                        let to_player = player - center;
                        e.facing = if to_player.x < 0.0 { -1.0 } else { 1.0 };
                        if to_player.length() < SNIPER_RANGE && body.fire_cooldown == 0 {
                            let dir = to_player.normalize_or_zero();
                            shot = Some((center, dir * SNIPER_SHOT_SPEED, false));
                            body.fire_cooldown = SNIPER_COOLDOWN;
                        }
                    }
                }
                // scripted in the integrator
                Archetype::Flyer => {}
                // inert until touched
                Archetype::Mine => {}
                Archetype::Boss => {
                    if !body.awake {
                        if let Some(player) = target {
                            if (center.x - player.x).abs() < view_w {
                                body.awake = true;
                                body.base_y = e.pos.y;
                                log::info!("boss engaged at tick {}", world.tick);
                            }
                        }
                    } else if let Some(player) = target {
                        e.facing = if player.x < center.x { -1.0 } else { 1.0 };
                        let phase = body.age % BOSS_CYCLE;
                        if phase < BOSS_BURST_WINDOW && phase % BOSS_BURST_STEP == 0 {
                            // rapid aimed burst at the top of the cycle
                            let dir = (player - center).normalize_or_zero();
                            shot = Some((center, dir * ENEMY_SHOT_SPEED * 1.2, false));
                        } else if phase == BOSS_ROCKET_TICK {
                            let dir = (player - center).normalize_or_zero();
                            shot = Some((center, dir * ROCKET_SPEED, true));
                        }
                    }
                }
            }
        }

        if let Some((center, vel, rocket)) = shot {
            let id = world.next_entity_id();
            let bullet = if rocket {
                Entity::rocket(id, center, vel)
            } else {
                Entity::bullet(id, BulletOwner::Enemy, center, vel, false)
            };
            world.queue(bullet);
        }
    }
}

/// Periodically introduce a roaming enemy ahead of the camera's right edge
///
/// Selection is gated on world position: no ground spawns over water, and
/// nothing once the camera has reached the boss arena.
pub fn schedule_spawns(world: &mut World) {
    world.spawn_timer = world.spawn_timer.saturating_sub(1);
    if world.spawn_timer > 0 {
        return;
    }
    world.spawn_timer = world.config.spawn_period;

    let view_w = world.config.view_w;
    let spawn_x = world.camera_x + view_w + 40.0;
    if spawn_x >= world.boundary_x - view_w {
        // the boss set piece owns the arena; roaming spawns stop here
        return;
    }

    let over_water = world.entities.iter().any(|e| {
        matches!(e.kind, EntityKind::Water)
            && spawn_x >= e.pos.x
            && spawn_x <= e.pos.x + e.size.x
    });

    let roll: u32 = world.rng.random_range(0..100);
    let airborne = over_water || roll >= 60;
    let id = world.next_entity_id();
    if airborne {
        let y = world.rng.random_range(60.0..200.0);
        let mut flyer = Entity::enemy(id, Archetype::Flyer, Vec2::new(spawn_x, y));
        flyer.vel.x = -FLYER_DRIFT_SPEED;
        world.queue(flyer);
        log::debug!("spawned flyer at x={spawn_x:.0} y={y:.0}");
    } else {
        // drop in from above and let gravity find the ground
        let runner = Entity::enemy(id, Archetype::Runner, Vec2::new(spawn_x, -RUNNER_H));
        world.queue(runner);
        log::debug!("spawned runner at x={spawn_x:.0}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::physics;

    fn world_with(entities: Vec<Entity>) -> World {
        World::new(Config::default(), 11, entities)
    }

    fn queued_enemy_shots(world: &World) -> usize {
        world
            .pending
            .iter()
            .filter(|e| matches!(&e.kind, EntityKind::Bullet(b) if b.owner == BulletOwner::Enemy))
            .count()
    }

    #[test]
    fn test_turret_fires_only_inside_band() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let turret = Entity::enemy(2, Archetype::Turret, Vec2::new(400.0, 100.0));
        let mut w = world_with(vec![player, turret]);

        run_behaviors(&mut w);
        assert_eq!(queued_enemy_shots(&w), 1);

        // too close: inside the near edge of the band
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let turret = Entity::enemy(2, Archetype::Turret, Vec2::new(130.0, 100.0));
        let mut w = world_with(vec![player, turret]);
        run_behaviors(&mut w);
        assert_eq!(queued_enemy_shots(&w), 0);

        // far outside the band
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let turret = Entity::enemy(2, Archetype::Turret, Vec2::new(2000.0, 100.0));
        let mut w = world_with(vec![player, turret]);
        run_behaviors(&mut w);
        assert_eq!(queued_enemy_shots(&w), 0);
    }

    #[test]
    fn test_turret_cooldown_blocks_refire() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let turret = Entity::enemy(2, Archetype::Turret, Vec2::new(400.0, 100.0));
        let mut w = world_with(vec![player, turret]);

        run_behaviors(&mut w);
        assert_eq!(queued_enemy_shots(&w), 1);
        for _ in 0..(TURRET_COOLDOWN - 1) {
            run_behaviors(&mut w);
        }
        // still just the first shot
        assert_eq!(queued_enemy_shots(&w), 1);
        run_behaviors(&mut w);
        assert_eq!(queued_enemy_shots(&w), 2);
    }

    #[test]
    fn test_turret_aims_at_player() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let turret = Entity::enemy(2, Archetype::Turret, Vec2::new(400.0, 100.0));
        let mut w = world_with(vec![player, turret]);
        run_behaviors(&mut w);

        let shot = &w.pending[0];
        // player is to the left; the shot must head left
        assert!(shot.vel.x < 0.0);
        assert!((shot.vel.length() - ENEMY_SHOT_SPEED).abs() < 0.001);
    }

    #[test]
    fn test_runner_keeps_marching() {
        let runner = Entity::enemy(1, Archetype::Runner, Vec2::new(400.0, 100.0));
        let mut w = world_with(vec![runner]);
        // no player at all: runners still patrol
        run_behaviors(&mut w);
        let e = &w.entities[0];
        assert_eq!(e.vel.x, -w.config.enemy_speed);
    }

    #[test]
    fn test_tank_creeps_and_fires_when_grounded() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let mut tank = Entity::enemy(2, Archetype::Tank, Vec2::new(500.0, 100.0));
        if let EntityKind::Enemy(body) = &mut tank.kind {
            body.grounded = true;
        }
        let mut w = world_with(vec![player, tank]);
        run_behaviors(&mut w);

        let e = &w.entities[1];
        assert_eq!(e.facing, -1.0);
        assert_eq!(e.vel.x, -TANK_CREEP_SPEED);
        assert_eq!(queued_enemy_shots(&w), 1);
        assert!((w.pending[0].vel.length() - TANK_SHELL_SPEED).abs() < 0.001);
    }

    #[test]
    fn test_sniper_faces_and_fires_in_range() {
        let player = Entity::player(1, Vec2::new(900.0, 100.0));
        let sniper = Entity::enemy(2, Archetype::Sniper, Vec2::new(500.0, 100.0));
        let mut w = world_with(vec![player, sniper]);
        run_behaviors(&mut w);

        assert_eq!(w.entities[1].facing, 1.0);
        assert_eq!(queued_enemy_shots(&w), 1);
        assert!((w.pending[0].vel.length() - SNIPER_SHOT_SPEED).abs() < 0.001);
    }

    #[test]
    fn test_boss_sleeps_until_player_is_close() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let boss = Entity::enemy(2, Archetype::Boss, Vec2::new(3000.0, 100.0));
        let mut w = world_with(vec![player, boss]);
        run_behaviors(&mut w);
        match &w.entities[1].kind {
            EntityKind::Enemy(body) => assert!(!body.awake),
            _ => unreachable!(),
        }
        assert_eq!(queued_enemy_shots(&w), 0);

        // move the player into the arena
        w.entities[0].pos.x = 2400.0;
        run_behaviors(&mut w);
        match &w.entities[1].kind {
            EntityKind::Enemy(body) => assert!(body.awake),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_boss_cycle_bursts_and_one_rocket() {
        let player = Entity::player(1, Vec2::new(2400.0, 300.0));
        let boss = Entity::enemy(2, Archetype::Boss, Vec2::new(2600.0, 100.0));
        let mut w = world_with(vec![player, boss]);

        // wake the boss, then run one full cycle
        run_behaviors(&mut w);
        w.flush_spawns();
        w.entities.truncate(2);

        let mut aimed = 0;
        let mut rockets = 0;
        for _ in 0..BOSS_CYCLE {
            physics::integrate(&mut w);
            run_behaviors(&mut w);
            for e in &w.pending {
                match &e.kind {
                    EntityKind::Bullet(b) if b.rocket => rockets += 1,
                    EntityKind::Bullet(_) => aimed += 1,
                    _ => {}
                }
            }
            w.pending.clear();
            // keep the player pinned so distance gating stays constant
            w.entities[0].pos = Vec2::new(2400.0, 300.0);
            w.entities[0].vel = Vec2::ZERO;
        }

        assert_eq!(rockets, 1);
        assert_eq!(aimed as u32, BOSS_BURST_WINDOW / BOSS_BURST_STEP);
    }

    #[test]
    fn test_scheduler_spawns_ahead_of_camera() {
        let mut w = world_with(vec![]);
        w.camera_x = 500.0;
        w.spawn_timer = 1;
        schedule_spawns(&mut w);
        assert_eq!(w.pending.len(), 1);
        assert!(w.pending[0].pos.x > w.camera_x + w.config.view_w);
        assert_eq!(w.spawn_timer, w.config.spawn_period);
    }

    #[test]
    fn test_scheduler_no_ground_spawns_over_water() {
        // water covering the whole spawn area: every spawn must be a flyer
        let water = Entity::water(1, Vec2::new(0.0, 400.0), Vec2::new(10_000.0, 50.0));
        let mut w = world_with(vec![water]);
        for _ in 0..20 {
            w.spawn_timer = 1;
            schedule_spawns(&mut w);
        }
        assert!(!w.pending.is_empty());
        for e in &w.pending {
            match &e.kind {
                EntityKind::Enemy(body) => assert_eq!(body.archetype, Archetype::Flyer),
                _ => panic!("expected enemy spawn"),
            }
        }
    }

    #[test]
    fn test_scheduler_stops_at_boss_arena() {
        let boundary = Entity::boundary(1, Vec2::new(2000.0, 0.0), Vec2::new(32.0, 450.0));
        let mut w = world_with(vec![boundary]);
        w.camera_x = 1500.0; // spawn_x would be 2340, past boundary - view_w
        w.spawn_timer = 1;
        schedule_spawns(&mut w);
        assert!(w.pending.is_empty());
    }
}
