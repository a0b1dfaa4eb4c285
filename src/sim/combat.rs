//! Interaction resolution: bullet hits, lethal contact, pickups, scoring
//!
//! Every pair is evaluated at most once per tick. Health decrements and
//! deactivations are applied immediately so later pair checks in the same
//! pass see them; that is what keeps a bullet from scoring one kill twice
//! when two targets die in the same frame.

use glam::Vec2;

use super::entity::{Archetype, BulletOwner, Entity, EntityKind, WeaponTier};
use super::state::{GameEvent, GamePhase, World};
use crate::consts::*;
use crate::aabb_overlap;

/// What the rest of the tick needs to know about this pass
#[derive(Debug, Default)]
pub struct CombatResult {
    /// A lethal contact reached the player this tick
    pub player_killed: bool,
    pub events: Vec<GameEvent>,
}

/// Resolve all pairwise combat and pickup effects for this tick
pub fn resolve(world: &mut World) -> CombatResult {
    let mut result = CombatResult::default();
    resolve_player_bullets(world, &mut result);
    resolve_lethal_contact(world, &mut result);
    result
}

enum KillEffect {
    Enemy { boss: bool, center: Vec2 },
    Powerup { tier: WeaponTier, center: Vec2 },
}

fn resolve_player_bullets(world: &mut World, result: &mut CombatResult) {
    let count = world.entities.len();
    for bi in 0..count {
        let (bullet_pos, bullet_size, piercing) = {
            let e = &world.entities[bi];
            if !e.active {
                continue;
            }
            match &e.kind {
                EntityKind::Bullet(b) if b.owner == BulletOwner::Player => {
                    (e.pos, e.size, b.piercing)
                }
                _ => continue,
            }
        };

        let mut consumed = false;
        for ti in 0..count {
            if ti == bi {
                continue;
            }
            let mut effect = None;
            let survived;
            {
                let t = &mut world.entities[ti];
                if !t.active
                    || !matches!(t.kind, EntityKind::Enemy(_) | EntityKind::Powerup(_))
                    || !aabb_overlap(bullet_pos, bullet_size, t.pos, t.size)
                {
                    continue;
                }
                let center = t.pos + t.size * 0.5;
                t.health -= 1;
                survived = t.health > 0;
                if !survived {
                    t.active = false;
                    effect = Some(match &t.kind {
                        EntityKind::Enemy(b) => KillEffect::Enemy {
                            boss: b.archetype == Archetype::Boss,
                            center,
                        },
                        EntityKind::Powerup(b) => KillEffect::Powerup {
                            tier: b.drop_tier,
                            center,
                        },
                        _ => unreachable!("target filter admits enemies and powerups only"),
                    });
                }
            }

            match effect {
                Some(KillEffect::Enemy { boss, center }) => {
                    world.score += SCORE_KILL;
                    spawn_explosion(world, center, boss);
                    if boss {
                        world.score += SCORE_BOSS_BONUS;
                        log::info!("boss defeated at tick {}", world.tick);
                        result.events.push(GameEvent::BossDefeated);
                        world.set_phase(GamePhase::Won);
                        result.events.push(GameEvent::GameWon { score: world.score });
                    }
                }
                Some(KillEffect::Powerup { tier, center }) => {
                    grant_weapon(world, tier);
                    let id = world.next_entity_id();
                    world.queue(Entity::glyph_particle(id, center, tier.glyph()));
                    spawn_explosion(world, center, false);
                    result.events.push(GameEvent::PowerupCollected { tier });
                }
                None if survived => {
                    // feedback spark on a target that soaked the hit
                    spawn_hit_spark(world, bullet_pos);
                }
                None => {}
            }

            if !piercing {
                consumed = true;
                break;
            }
        }

        if consumed {
            world.entities[bi].active = false;
        }
    }
}

fn resolve_lethal_contact(world: &mut World, result: &mut CombatResult) {
    let Some(pi) = world.player_index() else {
        return;
    };
    let (player_pos, player_size) = {
        let p = &world.entities[pi];
        if !p.active {
            return;
        }
        if let EntityKind::Player(body) = &p.kind {
            // invincibility window skips lethal-contact checks entirely
            if body.invincibility > 0 {
                return;
            }
        }
        (p.pos, p.size)
    };

    for ti in 0..world.entities.len() {
        if ti == pi {
            continue;
        }
        let mut mine_center = None;
        {
            let e = &mut world.entities[ti];
            if !e.active
                || !e.is_lethal_to_player()
                || !aabb_overlap(player_pos, player_size, e.pos, e.size)
            {
                continue;
            }
            match &e.kind {
                // a mine goes up with its victim
                EntityKind::Enemy(body) if body.archetype == Archetype::Mine => {
                    e.active = false;
                    mine_center = Some(e.pos + e.size * 0.5);
                }
                // the shot that lands is spent
                EntityKind::Bullet(body) if !body.piercing => {
                    e.active = false;
                }
                _ => {}
            }
        }
        if let Some(center) = mine_center {
            spawn_explosion(world, center, false);
        }
        result.player_killed = true;
        break;
    }
}

fn grant_weapon(world: &mut World, tier: WeaponTier) {
    if let Some(pi) = world.player_index() {
        if let EntityKind::Player(body) = &mut world.entities[pi].kind {
            body.weapon = tier;
            log::debug!("weapon tier -> {:?}", tier);
        }
    }
}

/// Ring of debris particles; boss and player deaths get the big version
pub fn spawn_explosion(world: &mut World, center: Vec2, big: bool) {
    let count = if big {
        BIG_EXPLOSION_PARTICLES
    } else {
        EXPLOSION_PARTICLES
    };
    let base_speed = if big { 5.0 } else { 3.0 };
    for i in 0..count {
        // deterministic per-index jitter so bursts look ragged without RNG state
        let hash = (world.tick as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(i * 31337);
        let r1 = (hash % 1000) as f32 / 1000.0;
        let r2 = ((hash >> 10) % 1000) as f32 / 1000.0;

        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let speed = base_speed * (0.5 + r1 * 0.8);
        let mut vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        vel.y -= 1.5;
        let life = PARTICLE_LIFE + (r2 * 12.0) as u32;
        let spin = (r1 - 0.5) * 0.6;
        let id = world.next_entity_id();
        world.queue(Entity::particle(id, center, vel, life, spin));
    }
}

fn spawn_hit_spark(world: &mut World, pos: Vec2) {
    let id = world.next_entity_id();
    let mut spark = Entity::particle(id, pos, Vec2::new(0.0, -0.5), HIT_SPARK_LIFE, 0.0);
    if let EntityKind::Particle(body) = &mut spark.kind {
        body.gravity = false;
    }
    world.queue(spark);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn world_with(entities: Vec<Entity>) -> World {
        World::new(Config::default(), 3, entities)
    }

    fn player_weapon(world: &World) -> WeaponTier {
        match &world.entities[world.player_index().unwrap()].kind {
            EntityKind::Player(b) => b.weapon,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_piercing_bullet_hits_both_stacked_targets() {
        let bullet = Entity::bullet(
            1,
            BulletOwner::Player,
            Vec2::new(100.0, 100.0),
            Vec2::new(9.0, 0.0),
            true,
        );
        let a = Entity::enemy(2, Archetype::Runner, Vec2::new(95.0, 80.0));
        let b = Entity::enemy(3, Archetype::Runner, Vec2::new(95.0, 95.0));
        let mut w = world_with(vec![bullet, a, b]);

        resolve(&mut w);

        assert!(!w.entities[1].active);
        assert!(!w.entities[2].active);
        assert_eq!(w.score, 2 * SCORE_KILL);
        // piercing bullets keep traveling
        assert!(w.entities[0].active);
    }

    #[test]
    fn test_non_piercing_bullet_consumed_even_when_target_survives() {
        let bullet = Entity::bullet(
            1,
            BulletOwner::Player,
            Vec2::new(100.0, 100.0),
            Vec2::new(9.0, 0.0),
            false,
        );
        let turret = Entity::enemy(2, Archetype::Turret, Vec2::new(95.0, 95.0));
        let mut w = world_with(vec![bullet, turret]);

        resolve(&mut w);

        assert!(!w.entities[0].active);
        assert!(w.entities[1].active);
        assert_eq!(w.entities[1].health, TURRET_HEALTH - 1);
        assert_eq!(w.score, 0);
        // hit spark queued for feedback
        assert_eq!(w.pending.len(), 1);
    }

    #[test]
    fn test_target_destroyed_and_scored_exactly_once() {
        // two bullets overlap the same 1-health enemy in the same tick
        let b1 = Entity::bullet(
            1,
            BulletOwner::Player,
            Vec2::new(100.0, 100.0),
            Vec2::new(9.0, 0.0),
            false,
        );
        let b2 = Entity::bullet(
            2,
            BulletOwner::Player,
            Vec2::new(101.0, 100.0),
            Vec2::new(9.0, 0.0),
            false,
        );
        let runner = Entity::enemy(3, Archetype::Runner, Vec2::new(95.0, 95.0));
        let mut w = world_with(vec![b1, b2, runner]);

        resolve(&mut w);

        assert_eq!(w.score, SCORE_KILL);
        assert!(!w.entities[2].active);
        // the second bullet saw a dead target and flew on
        assert!(w.entities[1].active);
    }

    #[test]
    fn test_capsule_defeat_grants_tier_and_pops_glyph() {
        let player = Entity::player(1, Vec2::new(0.0, 0.0));
        let bullet = Entity::bullet(
            2,
            BulletOwner::Player,
            Vec2::new(100.0, 100.0),
            Vec2::new(9.0, 0.0),
            false,
        );
        let capsule = Entity::powerup(3, Vec2::new(92.0, 92.0), WeaponTier::Laser);
        let mut w = world_with(vec![player, bullet, capsule]);

        let result = resolve(&mut w);

        assert_eq!(player_weapon(&w), WeaponTier::Laser);
        assert!(!w.entities[2].active);
        // no score for capsules
        assert_eq!(w.score, 0);
        assert!(result
            .events
            .contains(&GameEvent::PowerupCollected { tier: WeaponTier::Laser }));
        // glyph pop-text among the queued spawns
        assert!(w.pending.iter().any(|e| matches!(
            &e.kind,
            EntityKind::Particle(p) if p.glyph == Some('L')
        )));
    }

    #[test]
    fn test_boss_defeat_sets_won_and_bonus() {
        let mut boss = Entity::enemy(1, Archetype::Boss, Vec2::new(90.0, 60.0));
        boss.health = 1;
        let bullet = Entity::bullet(
            2,
            BulletOwner::Player,
            Vec2::new(100.0, 100.0),
            Vec2::new(9.0, 0.0),
            false,
        );
        let mut w = world_with(vec![boss, bullet]);

        let result = resolve(&mut w);

        assert_eq!(w.phase, GamePhase::Won);
        assert_eq!(w.score, SCORE_KILL + SCORE_BOSS_BONUS);
        assert!(result.events.contains(&GameEvent::BossDefeated));
        assert!(result
            .events
            .contains(&GameEvent::GameWon { score: w.score }));
    }

    #[test]
    fn test_boss_surviving_hit_sparks() {
        let boss = Entity::enemy(1, Archetype::Boss, Vec2::new(90.0, 60.0));
        let bullet = Entity::bullet(
            2,
            BulletOwner::Player,
            Vec2::new(100.0, 100.0),
            Vec2::new(9.0, 0.0),
            false,
        );
        let mut w = world_with(vec![boss, bullet]);

        resolve(&mut w);

        assert!(w.entities[0].active);
        assert_eq!(w.entities[0].health, BOSS_HEALTH - 1);
        assert!(!w.entities[1].active);
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(!w.pending.is_empty());
    }

    #[test]
    fn test_enemy_contact_kills_player() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let runner = Entity::enemy(2, Archetype::Runner, Vec2::new(105.0, 105.0));
        let mut w = world_with(vec![player, runner]);

        let result = resolve(&mut w);
        assert!(result.player_killed);
        // contact with a runner is not self-destructing
        assert!(w.entities[1].active);
    }

    #[test]
    fn test_mine_detonates_on_contact() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let mine = Entity::enemy(2, Archetype::Mine, Vec2::new(105.0, 120.0));
        let mut w = world_with(vec![player, mine]);

        let result = resolve(&mut w);
        assert!(result.player_killed);
        assert!(!w.entities[1].active);
        assert!(!w.pending.is_empty());
    }

    #[test]
    fn test_invincibility_suppresses_lethal_contact() {
        let mut player = Entity::player(1, Vec2::new(100.0, 100.0));
        if let EntityKind::Player(body) = &mut player.kind {
            body.invincibility = 30;
        }
        let water = Entity::water(2, Vec2::new(80.0, 80.0), Vec2::new(100.0, 100.0));
        let mut w = world_with(vec![player, water]);

        let result = resolve(&mut w);
        assert!(!result.player_killed);
    }

    #[test]
    fn test_enemy_bullet_spent_on_player_hit() {
        let player = Entity::player(1, Vec2::new(100.0, 100.0));
        let shot = Entity::bullet(
            2,
            BulletOwner::Enemy,
            Vec2::new(110.0, 110.0),
            Vec2::new(-4.0, 0.0),
            false,
        );
        let mut w = world_with(vec![player, shot]);

        let result = resolve(&mut w);
        assert!(result.player_killed);
        assert!(!w.entities[1].active);
    }
}
