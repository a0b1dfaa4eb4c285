//! Demo level builder
//!
//! Level layout is content, not engine logic: the simulation only wants an
//! ordered entity list with a boundary marker at the end. This module builds
//! the layout the demo binary and the end-to-end tests run on: ground spans
//! broken by water pits, a bridged crossing, raised platforms with weapon
//! capsules, placed defenders, and the boss arena behind the boundary wall.

use glam::Vec2;

use crate::consts::*;
use crate::sim::entity::{Archetype, Entity, WeaponTier};

/// Ground line of the demo level
const GROUND_Y: f32 = 380.0;
const GROUND_THICKNESS: f32 = 16.0;
const WATER_Y: f32 = 400.0;

/// Build the demo level's initial entity store
pub fn demo_level() -> Vec<Entity> {
    let mut next_id = 0u32;
    let mut id = move || {
        next_id += 1;
        next_id
    };
    let ground = |id: u32, x0: f32, x1: f32| {
        Entity::platform(
            id,
            Vec2::new(x0, GROUND_Y),
            Vec2::new(x1 - x0, GROUND_THICKNESS),
        )
    };
    let on_ground = |id: u32, archetype: Archetype, x: f32| {
        let e = Entity::enemy(id, archetype, Vec2::ZERO);
        let y = GROUND_Y - e.size.y;
        Entity::enemy(id, archetype, Vec2::new(x, y))
    };

    let mut entities = vec![
        // the one player, at the left edge of the level
        Entity::player(id(), Vec2::new(60.0, GROUND_Y - PLAYER_HEIGHT)),
        // opening stretch
        ground(id(), 0.0, 600.0),
        // bridged water crossing
        Entity::water(id(), Vec2::new(600.0, WATER_Y), Vec2::new(180.0, 50.0)),
        Entity::bridge(
            id(),
            Vec2::new(600.0, GROUND_Y),
            Vec2::new(180.0, GROUND_THICKNESS),
        ),
        ground(id(), 780.0, 1400.0),
        // raised hop-up route with the first capsule above it
        Entity::platform(id(), Vec2::new(900.0, 300.0), Vec2::new(120.0, GROUND_THICKNESS)),
        Entity::platform(id(), Vec2::new(1100.0, 250.0), Vec2::new(120.0, GROUND_THICKNESS)),
        Entity::powerup(id(), Vec2::new(950.0, 200.0), WeaponTier::Spread),
        // open water pit: jump it or swim never
        Entity::water(id(), Vec2::new(1400.0, WATER_Y), Vec2::new(160.0, 50.0)),
        ground(id(), 1560.0, 2300.0),
        Entity::platform(id(), Vec2::new(1700.0, 280.0), Vec2::new(140.0, GROUND_THICKNESS)),
        Entity::powerup(id(), Vec2::new(1800.0, 180.0), WeaponTier::Laser),
        // boss arena floor
        ground(id(), 2300.0, 3200.0),
    ];

    // placed defenders
    entities.push(on_ground(id(), Archetype::Turret, 1000.0));
    entities.push(on_ground(id(), Archetype::Mine, 1250.0));
    entities.push(on_ground(id(), Archetype::Tank, 1900.0));
    entities.push(on_ground(id(), Archetype::Sniper, 2100.0));
    entities.push(on_ground(id(), Archetype::Mine, 2200.0));
    entities.push(on_ground(id(), Archetype::Turret, 2500.0));

    // the set piece and the wall behind it
    entities.push(Entity::enemy(id(), Archetype::Boss, Vec2::new(2950.0, 160.0)));
    entities.push(Entity::boundary(
        id(),
        Vec2::new(3180.0, 0.0),
        Vec2::new(32.0, 450.0),
    ));

    entities
}
