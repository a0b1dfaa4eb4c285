//! Blast Runner - a side-scrolling run-and-gun simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combat, AI, camera)
//! - `config`: Data-driven physics and viewport tuning
//! - `level`: Demo level builder (the ordered initial entity list)
//!
//! The crate is rendering-agnostic: callers feed a [`sim::TickInput`] snapshot
//! into [`sim::tick`] once per display refresh and read back a
//! [`sim::Snapshot`] for drawing. Coordinates are screen-style: y grows
//! downward, entity positions are top-left corners of their AABBs.

pub mod config;
pub mod level;
pub mod sim;

pub use config::Config;
pub use sim::{GameEvent, GamePhase, Snapshot, TickInput, World, tick};

use glam::Vec2;

/// Game constants in per-tick units (the runtime-tunable subset lives in [`Config`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;
    /// Ducking keeps this fraction of standing height
    pub const DUCK_FACTOR: f32 = 0.5;

    /// Weapon cooldowns (ticks between shots)
    pub const COOLDOWN_NORMAL: u32 = 10;
    pub const COOLDOWN_SPREAD: u32 = 18;
    pub const COOLDOWN_MACHINE: u32 = 4;
    pub const COOLDOWN_LASER: u32 = 12;

    /// Spread tier: shots fanned around the aim direction
    pub const SPREAD_COUNT: usize = 5;
    /// Angular gap between adjacent spread shots (radians)
    pub const SPREAD_STEP: f32 = 0.2;
    /// Laser shots travel this much faster than the configured bullet speed
    pub const LASER_SPEED_MULT: f32 = 1.5;
    /// Machine-gun vertical jitter amplitude (pixels/tick)
    pub const MACHINE_JITTER: f32 = 1.2;

    /// Projectile hitboxes
    pub const PLAYER_SHOT_W: f32 = 8.0;
    pub const PLAYER_SHOT_H: f32 = 4.0;
    pub const ENEMY_SHOT_W: f32 = 10.0;
    pub const ENEMY_SHOT_H: f32 = 6.0;
    pub const ROCKET_W: f32 = 16.0;
    pub const ROCKET_H: f32 = 8.0;

    /// Enemy hitboxes
    pub const RUNNER_W: f32 = 24.0;
    pub const RUNNER_H: f32 = 32.0;
    pub const TURRET_W: f32 = 28.0;
    pub const TURRET_H: f32 = 24.0;
    pub const FLYER_W: f32 = 28.0;
    pub const FLYER_H: f32 = 20.0;
    pub const TANK_W: f32 = 48.0;
    pub const TANK_H: f32 = 32.0;
    pub const SNIPER_W: f32 = 24.0;
    pub const SNIPER_H: f32 = 36.0;
    pub const MINE_W: f32 = 20.0;
    pub const MINE_H: f32 = 14.0;
    pub const BOSS_W: f32 = 64.0;
    pub const BOSS_H: f32 = 96.0;
    pub const CAPSULE_W: f32 = 20.0;
    pub const CAPSULE_H: f32 = 20.0;

    /// Enemy health pools
    pub const RUNNER_HEALTH: i32 = 1;
    pub const TURRET_HEALTH: i32 = 2;
    pub const FLYER_HEALTH: i32 = 1;
    pub const TANK_HEALTH: i32 = 4;
    pub const SNIPER_HEALTH: i32 = 2;
    pub const MINE_HEALTH: i32 = 1;
    pub const BOSS_HEALTH: i32 = 30;

    /// Enemy projectile speeds (pixels/tick)
    pub const ENEMY_SHOT_SPEED: f32 = 4.0;
    pub const TANK_SHELL_SPEED: f32 = 2.5;
    pub const SNIPER_SHOT_SPEED: f32 = 9.0;
    pub const ROCKET_SPEED: f32 = 4.5;
    /// Maximum rocket steering per tick (radians)
    pub const ROCKET_TURN_RATE: f32 = 0.05;

    /// Enemy movement
    pub const TANK_CREEP_SPEED: f32 = 0.4;
    pub const FLYER_DRIFT_SPEED: f32 = 2.0;
    pub const FLYER_AMP: f32 = 42.0;
    pub const FLYER_FREQ: f32 = 0.06;
    pub const BOSS_HOVER_AMP: f32 = 30.0;
    pub const BOSS_HOVER_FREQ: f32 = 0.03;

    /// AI fire cadence (ticks)
    pub const TURRET_COOLDOWN: u32 = 90;
    pub const TANK_COOLDOWN: u32 = 160;
    pub const SNIPER_COOLDOWN: u32 = 140;

    /// AI engagement ranges (pixels, center-to-center)
    pub const TURRET_NEAR: f32 = 96.0;
    pub const TURRET_FAR: f32 = 520.0;
    pub const TANK_RANGE: f32 = 560.0;
    pub const SNIPER_RANGE: f32 = 640.0;

    /// Boss fire cycle: burst window at the start, one rocket mid-cycle
    pub const BOSS_CYCLE: u32 = 300;
    pub const BOSS_BURST_WINDOW: u32 = 60;
    pub const BOSS_BURST_STEP: u32 = 10;
    pub const BOSS_ROCKET_TICK: u32 = 150;

    /// Scoring
    pub const SCORE_KILL: u64 = 100;
    pub const SCORE_BOSS_BONUS: u64 = 1000;

    /// Particle effects (lifetimes in ticks)
    pub const EXPLOSION_PARTICLES: u32 = 12;
    pub const BIG_EXPLOSION_PARTICLES: u32 = 28;
    pub const PARTICLE_LIFE: u32 = 36;
    pub const HIT_SPARK_LIFE: u32 = 12;
    pub const GLYPH_LIFE: u32 = 48;

    /// Platform landing: inward shrink on span edges so actors don't catch
    /// on seams between adjacent tiles
    pub const EDGE_TOLERANCE: f32 = 2.0;
    /// Previous-foot slack above the platform top
    pub const LANDING_TOLERANCE: f32 = 4.0;

    /// Camera leads the player by a third of the viewport
    pub const CAMERA_LEAD: f32 = 3.0;
    /// Camera stops this far short of the boundary wall
    pub const BOUNDARY_MARGIN: f32 = 40.0;
    /// Transient entities survive this far outside the camera span
    pub const CULL_MARGIN: f32 = 200.0;

    /// Falling this far below the viewport bottom is death
    pub const FALL_KILL_MARGIN: f32 = 80.0;

    /// Invincibility blink cadence for the render snapshot
    pub const BLINK_PERIOD: u32 = 8;

    /// Power-up capsule Lissajous drift
    pub const CAPSULE_FREQ_X: f32 = 0.04;
    pub const CAPSULE_FREQ_Y: f32 = 0.07;
    pub const CAPSULE_AMP_X: f32 = 24.0;
    pub const CAPSULE_AMP_Y: f32 = 12.0;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Axis-aligned overlap test between two top-left anchored boxes
#[inline]
pub fn aabb_overlap(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    pos_a.x < pos_b.x + size_b.x
        && pos_a.x + size_a.x > pos_b.x
        && pos_a.y < pos_b.y + size_b.y
        && pos_a.y + size_a.y > pos_b.y
}

/// Center of a top-left anchored box
#[inline]
pub fn aabb_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
