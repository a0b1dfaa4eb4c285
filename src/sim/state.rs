//! World state and core simulation types
//!
//! One `World` owns every mutable piece of the simulation: the entity store,
//! camera, score/lives, the RNG, and the deferred-respawn slot. Nothing lives
//! in globals; the tick loop owns the world and passes it explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Archetype, Entity, EntityKind, WeaponTier};
use crate::config::Config;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; terminal
    GameOver,
    /// Boss defeated; terminal
    Won,
}

/// Things the surrounding application reacts to (HUD flashes, menu
/// transitions, score persistence). `GameOver` and `Won` fire exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerDied { lives_left: i32 },
    PowerupCollected { tier: WeaponTier },
    BossDefeated,
    GameOver { score: u64 },
    GameWon { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    pub config: Config,
    /// Simulation tick counter
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: i32,
    /// Left edge of the viewport in world space; never decreases
    pub camera_x: f32,
    /// X of the level-end wall (camera clamp); +inf when the level has none
    pub boundary_x: f32,
    /// All live entities, in stable spawn order
    pub entities: Vec<Entity>,
    /// Tick at which the scheduled respawn fires, if one is pending
    pub pending_respawn: Option<u64>,
    /// Ticks until the next roaming-enemy spawn
    pub spawn_timer: u32,
    /// Seeded RNG for spawn selection and shot jitter (deterministic per run)
    pub rng: Pcg32,
    pub seed: u64,
    /// Previous tick's jump intent, for press-edge detection
    pub(crate) prev_jump: bool,
    /// Entities spawned mid-pass, appended after the pass completes
    pub(crate) pending: Vec<Entity>,
    next_id: u32,
}

impl World {
    /// Create a world from a level's ordered initial entity list
    pub fn new(config: Config, seed: u64, entities: Vec<Entity>) -> Self {
        let boundary_x = entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Boundary))
            .map(|e| e.pos.x)
            .fold(f32::INFINITY, f32::min);
        let next_id = entities.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let spawn_timer = config.spawn_period;
        let lives = config.lives;
        Self {
            config,
            tick: 0,
            phase: GamePhase::Playing,
            score: 0,
            lives,
            camera_x: 0.0,
            boundary_x,
            entities,
            pending_respawn: None,
            spawn_timer,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            prev_jump: false,
            pending: Vec::new(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an entity for append after the current pass (keeps iteration
    /// order and count stable while a pass is running)
    pub fn queue(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    /// Append everything queued during the last pass
    pub fn flush_spawns(&mut self) {
        self.entities.append(&mut self.pending);
    }

    /// Index of the player entity (present even while dead/inactive)
    pub fn player_index(&self) -> Option<usize> {
        self.entities
            .iter()
            .position(|e| matches!(e.kind, EntityKind::Player(_)))
    }

    /// Center of the player if alive, for AI aiming
    pub fn player_target(&self) -> Option<Vec2> {
        self.entities
            .iter()
            .find(|e| e.active && matches!(e.kind, EntityKind::Player(_)))
            .map(Entity::center)
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?} (tick {})", self.phase, phase, self.tick);
            self.phase = phase;
        }
    }

    /// Read-only view for the renderer and HUD
    pub fn snapshot(&self) -> Snapshot {
        let mut boss_health = None;
        let mut weapon = WeaponTier::Normal;
        let mut sprites = Vec::with_capacity(self.entities.len());

        for e in &self.entities {
            if let EntityKind::Player(body) = &e.kind {
                weapon = body.weapon;
            }
            if !e.active {
                continue;
            }
            let mut sprite = Sprite {
                id: e.id,
                skin: skin_for(e),
                pos: e.pos,
                size: e.size,
                facing: e.facing,
                blink: false,
                ducking: false,
                rotation: 0.0,
                glyph: None,
            };
            match &e.kind {
                EntityKind::Player(body) => {
                    sprite.ducking = body.ducking;
                    // flicker while the invincibility window runs down
                    sprite.blink =
                        body.invincibility > 0 && (body.invincibility / (BLINK_PERIOD / 2)) % 2 == 0;
                }
                EntityKind::Enemy(body) => {
                    if body.archetype == Archetype::Boss {
                        boss_health =
                            Some((e.health.max(0) as f32 / body.max_health as f32).clamp(0.0, 1.0));
                    }
                }
                EntityKind::Particle(body) => {
                    sprite.rotation = body.rotation;
                    sprite.glyph = body.glyph;
                }
                _ => {}
            }
            sprites.push(sprite);
        }

        Snapshot {
            camera_x: self.camera_x,
            score: self.score,
            lives: self.lives,
            phase: self.phase,
            weapon,
            boss_health,
            sprites,
        }
    }
}

/// Per-tick render view: everything a drawing layer needs, nothing it may touch
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub camera_x: f32,
    pub score: u64,
    pub lives: i32,
    pub phase: GamePhase,
    /// Player's equipped tier, for the HUD weapon indicator
    pub weapon: WeaponTier,
    /// Boss health fraction in [0, 1], while the boss is alive
    pub boss_health: Option<f32>,
    pub sprites: Vec<Sprite>,
}

/// One drawable entity
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub id: u32,
    pub skin: Skin,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: f32,
    /// Invincibility flicker: skip drawing this frame when set
    pub blink: bool,
    pub ducking: bool,
    pub rotation: f32,
    /// Pop-text letter for glyph particles
    pub glyph: Option<char>,
}

/// Renderer color/sprite lookup hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skin {
    Player,
    Runner,
    Turret,
    Flyer,
    Tank,
    Sniper,
    Mine,
    Boss,
    PlayerShot,
    EnemyShot,
    Rocket,
    Particle,
    Capsule,
    Platform,
    Bridge,
    Water,
    Boundary,
}

fn skin_for(e: &Entity) -> Skin {
    match &e.kind {
        EntityKind::Player(_) => Skin::Player,
        EntityKind::Enemy(body) => match body.archetype {
            Archetype::Runner => Skin::Runner,
            Archetype::Turret => Skin::Turret,
            Archetype::Flyer => Skin::Flyer,
            Archetype::Tank => Skin::Tank,
            Archetype::Sniper => Skin::Sniper,
            Archetype::Mine => Skin::Mine,
            Archetype::Boss => Skin::Boss,
        },
        EntityKind::Bullet(body) => {
            if body.rocket {
                Skin::Rocket
            } else if body.owner == super::entity::BulletOwner::Player {
                Skin::PlayerShot
            } else {
                Skin::EnemyShot
            }
        }
        EntityKind::Particle(_) => Skin::Particle,
        EntityKind::Powerup(_) => Skin::Capsule,
        EntityKind::Platform => Skin::Platform,
        EntityKind::Bridge => Skin::Bridge,
        EntityKind::Water => Skin::Water,
        EntityKind::Boundary => Skin::Boundary,
    }
}
