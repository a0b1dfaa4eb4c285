//! Entity records and kind classification
//!
//! Everything in the world is one `Entity`: a shared physical record (id,
//! AABB, velocity, health, facing) tagged by a closed [`EntityKind`] whose
//! variants carry their own payload. Behavior dispatch is exhaustive pattern
//! matching in the physics/AI/combat passes, never runtime type checks.

use glam::Vec2;

use crate::consts::*;

/// The player's equipped weapon mode, set by power-up pickup, reset on death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponTier {
    #[default]
    Normal,
    /// 5-shot angular fan, longer cooldown
    Spread,
    /// Fast cooldown with slight vertical jitter per shot
    Machine,
    /// Faster piercing shot
    Laser,
}

impl WeaponTier {
    /// Ticks between shots for this tier
    pub fn cooldown(self) -> u32 {
        match self {
            WeaponTier::Normal => COOLDOWN_NORMAL,
            WeaponTier::Spread => COOLDOWN_SPREAD,
            WeaponTier::Machine => COOLDOWN_MACHINE,
            WeaponTier::Laser => COOLDOWN_LASER,
        }
    }

    /// Letter shown by the pickup pop-text
    pub fn glyph(self) -> char {
        match self {
            WeaponTier::Normal => 'N',
            WeaponTier::Spread => 'S',
            WeaponTier::Machine => 'M',
            WeaponTier::Laser => 'L',
        }
    }
}

/// Enemy behavior archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// Patrols/approaches on the ground at a fixed speed
    Runner,
    /// Stationary mount, fires aimed shots when the player is in band
    Turret,
    /// Drifts horizontally on a sine path around its spawn height
    Flyer,
    /// Grounded creeper with a slow heavy shell
    Tank,
    /// Faces the player and fires fast aimed shots on a long cooldown
    Sniper,
    /// Inert contact bomb
    Mine,
    /// End-of-level set piece: hovers, burst-fires, launches rockets
    Boss,
}

/// Who fired a bullet (decides which side it can damage)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Player-specific state
#[derive(Debug, Clone, Default)]
pub struct PlayerBody {
    pub grounded: bool,
    pub ducking: bool,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    /// Ticks of remaining post-respawn invincibility
    pub invincibility: u32,
    pub weapon: WeaponTier,
    /// Jumps taken since the last grounding
    pub jumps: u32,
}

/// Enemy-specific state shared by all archetypes
#[derive(Debug, Clone)]
pub struct EnemyBody {
    pub archetype: Archetype,
    pub grounded: bool,
    /// Ticks until the archetype may fire again
    pub fire_cooldown: u32,
    /// Baseline Y for sine-path flight and boss hover
    pub base_y: f32,
    /// Ticks since spawn; drives sine phase and the boss fire cycle
    pub age: u32,
    /// Spawn health, kept so the HUD can show a boss health fraction
    pub max_health: i32,
    /// Boss only: set once the player first comes within a viewport width
    pub awake: bool,
}

/// Projectile state
#[derive(Debug, Clone, Copy)]
pub struct BulletBody {
    pub owner: BulletOwner,
    /// Passes through targets instead of being consumed on hit
    pub piercing: bool,
    /// Homing rocket: steers toward the player at a capped turn rate
    pub rocket: bool,
}

/// Short-lived visual debris / pop-text
#[derive(Debug, Clone, Copy)]
pub struct ParticleBody {
    /// Remaining ticks before expiry
    pub life: u32,
    pub rotation: f32,
    pub spin: f32,
    /// Power-up pop-text letter, if this is a glyph particle
    pub glyph: Option<char>,
    /// Debris falls, pop-text floats
    pub gravity: bool,
}

/// Weapon capsule drifting on a Lissajous path
#[derive(Debug, Clone, Copy)]
pub struct PowerupBody {
    /// Tier granted when the capsule is shot down
    pub drop_tier: WeaponTier,
    /// Center the drift orbits around
    pub anchor: Vec2,
    pub age: u32,
}

/// Closed kind tag with per-variant payload
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(PlayerBody),
    Enemy(EnemyBody),
    Bullet(BulletBody),
    Particle(ParticleBody),
    Powerup(PowerupBody),
    /// One-way ground span
    Platform,
    /// One-way span over a pit; collides exactly like a platform
    Bridge,
    /// Lethal hazard zone
    Water,
    /// Level-end wall; the camera never scrolls past it
    Boundary,
}

/// The universal world record
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    /// Top-left corner of the AABB (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: i32,
    /// Soft-delete marker; inactive entities are invisible to collision/AI
    pub active: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub kind: EntityKind,
}

impl Entity {
    fn base(id: u32, pos: Vec2, size: Vec2, kind: EntityKind) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            health: 1,
            active: true,
            facing: 1.0,
            kind,
        }
    }

    pub fn player(id: u32, pos: Vec2) -> Self {
        Self::base(
            id,
            pos,
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            EntityKind::Player(PlayerBody::default()),
        )
    }

    /// Spawn an enemy with archetype-appropriate size and health
    pub fn enemy(id: u32, archetype: Archetype, pos: Vec2) -> Self {
        let (size, health) = match archetype {
            Archetype::Runner => (Vec2::new(RUNNER_W, RUNNER_H), RUNNER_HEALTH),
            Archetype::Turret => (Vec2::new(TURRET_W, TURRET_H), TURRET_HEALTH),
            Archetype::Flyer => (Vec2::new(FLYER_W, FLYER_H), FLYER_HEALTH),
            Archetype::Tank => (Vec2::new(TANK_W, TANK_H), TANK_HEALTH),
            Archetype::Sniper => (Vec2::new(SNIPER_W, SNIPER_H), SNIPER_HEALTH),
            Archetype::Mine => (Vec2::new(MINE_W, MINE_H), MINE_HEALTH),
            Archetype::Boss => (Vec2::new(BOSS_W, BOSS_H), BOSS_HEALTH),
        };
        let mut e = Self::base(
            id,
            pos,
            size,
            EntityKind::Enemy(EnemyBody {
                archetype,
                grounded: false,
                fire_cooldown: 0,
                base_y: pos.y,
                age: 0,
                max_health: health,
                awake: false,
            }),
        );
        e.health = health;
        e.facing = -1.0;
        e
    }

    /// Spawn a bullet centered on `center`
    pub fn bullet(id: u32, owner: BulletOwner, center: Vec2, vel: Vec2, piercing: bool) -> Self {
        let size = match owner {
            BulletOwner::Player => Vec2::new(PLAYER_SHOT_W, PLAYER_SHOT_H),
            BulletOwner::Enemy => Vec2::new(ENEMY_SHOT_W, ENEMY_SHOT_H),
        };
        let mut e = Self::base(
            id,
            center - size * 0.5,
            size,
            EntityKind::Bullet(BulletBody {
                owner,
                piercing,
                rocket: false,
            }),
        );
        e.vel = vel;
        e.facing = if vel.x < 0.0 { -1.0 } else { 1.0 };
        e
    }

    /// Spawn a homing rocket centered on `center`
    pub fn rocket(id: u32, center: Vec2, vel: Vec2) -> Self {
        let size = Vec2::new(ROCKET_W, ROCKET_H);
        let mut e = Self::base(
            id,
            center - size * 0.5,
            size,
            EntityKind::Bullet(BulletBody {
                owner: BulletOwner::Enemy,
                piercing: false,
                rocket: true,
            }),
        );
        e.vel = vel;
        e
    }

    /// Explosion debris
    pub fn particle(id: u32, pos: Vec2, vel: Vec2, life: u32, spin: f32) -> Self {
        let mut e = Self::base(
            id,
            pos,
            Vec2::splat(4.0),
            EntityKind::Particle(ParticleBody {
                life,
                rotation: 0.0,
                spin,
                glyph: None,
                gravity: true,
            }),
        );
        e.vel = vel;
        e
    }

    /// Floating pop-text letter shown when a weapon capsule is collected
    pub fn glyph_particle(id: u32, pos: Vec2, glyph: char) -> Self {
        let mut e = Self::base(
            id,
            pos,
            Vec2::splat(8.0),
            EntityKind::Particle(ParticleBody {
                life: GLYPH_LIFE,
                rotation: 0.0,
                spin: 0.0,
                glyph: Some(glyph),
                gravity: false,
            }),
        );
        e.vel = Vec2::new(0.0, -0.8);
        e
    }

    pub fn powerup(id: u32, anchor: Vec2, drop_tier: WeaponTier) -> Self {
        Self::base(
            id,
            anchor,
            Vec2::new(CAPSULE_W, CAPSULE_H),
            EntityKind::Powerup(PowerupBody {
                drop_tier,
                anchor,
                age: 0,
            }),
        )
    }

    pub fn platform(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self::base(id, pos, size, EntityKind::Platform)
    }

    pub fn bridge(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self::base(id, pos, size, EntityKind::Bridge)
    }

    pub fn water(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self::base(id, pos, size, EntityKind::Water)
    }

    pub fn boundary(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self::base(id, pos, size, EntityKind::Boundary)
    }

    /// World geometry, hazards, and the boss survive every culling pass
    pub fn is_permanent(&self) -> bool {
        match &self.kind {
            EntityKind::Platform
            | EntityKind::Bridge
            | EntityKind::Water
            | EntityKind::Boundary => true,
            EntityKind::Enemy(body) => body.archetype == Archetype::Boss,
            _ => false,
        }
    }

    /// Contact with this entity kills a non-invincible player
    pub fn is_lethal_to_player(&self) -> bool {
        match &self.kind {
            EntityKind::Enemy(_) | EntityKind::Water => true,
            EntityKind::Bullet(body) => body.owner == BulletOwner::Enemy,
            _ => false,
        }
    }

    /// Plain gravity integration applies to this entity
    pub fn gravity_subject(&self) -> bool {
        match &self.kind {
            EntityKind::Player(_) => true,
            EntityKind::Enemy(body) => matches!(
                body.archetype,
                Archetype::Runner | Archetype::Tank | Archetype::Sniper
            ),
            EntityKind::Particle(body) => body.gravity,
            _ => false,
        }
    }

    /// Subject to one-way platform landing
    pub fn lands_on_platforms(&self) -> bool {
        match &self.kind {
            EntityKind::Player(_) => true,
            EntityKind::Enemy(body) => matches!(
                body.archetype,
                Archetype::Runner | Archetype::Tank | Archetype::Sniper
            ),
            _ => false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::aabb_center(self.pos, self.size)
    }

    /// Bottom edge of the AABB (the actor's feet)
    #[inline]
    pub fn foot_y(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        crate::aabb_overlap(self.pos, self.size, other.pos, other.size)
    }
}
