//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (appends go through a side buffer between passes)
//! - No rendering or platform dependencies

pub mod ai;
pub mod camera;
pub mod combat;
pub mod entity;
pub mod physics;
pub mod player;
pub mod state;
pub mod tick;
pub mod weapon;

pub use entity::{Archetype, BulletOwner, Entity, EntityKind, WeaponTier};
pub use state::{GameEvent, GamePhase, Skin, Snapshot, Sprite, World};
pub use tick::{TickInput, tick};
