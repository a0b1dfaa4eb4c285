//! Runtime physics and viewport tuning
//!
//! The constants a level designer actually reaches for live here so they can
//! be swapped without a rebuild. Everything is in per-tick units to match the
//! fixed-timestep simulation.

use serde::{Deserialize, Serialize};

/// Tunable simulation parameters
///
/// `Default` gives the shipped balance; deserialize from JSON to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Viewport width in world pixels
    pub view_w: f32,
    /// Viewport height in world pixels
    pub view_h: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Terminal fall speed (prevents tunneling through thin platforms)
    pub max_fall_speed: f32,
    /// Player horizontal run speed
    pub move_speed: f32,
    /// Instantaneous upward speed applied on a jump press
    pub jump_impulse: f32,
    /// Player bullet speed
    pub bullet_speed: f32,
    /// Roaming enemy (runner/flyer) horizontal speed
    pub enemy_speed: f32,
    /// Ticks between roaming-enemy spawns
    pub spawn_period: u32,
    /// Starting lives
    pub lives: i32,
    /// Ticks between player death and respawn
    pub respawn_delay: u32,
    /// Post-respawn invincibility window in ticks
    pub invincibility: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view_w: 800.0,
            view_h: 450.0,
            gravity: 0.6,
            max_fall_speed: 12.0,
            move_speed: 3.0,
            jump_impulse: 11.5,
            bullet_speed: 9.0,
            enemy_speed: 1.6,
            spawn_period: 150,
            lives: 3,
            respawn_delay: 90,
            invincibility: 120,
        }
    }
}

impl Config {
    /// Parse a config override from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// World y past which a fallen player is dead
    pub fn kill_plane(&self) -> f32 {
        self.view_h + crate::consts::FALL_KILL_MARGIN
    }
}
