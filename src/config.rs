//! World geometry, physics constants and difficulty presets.
//!
//! The simulation runs in a fixed logical coordinate system (y grows
//! downward) regardless of terminal size; the renderer scales world units to
//! pixels.

/// Logical world width.
pub const WORLD_W: f64 = 480.0;
/// Logical world height.
pub const WORLD_H: f64 = 700.0;

/// Height of the ground band at the bottom of the world.
pub const GROUND_H: f64 = 120.0;
/// Top edge of the ground; the terminal collision line.
pub const GROUND_Y: f64 = WORLD_H - GROUND_H;

pub const BIRD_X: f64 = WORLD_W * 0.25;
pub const BIRD_SPAWN_Y: f64 = WORLD_H * 0.4;
pub const BIRD_W: f64 = 34.0;
pub const BIRD_H: f64 = 24.0;

/// Downward acceleration per tick.
pub const GRAVITY: f64 = 0.55;
/// Upward impulse applied to vertical velocity on a flap.
pub const FLAP_IMPULSE: f64 = -9.5;
/// Terminal fall speed; velocity is clamped here each tick.
pub const MAX_FALL_SPEED: f64 = 12.0;

/// Visual rotation range in degrees. Rotation never affects collision.
pub const ROTATION_MIN: f64 = -30.0;
pub const ROTATION_MAX: f64 = 90.0;

pub const PIPE_W: f64 = 78.0;
/// Pipes spawn just past the right edge and are dropped once fully past the
/// left edge.
pub const PIPE_SPAWN_X: f64 = WORLD_W + 40.0;
pub const PIPE_DESPAWN_X: f64 = -40.0;
/// Minimum top-segment height when placing a gap.
pub const GAP_MIN_TOP: f64 = 60.0;
/// Minimum bottom-segment height (plus the cap margin) when placing a gap.
pub const GAP_BOTTOM_MARGIN: f64 = 140.0;

/// The bird may poke slightly above the top of the world; reaching this line
/// clamps position and zeroes velocity rather than crashing.
pub const CEILING_Y: f64 = -20.0;

/// Fixed timestep: sixty simulation ticks per second.
pub const TICKS_PER_SECOND: u64 = 60;
pub const FRAME_MS: u64 = 1000 / TICKS_PER_SECOND;

/// Idle bobbing of the bird on the menu screen.
pub const MENU_BOB_FREQ: f64 = 0.08;
pub const MENU_BOB_AMPLITUDE: f64 = 10.0;

/// Leaderboard limits.
pub const BOARD_CAP: usize = 20;
pub const NAME_MAX: usize = 12;
pub const DEFAULT_NAME: &str = "Anon";

/// Named presets controlling gap size, obstacle speed and spawn cadence.
/// Selected on the menu and applied uniformly for the whole run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Vertical gap between a pipe's top and bottom segments.
    pub fn gap(self) -> f64 {
        match self {
            Difficulty::Easy => 190.0,
            Difficulty::Normal => 160.0,
            Difficulty::Hard => 140.0,
        }
    }

    /// Leftward pipe speed in world units per tick.
    pub fn speed(self) -> f64 {
        match self {
            Difficulty::Easy => 1.8,
            Difficulty::Normal => 2.2,
            Difficulty::Hard => 2.8,
        }
    }

    /// Ticks between pipe spawns.
    pub fn spawn_interval(self) -> u64 {
        match self {
            Difficulty::Easy => 125,
            Difficulty::Normal => 110,
            Difficulty::Hard => 95,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }
}
