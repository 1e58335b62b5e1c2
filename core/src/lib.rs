#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Danger Noodle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the scheduler. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that the engine
//! forwards to subscribers. Grid arithmetic lives here as well so every crate
//! agrees on how coordinates wrap around the board.

use std::{fmt, str::FromStr, time::Duration};

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Danger Noodle.";

/// Maps an out-of-range coordinate back onto an axis of `dimension` cells.
///
/// Values below zero re-enter from the far edge and values past the last
/// cell re-enter from the near edge, so a snake leaving the board on one
/// side reappears on the other. A zero-sized axis collapses every value to
/// zero.
#[must_use]
pub fn wrap(value: i64, dimension: u32) -> u32 {
    if dimension == 0 {
        return 0;
    }

    let wrapped = value.rem_euclid(i64::from(dimension));
    u32::try_from(wrapped).unwrap_or(0)
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    x: u32,
    y: u32,
}

impl GridPosition {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Converts the cell into signed space so deltas can push it off the board.
    #[must_use]
    pub fn to_ivec2(self) -> IVec2 {
        IVec2::new(
            i32::try_from(self.x).unwrap_or(i32::MAX),
            i32::try_from(self.y).unwrap_or(i32::MAX),
        )
    }
}

/// Dimensions of the playing field measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Cell the snake's head occupies when a game begins.
    #[must_use]
    pub const fn center(&self) -> GridPosition {
        GridPosition::new(self.width / 2, self.height / 2)
    }

    /// Reports whether an unwrapped coordinate lies on the board.
    #[must_use]
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= 0
            && point.y >= 0
            && i64::from(point.x) < i64::from(self.width)
            && i64::from(point.y) < i64::from(self.height)
    }

    /// Folds an unwrapped coordinate back onto the board.
    #[must_use]
    pub fn wrap(&self, point: IVec2) -> GridPosition {
        GridPosition::new(
            wrap(i64::from(point.x), self.width),
            wrap(i64::from(point.y), self.height),
        )
    }
}

/// Cardinal headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every heading in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step applied to the head when moving in this direction.
    #[must_use]
    pub const fn delta(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    /// Heading that would reverse the snake onto itself.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Name used when announcing the heading to subscribers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a direction name does not match any heading.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.name() == value)
            .ok_or_else(|| UnknownDirection(value.to_owned()))
    }
}

/// Reason the snake stopped moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// The head ran into one of the snake's own segments.
    SelfCollision,
    /// The head left the board while solid walls were enabled.
    WallCollision,
}

/// Phase of the tick loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// No game has been started yet.
    #[default]
    Idle,
    /// The tick loop is scheduled and advancing the snake.
    Running,
    /// The tick loop is cancelled but the game can be resumed.
    Paused,
    /// The game ended; a new one requires another start.
    Stopped,
}

const DEFAULT_WIDTH: u32 = 30;
const DEFAULT_HEIGHT: u32 = 20;
const DEFAULT_TICK_DURATION_MS: u64 = 50;
const DEFAULT_SNAKE_LENGTH: u32 = 3;

/// Settings read when a game starts.
///
/// The world trusts these values. Adapters call [`GameConfig::validate`]
/// before starting a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns on the board.
    pub width: u32,
    /// Number of rows on the board.
    pub height: u32,
    /// Whether leaving the board kills the snake instead of wrapping around.
    pub solid_walls: bool,
    /// Interval between ticks in milliseconds.
    pub tick_duration_ms: u64,
    /// Number of segments the snake starts with.
    pub initial_snake_length: u32,
    /// Heading at spawn; a random heading is drawn when absent.
    pub initial_heading: Option<Direction>,
    /// Seed for apple placement and random headings; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            solid_walls: false,
            tick_duration_ms: DEFAULT_TICK_DURATION_MS,
            initial_snake_length: DEFAULT_SNAKE_LENGTH,
            initial_heading: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Board dimensions described by the configuration.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Interval between ticks.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_duration_ms)
    }

    /// Checks the values the world relies on but never verifies itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        if self.tick_duration_ms == 0 {
            return Err(ConfigError::ZeroTickDuration);
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroSnakeLength);
        }

        let limit = self.width.min(self.height);
        if self.initial_snake_length > limit {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                limit,
            });
        }

        let capacity = self.grid().capacity();
        if u64::from(self.initial_snake_length) >= capacity {
            return Err(ConfigError::NoRoomForApple {
                length: self.initial_snake_length,
                capacity,
            });
        }

        Ok(())
    }
}

/// Reasons a [`GameConfig`] is unfit for starting a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One of the board dimensions is zero.
    #[error("grid must have positive dimensions (received {width}x{height})")]
    EmptyGrid {
        /// Configured column count.
        width: u32,
        /// Configured row count.
        height: u32,
    },
    /// Ticks would fire continuously.
    #[error("tick duration must be positive")]
    ZeroTickDuration,
    /// The snake would spawn without a head.
    #[error("initial snake length must be positive")]
    ZeroSnakeLength,
    /// The spawned snake would overlap itself.
    #[error("initial snake length {length} exceeds the shorter grid side {limit}")]
    SnakeTooLong {
        /// Configured snake length.
        length: u32,
        /// Shorter of the two board dimensions.
        limit: u32,
    },
    /// The spawned snake would cover every cell, leaving nowhere for the apple.
    #[error("initial snake length {length} leaves no free cell on a {capacity}-cell grid")]
    NoRoomForApple {
        /// Configured snake length.
        length: u32,
        /// Total number of cells on the board.
        capacity: u64,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the configuration read by the next [`Command::StartGame`].
    Configure {
        /// Settings for subsequent games.
        config: GameConfig,
    },
    /// Spawns a fresh snake and apple and starts the tick loop.
    StartGame,
    /// Ends the running or paused game.
    StopGame {
        /// Whether the render sink should be wiped.
        clear: bool,
    },
    /// Suspends a running game.
    PauseGame,
    /// Continues a paused game.
    ResumeGame,
    /// Stages a new tick interval applied at the end of the next tick.
    SetTickDuration {
        /// Interval to use once the current tick completes.
        duration: Duration,
    },
    /// Asks the snake to turn.
    RequestDirection {
        /// Desired heading.
        direction: Direction,
    },
    /// Advances the simulation by one step.
    Tick,
}

/// Names under which events are published to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A game started.
    Start,
    /// A game stopped.
    Stop,
    /// The tick loop was suspended.
    Pause,
    /// The tick loop was resumed.
    Resume,
    /// A tick began.
    Tick,
    /// The snake ate an apple.
    AppleEaten,
    /// The snake ran into itself.
    BodyHit,
    /// The snake ran into a wall.
    WallHit,
    /// The snake accepted a new heading.
    Move,
    /// A staged tick interval took effect.
    TickDurationChanged,
}

impl EventKind {
    /// Every event kind in declaration order.
    pub const ALL: [EventKind; 10] = [
        EventKind::Start,
        EventKind::Stop,
        EventKind::Pause,
        EventKind::Resume,
        EventKind::Tick,
        EventKind::AppleEaten,
        EventKind::BodyHit,
        EventKind::WallHit,
        EventKind::Move,
        EventKind::TickDurationChanged,
    ];

    /// Published event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Tick => "tick",
            Self::AppleEaten => "appleEaten",
            Self::BodyHit => "bodyHit",
            Self::WallHit => "wallHit",
            Self::Move => "move",
            Self::TickDurationChanged => "tickDurationChanged",
        }
    }
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new game began.
    Started,
    /// The game ended.
    Stopped {
        /// Whether the render sink was asked to clear.
        cleared: bool,
    },
    /// The tick loop was suspended.
    Paused,
    /// The tick loop was resumed.
    Resumed,
    /// A tick began.
    Ticked {
        /// Number of ticks processed in this game, including this one.
        tick: u64,
    },
    /// The snake consumed the apple.
    AppleEaten {
        /// Cumulative apples eaten in this game.
        apples_eaten: u64,
    },
    /// The snake's head landed on its own body.
    BodyHit,
    /// The snake's head left the board with solid walls enabled.
    WallHit,
    /// The snake accepted a new heading.
    HeadingChanged {
        /// Heading that was accepted.
        direction: Direction,
        /// Unit step associated with the heading.
        delta: IVec2,
    },
    /// A staged tick interval became current.
    TickDurationChanged {
        /// Interval now used between ticks.
        duration: Duration,
    },
}

impl Event {
    /// Name under which the event is published.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Started => EventKind::Start,
            Self::Stopped { .. } => EventKind::Stop,
            Self::Paused => EventKind::Pause,
            Self::Resumed => EventKind::Resume,
            Self::Ticked { .. } => EventKind::Tick,
            Self::AppleEaten { .. } => EventKind::AppleEaten,
            Self::BodyHit => EventKind::BodyHit,
            Self::WallHit => EventKind::WallHit,
            Self::HeadingChanged { .. } => EventKind::Move,
            Self::TickDurationChanged { .. } => EventKind::TickDurationChanged,
        }
    }
}

/// Immutable representation of the snake used for queries and rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    /// Occupied cells, head first.
    pub body: Vec<GridPosition>,
    /// Current heading.
    pub heading: Direction,
    /// Head coordinate before wraparound, used for wall checks.
    pub unwrapped_head: IVec2,
    /// Whether a heading change was already accepted this tick.
    pub direction_locked: bool,
    /// Why the snake died, if it did.
    pub death: Option<DeathCause>,
}

impl SnakeSnapshot {
    /// Cell holding the head.
    #[must_use]
    pub fn head(&self) -> Option<GridPosition> {
        self.body.first().copied()
    }

    /// Reports whether the snake is still moving.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.death.is_none()
    }
}

/// Read-only summary of a game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Phase of the tick loop.
    pub lifecycle: Lifecycle,
    /// Ticks processed in this game.
    pub ticks: u64,
    /// Heading changes accepted in this game.
    pub movements: u64,
    /// Apples eaten in this game.
    pub apples_eaten: u64,
    /// The snake, once a game has started.
    pub snake: Option<SnakeSnapshot>,
    /// Apple location, once a game has started.
    pub apple: Option<GridPosition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_step_wrap(value: i64, dimension: i64) -> i64 {
        if value < 0 {
            value + dimension
        } else if value > dimension - 1 {
            value - dimension
        } else {
            value
        }
    }

    #[test]
    fn wrap_leaves_in_range_values_untouched() {
        for dimension in 1..12u32 {
            for value in 0..dimension {
                assert_eq!(wrap(i64::from(value), dimension), value);
            }
        }
    }

    #[test]
    fn wrap_is_idempotent() {
        for dimension in 1..9u32 {
            for value in -40..40i64 {
                let once = wrap(value, dimension);
                assert!(once < dimension);
                assert_eq!(wrap(i64::from(once), dimension), once);
            }
        }
    }

    #[test]
    fn wrap_matches_single_step_rule_near_the_board() {
        let dimension = 10;
        for value in -10..20i64 {
            let expected = single_step_wrap(value, i64::from(dimension));
            assert_eq!(i64::from(wrap(value, dimension)), expected, "value {value}");
        }
    }

    #[test]
    fn wrap_handles_zero_dimension() {
        assert_eq!(wrap(-3, 0), 0);
        assert_eq!(wrap(7, 0), 0);
    }

    #[test]
    fn grid_wraps_and_bounds_unwrapped_points() {
        let grid = GridSize::new(10, 8);
        assert_eq!(grid.wrap(IVec2::new(-1, 5)), GridPosition::new(9, 5));
        assert_eq!(grid.wrap(IVec2::new(10, 8)), GridPosition::new(0, 0));
        assert!(grid.contains(IVec2::new(9, 7)));
        assert!(!grid.contains(IVec2::new(10, 0)));
        assert!(!grid.contains(IVec2::new(0, -1)));
        assert_eq!(grid.center(), GridPosition::new(5, 4));
        assert_eq!(grid.capacity(), 80);
    }

    #[test]
    fn opposite_directions_cancel_out() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.delta() + direction.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn direction_parses_only_known_names() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(UnknownDirection("sideways".to_owned()))
        );
        assert!("Left".parse::<Direction>().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.grid(), GridSize::new(30, 20));
        assert_eq!(config.tick_duration(), Duration::from_millis(50));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_unplayable_configs() {
        let empty = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            empty.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 20
            })
        );

        let frozen = GameConfig {
            tick_duration_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(frozen.validate(), Err(ConfigError::ZeroTickDuration));

        let headless = GameConfig {
            initial_snake_length: 0,
            ..GameConfig::default()
        };
        assert_eq!(headless.validate(), Err(ConfigError::ZeroSnakeLength));

        let too_long = GameConfig {
            width: 10,
            height: 4,
            initial_snake_length: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            too_long.validate(),
            Err(ConfigError::SnakeTooLong {
                length: 5,
                limit: 4
            })
        );
    }

    #[test]
    fn validation_keeps_a_free_cell_for_the_apple() {
        let single_cell = GameConfig {
            width: 1,
            height: 1,
            initial_snake_length: 1,
            ..GameConfig::default()
        };
        assert_eq!(
            single_cell.validate(),
            Err(ConfigError::NoRoomForApple {
                length: 1,
                capacity: 1
            })
        );

        let two_cells = GameConfig {
            width: 2,
            height: 1,
            initial_snake_length: 1,
            ..GameConfig::default()
        };
        assert_eq!(two_cells.validate(), Ok(()));
    }

    #[test]
    fn config_round_trips_through_bincode() {
        let config = GameConfig {
            solid_walls: true,
            initial_heading: Some(Direction::Up),
            seed: Some(7),
            ..GameConfig::default()
        };
        let bytes = bincode::serialize(&config).expect("serialize");
        let restored: GameConfig = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, config);
    }

    #[test]
    fn event_kinds_use_published_names() {
        let names: Vec<_> = EventKind::ALL.iter().map(|kind| kind.name()).collect();
        assert_eq!(
            names,
            [
                "start",
                "stop",
                "pause",
                "resume",
                "tick",
                "appleEaten",
                "bodyHit",
                "wallHit",
                "move",
                "tickDurationChanged"
            ]
        );
        assert_eq!(Event::Stopped { cleared: false }.kind(), EventKind::Stop);
        assert_eq!(
            Event::HeadingChanged {
                direction: Direction::Up,
                delta: Direction::Up.delta(),
            }
            .kind(),
            EventKind::Move
        );
    }
}
