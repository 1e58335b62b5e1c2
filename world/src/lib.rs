#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Danger Noodle.
//!
//! The world owns the snake, the apple and the per-game counters. Every
//! mutation arrives as a [`Command`] through [`apply`], which appends the
//! resulting [`Event`] values in the order they happened. Read access goes
//! through [`query`].

mod apple;
mod snake;

use std::time::Duration;

use danger_noodle_core::{
    Command, DeathCause, Direction, Event, GameConfig, GridSize, Lifecycle,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use self::{apple::Apple, snake::Snake};

/// Represents the authoritative Danger Noodle game state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    rules: Rules,
    lifecycle: Lifecycle,
    snake: Option<Snake>,
    apple: Option<Apple>,
    counters: Counters,
    tick_duration: Duration,
    pending_tick_duration: Option<Duration>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates an idle world that will start games with the provided configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            rules: Rules::from_config(&config),
            lifecycle: Lifecycle::Idle,
            snake: None,
            apple: None,
            counters: Counters::default(),
            tick_duration: config.tick_duration(),
            pending_tick_duration: None,
            rng,
            config,
        }
    }

    fn configure(&mut self, config: GameConfig) {
        if let Some(seed) = config.seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        self.config = config;
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        let rules = Rules::from_config(&self.config);
        let heading = match self.config.initial_heading {
            Some(heading) => heading,
            None => Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())],
        };
        let snake = Snake::spawn(rules.grid, self.config.initial_snake_length, heading);
        let apple = Apple::spawn(&mut self.rng, &snake.occupied(), rules.grid);

        debug!(
            width = rules.grid.width(),
            height = rules.grid.height(),
            solid_walls = rules.solid_walls,
            %heading,
            "game started"
        );

        self.rules = rules;
        self.snake = Some(snake);
        self.apple = Some(apple);
        self.counters = Counters::default();
        self.tick_duration = self.config.tick_duration();
        self.pending_tick_duration = None;
        self.lifecycle = Lifecycle::Running;
        out_events.push(Event::Started);
    }

    fn stop(&mut self, clear: bool, out_events: &mut Vec<Event>) {
        debug!(ticks = self.counters.ticks, clear, "game stopped");
        self.lifecycle = Lifecycle::Stopped;
        out_events.push(Event::Stopped { cleared: clear });
    }

    fn steer(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !matches!(self.lifecycle, Lifecycle::Running | Lifecycle::Paused) {
            return;
        }

        let Some(snake) = self.snake.as_mut().filter(|snake| snake.is_alive()) else {
            return;
        };

        if snake.steer(direction) {
            self.counters.movements = self.counters.movements.saturating_add(1);
            out_events.push(Event::HeadingChanged {
                direction,
                delta: direction.delta(),
            });
        }
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }

        if !self.snake.as_ref().map_or(false, Snake::is_alive) {
            self.stop(false, out_events);
            return;
        }

        let Self {
            rules,
            snake: Some(snake),
            apple: Some(apple),
            counters,
            tick_duration,
            pending_tick_duration,
            rng,
            ..
        } = self
        else {
            return;
        };

        counters.ticks = counters.ticks.saturating_add(1);
        out_events.push(Event::Ticked {
            tick: counters.ticks,
        });

        snake.advance(rules.grid);

        if snake.head() == apple.position() {
            counters.apples_eaten = counters.apples_eaten.saturating_add(1);
            snake.eat();
            *apple = Apple::spawn(rng, &snake.occupied(), rules.grid);
            debug!(apples_eaten = counters.apples_eaten, length = snake.len(), "apple eaten");
            out_events.push(Event::AppleEaten {
                apples_eaten: counters.apples_eaten,
            });
        }

        // A head past a solid wall never reached the wrapped cell it maps to.
        if rules.solid_walls && !rules.grid.contains(snake.unwrapped_head()) {
            snake.die(DeathCause::WallCollision);
            debug!(tick = counters.ticks, "snake hit a wall");
            out_events.push(Event::WallHit);
        } else if snake.bites_itself() {
            snake.die(DeathCause::SelfCollision);
            debug!(tick = counters.ticks, "snake hit its body");
            out_events.push(Event::BodyHit);
        }

        snake.release_lock();

        if let Some(duration) = pending_tick_duration.take() {
            *tick_duration = duration;
            out_events.push(Event::TickDurationChanged { duration });
        }

        trace!(
            tick = counters.ticks,
            head_x = snake.head().x(),
            head_y = snake.head().y(),
            length = snake.len(),
            "tick resolved"
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that do not fit the current lifecycle are ignored without
/// emitting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { config } => world.configure(config),
        Command::StartGame => world.start(out_events),
        Command::StopGame { clear } => {
            if matches!(world.lifecycle, Lifecycle::Running | Lifecycle::Paused) {
                world.stop(clear, out_events);
            }
        }
        Command::PauseGame => {
            if world.lifecycle == Lifecycle::Running {
                debug!(ticks = world.counters.ticks, "game paused");
                world.lifecycle = Lifecycle::Paused;
                out_events.push(Event::Paused);
            }
        }
        Command::ResumeGame => {
            if world.lifecycle == Lifecycle::Paused {
                debug!(ticks = world.counters.ticks, "game resumed");
                world.lifecycle = Lifecycle::Running;
                out_events.push(Event::Resumed);
            }
        }
        Command::SetTickDuration { duration } => {
            if !duration.is_zero() {
                world.pending_tick_duration = Some(duration);
            }
        }
        Command::RequestDirection { direction } => world.steer(direction, out_events),
        Command::Tick => world.tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use danger_noodle_core::{
        GameConfig, GameSnapshot, GridPosition, GridSize, Lifecycle, SnakeSnapshot,
    };

    /// Configuration the next game will start with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Board dimensions of the current game, or of the next one while idle.
    #[must_use]
    pub fn grid(world: &World) -> GridSize {
        world.rules.grid
    }

    /// Whether leaving the board is lethal in the current game.
    #[must_use]
    pub fn solid_walls(world: &World) -> bool {
        world.rules.solid_walls
    }

    /// Phase of the tick loop.
    #[must_use]
    pub fn lifecycle(world: &World) -> Lifecycle {
        world.lifecycle
    }

    /// Reports whether ticks are currently being processed.
    #[must_use]
    pub fn is_running(world: &World) -> bool {
        world.lifecycle == Lifecycle::Running
    }

    /// Reports whether the game is suspended.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.lifecycle == Lifecycle::Paused
    }

    /// Reports whether the game has ended.
    #[must_use]
    pub fn is_stopped(world: &World) -> bool {
        world.lifecycle == Lifecycle::Stopped
    }

    /// Ticks processed in the current game.
    #[must_use]
    pub fn ticks(world: &World) -> u64 {
        world.counters.ticks
    }

    /// Heading changes accepted in the current game.
    #[must_use]
    pub fn movements(world: &World) -> u64 {
        world.counters.movements
    }

    /// Apples eaten in the current game.
    #[must_use]
    pub fn apples_eaten(world: &World) -> u64 {
        world.counters.apples_eaten
    }

    /// Interval currently used between ticks.
    #[must_use]
    pub fn tick_duration(world: &World) -> Duration {
        world.tick_duration
    }

    /// Interval staged to take effect at the end of the next tick.
    #[must_use]
    pub fn pending_tick_duration(world: &World) -> Option<Duration> {
        world.pending_tick_duration
    }

    /// Reports whether a snake exists and has not died.
    #[must_use]
    pub fn is_snake_alive(world: &World) -> bool {
        world.snake.as_ref().map_or(false, |snake| snake.is_alive())
    }

    /// Captures the snake, once a game has started.
    #[must_use]
    pub fn snake(world: &World) -> Option<SnakeSnapshot> {
        world.snake.as_ref().map(|snake| snake.snapshot())
    }

    /// Location of the apple, once a game has started.
    #[must_use]
    pub fn apple(world: &World) -> Option<GridPosition> {
        world.apple.map(|apple| apple.position())
    }

    /// Summarises the current game.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            lifecycle: world.lifecycle,
            ticks: world.counters.ticks,
            movements: world.counters.movements,
            apples_eaten: world.counters.apples_eaten,
            snake: snake(world),
            apple: apple(world),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Rules {
    grid: GridSize,
    solid_walls: bool,
}

impl Rules {
    fn from_config(config: &GameConfig) -> Self {
        Self {
            grid: config.grid(),
            solid_walls: config.solid_walls,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    ticks: u64,
    movements: u64,
    apples_eaten: u64,
}
