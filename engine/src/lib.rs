#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game engine that drives a Danger Noodle world.
//!
//! The engine owns the [`World`], the tick [`Scheduler`], an
//! [`EventChannel`] and a [`RenderSink`]. Every operation is turned into a
//! [`Command`], applied to the world, and the resulting events are fed to
//! the scheduler and then published to subscribers.

mod channel;

use std::time::Duration;

use danger_noodle_core::{Command, Direction, Event, GameConfig, GameSnapshot};
use danger_noodle_rendering::{paint_frame, Headless, Palette, RenderSink};
use danger_noodle_system_scheduler::Scheduler;
use danger_noodle_world::{self as world, query, World};
use tracing::debug;

pub use self::channel::{EventChannel, SubscriptionId};

/// Couples the world with its scheduler, subscribers and render sink.
#[derive(Debug)]
pub struct Engine<S: RenderSink = Headless> {
    world: World,
    scheduler: Scheduler,
    channel: EventChannel,
    sink: S,
    palette: Palette,
}

impl Engine<Headless> {
    /// Creates an engine that discards every frame.
    #[must_use]
    pub fn headless(config: GameConfig) -> Self {
        Self::new(config, Headless, Palette::default())
    }
}

impl<S: RenderSink> Engine<S> {
    /// Creates an idle engine painting onto `sink` with `palette`.
    #[must_use]
    pub fn new(config: GameConfig, sink: S, palette: Palette) -> Self {
        Self {
            world: World::new(config),
            scheduler: Scheduler::new(),
            channel: EventChannel::new(),
            sink,
            palette,
        }
    }

    /// Read-only access to the world, for use with [`query`].
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Subscribers notified of every published event.
    pub fn events_mut(&mut self) -> &mut EventChannel {
        &mut self.channel
    }

    /// Sink frames are painted onto.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Colours used when painting frames.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Stores the configuration read by the next [`Engine::start`].
    pub fn configure(&mut self, config: GameConfig) {
        self.submit(Command::Configure { config });
    }

    /// Begins a fresh game and paints its opening frame.
    pub fn start(&mut self) {
        self.sink.clear(self.palette.background);
        self.submit(Command::StartGame);
        self.paint();
    }

    /// Ends a running or paused game, wiping the sink when `clear` is set.
    pub fn stop(&mut self, clear: bool) {
        self.submit(Command::StopGame { clear });
    }

    /// Suspends a running game.
    pub fn pause(&mut self) {
        self.submit(Command::PauseGame);
    }

    /// Continues a paused game.
    pub fn resume(&mut self) {
        self.submit(Command::ResumeGame);
    }

    /// Stages a new tick interval, applied at the end of the next tick.
    pub fn set_tick_duration(&mut self, duration: Duration) {
        self.submit(Command::SetTickDuration { duration });
    }

    /// Asks the snake to turn.
    pub fn request_direction(&mut self, direction: Direction) {
        self.submit(Command::RequestDirection { direction });
    }

    /// Asks the snake to turn using a direction name. Unknown names are ignored.
    pub fn request_direction_named(&mut self, name: &str) {
        match name.parse::<Direction>() {
            Ok(direction) => self.request_direction(direction),
            Err(error) => debug!(%error, "ignored direction request"),
        }
    }

    /// Runs one tick of a running game.
    ///
    /// A living snake gets a cleared sink right after the `tick` event and a
    /// freshly painted frame once the tick resolves. A dead snake stops the
    /// game without clearing, leaving the collision visible.
    pub fn tick(&mut self) {
        if !query::is_running(&self.world) {
            return;
        }

        let alive = query::is_snake_alive(&self.world);
        let events = self.apply(Command::Tick);
        if alive {
            let (ticked, rest) = events.split_at(events.len().min(1));
            self.publish(ticked);
            self.sink.clear(self.palette.background);
            self.publish(rest);
            self.paint();
        } else {
            self.publish(&events);
        }
    }

    /// Feeds elapsed time to the scheduler and runs every tick that falls due.
    ///
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.scheduler.advance(dt);

        let mut executed = 0;
        while self.scheduler.take_due() {
            self.tick();
            executed += 1;
        }
        executed
    }

    /// Time left before the next scheduled tick, `None` when no timer is live.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.scheduler.time_until_due()
    }

    /// Captures the observable game state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        query::snapshot(&self.world)
    }

    fn submit(&mut self, command: Command) {
        let events = self.apply(command);
        self.publish(&events);
    }

    fn apply(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.scheduler
            .handle(&events, query::tick_duration(&self.world));
        events
    }

    fn publish(&mut self, events: &[Event]) {
        for event in events {
            if matches!(event, Event::Stopped { cleared: true }) {
                self.sink.clear(self.palette.background);
            }
            debug!(event = event.kind().name(), "publishing event");
            self.channel.publish(event);
        }
    }

    fn paint(&mut self) {
        let snake = query::snake(&self.world);
        paint_frame(
            &mut self.sink,
            query::apple(&self.world),
            snake.as_ref(),
            &self.palette,
        );
    }
}
