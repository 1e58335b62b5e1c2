use std::time::Duration;

use danger_noodle_core::{Command, Direction, Event, GameConfig};
use danger_noodle_system_scheduler::Scheduler;
use danger_noodle_world::{self as world, query, World};

fn drain(scheduler: &mut Scheduler) -> usize {
    let mut due = 0;
    while scheduler.take_due() {
        due += 1;
    }
    due
}

#[test]
fn fires_once_per_elapsed_interval() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(Duration::from_millis(50));

    scheduler.advance(Duration::from_millis(49));
    assert_eq!(drain(&mut scheduler), 0);
    assert_eq!(scheduler.time_until_due(), Some(Duration::from_millis(1)));

    scheduler.advance(Duration::from_millis(1));
    assert_eq!(drain(&mut scheduler), 1);

    scheduler.advance(Duration::from_millis(175));
    assert_eq!(drain(&mut scheduler), 3);
    assert_eq!(scheduler.time_until_due(), Some(Duration::from_millis(25)));
}

#[test]
fn rescheduling_replaces_the_live_timer() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(Duration::from_millis(50));
    scheduler.advance(Duration::from_millis(40));

    scheduler.schedule(Duration::from_millis(100));
    assert_eq!(scheduler.interval(), Some(Duration::from_millis(100)));

    scheduler.advance(Duration::from_millis(60));
    assert_eq!(drain(&mut scheduler), 0, "old timer must not fire");
    scheduler.advance(Duration::from_millis(40));
    assert_eq!(drain(&mut scheduler), 1);
}

#[test]
fn lifecycle_events_arm_and_cancel_the_timer() {
    let tick = Duration::from_millis(50);
    let mut scheduler = Scheduler::new();

    scheduler.handle(&[Event::Started], tick);
    assert_eq!(scheduler.interval(), Some(tick));

    scheduler.advance(Duration::from_millis(30));
    scheduler.handle(&[Event::Paused], tick);
    assert!(!scheduler.is_armed());
    scheduler.advance(Duration::from_secs(5));
    assert_eq!(drain(&mut scheduler), 0);

    scheduler.handle(&[Event::Resumed], tick);
    assert_eq!(scheduler.time_until_due(), Some(tick));

    scheduler.handle(
        &[
            Event::Ticked { tick: 1 },
            Event::TickDurationChanged {
                duration: Duration::from_millis(20),
            },
        ],
        tick,
    );
    assert_eq!(scheduler.interval(), Some(Duration::from_millis(20)));

    scheduler.handle(&[Event::Stopped { cleared: false }], tick);
    assert!(!scheduler.is_armed());
}

#[test]
fn movement_events_leave_the_timer_alone() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(Duration::from_millis(50));
    scheduler.advance(Duration::from_millis(30));

    scheduler.handle(
        &[
            Event::HeadingChanged {
                direction: Direction::Up,
                delta: Direction::Up.delta(),
            },
            Event::AppleEaten { apples_eaten: 1 },
            Event::BodyHit,
        ],
        Duration::from_millis(50),
    );

    assert_eq!(scheduler.time_until_due(), Some(Duration::from_millis(20)));
}

#[test]
fn drives_a_world_until_the_wall_stops_it() {
    let mut world = World::new(GameConfig {
        width: 10,
        height: 10,
        solid_walls: true,
        initial_heading: Some(Direction::Right),
        seed: Some(17),
        ..GameConfig::default()
    });
    let mut scheduler = Scheduler::new();

    let mut events = Vec::new();
    world::apply(&mut world, Command::StartGame, &mut events);
    scheduler.handle(&events, query::tick_duration(&world));

    let mut frames = 0;
    while scheduler.is_armed() && frames < 100 {
        frames += 1;
        scheduler.advance(Duration::from_millis(10));
        while scheduler.take_due() {
            let mut events = Vec::new();
            world::apply(&mut world, Command::Tick, &mut events);
            scheduler.handle(&events, query::tick_duration(&world));
        }
    }

    // Five ticks reach the wall and the sixth stops the loop.
    assert!(query::is_stopped(&world));
    assert_eq!(query::ticks(&world), 5);
    assert_eq!(frames, 30);
}
