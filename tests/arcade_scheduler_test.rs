//! Tests for the timer-driven arcade games on both schedulers.

use arcade_engine::arcade::memory::{MemoryGame, MemoryRunner};
use arcade_engine::arcade::snake::{Direction, Point, SnakeGame, SnakeRunner};
use arcade_engine::{ManualScheduler, TokioScheduler};
use std::time::Duration;

#[test]
fn test_snake_steered_between_ticks() {
    let mut scheduler = ManualScheduler::new();
    let mut runner = SnakeRunner::new(SnakeGame::new(3));
    runner.start(&mut scheduler);
    let game = runner.game();

    scheduler.advance(Duration::from_millis(100));
    game.lock().expect("lock").steer(Direction::Left);
    scheduler.advance(Duration::from_millis(200));

    let game = game.lock().expect("lock");
    assert_eq!(game.body().next(), Some(&Point { x: 8, y: 9 }));
    assert!(!game.is_over());
}

#[test]
fn test_snake_crash_stops_movement() {
    let mut scheduler = ManualScheduler::new();
    let mut runner = SnakeRunner::new(SnakeGame::new(3));
    runner.start(&mut scheduler);
    scheduler.advance(Duration::from_secs(5));

    let game = runner.game();
    let game = game.lock().expect("lock");
    assert!(game.is_over());
    assert_eq!(game.body().next(), Some(&Point { x: 10, y: 0 }));
    assert_eq!(game.score(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_snake_on_tokio_clock() {
    let mut scheduler = TokioScheduler::current().expect("inside runtime");
    let mut runner = SnakeRunner::new(SnakeGame::new(3));
    runner.start(&mut scheduler);

    tokio::time::sleep(Duration::from_millis(450)).await;
    runner.stop(&mut scheduler);
    tokio::time::sleep(Duration::from_millis(500)).await;

    let game = runner.game();
    let game = game.lock().expect("lock");
    assert_eq!(game.body().next(), Some(&Point { x: 10, y: 6 }));
}

#[tokio::test(start_paused = true)]
async fn test_memory_clock_on_tokio() {
    let mut scheduler = TokioScheduler::current().expect("inside runtime");
    let mut runner = MemoryRunner::new(MemoryGame::new(4));
    runner.start(&mut scheduler);
    runner.game().lock().expect("lock").flip(0).expect("flip");

    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(runner.game().lock().expect("lock").elapsed_secs(), 3);
}
