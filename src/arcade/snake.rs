//! Snake on a 20x20 field.

use crate::rng::GameRng;
use crate::scheduler::{Scheduler, TickHandle};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Field width and height.
pub const FIELD: i32 = 20;
/// Time between moves.
pub const TICK: Duration = Duration::from_millis(100);
/// Every this many points counts as a milestone.
pub const MILESTONE: u32 = 5;

const START: Point = Point { x: 10, y: 10 };
const FIRST_FOOD: Point = Point { x: 15, y: 5 };

/// A cell on the field; `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Heading of the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The opposite heading.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    /// The snake moved one cell.
    Moved,
    /// The snake ate and grew; carries the new score.
    Ate(u32),
    /// The snake ate and the score reached a multiple of [`MILESTONE`].
    Milestone(u32),
    /// The snake hit a wall or itself; the game is over.
    Crashed,
    /// The game was already over; nothing happened.
    Idle,
}

/// Snake state.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    body: VecDeque<Point>,
    heading: Direction,
    pending: Direction,
    food: Option<Point>,
    score: u32,
    over: bool,
    rng: GameRng,
}

impl SnakeGame {
    /// New game: one segment at (10,10) heading up, food at (15,5).
    pub fn new(seed: u64) -> Self {
        Self {
            body: VecDeque::from([START]),
            heading: Direction::Up,
            pending: Direction::Up,
            food: Some(FIRST_FOOD),
            score: 0,
            over: false,
            rng: GameRng::new(seed),
        }
    }

    /// Segments, head first.
    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Snake length.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Current food cell, `None` once the field is full.
    pub fn food(&self) -> Option<Point> {
        self.food
    }

    /// Food eaten.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True after a crash or once the field is full.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Requests a turn for the next tick. Reversing onto the body is ignored.
    pub fn steer(&mut self, direction: Direction) {
        if direction != self.heading.reverse() {
            self.pending = direction;
        }
    }

    /// Starts over with the same generator.
    pub fn restart(&mut self) {
        self.body = VecDeque::from([START]);
        self.heading = Direction::Up;
        self.pending = Direction::Up;
        self.food = Some(FIRST_FOOD);
        self.score = 0;
        self.over = false;
    }

    /// Moves the snake one cell.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn tick(&mut self) -> SnakeEvent {
        if self.over {
            return SnakeEvent::Idle;
        }
        self.heading = self.pending;
        let Some(&head) = self.body.front() else {
            return SnakeEvent::Idle;
        };
        let (dx, dy) = self.heading.delta();
        let next = Point {
            x: head.x + dx,
            y: head.y + dy,
        };

        let eating = self.food == Some(next);
        // The tail cell frees up this tick unless the snake grows.
        let solid = self.body.len() - usize::from(!eating);
        let off_field = !(0..FIELD).contains(&next.x) || !(0..FIELD).contains(&next.y);
        if off_field || self.body.iter().take(solid).any(|p| *p == next) {
            self.over = true;
            info!(score = self.score, "Snake crashed");
            return SnakeEvent::Crashed;
        }
        if !eating {
            self.body.pop_back();
        }
        self.body.push_front(next);

        if !eating {
            return SnakeEvent::Moved;
        }
        self.score += 1;
        self.food = self.spawn_food();
        if self.food.is_none() {
            self.over = true;
            info!(score = self.score, "Field filled");
        }
        debug!(score = self.score, food = ?self.food, "Food eaten");
        if self.score % MILESTONE == 0 {
            SnakeEvent::Milestone(self.score)
        } else {
            SnakeEvent::Ate(self.score)
        }
    }

    fn spawn_food(&mut self) -> Option<Point> {
        let free: Vec<Point> = (0..FIELD)
            .flat_map(|y| (0..FIELD).map(move |x| Point { x, y }))
            .filter(|p| !self.body.contains(p))
            .collect();
        self.rng.choose(&free).copied()
    }
}

/// Drives a shared [`SnakeGame`] from a scheduler at [`TICK`].
#[derive(Debug)]
pub struct SnakeRunner {
    game: Arc<Mutex<SnakeGame>>,
    handle: Option<TickHandle>,
}

impl SnakeRunner {
    /// Wraps a game for scheduling.
    pub fn new(game: SnakeGame) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            handle: None,
        }
    }

    /// Shared game for readers and for steering.
    pub fn game(&self) -> Arc<Mutex<SnakeGame>> {
        Arc::clone(&self.game)
    }

    /// True while ticks are scheduled.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Starts ticking. Does nothing if already running.
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        if self.handle.is_some() {
            return;
        }
        let game = Arc::clone(&self.game);
        let handle = scheduler.on_tick(
            TICK,
            Box::new(move || match game.lock() {
                Ok(mut game) => {
                    game.tick();
                }
                Err(_) => warn!("Snake game lock poisoned"),
            }),
        );
        self.handle = Some(handle);
    }

    /// Stops ticking.
    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    #[test]
    fn test_moves_up_by_default() {
        let mut game = SnakeGame::new(1);
        assert_eq!(game.tick(), SnakeEvent::Moved);
        assert_eq!(game.body().next(), Some(&Point { x: 10, y: 9 }));
        assert_eq!(game.len(), 1);
    }

    #[test]
    fn test_reversal_ignored() {
        let mut game = SnakeGame::new(1);
        game.steer(Direction::Down);
        game.tick();
        assert_eq!(game.body().next(), Some(&Point { x: 10, y: 9 }));
    }

    #[test]
    fn test_eats_first_food() {
        let mut game = SnakeGame::new(1);
        game.steer(Direction::Right);
        for _ in 0..5 {
            game.tick();
        }
        game.steer(Direction::Up);
        for _ in 0..4 {
            assert_eq!(game.tick(), SnakeEvent::Moved);
        }
        assert_eq!(game.tick(), SnakeEvent::Ate(1));
        assert_eq!(game.len(), 2);
        let food = game.food().expect("food respawned");
        assert!(game.body().all(|p| *p != food));
    }

    #[test]
    fn test_wall_ends_game() {
        let mut game = SnakeGame::new(1);
        for _ in 0..10 {
            assert_eq!(game.tick(), SnakeEvent::Moved);
        }
        assert_eq!(game.tick(), SnakeEvent::Crashed);
        assert!(game.is_over());
        assert_eq!(game.tick(), SnakeEvent::Idle);
        game.restart();
        assert!(!game.is_over());
    }

    #[test]
    fn test_runner_ticks_from_scheduler() {
        let mut scheduler = ManualScheduler::new();
        let mut runner = SnakeRunner::new(SnakeGame::new(1));
        runner.start(&mut scheduler);
        scheduler.advance(Duration::from_millis(300));
        {
            let game = runner.game();
            let game = game.lock().expect("lock");
            assert_eq!(game.body().next(), Some(&Point { x: 10, y: 7 }));
        }
        runner.stop(&mut scheduler);
        assert!(!runner.is_running());
        assert_eq!(scheduler.active(), 0);
    }
}
