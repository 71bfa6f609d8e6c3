//! Memory matrix: find the eight pairs among sixteen face-down cards.

use super::ArcadeError;
use crate::rng::GameRng;
use crate::scheduler::{Scheduler, TickHandle};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Card faces; each appears twice.
pub const SYMBOLS: [char; 8] = ['🚀', '🛸', '🌍', '🌕', '⭐', '☄', '👾', '🤖'];
/// Time between clock ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// One card on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Face symbol.
    pub symbol: char,
    /// Face up right now.
    pub open: bool,
    /// Part of a found pair.
    pub matched: bool,
}

/// Result of flipping a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// First card of a pair is face up.
    First,
    /// The two open cards match.
    Match,
    /// The two open cards differ and stay up until concealed.
    Mismatch,
    /// The last pair was found.
    Won,
}

/// Memory game state.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    cards: Vec<Card>,
    selected: Vec<usize>,
    moves: u32,
    elapsed_secs: u32,
    started: bool,
}

impl MemoryGame {
    /// Deals the shuffled deck for `seed`.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        let mut symbols: Vec<char> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        GameRng::new(seed).shuffle(&mut symbols);
        let cards = symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                open: false,
                matched: false,
            })
            .collect();
        Self {
            cards,
            selected: Vec::with_capacity(2),
            moves: 0,
            elapsed_secs: 0,
            started: false,
        }
    }

    /// Cards in table order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Completed pair attempts.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Seconds counted since the first flip.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// True once every card is matched.
    pub fn is_won(&self) -> bool {
        self.cards.iter().all(|c| c.matched)
    }

    /// True while two mismatched cards wait to be turned back.
    pub fn mismatch_pending(&self) -> bool {
        self.selected.len() == 2
    }

    /// Turns a card face up.
    ///
    /// # Errors
    ///
    /// Rejects flips off the table, of open or matched cards, while a
    /// mismatch is pending, and after the game is won.
    #[instrument(skip(self))]
    pub fn flip(&mut self, index: usize) -> Result<Flip, ArcadeError> {
        if self.is_won() {
            return Err(ArcadeError::GameOver);
        }
        if self.mismatch_pending() {
            return Err(ArcadeError::MismatchPending);
        }
        let card = self
            .cards
            .get_mut(index)
            .ok_or(ArcadeError::OutOfRange(index))?;
        if card.open || card.matched {
            return Err(ArcadeError::CardOpen(index));
        }
        card.open = true;
        self.started = true;
        self.selected.push(index);

        let [first, second] = self.selected[..] else {
            return Ok(Flip::First);
        };
        self.moves += 1;
        if self.cards[first].symbol != self.cards[second].symbol {
            debug!(first, second, "Mismatch");
            return Ok(Flip::Mismatch);
        }

        for i in [first, second] {
            self.cards[i].matched = true;
        }
        self.selected.clear();
        if self.is_won() {
            info!(moves = self.moves, secs = self.elapsed_secs, "Memory solved");
            Ok(Flip::Won)
        } else {
            Ok(Flip::Match)
        }
    }

    /// Turns a pending mismatched pair face down. Returns false if there was none.
    pub fn conceal_mismatch(&mut self) -> bool {
        if !self.mismatch_pending() {
            return false;
        }
        for i in self.selected.drain(..) {
            if let Some(card) = self.cards.get_mut(i) {
                card.open = false;
            }
        }
        true
    }

    /// One clock second: conceals a pending mismatch and advances the timer
    /// while the game is under way.
    pub fn tick(&mut self) {
        self.conceal_mismatch();
        if self.started && !self.is_won() {
            self.elapsed_secs += 1;
        }
    }
}

/// Drives a shared [`MemoryGame`] clock from a scheduler at [`TICK`].
#[derive(Debug)]
pub struct MemoryRunner {
    game: Arc<Mutex<MemoryGame>>,
    handle: Option<TickHandle>,
}

impl MemoryRunner {
    /// Wraps a game for scheduling.
    pub fn new(game: MemoryGame) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            handle: None,
        }
    }

    /// Shared game.
    pub fn game(&self) -> Arc<Mutex<MemoryGame>> {
        Arc::clone(&self.game)
    }

    /// Starts the clock. Does nothing if already running.
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        if self.handle.is_some() {
            return;
        }
        let game = Arc::clone(&self.game);
        self.handle = Some(scheduler.on_tick(
            TICK,
            Box::new(move || match game.lock() {
                Ok(mut game) => game.tick(),
                Err(_) => warn!("Memory game lock poisoned"),
            }),
        ));
    }

    /// Stops the clock.
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

    fn pair_of(game: &MemoryGame, index: usize) -> usize {
        let symbol = game.cards()[index].symbol;
        (0..game.cards().len())
            .find(|&i| i != index && game.cards()[i].symbol == symbol)
            .expect("every symbol has a pair")
    }

    fn non_pair_of(game: &MemoryGame, index: usize) -> usize {
        let symbol = game.cards()[index].symbol;
        (0..game.cards().len())
            .find(|&i| game.cards()[i].symbol != symbol)
            .expect("other symbols exist")
    }

    #[test]
    fn test_deal_is_seeded() {
        let a = MemoryGame::new(5);
        let b = MemoryGame::new(5);
        assert_eq!(a.cards(), b.cards());
        assert_eq!(a.cards().len(), 16);
        for symbol in SYMBOLS {
            assert_eq!(a.cards().iter().filter(|c| c.symbol == symbol).count(), 2);
        }
    }

    #[test]
    fn test_match_and_mismatch() {
        let mut game = MemoryGame::new(3);
        let other = non_pair_of(&game, 0);
        assert_eq!(game.flip(0), Ok(Flip::First));
        assert_eq!(game.flip(0), Err(ArcadeError::CardOpen(0)));
        assert_eq!(game.flip(other), Ok(Flip::Mismatch));
        let third = (0..16).find(|&i| i != 0 && i != other).expect("free card");
        assert_eq!(game.flip(third), Err(ArcadeError::MismatchPending));
        assert!(game.conceal_mismatch());
        assert!(!game.cards()[0].open);

        let partner = pair_of(&game, 0);
        game.flip(0).expect("flip");
        assert_eq!(game.flip(partner), Ok(Flip::Match));
        assert!(game.cards()[partner].matched);
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn test_full_solve() {
        let mut game = MemoryGame::new(9);
        let mut last = Flip::First;
        for i in 0..16 {
            if game.cards()[i].matched {
                continue;
            }
            let partner = pair_of(&game, i);
            game.flip(i).expect("flip");
            last = game.flip(partner).expect("flip partner");
        }
        assert_eq!(last, Flip::Won);
        assert!(game.is_won());
        assert_eq!(game.moves(), 8);
        assert_eq!(game.flip(0), Err(ArcadeError::GameOver));
    }

    #[test]
    fn test_clock_runs_only_while_playing() {
        let mut scheduler = ManualScheduler::new();
        let mut runner = MemoryRunner::new(MemoryGame::new(1));
        runner.start(&mut scheduler);
        scheduler.advance(Duration::from_secs(3));
        let game = runner.game();
        assert_eq!(game.lock().expect("lock").elapsed_secs(), 0);

        let other = non_pair_of(&game.lock().expect("lock"), 0);
        game.lock().expect("lock").flip(0).expect("flip");
        game.lock().expect("lock").flip(other).expect("flip");
        scheduler.advance(Duration::from_secs(2));
        let game = game.lock().expect("lock");
        assert_eq!(game.elapsed_secs(), 2);
        assert!(!game.mismatch_pending());
    }
}
