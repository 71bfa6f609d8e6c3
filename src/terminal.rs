//! Line-based terminal front-end.

use anyhow::{Context, Result};
use arcade_engine::arcade::memory::{Flip, MemoryGame, MemoryRunner};
use arcade_engine::arcade::sudoku::Sudoku;
use arcade_engine::{
    AnyMove, AnySnapshot, EngineConfig, EngineError, Outcome, Phase, Scoreboard, SessionManager,
    Side, TokioScheduler, VariantKind, play_out,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info, instrument, warn};

type Input = Lines<BufReader<Stdin>>;

fn input() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

async fn prompt(lines: &mut Input, text: &str) -> Result<Option<String>> {
    println!("{}", text);
    Ok(lines.next_line().await?)
}

fn status(variant: VariantKind, snapshot: &AnySnapshot) -> String {
    match snapshot.outcome() {
        Outcome::Win(side) => format!("{} wins!", variant.side_label(side)),
        Outcome::Draw => "It's a draw.".to_string(),
        Outcome::Undecided => format!("{} to move.", variant.side_label(snapshot.to_move())),
    }
}

fn score_line(variant: VariantKind, scoreboard: &Scoreboard) -> String {
    format!(
        "{} {} - {} {} (draws {})",
        variant.side_label(Side::A),
        scoreboard.a_wins(),
        scoreboard.b_wins(),
        variant.side_label(Side::B),
        scoreboard.draws()
    )
}

fn move_hint(variant: VariantKind) -> &'static str {
    match variant {
        VariantKind::TicTacToe => "a cell 1-9",
        VariantKind::ConnectFour => "a column 0-6",
        VariantKind::Chess => "a move like e2e4",
    }
}

/// Plays one board-game session until the user quits.
#[instrument(skip(config))]
pub async fn play(config: EngineConfig, variant: VariantKind, human_side: Side) -> Result<()> {
    let think_delay = Duration::from_millis(*config.think_delay_ms());
    let mut manager = SessionManager::new(config);
    let id = manager.create_session(variant, human_side);
    info!(session_id = %id, "Session started");

    let mut lines = input();
    let mut snapshot = manager.snapshot(&id)?;
    loop {
        println!("\n{}\n{}", snapshot.render(), status(variant, &snapshot));
        let text = if snapshot.phase() == Phase::Terminal {
            "Type 'r' for a rematch or 'q' to quit."
        } else {
            "Your move, 'r' to restart, 'j' for JSON, 'q' to quit:"
        };
        let Some(line) = prompt(&mut lines, text).await? else {
            break;
        };

        match line.trim() {
            "q" | "quit" => break,
            "r" | "reset" => {
                snapshot = manager.reset(&id)?;
                println!("{}", score_line(variant, &snapshot.scoreboard()));
                continue;
            }
            "j" | "json" => {
                println!("{}", snapshot.to_json()?);
                continue;
            }
            _ => {}
        }

        let report = match AnyMove::parse(variant, &line)
            .and_then(|mv| manager.submit_human_move(&id, mv))
        {
            Ok(report) => report,
            Err(e @ (EngineError::IllegalMove(_) | EngineError::InvalidState { .. })) => {
                println!("{} (enter {})", e, move_hint(variant));
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(reply) = report.opponent {
            tokio::time::sleep(think_delay).await;
            println!("Computer plays {}", reply.mv);
        }
        if let Some(outcome) = report.outcome {
            debug!(%outcome, "Game over");
            println!("{}", score_line(variant, &report.snapshot.scoreboard()));
        }
        snapshot = report.snapshot;
    }

    info!("Leaving session");
    Ok(())
}

/// Plays `games` computer-vs-computer games and prints the tally.
#[instrument(skip(config))]
pub fn selfplay(config: &EngineConfig, variant: VariantKind, games: u32, max_plies: usize) -> Result<()> {
    let strategy = config.strategy_for(variant);
    let mut scoreboard = Scoreboard::default();
    let mut unfinished = 0;

    for game in 0..games {
        let seed = config.seed().wrapping_add(u64::from(game));
        let outcome = match variant {
            VariantKind::TicTacToe => {
                play_out(&arcade_engine::tictactoe::TicTacToe, strategy, strategy, seed, max_plies)?
                    .outcome
            }
            VariantKind::ConnectFour => {
                play_out(&arcade_engine::connect_four::ConnectFour, strategy, strategy, seed, max_plies)?
                    .outcome
            }
            VariantKind::Chess => {
                let rules = arcade_engine::chess::Chess::new(config.sliding_occlusion());
                play_out(&rules, strategy, strategy, seed, max_plies)?.outcome
            }
        };
        println!("Game {}: {}", game + 1, outcome);
        if outcome.is_terminal() {
            scoreboard.record(outcome);
        } else {
            unfinished += 1;
        }
    }

    println!("{}", score_line(variant, &scoreboard));
    if unfinished > 0 {
        println!("{} game(s) hit the {} move limit", unfinished, max_plies);
    }
    Ok(())
}

/// Memory matrix with a live clock.
#[instrument(skip(config))]
pub async fn memory(config: &EngineConfig) -> Result<()> {
    let mut scheduler = TokioScheduler::current().context("Memory needs a tokio runtime")?;
    let mut runner = MemoryRunner::new(MemoryGame::new(*config.seed()));
    runner.start(&mut scheduler);
    let game = runner.game();
    let mut lines = input();

    loop {
        let table = {
            let game = game.lock().map_err(|_| anyhow::anyhow!("Memory game lock poisoned"))?;
            if game.is_won() {
                println!("Solved in {} moves and {} seconds.", game.moves(), game.elapsed_secs());
                break;
            }
            render_memory(&game)
        };
        println!("\n{}", table);
        let Some(line) = prompt(&mut lines, "Pick a card 0-15, 'q' to quit:").await? else {
            break;
        };
        if matches!(line.trim(), "q" | "quit") {
            break;
        }
        let Ok(index) = line.trim().parse::<usize>() else {
            println!("Not a card number");
            continue;
        };
        let flipped = game
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory game lock poisoned"))?
            .flip(index);
        match flipped {
            Ok(Flip::Mismatch) => println!("No match."),
            Ok(Flip::Match) => println!("Pair!"),
            Ok(_) => {}
            Err(e) => {
                warn!(index, error = %e, "Flip rejected");
                println!("{}", e);
            }
        }
    }

    runner.stop(&mut scheduler);
    Ok(())
}

fn render_memory(game: &MemoryGame) -> String {
    let cells: Vec<String> = game
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if card.open || card.matched {
                format!("{:>3}", card.symbol)
            } else {
                format!("{:>3}", i)
            }
        })
        .collect();
    let rows: Vec<String> = cells.chunks(4).map(|row| row.join(" ")).collect();
    format!(
        "{}\nmoves {}  time {}s",
        rows.join("\n"),
        game.moves(),
        game.elapsed_secs()
    )
}

/// Sudoku over stdin: `row col digit`, all 1-based, digit 0 clears.
#[instrument]
pub async fn sudoku() -> Result<()> {
    let mut puzzle = Sudoku::new();
    let mut lines = input();

    loop {
        println!("\n{}", puzzle.render());
        let Some(line) = prompt(&mut lines, "Enter 'row col digit' or 'q' to quit:").await? else {
            break;
        };
        if matches!(line.trim(), "q" | "quit") {
            break;
        }
        let numbers: Vec<usize> = line
            .split_whitespace()
            .filter_map(|part| part.parse().ok())
            .collect();
        let [row @ 1..=9, col @ 1..=9, digit] = numbers[..] else {
            println!("Expected three numbers such as '1 3 4'");
            continue;
        };
        let cell = (row - 1) * 9 + (col - 1);
        let digit = u8::try_from(digit).unwrap_or(u8::MAX);
        match puzzle.input(cell, digit) {
            Ok(true) => {
                println!("{}\nSolved!", puzzle.render());
                break;
            }
            Ok(false) => {
                let clashes = puzzle.conflicts(cell);
                if !clashes.is_empty() {
                    println!("Clashes with {} cell(s)", clashes.len());
                }
            }
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
