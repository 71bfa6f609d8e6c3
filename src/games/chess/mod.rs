//! Simplified "chess-shaped" game.
//!
//! Standard starting position, standard piece shapes, but no check or
//! checkmate: the game ends when a king is captured. Rook, bishop and queen
//! moves are validated by delta shape only unless `sliding_occlusion` is set.
//! A pawn reaching the far rank becomes a queen.

mod movement;
mod piece;

pub use movement::{can_move, forward, pawn_start_row, promotion_row};
pub use piece::{Piece, PieceKind};

use super::grid::Grid;
use super::rules::Rules;
use super::types::{Outcome, Side};
use super::VariantKind;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Board type for chess. Row 0 is rank 8.
pub type Board = Grid<Option<Piece>>;

/// Board edge length.
pub const SIZE: usize = 8;

const INITIAL_ROWS: [&str; 8] = [
    "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP", "RNBQKBNR",
];

/// A chess move from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    /// Source square index.
    pub from: usize,
    /// Destination square index.
    pub to: usize,
}

impl ChessMove {
    /// Creates a move between two square indices.
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for ChessMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (square_name(self.from), square_name(self.to)) {
            (Some(from), Some(to)) => write!(f, "{}{}", from, to),
            _ => write!(f, "{}->{}", self.from, self.to),
        }
    }
}

impl FromStr for ChessMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(format!("Expected a move like e2e4, got '{}'", s));
        }
        let from = parse_square(&s[..2]).ok_or_else(|| format!("Bad square '{}'", &s[..2]))?;
        let to = parse_square(&s[2..]).ok_or_else(|| format!("Bad square '{}'", &s[2..]))?;
        Ok(Self::new(from, to))
    }
}

/// Parses a square name such as `e2` into a board index.
pub fn parse_square(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?.to_digit(10)? as usize;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
        return None;
    }
    let col = file as usize - 'a' as usize;
    let row = SIZE - rank;
    Some(row * SIZE + col)
}

/// Name of a board index, such as `e2`.
pub fn square_name(index: usize) -> Option<String> {
    if index >= SIZE * SIZE {
        return None;
    }
    let (row, col) = (index / SIZE, index % SIZE);
    Some(format!("{}{}", (b'a' + col as u8) as char, SIZE - row))
}

/// Chess rules. Side A plays White (bottom), side B plays Black (top).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chess {
    /// Forbid rooks, bishops and queens from jumping over pieces.
    pub sliding_occlusion: bool,
}

impl Chess {
    /// Creates chess rules.
    pub fn new(sliding_occlusion: bool) -> Self {
        Self { sliding_occlusion }
    }

    /// Builds a board from eight rank strings, rank 8 first, `.` for empty.
    pub fn board_from_rows(rows: [&str; 8]) -> Option<Board> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for row in rows {
            if row.chars().count() != SIZE {
                return None;
            }
            for c in row.chars() {
                cells.push(if c == '.' { None } else { Some(Piece::from_char(c)?) });
            }
        }
        Grid::from_cells(SIZE, SIZE, cells)
    }

    /// Index of `side`'s king, if it is still on the board.
    pub fn king_square(board: &Board, side: Side) -> Option<usize> {
        board
            .cells()
            .iter()
            .position(|p| *p == Some(Piece::new(PieceKind::King, side)))
    }

    /// True if `side` has at least one move. Stops at the first one found.
    pub fn has_any_move(&self, board: &Board, side: Side) -> bool {
        (0..board.len()).any(|from| {
            board
                .get(from)
                .flatten()
                .filter(|p| p.side == side)
                .is_some_and(|piece| {
                    (0..board.len()).any(|to| can_move(board, piece, from, to, self.sliding_occlusion))
                })
        })
    }

    /// Renders the board with rank and file labels.
    pub fn render(board: &Board) -> String {
        let mut lines: Vec<String> = (0..SIZE)
            .map(|row| {
                let squares: String = (0..SIZE)
                    .map(|col| board.at(row, col).flatten().map_or('.', Piece::to_char))
                    .collect();
                format!("{} {}", SIZE - row, squares)
            })
            .collect();
        lines.push("  abcdefgh".to_string());
        lines.join("\n")
    }
}

impl Rules for Chess {
    type Board = Board;
    type Move = ChessMove;

    fn kind(&self) -> VariantKind {
        VariantKind::Chess
    }

    fn initial_board(&self) -> Board {
        Self::board_from_rows(INITIAL_ROWS).unwrap_or_else(|| Grid::new(SIZE, SIZE))
    }

    fn moves(&self, board: &Board, side: Side) -> Vec<ChessMove> {
        let mut moves = Vec::new();
        for from in 0..board.len() {
            let Some(piece) = board.get(from).flatten().filter(|p| p.side == side) else {
                continue;
            };
            for to in 0..board.len() {
                if can_move(board, piece, from, to, self.sliding_occlusion) {
                    moves.push(ChessMove::new(from, to));
                }
            }
        }
        moves
    }

    fn commit(&self, board: &mut Board, _side: Side, mv: ChessMove) -> Vec<usize> {
        let Some(mut piece) = board.get(mv.from).flatten() else {
            return Vec::new();
        };
        if piece.kind == PieceKind::Pawn && board.coords(mv.to).0 == promotion_row(piece.side) {
            piece.kind = PieceKind::Queen;
        }
        board.set(mv.to, Some(piece));
        board.set(mv.from, None);
        vec![mv.from, mv.to]
    }

    fn outcome(&self, board: &Board, to_move: Side) -> Outcome {
        match (
            Self::king_square(board, Side::A),
            Self::king_square(board, Side::B),
        ) {
            (None, _) => Outcome::Win(Side::B),
            (_, None) => Outcome::Win(Side::A),
            _ if !self.has_any_move(board, to_move) => Outcome::Draw,
            _ => Outcome::Undecided,
        }
    }

    fn material_gain(&self, board: &Board, mv: ChessMove) -> i32 {
        match (board.get(mv.from).flatten(), board.get(mv.to).flatten()) {
            (Some(mover), Some(target)) if mover.side != target.side => target.kind.value(),
            _ => 0,
        }
    }
}
