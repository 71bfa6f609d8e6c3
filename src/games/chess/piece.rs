//! Chess pieces.

use crate::games::types::Side;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Kind of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl PieceKind {
    /// Material value used by the greedy opponent.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }

    /// True for pieces that slide along lines.
    pub fn slides(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece owned by a side. White is side A, Black is side B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Piece {
    /// What the piece is.
    pub kind: PieceKind,
    /// Who owns it.
    pub side: Side,
}

impl Piece {
    /// Parses a letter: uppercase is White (A), lowercase is Black (B).
    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() { Side::A } else { Side::B };
        Some(Self::new(kind, side))
    }

    /// Letter for this piece, uppercase for White.
    pub fn to_char(self) -> char {
        let c = self.kind.letter();
        match self.side {
            Side::A => c.to_ascii_uppercase(),
            Side::B => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for c in "pnbrqkPNBRQK".chars() {
            let piece = Piece::from_char(c).expect("valid letter");
            assert_eq!(piece.to_char(), c);
        }
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_case_decides_side() {
        assert_eq!(Piece::from_char('Q'), Some(Piece::new(PieceKind::Queen, Side::A)));
        assert_eq!(Piece::from_char('q'), Some(Piece::new(PieceKind::Queen, Side::B)));
    }
}
