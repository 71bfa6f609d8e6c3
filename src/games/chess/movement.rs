//! Movement predicates for the simplified chess variant.
//!
//! Pieces move by the shape of their coordinate delta. There is no check,
//! castling or en passant. Sliding pieces ignore blockers unless occlusion is
//! switched on.

use super::piece::{Piece, PieceKind};
use super::Board;
use crate::games::types::Side;

/// Row direction a side's pawns advance in.
pub fn forward(side: Side) -> isize {
    match side {
        Side::A => -1,
        Side::B => 1,
    }
}

/// Row a side's pawns start on.
pub fn pawn_start_row(side: Side) -> usize {
    match side {
        Side::A => 6,
        Side::B => 1,
    }
}

/// Row on which a side's pawns promote.
pub fn promotion_row(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 7,
    }
}

/// Whether `piece` standing on `from` may move to `to`.
pub fn can_move(board: &Board, piece: Piece, from: usize, to: usize, occlusion: bool) -> bool {
    if from == to {
        return false;
    }
    let Some(target) = board.get(to) else {
        return false;
    };
    if target.is_some_and(|t| t.side == piece.side) {
        return false;
    }

    let (fr, fc) = board.coords(from);
    let (tr, tc) = board.coords(to);
    let dr = tr as isize - fr as isize;
    let dc = tc as isize - fc as isize;

    let shape_ok = match piece.kind {
        PieceKind::Pawn => return pawn_move(board, piece.side, from, dr, dc, target),
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Knight => {
            (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
        }
        PieceKind::Rook => dr == 0 || dc == 0,
        PieceKind::Bishop => dr.abs() == dc.abs(),
        PieceKind::Queen => dr == 0 || dc == 0 || dr.abs() == dc.abs(),
    };

    shape_ok && (!occlusion || !piece.kind.slides() || path_clear(board, from, dr, dc))
}

fn pawn_move(
    board: &Board,
    side: Side,
    from: usize,
    dr: isize,
    dc: isize,
    target: Option<Piece>,
) -> bool {
    let fwd = forward(side);
    let (fr, fc) = board.coords(from);

    if dc == 0 && dr == fwd {
        return target.is_none();
    }
    if dc == 0 && dr == 2 * fwd && fr == pawn_start_row(side) {
        let middle = board.index((fr as isize + fwd) as usize, fc);
        return target.is_none() && board.get(middle).flatten().is_none();
    }
    if dc.abs() == 1 && dr == fwd {
        return target.is_some_and(|t| t.side != side);
    }
    false
}

/// True when every square strictly between `from` and `from + (dr, dc)` is empty.
fn path_clear(board: &Board, from: usize, dr: isize, dc: isize) -> bool {
    let steps = dr.abs().max(dc.abs());
    let (sr, sc) = (dr.signum(), dc.signum());
    let (fr, fc) = board.coords(from);

    (1..steps).all(|step| {
        let r = (fr as isize + sr * step) as usize;
        let c = (fc as isize + sc * step) as usize;
        board.at(r, c).flatten().is_none()
    })
}
