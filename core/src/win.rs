use crate::*;

/// Whether every safe cell of `board` has been revealed.
pub fn is_won(board: &Board) -> bool {
    board
        .cells()
        .all(|(_, cell)| cell.is_mine || cell.is_revealed())
}
