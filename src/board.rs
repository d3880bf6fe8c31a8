use std::fmt;

pub const CELL_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Nine cells, row-major:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
    x_is_next: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            x_is_next: true,
        }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn next_mark(&self) -> Mark {
        if self.x_is_next {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Places the next mark at `index`. Returns `false` and leaves the board
    /// untouched when the index is out of range or the cell is already taken.
    pub fn apply_move(&mut self, index: usize) -> bool {
        let mark = self.next_mark();
        let Some(slot) = self.cells.get_mut(index) else {
            tracing::debug!(index, "move ignored: index out of range");
            return false;
        };
        if slot.is_some() {
            tracing::debug!(index, "move ignored: cell occupied");
            return false;
        }

        *slot = Some(mark);
        self.x_is_next = !self.x_is_next;
        tracing::debug!(index, %mark, "move applied");
        true
    }

    pub fn reset(&mut self) {
        self.cells = [None; CELL_COUNT];
        self.x_is_next = true;
        tracing::debug!("board reset");
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, Mark, CELL_COUNT};

    #[test]
    fn new_board_is_empty_with_x_to_move() {
        let board = Board::new();
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.next_mark(), Mark::X);
    }

    #[test]
    fn apply_move_places_current_mark_and_flips_turn() {
        let mut board = Board::new();
        assert!(board.apply_move(4));
        assert_eq!(board.cell(4), Some(Mark::X));
        assert_eq!(board.next_mark(), Mark::O);

        assert!(board.apply_move(0));
        assert_eq!(board.cell(0), Some(Mark::O));
        assert_eq!(board.next_mark(), Mark::X);
    }

    #[test]
    fn apply_move_on_filled_cell_is_a_no_op() {
        let mut board = Board::new();
        board.apply_move(4);
        let before = board.clone();

        assert!(!board.apply_move(4));
        assert_eq!(board, before);
        assert_eq!(board.next_mark(), Mark::O);
    }

    #[test]
    fn apply_move_out_of_range_is_a_no_op() {
        let mut board = Board::new();
        assert!(!board.apply_move(CELL_COUNT));
        assert!(!board.apply_move(usize::MAX));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn reset_restores_empty_board_and_x_to_move() {
        let mut board = Board::new();
        for index in [0, 4, 8] {
            board.apply_move(index);
        }
        assert_eq!(board.next_mark(), Mark::O);

        board.reset();
        assert_eq!(board, Board::new());
        assert!(board.cells().iter().all(Option::is_none));
    }

    #[test]
    fn mark_display_and_opposite() {
        assert_eq!(Mark::X.to_string(), "X");
        assert_eq!(Mark::O.to_string(), "O");
        assert_eq!(Mark::X.opposite(), Mark::O);
        assert_eq!(Mark::O.opposite(), Mark::X);
    }
}
