use std::fmt::Write;

use termion::{clear, cursor};

use crate::amazons_move::AmazonsMove;
use crate::board::position::Position;
use crate::board::side::Side;
use crate::board::{Board, Tile};

/// Frame buffer for the terminal view of a match.
pub struct GameDisplay {
    buffer: String,
    clear_screen: bool,
}

impl Default for GameDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDisplay {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(2048),
            clear_screen: false,
        }
    }

    /// Redraws from the top-left corner instead of scrolling.
    pub fn clearing() -> Self {
        Self {
            clear_screen: true,
            ..Self::new()
        }
    }

    fn clear(&mut self) {
        self.buffer.clear();
        if self.clear_screen {
            let _ = write!(self.buffer, "{}{}", cursor::Goto(1, 1), clear::All);
        }
    }

    pub fn render_game_state(
        &mut self,
        board: &Board,
        side_to_move: Side,
        last_move: Option<&AmazonsMove>,
        stats: Option<&str>,
    ) {
        self.clear();
        self.write_board(board, last_move);

        let _ = writeln!(self.buffer, "\nTurn: side {}", side_to_move);
        if let Some(last_move) = last_move {
            let _ = writeln!(self.buffer, "Last move: {} ({})", last_move, last_move.side);
        }
        if let Some(stats) = stats {
            let _ = writeln!(self.buffer, "\n{}", stats);
        }

        print!("{}", self.buffer);
    }

    /// Board with column and row indices. The last move's destination and
    /// burn are shown in upper case.
    fn write_board(&mut self, board: &Board, last_move: Option<&AmazonsMove>) {
        let dimensions = board.dimensions();

        self.buffer.push_str("   ");
        for col in 0..dimensions.cols() {
            let _ = write!(self.buffer, "{:>2}", col);
        }
        self.buffer.push('\n');

        for row in 0..dimensions.rows() {
            let _ = write!(self.buffer, "{:>2} ", row);
            for col in 0..dimensions.cols() {
                let position = Position::new(row, col);
                let tile = board.get(position).unwrap_or(Tile::Empty);
                let highlighted = last_move
                    .map_or(false, |m| m.destination == position || m.burn == position);
                let c = if highlighted {
                    tile.to_char().to_ascii_uppercase()
                } else {
                    tile.to_char()
                };
                let _ = write!(self.buffer, " {}", c);
            }
            self.buffer.push('\n');
        }
    }

    pub fn buffer(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazons_position;

    #[test]
    fn test_render_highlights_last_move() {
        let board = amazons_position! { 2, 3;
            .ax
            ...
        };
        let last_move = AmazonsMove::new(
            Side::A,
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(0, 2),
        );
        let mut display = GameDisplay::new();
        display.render_game_state(&board, Side::B, Some(&last_move), Some("* Score: 1"));
        let frame = display.buffer();

        assert!(frame.starts_with("    0 1 2\n 0  . A X\n 1  . . .\n"));
        assert!(frame.contains("Turn: side B"));
        assert!(frame.contains("Last move: 1,1->0,1/0,2 (A)"));
        assert!(frame.contains("* Score: 1"));
    }
}
