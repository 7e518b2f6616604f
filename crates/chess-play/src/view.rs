//! Plain-text rendering of the session's display commands.

use chess_core::{BoardSnapshot, Color, Square};
use chess_session::{BoardView, MoveEntry};
use std::io::Write;
use tracing::warn;

/// Writes the game to a terminal (or any writer) line by line.
///
/// Clock updates arrive every second, so they are only stored and shown
/// together with the board and the status line.
pub struct TerminalView<W: Write> {
    out: W,
    clocks: (String, String),
    pause_label: String,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        TerminalView {
            out,
            clocks: ("-:--".to_string(), "-:--".to_string()),
            pause_label: "Pause".to_string(),
        }
    }

    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "failed to write to the terminal");
        }
    }

    /// Current clocks as `you M:SS | ai M:SS`.
    pub fn clock_line(&self) -> String {
        format!("you {} | ai {}", self.clocks.0, self.clocks.1)
    }

    pub fn pause_label(&self) -> &str {
        &self.pause_label
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn square_list(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl<W: Write> BoardView for TerminalView<W> {
    fn render(&mut self, position: &str, orientation: Color) {
        match BoardSnapshot::from_placement(position) {
            Ok(board) => {
                let text = board.to_ascii(orientation);
                self.line("");
                self.line(&text);
            }
            Err(e) => warn!(error = %e, position, "cannot draw position"),
        }
    }

    fn status(&mut self, text: &str) {
        let line = format!("[{}] {}", self.clock_line(), text);
        self.line(&line);
    }

    fn clocks(&mut self, human: &str, opponent: &str) {
        if human == "0:00" || opponent == "0:00" {
            self.line(&format!("you {} | ai {}", human, opponent));
        }
        self.clocks = (human.to_string(), opponent.to_string());
    }

    fn append_move(&mut self, entry: &MoveEntry) {
        let dots = match entry.color {
            Color::White => ".",
            Color::Black => "...",
        };
        self.line(&format!("{}{} {}", entry.number, dots, entry.san));
    }

    fn truncate_moves(&mut self, len: usize) {
        self.line(&format!("(move list back to {} moves)", len));
    }

    fn clear_moves(&mut self) {}

    fn highlight(&mut self, squares: &[Square]) {
        if !squares.is_empty() {
            self.line(&format!("targets: {}", square_list(squares)));
        }
    }

    fn select(&mut self, square: Square) {
        self.line(&format!("selected {}", square));
    }

    fn controls(&mut self, _undo_enabled: bool, _pause_enabled: bool, pause_label: &str) {
        self.pause_label = pause_label.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_session::{dispatch, UiCommand};

    fn output(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn draws_board_from_fen() {
        let mut view = TerminalView::new(Vec::new());
        view.render(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            Color::White,
        );
        let text = output(view);
        assert!(text.contains("8  r n b q k b n r"));
        assert!(text.contains("4  . . . . P . . ."));
        assert!(text.contains("   a b c d e f g h"));
    }

    #[test]
    fn status_carries_clocks() {
        let mut view = TerminalView::new(Vec::new());
        dispatch(
            &mut view,
            &[
                UiCommand::Clocks {
                    human: "4:59".to_string(),
                    opponent: "5:00".to_string(),
                },
                UiCommand::Status {
                    text: "Your move".to_string(),
                },
            ],
        );
        assert_eq!(output(view), "[you 4:59 | ai 5:00] Your move\n");
    }

    #[test]
    fn moves_are_numbered() {
        let mut view = TerminalView::new(Vec::new());
        view.append_move(&MoveEntry {
            ply: 1,
            number: 1,
            color: Color::White,
            san: "e4".to_string(),
        });
        view.append_move(&MoveEntry {
            ply: 2,
            number: 1,
            color: Color::Black,
            san: "c5".to_string(),
        });
        assert_eq!(output(view), "1. e4\n1... c5\n");
    }

    #[test]
    fn remembers_pause_label() {
        let mut view = TerminalView::new(Vec::new());
        view.controls(false, true, "Resume");
        assert_eq!(view.pause_label(), "Resume");
    }
}
