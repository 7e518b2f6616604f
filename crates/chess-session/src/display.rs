//! Display commands and the move list.
//!
//! The session owns no pixels. It describes what should change on screen as
//! a list of [`UiCommand`]s; a front end either consumes them directly,
//! forwards them as JSON, or implements [`BoardView`] and calls [`dispatch`].

use chess_core::{Color, Square};
use serde::Serialize;

/// One row of the move list: a move number, White's move and Black's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveEntry {
    /// Position of the move in the game, starting at 1.
    pub ply: usize,
    /// Full-move number shown next to the move.
    pub number: usize,
    pub color: Color,
    pub san: String,
}

/// A change to apply to the board, status line, clocks, move list or buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    /// Show `position` (a FEN string) from `orientation`'s side.
    Render { position: String, orientation: Color },
    /// Allow or forbid dragging pieces.
    SetDraggable { enabled: bool },
    /// Mark squares as possible destinations.
    Highlight { squares: Vec<Square> },
    /// Mark the square of the selected piece.
    Select { square: Square },
    /// Remove every highlight and selection mark.
    ClearHighlights,
    Status { text: String },
    /// Both clocks, formatted as `M:SS`.
    Clocks { human: String, opponent: String },
    AppendMove(MoveEntry),
    /// Keep only the first `len` moves.
    TruncateMoves { len: usize },
    ClearMoves,
    Controls {
        undo_enabled: bool,
        pause_enabled: bool,
        pause_label: String,
    },
}

/// Front end that can show a game.
///
/// Only rendering, status, clocks and the move list are required; the rest
/// default to doing nothing for front ends without those affordances.
pub trait BoardView {
    fn render(&mut self, position: &str, orientation: Color);

    fn status(&mut self, text: &str);

    fn clocks(&mut self, human: &str, opponent: &str);

    fn append_move(&mut self, entry: &MoveEntry);

    fn truncate_moves(&mut self, len: usize);

    fn clear_moves(&mut self) {
        self.truncate_moves(0);
    }

    fn set_draggable(&mut self, _enabled: bool) {}

    fn highlight(&mut self, _squares: &[Square]) {}

    fn select(&mut self, _square: Square) {}

    fn clear_highlights(&mut self) {}

    fn controls(&mut self, _undo_enabled: bool, _pause_enabled: bool, _pause_label: &str) {}
}

/// Applies `commands` to `view` in order.
pub fn dispatch<V: BoardView + ?Sized>(view: &mut V, commands: &[UiCommand]) {
    for command in commands {
        match command {
            UiCommand::Render {
                position,
                orientation,
            } => view.render(position, *orientation),
            UiCommand::SetDraggable { enabled } => view.set_draggable(*enabled),
            UiCommand::Highlight { squares } => view.highlight(squares),
            UiCommand::Select { square } => view.select(*square),
            UiCommand::ClearHighlights => view.clear_highlights(),
            UiCommand::Status { text } => view.status(text),
            UiCommand::Clocks { human, opponent } => view.clocks(human, opponent),
            UiCommand::AppendMove(entry) => view.append_move(entry),
            UiCommand::TruncateMoves { len } => view.truncate_moves(*len),
            UiCommand::ClearMoves => view.clear_moves(),
            UiCommand::Controls {
                undo_enabled,
                pause_enabled,
                pause_label,
            } => view.controls(*undo_enabled, *pause_enabled, pause_label),
        }
    }
}

/// A numbered row as shown in a two-column move list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveRow {
    pub number: usize,
    pub white: Option<String>,
    pub black: Option<String>,
}

/// The moves played so far, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    entries: Vec<MoveEntry>,
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move and returns its entry.
    pub fn push(&mut self, color: Color, san: impl Into<String>) -> MoveEntry {
        let ply = self.entries.len() + 1;
        // A game set up with Black to move starts its first row with Black.
        let offset = match self.entries.first().map(|e| e.color).unwrap_or(color) {
            Color::White => 0,
            Color::Black => 1,
        };
        let entry = MoveEntry {
            ply,
            number: (ply + offset + 1) / 2,
            color,
            san: san.into(),
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MoveEntry] {
        &self.entries
    }

    /// Groups the moves into numbered rows.
    pub fn rows(&self) -> Vec<MoveRow> {
        let mut rows: Vec<MoveRow> = Vec::new();
        for entry in &self.entries {
            let starts_row = match rows.last() {
                None => true,
                Some(row) => row.number != entry.number,
            };
            if starts_row {
                rows.push(MoveRow {
                    number: entry.number,
                    ..MoveRow::default()
                });
            }
            if let Some(row) = rows.last_mut() {
                match entry.color {
                    Color::White => row.white = Some(entry.san.clone()),
                    Color::Black => row.black = Some(entry.san.clone()),
                }
            }
        }
        rows
    }
}
