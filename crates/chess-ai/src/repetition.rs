//! Steering the opponent away from its own recent moves.

use chess_core::Move;

/// Number of recent opponent moves a candidate is checked against.
pub const REPETITION_WINDOW: usize = 3;

/// The opponent's move labels, most recent last.
///
/// The whole history is kept so an undo can drop exactly one label and the
/// window slides back to what it was before that move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionWindow {
    /// Every opponent label of the game, not just the window.
    /// [`recent`](Self::recent) is the bounded view.
    labels: Vec<String>,
}

impl RepetitionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an opponent move label.
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Forgets the most recent label.
    pub fn pop(&mut self) -> Option<String> {
        self.labels.pop()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Returns the last [`REPETITION_WINDOW`] labels, oldest first.
    pub fn recent(&self) -> &[String] {
        let start = self.labels.len().saturating_sub(REPETITION_WINDOW);
        &self.labels[start..]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Replaces `candidate` if its label is among `recent`.
///
/// The replacement is the first move of `legal`, in enumeration order, whose
/// label is not recent. When every legal move is recent the candidate is
/// kept.
pub fn filter(candidate: Move, recent: &[String], legal: &[Move]) -> Move {
    let is_recent = |m: &Move| recent.iter().any(|label| label == m.san());
    if !is_recent(&candidate) {
        return candidate;
    }
    match legal.iter().find(|m| !is_recent(m)) {
        Some(fresh) => {
            tracing::debug!(repeated = candidate.san(), chosen = fresh.san(), "avoiding repetition");
            fresh.clone()
        }
        None => candidate,
    }
}
