//! The turn and clock state machine.

use crate::config::{think_range, START_DELAY};
use crate::{
    derive_status, format_clock, ClockPair, GameConfig, MoveList, Outcome, SessionError, Side,
    Status, UiCommand,
};
use chess_ai::{filter, Difficulty, MoveSelector, RepetitionWindow};
use chess_core::{Color, MoveRequest, Piece, Square};
use chess_rules::{RulesEngine, StandardRules};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game yet, or the game was reset.
    Idle,
    HumanToMove,
    /// The opponent's thinking delay is running.
    OpponentThinking,
    /// Clocks are stopped; `active` is the side to resume.
    Paused { active: Side },
    Ended(Outcome),
}

impl Phase {
    /// Side whose clock runs in this phase.
    pub fn running_side(&self) -> Option<Side> {
        match self {
            Phase::HumanToMove => Some(Side::Human),
            Phase::OpponentThinking => Some(Side::Opponent),
            _ => None,
        }
    }

    fn for_side(side: Side) -> Phase {
        match side {
            Side::Human => Phase::HumanToMove,
            Side::Opponent => Phase::OpponentThinking,
        }
    }
}

/// Identifies one scheduled opponent move.
///
/// Each new thinking period gets a fresh ticket; resolving anything but the
/// latest one does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Asks the host to call
/// [`resolve_opponent_move`](GameSession::resolve_opponent_move) with
/// `ticket` once `delay` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkRequest {
    pub ticket: Ticket,
    pub delay: Duration,
}

/// Result of a session operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// Display changes, in order.
    pub commands: Vec<UiCommand>,
    /// Opponent move to schedule, if any.
    pub think: Option<ThinkRequest>,
    /// The host should restart its elapsed-time measurement from now.
    pub reanchor_clock: bool,
}

impl Update {
    fn push(&mut self, command: UiCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.think.is_none() && !self.reanchor_clock
    }
}

/// One human-vs-computer game.
///
/// Generic over the rules engine and the random source so tests can plug in
/// seeded randomness; [`GameSession::new`] uses [`StandardRules`] and an
/// entropy-seeded [`StdRng`].
pub struct GameSession<R = StandardRules, G = StdRng> {
    rules: R,
    rng: G,
    selector: MoveSelector,
    think_scale: f64,
    config: GameConfig,
    phase: Phase,
    clocks: ClockPair,
    window: RepetitionWindow,
    moves: MoveList,
    selected: Option<Square>,
    status: String,
    next_ticket: u64,
    pending: Option<Ticket>,
}

impl GameSession<StandardRules, StdRng> {
    pub fn new() -> Self {
        Self::with_parts(StandardRules::new(), StdRng::from_entropy())
    }

    /// A session whose opponent choices and delays repeat for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_parts(StandardRules::new(), StdRng::seed_from_u64(seed))
    }
}

impl Default for GameSession<StandardRules, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RulesEngine, G: Rng> GameSession<R, G> {
    pub fn with_parts(rules: R, rng: G) -> Self {
        let config = GameConfig::default();
        GameSession {
            rules,
            rng,
            selector: MoveSelector::default(),
            think_scale: 1.0,
            config,
            phase: Phase::Idle,
            clocks: ClockPair::new(config.time_mode.initial()),
            window: RepetitionWindow::new(),
            moves: MoveList::new(),
            selected: None,
            status: "Ready to play".to_string(),
            next_ticket: 0,
            pending: None,
        }
    }

    /// Replaces the master-level search parameters.
    pub fn with_selector(mut self, selector: MoveSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Scales every thinking delay; 0 removes them.
    pub fn with_think_scale(mut self, scale: f64) -> Self {
        self.think_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
        self
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clocks(&self) -> &ClockPair {
        &self.clocks
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn move_list(&self) -> &MoveList {
        &self.moves
    }

    /// The opponent's most recent move labels, oldest first.
    pub fn recent_opponent_moves(&self) -> &[String] {
        self.window.recent()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Current status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Starts a game from the standard starting position.
    pub fn start(&mut self, config: GameConfig) -> Update {
        self.rules.reset();
        self.begin(config)
    }

    /// Starts a game from a FEN position.
    pub fn start_from(&mut self, config: GameConfig, fen: &str) -> Result<Update, SessionError> {
        self.rules.load(fen)?;
        Ok(self.begin(config))
    }

    fn begin(&mut self, config: GameConfig) -> Update {
        self.config = config;
        self.clocks = ClockPair::new(config.time_mode.initial());
        self.window.clear();
        self.moves.clear();
        self.selected = None;
        self.pending = None;

        info!(
            difficulty = %config.difficulty,
            time_mode = %config.time_mode,
            human = %config.human_color,
            "game started"
        );

        let mut update = Update {
            reanchor_clock: true,
            ..Update::default()
        };
        update.push(UiCommand::ClearHighlights);
        update.push(UiCommand::ClearMoves);
        update.push(self.render());
        update.push(self.clocks_command());

        let status = derive_status(&self.rules, config.human_color);
        match status {
            Status::Ended(outcome) => self.finish(outcome, &mut update),
            Status::InCheck(side) | Status::ToMove(side) => {
                self.phase = Phase::for_side(side);
                update.push(UiCommand::SetDraggable {
                    enabled: side == Side::Human,
                });
                let text = match side {
                    Side::Human => "Game started! Your move.",
                    Side::Opponent => "Game started! AI is thinking...",
                };
                self.set_status(text, &mut update);
                update.push(self.controls());
                if side == Side::Opponent {
                    update.think = Some(self.schedule_think(START_DELAY));
                }
            }
        }
        update
    }

    /// Plays the human's move.
    ///
    /// A pawn reaching the last rank without a promotion piece becomes a
    /// queen. On success the opponent's move is scheduled unless the game
    /// ended.
    pub fn submit_human_move(&mut self, request: MoveRequest) -> Result<Update, SessionError> {
        match self.phase {
            Phase::HumanToMove => {}
            Phase::Idle | Phase::Ended(_) => return Err(SessionError::NotActive),
            Phase::OpponentThinking | Phase::Paused { .. } => {
                return Err(SessionError::NotHumanTurn)
            }
        }

        let request = self.with_auto_queen(request);
        let applied = self
            .rules
            .apply(request)
            .map_err(|_| SessionError::RejectedMove(request.to_uci()))?;
        debug!(mv = applied.san(), "human move");

        self.selected = None;
        let mut update = Update::default();
        update.push(UiCommand::ClearHighlights);
        update.push(self.render());
        let entry = self.moves.push(self.config.human_color, applied.san());
        update.push(UiCommand::AppendMove(entry));
        self.after_move(&mut update);
        Ok(update)
    }

    fn with_auto_queen(&self, request: MoveRequest) -> MoveRequest {
        if request.promotion.is_some() {
            return request;
        }
        let human = self.config.human_color;
        match self.rules.piece_at(request.from) {
            Some((Piece::Pawn, color))
                if color == human && request.to.rank().index() == human.promotion_rank() =>
            {
                request.with_promotion(Piece::Queen)
            }
            _ => request,
        }
    }

    /// Plays the opponent's move for `ticket`.
    ///
    /// Does nothing if the ticket is stale or the session is paused, ended
    /// or reset since the move was scheduled. The ticket stays valid until a
    /// move is actually applied, so a failed attempt can be retried.
    pub fn resolve_opponent_move(&mut self, ticket: Ticket) -> Result<Update, SessionError> {
        if self.pending != Some(ticket) || self.phase != Phase::OpponentThinking {
            debug!(?ticket, phase = ?self.phase, "ignoring stale opponent move");
            return Ok(Update::default());
        }

        let legal = self.rules.legal_moves();
        let friendly = self.config.opponent_color();
        let candidate = match self.selector.select_move(
            &mut self.rules,
            &legal,
            self.config.difficulty,
            friendly,
            &mut self.rng,
        ) {
            Some(m) => m,
            None => {
                warn!("opponent has no move in an unfinished game");
                return Ok(Update::default());
            }
        };
        let chosen = filter(candidate, self.window.recent(), &legal);
        let applied = self.rules.apply(chosen.request())?;
        self.pending = None;
        info!(mv = applied.san(), difficulty = %self.config.difficulty, "opponent move");

        self.window.push(applied.san());
        let mut update = Update::default();
        update.push(self.render());
        let entry = self.moves.push(friendly, applied.san());
        update.push(UiCommand::AppendMove(entry));
        self.after_move(&mut update);
        Ok(update)
    }

    /// Status derivation and turn switch after any applied move.
    fn after_move(&mut self, update: &mut Update) {
        let status = derive_status(&self.rules, self.config.human_color);
        match status {
            Status::Ended(outcome) => self.finish(outcome, update),
            Status::InCheck(side) | Status::ToMove(side) => {
                self.phase = Phase::for_side(side);
                update.reanchor_clock = true;
                update.push(UiCommand::SetDraggable {
                    enabled: side == Side::Human,
                });
                self.set_status(status.message(), update);
                update.push(self.controls());
                if side == Side::Opponent {
                    update.think = Some(self.schedule_think(Duration::ZERO));
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome, update: &mut Update) {
        info!(winner = ?outcome.winner, cause = ?outcome.cause, "game over");
        self.phase = Phase::Ended(outcome);
        self.pending = None;
        self.selected = None;
        update.think = None;
        update.push(UiCommand::ClearHighlights);
        update.push(UiCommand::SetDraggable { enabled: false });
        self.set_status(outcome.message(), update);
        update.push(self.controls());
    }

    fn schedule_think(&mut self, extra: Duration) -> ThinkRequest {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some(ticket);

        let millis = self.rng.gen_range(think_range(self.config.difficulty));
        let delay = extra + Duration::from_millis(millis).mul_f64(self.think_scale);
        debug!(?ticket, ?delay, "opponent thinking");
        ThinkRequest { ticket, delay }
    }

    /// Stops both clocks.
    pub fn pause(&mut self) -> Result<Update, SessionError> {
        let active = match self.phase {
            Phase::HumanToMove => Side::Human,
            Phase::OpponentThinking => Side::Opponent,
            Phase::Paused { .. } => return Ok(Update::default()),
            Phase::Idle | Phase::Ended(_) => return Err(SessionError::NotActive),
        };
        self.phase = Phase::Paused { active };
        if self.pending.take().is_some() {
            debug!("pending opponent move cancelled by pause");
        }
        self.selected = None;

        let mut update = Update::default();
        update.push(UiCommand::ClearHighlights);
        update.push(UiCommand::SetDraggable { enabled: false });
        self.set_status("Game paused", &mut update);
        update.push(self.controls());
        Ok(update)
    }

    /// Restarts the clocks for the side that was on move.
    pub fn resume(&mut self) -> Result<Update, SessionError> {
        let active = match self.phase {
            Phase::Paused { active } => active,
            Phase::HumanToMove | Phase::OpponentThinking => return Ok(Update::default()),
            Phase::Idle | Phase::Ended(_) => return Err(SessionError::NotActive),
        };
        self.phase = Phase::for_side(active);
        debug!(?active, "resumed, clock re-anchored");

        let mut update = Update {
            reanchor_clock: true,
            ..Update::default()
        };
        update.push(UiCommand::SetDraggable {
            enabled: active == Side::Human,
        });
        let status = derive_status(&self.rules, self.config.human_color);
        self.set_status(status.message(), &mut update);
        update.push(self.controls());
        if active == Side::Opponent {
            update.think = Some(self.schedule_think(Duration::ZERO));
        }
        Ok(update)
    }

    /// Pause button: pauses a running game or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Result<Update, SessionError> {
        match self.phase {
            Phase::Paused { .. } => self.resume(),
            _ => self.pause(),
        }
    }

    /// Takes back the opponent's last move and the human move before it.
    pub fn undo(&mut self) -> Result<Update, SessionError> {
        match self.phase {
            Phase::HumanToMove => {}
            Phase::Idle | Phase::Ended(_) => return Err(SessionError::NotActive),
            _ => return Err(SessionError::UndoUnavailable),
        }
        if self.rules.ply_count() < 2 || self.moves.len() < 2 {
            return Err(SessionError::UndoUnavailable);
        }

        self.rules.undo();
        self.rules.undo();
        self.window.pop();
        let len = self.moves.len() - 2;
        self.moves.truncate(len);
        self.selected = None;
        debug!(plies = self.rules.ply_count(), "move pair taken back");

        let mut update = Update {
            reanchor_clock: true,
            ..Update::default()
        };
        update.push(UiCommand::ClearHighlights);
        update.push(self.render());
        update.push(UiCommand::TruncateMoves { len });
        let status = derive_status(&self.rules, self.config.human_color);
        self.set_status(status.message(), &mut update);
        update.push(self.controls());
        Ok(update)
    }

    /// Charges `elapsed` to the side on move.
    ///
    /// Does nothing unless a side's clock is running. A clock reaching zero
    /// ends the game in the other side's favour.
    pub fn tick(&mut self, elapsed: Duration) -> Update {
        let side = match self.phase.running_side() {
            Some(side) => side,
            None => return Update::default(),
        };
        self.clocks.charge(side, elapsed);

        let mut update = Update::default();
        update.push(self.clocks_command());
        if self.clocks.is_expired(side) {
            self.finish(Outcome::timeout(side), &mut update);
        }
        update
    }

    /// Abandons the game and returns to the idle starting position.
    pub fn reset(&mut self) -> Update {
        self.rules.reset();
        self.phase = Phase::Idle;
        self.pending = None;
        self.selected = None;
        self.window.clear();
        self.moves.clear();
        self.clocks = ClockPair::new(self.config.time_mode.initial());
        info!("game reset");

        let mut update = Update::default();
        update.push(UiCommand::ClearHighlights);
        update.push(self.render());
        update.push(UiCommand::SetDraggable { enabled: false });
        update.push(UiCommand::ClearMoves);
        update.push(self.clocks_command());
        update.push(self.controls());
        self.set_status("Ready to play", &mut update);
        update
    }

    /// Click-to-move.
    ///
    /// The first click on one of the human's pieces selects it and highlights
    /// its destinations. A second click on the same square deselects it, on
    /// another own piece moves the selection, and anywhere else tries the
    /// move.
    pub fn click_square(&mut self, square: Square) -> Result<Update, SessionError> {
        if self.phase != Phase::HumanToMove {
            return Ok(Update::default());
        }
        let owned = self.owns(square);

        let mut update = Update::default();
        match self.selected {
            None if owned => self.select(square, &mut update),
            None => {}
            Some(current) if current == square => {
                self.selected = None;
                update.push(UiCommand::ClearHighlights);
            }
            Some(current) => match self.submit_human_move(MoveRequest::new(current, square)) {
                Ok(moved) => return Ok(moved),
                Err(SessionError::RejectedMove(_)) => {
                    if owned {
                        self.select(square, &mut update);
                    } else {
                        self.selected = None;
                        update.push(UiCommand::ClearHighlights);
                    }
                }
                Err(e) => return Err(e),
            },
        }
        Ok(update)
    }

    fn select(&mut self, square: Square, update: &mut Update) {
        self.selected = Some(square);
        update.push(UiCommand::ClearHighlights);
        update.push(UiCommand::Select { square });
        update.push(UiCommand::Highlight {
            squares: self.destinations(square),
        });
    }

    /// Move hints for the piece under the pointer, shown only to novices.
    pub fn hover_square(&self, square: Square) -> Update {
        let mut update = Update::default();
        if self.phase != Phase::HumanToMove || self.config.difficulty != Difficulty::Novice {
            return update;
        }
        if let Some((_, color)) = self.rules.piece_at(square) {
            if color != self.config.human_color {
                return update;
            }
        }
        let destinations = self.destinations(square);
        if destinations.is_empty() {
            return update;
        }
        let mut squares = vec![square];
        squares.extend(destinations);
        update.push(UiCommand::Highlight { squares });
        update
    }

    /// Removes hover hints, keeping the click selection visible.
    pub fn leave_square(&self) -> Update {
        let mut update = Update::default();
        update.push(UiCommand::ClearHighlights);
        if let Some(square) = self.selected {
            update.push(UiCommand::Select { square });
            update.push(UiCommand::Highlight {
                squares: self.destinations(square),
            });
        }
        update
    }

    /// Whether the human may start dragging the piece on `square`.
    pub fn can_drag(&self, square: Square) -> bool {
        self.phase == Phase::HumanToMove && !self.rules.is_game_over() && self.owns(square)
    }

    fn owns(&self, square: Square) -> bool {
        matches!(self.rules.piece_at(square), Some((_, color)) if color == self.config.human_color)
    }

    fn destinations(&self, square: Square) -> Vec<Square> {
        let mut squares: Vec<Square> = self
            .rules
            .legal_moves_from(square)
            .iter()
            .map(|m| m.to())
            .collect();
        // Promotions list the same destination once per piece.
        squares.dedup();
        squares
    }

    fn set_status(&mut self, text: &str, update: &mut Update) {
        self.status = text.to_string();
        update.push(UiCommand::Status {
            text: text.to_string(),
        });
    }

    fn render(&self) -> UiCommand {
        UiCommand::Render {
            position: self.rules.serialize(),
            orientation: self.config.human_color,
        }
    }

    fn clocks_command(&self) -> UiCommand {
        UiCommand::Clocks {
            human: format_clock(self.clocks.remaining(Side::Human)),
            opponent: format_clock(self.clocks.remaining(Side::Opponent)),
        }
    }

    fn controls(&self) -> UiCommand {
        let (undo_enabled, pause_enabled, pause_label) = match self.phase {
            Phase::HumanToMove => (self.moves.len() >= 2, true, "Pause"),
            Phase::OpponentThinking => (false, true, "Pause"),
            Phase::Paused { .. } => (false, true, "Resume"),
            Phase::Idle | Phase::Ended(_) => (false, false, "Pause"),
        };
        UiCommand::Controls {
            undo_enabled,
            pause_enabled,
            pause_label: pause_label.to_string(),
        }
    }

    /// Colour the human plays in the current game.
    pub fn human_color(&self) -> Color {
        self.config.human_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeMode;

    fn config(difficulty: Difficulty, human_color: Color) -> GameConfig {
        GameConfig {
            difficulty,
            time_mode: TimeMode::Blitz,
            human_color,
        }
    }

    fn session() -> GameSession {
        GameSession::seeded(11).with_think_scale(0.0)
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn req(uci: &str) -> MoveRequest {
        MoveRequest::from_uci(uci).unwrap()
    }

    #[test]
    fn starts_idle() {
        let s = session();
        assert_eq!(s.phase(), &Phase::Idle);
        assert_eq!(s.status(), "Ready to play");
    }

    #[test]
    fn start_as_white() {
        let mut s = session();
        let update = s.start(config(Difficulty::Novice, Color::White));
        assert_eq!(s.phase(), &Phase::HumanToMove);
        assert!(update.think.is_none());
        assert!(update.reanchor_clock);
        assert_eq!(s.status(), "Game started! Your move.");
        assert!(update.commands.contains(&UiCommand::Clocks {
            human: "5:00".to_string(),
            opponent: "5:00".to_string(),
        }));
    }

    #[test]
    fn start_as_black_schedules_opponent_with_start_delay() {
        let mut s = GameSession::seeded(3);
        let update = s.start(config(Difficulty::Novice, Color::Black));
        assert_eq!(s.phase(), &Phase::OpponentThinking);
        assert_eq!(s.status(), "Game started! AI is thinking...");
        let think = update.think.unwrap();
        assert!(think.delay >= START_DELAY + Duration::from_millis(1_000));
        assert!(think.delay <= START_DELAY + Duration::from_millis(3_000));
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        let before = s.rules().serialize();
        let err = s.submit_human_move(req("e2e5")).unwrap_err();
        assert_eq!(err, SessionError::RejectedMove("e2e5".to_string()));
        assert_eq!(s.rules().serialize(), before);
        assert_eq!(s.phase(), &Phase::HumanToMove);
        assert!(s.move_list().is_empty());
    }

    #[test]
    fn moves_outside_the_human_turn_are_refused() {
        let mut s = session();
        assert_eq!(
            s.submit_human_move(req("e2e4")).unwrap_err(),
            SessionError::NotActive
        );
        s.start(config(Difficulty::Novice, Color::White));
        s.submit_human_move(req("e2e4")).unwrap();
        assert_eq!(
            s.submit_human_move(req("d2d4")).unwrap_err(),
            SessionError::NotHumanTurn
        );
    }

    #[test]
    fn auto_queen_promotion() {
        let mut s = session();
        s.start_from(
            config(Difficulty::Novice, Color::White),
            "8/4P3/8/8/8/8/k7/4K3 w - - 0 1",
        )
        .unwrap();
        s.submit_human_move(req("e7e8")).unwrap();
        assert_eq!(s.move_list().entries()[0].san, "e8=Q");
        assert_eq!(s.rules().piece_at(sq("e8")), Some((Piece::Queen, Color::White)));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        let first = s.submit_human_move(req("e2e4")).unwrap().think.unwrap();
        s.pause().unwrap();
        let second = s.resume().unwrap().think.unwrap();
        assert_ne!(first.ticket, second.ticket);

        let ignored = s.resolve_opponent_move(first.ticket).unwrap();
        assert!(ignored.is_empty());
        assert_eq!(s.phase(), &Phase::OpponentThinking);

        s.resolve_opponent_move(second.ticket).unwrap();
        assert_eq!(s.phase(), &Phase::HumanToMove);
        assert_eq!(s.move_list().len(), 2);
    }

    #[test]
    fn paused_session_does_not_resolve() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        let think = s.submit_human_move(req("e2e4")).unwrap().think.unwrap();
        s.pause().unwrap();
        assert!(s.resolve_opponent_move(think.ticket).unwrap().is_empty());
        assert_eq!(s.phase(), &Phase::Paused { active: Side::Opponent });
        assert_eq!(s.status(), "Game paused");
    }

    #[test]
    fn resume_returns_to_the_human() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        s.toggle_pause().unwrap();
        assert_eq!(s.phase(), &Phase::Paused { active: Side::Human });
        let update = s.toggle_pause().unwrap();
        assert_eq!(s.phase(), &Phase::HumanToMove);
        assert!(update.reanchor_clock);
        assert!(update.think.is_none());
        assert_eq!(s.status(), "Your move");
    }

    #[test]
    fn pause_requires_a_game() {
        let mut s = session();
        assert_eq!(s.pause().unwrap_err(), SessionError::NotActive);
        assert_eq!(s.resume().unwrap_err(), SessionError::NotActive);
    }

    #[test]
    fn undo_takes_back_a_pair() {
        let mut s = session();
        s.start(config(Difficulty::Intermediate, Color::White));
        assert_eq!(s.undo().unwrap_err(), SessionError::UndoUnavailable);

        let think = s.submit_human_move(req("e2e4")).unwrap().think.unwrap();
        assert_eq!(s.undo().unwrap_err(), SessionError::UndoUnavailable);
        s.resolve_opponent_move(think.ticket).unwrap();
        assert_eq!(s.recent_opponent_moves().len(), 1);

        let update = s.undo().unwrap();
        assert!(update.commands.contains(&UiCommand::TruncateMoves { len: 0 }));
        assert_eq!(s.rules().serialize(), StandardRules::STARTPOS);
        assert!(s.move_list().is_empty());
        assert!(s.recent_opponent_moves().is_empty());
        assert_eq!(s.phase(), &Phase::HumanToMove);
    }

    #[test]
    fn tick_charges_only_the_side_on_move() {
        let mut s = session();
        assert!(s.tick(Duration::from_secs(1)).is_empty());

        s.start(config(Difficulty::Novice, Color::White));
        s.tick(Duration::from_secs(10));
        assert_eq!(s.clocks().remaining(Side::Human), Duration::from_secs(290));
        assert_eq!(s.clocks().remaining(Side::Opponent), Duration::from_secs(300));

        s.submit_human_move(req("e2e4")).unwrap();
        s.tick(Duration::from_secs(4));
        assert_eq!(s.clocks().remaining(Side::Human), Duration::from_secs(290));
        assert_eq!(s.clocks().remaining(Side::Opponent), Duration::from_secs(296));
    }

    #[test]
    fn human_flag_fall() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        let update = s.tick(Duration::from_secs(301));
        assert_eq!(s.outcome(), Some(Outcome::timeout(Side::Human)));
        assert_eq!(s.status(), "Time's up! AI wins!");
        assert!(update.commands.contains(&UiCommand::Clocks {
            human: "0:00".to_string(),
            opponent: "5:00".to_string(),
        }));
        // Ended sessions ignore further ticks.
        assert!(s.tick(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        s.submit_human_move(req("e2e4")).unwrap();
        let update = s.reset();
        assert_eq!(s.phase(), &Phase::Idle);
        assert_eq!(s.status(), "Ready to play");
        assert!(s.move_list().is_empty());
        assert_eq!(s.rules().serialize(), StandardRules::STARTPOS);
        assert!(update.commands.contains(&UiCommand::ClearMoves));
        assert!(update.commands.contains(&UiCommand::Controls {
            undo_enabled: false,
            pause_enabled: false,
            pause_label: "Pause".to_string(),
        }));
    }

    #[test]
    fn click_to_move() {
        let mut s = session();
        s.start(config(Difficulty::Master, Color::White));

        // Empty square with nothing selected does nothing.
        assert!(s.click_square(sq("e4")).unwrap().is_empty());

        let update = s.click_square(sq("g1")).unwrap();
        assert_eq!(s.selected(), Some(sq("g1")));
        assert!(update.commands.contains(&UiCommand::Highlight {
            squares: vec![sq("f3"), sq("h3")],
        }));

        // Same square deselects.
        s.click_square(sq("g1")).unwrap();
        assert_eq!(s.selected(), None);

        // Another own piece moves the selection.
        s.click_square(sq("g1")).unwrap();
        s.click_square(sq("b1")).unwrap();
        assert_eq!(s.selected(), Some(sq("b1")));

        // A legal target plays the move.
        let update = s.click_square(sq("c3")).unwrap();
        assert!(update.think.is_some());
        assert_eq!(s.selected(), None);
        assert_eq!(s.move_list().entries()[0].san, "Nc3");
    }

    #[test]
    fn click_on_illegal_target_deselects() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        s.click_square(sq("e2")).unwrap();
        let update = s.click_square(sq("e5")).unwrap();
        assert_eq!(s.selected(), None);
        assert_eq!(update.commands, vec![UiCommand::ClearHighlights]);
        assert_eq!(s.phase(), &Phase::HumanToMove);
    }

    #[test]
    fn hover_hints_only_for_novices() {
        let mut novice = session();
        novice.start(config(Difficulty::Novice, Color::White));
        let update = novice.hover_square(sq("e2"));
        assert_eq!(
            update.commands,
            vec![UiCommand::Highlight {
                squares: vec![sq("e2"), sq("e3"), sq("e4")],
            }]
        );
        // Opponent pieces and empty squares give no hints.
        assert!(novice.hover_square(sq("e7")).is_empty());
        assert!(novice.hover_square(sq("e4")).is_empty());

        let mut master = session();
        master.start(config(Difficulty::Master, Color::White));
        assert!(master.hover_square(sq("e2")).is_empty());
    }

    #[test]
    fn leave_square_restores_selection() {
        let mut s = session();
        s.start(config(Difficulty::Novice, Color::White));
        assert_eq!(s.leave_square().commands, vec![UiCommand::ClearHighlights]);
        s.click_square(sq("g1")).unwrap();
        let update = s.leave_square();
        assert_eq!(update.commands[1], UiCommand::Select { square: sq("g1") });
    }

    #[test]
    fn drag_guard() {
        let mut s = session();
        assert!(!s.can_drag(sq("e2")));
        s.start(config(Difficulty::Novice, Color::White));
        assert!(s.can_drag(sq("e2")));
        assert!(!s.can_drag(sq("e7")));
        assert!(!s.can_drag(sq("e4")));
        s.submit_human_move(req("e2e4")).unwrap();
        assert!(!s.can_drag(sq("d2")));
    }

    #[test]
    fn opponent_steers_away_from_its_recent_moves() {
        let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
        let mut rules = StandardRules::from_fen(fen).unwrap();
        let legal = rules.legal_moves();
        let mut rng = StdRng::seed_from_u64(1);
        let greedy = MoveSelector::default()
            .select_move(&mut rules, &legal, Difficulty::Intermediate, Color::White, &mut rng)
            .unwrap();
        assert_eq!(greedy.san(), "exd5");
        let expected = legal.iter().find(|m| m.san() != "exd5").unwrap().san().to_string();

        let mut s = session();
        let think = s
            .start_from(config(Difficulty::Intermediate, Color::Black), fen)
            .unwrap()
            .think
            .unwrap();
        s.window.push("exd5");
        s.resolve_opponent_move(think.ticket).unwrap();

        assert_eq!(s.move_list().entries()[0].san, expected);
        assert_eq!(s.recent_opponent_moves().last(), Some(&expected));
        assert_eq!(s.phase(), &Phase::HumanToMove);
    }

    /// Standard rules that can be told to reject every move.
    struct Refusing {
        inner: StandardRules,
        refuse: bool,
    }

    impl RulesEngine for Refusing {
        fn legal_moves(&self) -> Vec<chess_core::Move> {
            self.inner.legal_moves()
        }

        fn apply(
            &mut self,
            request: MoveRequest,
        ) -> Result<chess_core::Move, chess_rules::RulesError> {
            if self.refuse {
                return Err(chess_rules::RulesError::IllegalMove(request.to_uci()));
            }
            self.inner.apply(request)
        }

        fn undo(&mut self) -> Option<chess_core::Move> {
            self.inner.undo()
        }

        fn is_checkmate(&self) -> bool {
            self.inner.is_checkmate()
        }

        fn is_stalemate(&self) -> bool {
            self.inner.is_stalemate()
        }

        fn draw_reason(&self) -> Option<chess_rules::DrawReason> {
            self.inner.draw_reason()
        }

        fn is_check(&self) -> bool {
            self.inner.is_check()
        }

        fn side_to_move(&self) -> Color {
            self.inner.side_to_move()
        }

        fn serialize(&self) -> String {
            self.inner.serialize()
        }

        fn load(&mut self, fen: &str) -> Result<(), chess_rules::RulesError> {
            self.inner.load(fen)
        }

        fn reset(&mut self) {
            self.inner.reset()
        }

        fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
            self.inner.piece_at(square)
        }

        fn ply_count(&self) -> usize {
            self.inner.ply_count()
        }

        fn last_move(&self) -> Option<&chess_core::Move> {
            self.inner.last_move()
        }
    }

    #[test]
    fn failed_opponent_move_can_be_retried() {
        let rules = Refusing {
            inner: StandardRules::new(),
            refuse: false,
        };
        let mut s = GameSession::with_parts(rules, StdRng::seed_from_u64(5)).with_think_scale(0.0);
        s.start(config(Difficulty::Novice, Color::White));
        let think = s.submit_human_move(req("e2e4")).unwrap().think.unwrap();

        s.rules.refuse = true;
        assert!(s.resolve_opponent_move(think.ticket).is_err());
        assert_eq!(s.phase(), &Phase::OpponentThinking);
        assert_eq!(s.move_list().len(), 1);
        assert!(s.recent_opponent_moves().is_empty());

        s.rules.refuse = false;
        let update = s.resolve_opponent_move(think.ticket).unwrap();
        assert!(!update.is_empty());
        assert_eq!(s.phase(), &Phase::HumanToMove);
        assert_eq!(s.move_list().len(), 2);
    }
}
