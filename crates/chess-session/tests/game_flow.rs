use chess_ai::{Difficulty, REPETITION_WINDOW};
use chess_core::{Color, MoveRequest};
use chess_rules::{RulesEngine, StandardRules};
use chess_session::{
    dispatch, BoardView, EndCause, GameConfig, GameSession, MoveEntry, Outcome, Phase, Side,
    TimeMode, UiCommand, Update,
};
use std::time::Duration;

fn config(difficulty: Difficulty, time_mode: TimeMode, human_color: Color) -> GameConfig {
    GameConfig {
        difficulty,
        time_mode,
        human_color,
    }
}

fn uci(s: &str) -> MoveRequest {
    MoveRequest::from_uci(s).unwrap()
}

#[test]
fn human_delivers_mate() {
    let mut session = GameSession::seeded(5).with_think_scale(0.0);
    session
        .start_from(
            config(Difficulty::Master, TimeMode::Blitz, Color::White),
            "rnbqkbnr/ppppp2p/5p2/6p1/4P3/2N5/PPPP1PPP/R1BQKBNR w KQkq - 0 3",
        )
        .unwrap();

    let update = session.submit_human_move(uci("d1h5")).unwrap();

    assert!(update.think.is_none());
    assert_eq!(
        session.phase(),
        &Phase::Ended(Outcome::checkmate(Side::Human))
    );
    assert_eq!(session.status(), "Game over: You win by checkmate!");
    assert_eq!(session.move_list().entries()[0].san, "Qh5#");
    assert!(update.commands.contains(&UiCommand::SetDraggable { enabled: false }));
    assert!(update.commands.contains(&UiCommand::Controls {
        undo_enabled: false,
        pause_enabled: false,
        pause_label: "Pause".to_string(),
    }));

    // Nothing runs after the end.
    assert!(session.tick(Duration::from_secs(10)).is_empty());
    assert!(session.pause().is_err());
    assert!(session.undo().is_err());
}

#[test]
fn opponent_delivers_mate() {
    let mut session = GameSession::seeded(5).with_think_scale(0.0);
    session
        .start_from(
            config(Difficulty::Master, TimeMode::Blitz, Color::White),
            "rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2",
        )
        .unwrap();

    let think = session.submit_human_move(uci("g2g4")).unwrap().think.unwrap();
    let update = session.resolve_opponent_move(think.ticket).unwrap();

    assert_eq!(session.move_list().entries()[1].san, "Qh4#");
    assert_eq!(session.outcome(), Some(Outcome::checkmate(Side::Opponent)));
    assert_eq!(session.status(), "Game over: AI wins by checkmate!");
    assert!(update.think.is_none());
}

#[test]
fn finished_position_ends_at_once() {
    let mut session = GameSession::seeded(1);
    let update = session
        .start_from(
            config(Difficulty::Novice, TimeMode::Blitz, Color::Black),
            "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
        )
        .unwrap();
    assert!(update.think.is_none());
    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.winner, None);
    assert!(matches!(outcome.cause, EndCause::Draw(_)));
    assert_eq!(session.status(), "Game over: Draw");
}

#[test]
fn blitz_timeout_with_pause() {
    let mut session = GameSession::seeded(9);
    let start = session.start(config(Difficulty::Novice, TimeMode::Blitz, Color::Black));
    let first = start.think.unwrap();
    assert_eq!(session.phase(), &Phase::OpponentThinking);

    let second = Duration::from_secs(1);
    for _ in 0..150 {
        session.tick(second);
    }
    assert_eq!(
        session.clocks().remaining(Side::Opponent),
        Duration::from_secs(150)
    );

    let paused = session.pause().unwrap();
    assert!(paused.commands.contains(&UiCommand::Controls {
        undo_enabled: false,
        pause_enabled: true,
        pause_label: "Resume".to_string(),
    }));
    for _ in 0..50 {
        assert!(session.tick(second).is_empty());
    }
    assert_eq!(
        session.clocks().remaining(Side::Opponent),
        Duration::from_secs(150)
    );

    let resumed = session.resume().unwrap();
    assert!(resumed.reanchor_clock);
    let renewed = resumed.think.unwrap();
    assert_ne!(renewed.ticket, first.ticket);
    assert!(session.resolve_opponent_move(first.ticket).unwrap().is_empty());

    for _ in 0..149 {
        session.tick(second);
    }
    assert_eq!(session.phase(), &Phase::OpponentThinking);

    let last = session.tick(second);
    assert_eq!(session.outcome(), Some(Outcome::timeout(Side::Opponent)));
    assert_eq!(session.status(), "Time's up! You win!");
    assert!(last.commands.contains(&UiCommand::Clocks {
        human: "5:00".to_string(),
        opponent: "0:00".to_string(),
    }));

    // The move scheduled before the flag fell is dropped.
    assert!(session.resolve_opponent_move(renewed.ticket).unwrap().is_empty());
    assert!(session.move_list().is_empty());
}

#[test]
fn turns_alternate_and_history_stays_short() {
    let mut session = GameSession::seeded(42).with_think_scale(0.0);
    session.start(config(Difficulty::Novice, TimeMode::Classic, Color::White));

    for turn in 0..6 {
        if session.outcome().is_some() {
            break;
        }
        assert_eq!(session.phase(), &Phase::HumanToMove, "turn {}", turn);
        let m = session.rules().legal_moves()[0].clone();
        let update = session.submit_human_move(m.request()).unwrap();
        let think = match update.think {
            Some(think) => think,
            None => break,
        };
        assert_eq!(session.phase(), &Phase::OpponentThinking);
        assert!(session.submit_human_move(m.request()).is_err());

        session.resolve_opponent_move(think.ticket).unwrap();
        assert!(session.recent_opponent_moves().len() <= REPETITION_WINDOW);
    }

    if session.outcome().is_none() {
        assert_eq!(session.recent_opponent_moves().len(), REPETITION_WINDOW);
        assert_eq!(session.move_list().len(), 12);
        assert_eq!(session.rules().ply_count(), 12);
        let last = session.rules().last_move().unwrap().san().to_string();
        assert_eq!(session.recent_opponent_moves()[2], last);
    }
}

#[test]
fn opponent_opens_when_human_is_black() {
    let mut session = GameSession::seeded(3).with_think_scale(0.0);
    let think = session
        .start(config(Difficulty::Intermediate, TimeMode::Blitz, Color::Black))
        .think
        .unwrap();
    let update = session.resolve_opponent_move(think.ticket).unwrap();

    assert_eq!(session.phase(), &Phase::HumanToMove);
    assert_eq!(session.rules().side_to_move(), Color::Black);
    let entry = &session.move_list().entries()[0];
    assert_eq!(entry.color, Color::White);
    assert_eq!(entry.number, 1);
    assert!(update.commands.iter().any(|c| matches!(
        c,
        UiCommand::Render {
            orientation: Color::Black,
            ..
        }
    )));
}

#[test]
fn undo_restores_the_earlier_position() {
    let mut session = GameSession::seeded(8).with_think_scale(0.0);
    session.start(config(Difficulty::Master, TimeMode::Blitz, Color::White));

    let think = session.submit_human_move(uci("e2e4")).unwrap().think.unwrap();
    session.resolve_opponent_move(think.ticket).unwrap();
    let after_first_pair = session.rules().serialize();

    let think = session.submit_human_move(uci("d2d4")).unwrap().think.unwrap();
    let update = session.resolve_opponent_move(think.ticket).unwrap();
    assert!(update.commands.contains(&UiCommand::Controls {
        undo_enabled: true,
        pause_enabled: true,
        pause_label: "Pause".to_string(),
    }));

    session.undo().unwrap();
    assert_eq!(session.rules().serialize(), after_first_pair);
    assert_eq!(session.move_list().len(), 2);
    assert_eq!(session.recent_opponent_moves().len(), 1);

    session.undo().unwrap();
    assert_eq!(session.rules().serialize(), StandardRules::STARTPOS);
    assert!(session.undo().is_err());
}

#[test]
fn reset_then_new_game() {
    let mut session = GameSession::seeded(4).with_think_scale(0.0);
    session.start(config(Difficulty::Novice, TimeMode::Classic, Color::White));
    session.submit_human_move(uci("e2e4")).unwrap();
    session.tick(Duration::from_secs(30));

    let reset = session.reset();
    assert_eq!(session.phase(), &Phase::Idle);
    assert!(reset.commands.contains(&UiCommand::Clocks {
        human: "15:00".to_string(),
        opponent: "15:00".to_string(),
    }));

    let update = session.start(config(Difficulty::Novice, TimeMode::Blitz, Color::White));
    assert_eq!(session.phase(), &Phase::HumanToMove);
    assert!(update.commands.contains(&UiCommand::Clocks {
        human: "5:00".to_string(),
        opponent: "5:00".to_string(),
    }));
}

#[derive(Default)]
struct TextView {
    position: String,
    status: String,
    clocks: (String, String),
    moves: Vec<String>,
    draggable: bool,
}

impl BoardView for TextView {
    fn render(&mut self, position: &str, _orientation: Color) {
        self.position = position.to_string();
    }

    fn status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn clocks(&mut self, human: &str, opponent: &str) {
        self.clocks = (human.to_string(), opponent.to_string());
    }

    fn append_move(&mut self, entry: &MoveEntry) {
        self.moves.push(entry.san.clone());
    }

    fn truncate_moves(&mut self, len: usize) {
        self.moves.truncate(len);
    }

    fn set_draggable(&mut self, enabled: bool) {
        self.draggable = enabled;
    }
}

fn apply(view: &mut TextView, update: &Update) {
    dispatch(view, &update.commands);
}

#[test]
fn view_follows_the_session() {
    let mut session = GameSession::seeded(21).with_think_scale(0.0);
    let mut view = TextView::default();

    let update = session.start(config(Difficulty::Intermediate, TimeMode::Blitz, Color::White));
    apply(&mut view, &update);
    assert_eq!(view.status, "Game started! Your move.");
    assert_eq!(view.clocks, ("5:00".to_string(), "5:00".to_string()));
    assert!(view.draggable);

    let update = session.submit_human_move(uci("g1f3")).unwrap();
    apply(&mut view, &update);
    assert_eq!(view.status, "AI is thinking...");
    assert!(!view.draggable);

    let update = session.resolve_opponent_move(update.think.unwrap().ticket).unwrap();
    apply(&mut view, &update);
    assert_eq!(view.moves.len(), 2);
    assert_eq!(view.moves[0], "Nf3");
    assert_eq!(view.position, session.rules().serialize());
    assert_eq!(view.status, "Your move");

    let update = session.undo().unwrap();
    apply(&mut view, &update);
    assert!(view.moves.is_empty());

    let update = session.reset();
    apply(&mut view, &update);
    assert_eq!(view.status, "Ready to play");
    assert!(!view.draggable);
}

#[test]
fn updates_serialize_for_a_remote_front_end() {
    let mut session = GameSession::seeded(2).with_think_scale(0.0);
    let update = session.start(GameConfig::default());
    let json = serde_json::to_value(&update.commands).unwrap();
    let types: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        [
            "clear_highlights",
            "clear_moves",
            "render",
            "clocks",
            "set_draggable",
            "status",
            "controls"
        ]
    );
}
