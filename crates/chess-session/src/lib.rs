//! Game orchestration for playing chess against the computer.
//!
//! [`GameSession`] is the turn and clock state machine. It owns the rules
//! engine, the two countdown clocks and the opponent's move history, and
//! answers every user action with an [`Update`]: the display commands to
//! apply plus scheduling hints for the host (when to ask for the opponent's
//! move, when to re-anchor the tick reference).
//!
//! The session never sleeps, spawns or reads a clock. A host drives it:
//!
//! ```
//! use chess_session::{GameConfig, GameSession, Phase};
//! use chess_core::MoveRequest;
//!
//! let mut session = GameSession::seeded(1).with_think_scale(0.0);
//! session.start(GameConfig::default());
//! assert_eq!(session.phase(), &Phase::HumanToMove);
//!
//! let update = session
//!     .submit_human_move(MoveRequest::from_uci("e2e4").unwrap())
//!     .unwrap();
//! let think = update.think.unwrap();
//! // ...the host waits `think.delay`, then:
//! session.resolve_opponent_move(think.ticket).unwrap();
//! assert_eq!(session.phase(), &Phase::HumanToMove);
//! ```

mod clock;
mod config;
mod display;
mod error;
mod session;
mod settings;
mod status;

pub use clock::{format_clock, ClockPair};
pub use config::{think_range, GameConfig, TimeMode, START_DELAY};
pub use display::{dispatch, BoardView, MoveEntry, MoveList, MoveRow, UiCommand};
pub use error::{ConfigError, SessionError};
pub use session::{GameSession, Phase, ThinkRequest, Ticket, Update};
pub use settings::{PacingSettings, SearchSettings, Settings};
pub use status::{derive_status, EndCause, Outcome, Side, Status};
