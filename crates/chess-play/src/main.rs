//! Terminal front end for playing chess against the computer.
//!
//! Reads commands from stdin, drives the session's clock once per second
//! and plays the opponent's move once its thinking delay has passed.

mod command;
mod view;

use chess_ai::Difficulty;
use chess_core::Color;
use chess_rules::RulesEngine;
use chess_session::{
    dispatch, BoardView, GameConfig, GameSession, SessionError, Settings, Ticket, TimeMode, Update,
};
use clap::Parser;
use command::{Command, HELP};
use std::io::Stdout;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, sleep_until, Duration, Instant, MissedTickBehavior};
use tracing_subscriber::EnvFilter;
use view::TerminalView;

/// Play chess against the computer.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess against the computer in the terminal")]
struct Args {
    /// Settings file
    #[arg(long, default_value_os_t = Settings::config_path())]
    config: PathBuf,

    /// Opponent level: novice, intermediate or master
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Clock: blitz (5 min) or classic (15 min)
    #[arg(short, long)]
    mode: Option<TimeMode>,

    /// Your colour: light or dark
    #[arg(short, long)]
    color: Option<Color>,

    /// Master search depth in plies
    #[arg(long)]
    depth: Option<u8>,

    /// Multiplier on the opponent's thinking delay
    #[arg(long)]
    think_scale: Option<f64>,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load(&self.config)?;
        if let Some(difficulty) = self.difficulty {
            settings.game.difficulty = difficulty;
        }
        if let Some(mode) = self.mode {
            settings.game.time_mode = mode;
        }
        if let Some(color) = self.color {
            settings.game.human_color = color;
        }
        if let Some(depth) = self.depth {
            settings.search.depth = depth;
        }
        if let Some(scale) = self.think_scale {
            settings.pacing.think_time_scale = scale;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// Event loop state outside the session itself.
struct Host {
    session: GameSession,
    view: TerminalView<Stdout>,
    config: GameConfig,
    /// Start of the interval not yet charged to a clock.
    anchor: Instant,
    /// Opponent move to resolve and when.
    pending: Option<(Ticket, Instant)>,
}

impl Host {
    fn apply(&mut self, update: Update) {
        dispatch(&mut self.view, &update.commands);
        if update.reanchor_clock {
            self.anchor = Instant::now();
        }
        if let Some(think) = update.think {
            self.pending = Some((think.ticket, Instant::now() + think.delay));
        }
    }

    fn report(&mut self, result: Result<Update, SessionError>) {
        match result {
            Ok(update) => self.apply(update),
            Err(e) => self.view.line(&format!("! {}", e)),
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.anchor);
        self.anchor = now;
        let update = self.session.tick(elapsed);
        self.apply(update);
    }

    fn think_done(&mut self, ticket: Ticket) {
        self.pending = None;
        match self.session.resolve_opponent_move(ticket) {
            Ok(update) => self.apply(update),
            Err(e) => {
                // The ticket is still live; try again shortly.
                tracing::warn!(error = %e, "opponent move failed");
                self.pending = Some((ticket, Instant::now() + Duration::from_secs(1)));
            }
        }
    }

    fn new_game(
        &mut self,
        difficulty: Option<String>,
        time_mode: Option<String>,
        color: Option<String>,
    ) {
        let current = self.config;
        let parsed = GameConfig::parse(
            difficulty.as_deref().unwrap_or(current.difficulty.name()),
            &time_mode.unwrap_or_else(|| current.time_mode.to_string()),
            &color.unwrap_or_else(|| current.human_color.to_string()),
        );
        match parsed {
            Ok(config) => {
                self.config = config;
                self.pending = None;
                let update = self.session.start(config);
                self.apply(update);
            }
            Err(e) => self.view.line(&format!("! {}", e)),
        }
    }

    /// Handles one input line. Returns false to quit.
    fn handle(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                self.view.line(&format!("! {}", e));
                return true;
            }
        };

        match command {
            Command::Move(request) => {
                let result = self.session.submit_human_move(request);
                self.report(result);
            }
            Command::Click(square) => {
                let result = self.session.click_square(square);
                self.report(result);
            }
            Command::Hover(square) => {
                let update = self.session.hover_square(square);
                self.apply(update);
            }
            Command::Leave => {
                let update = self.session.leave_square();
                self.apply(update);
            }
            Command::Undo => {
                let result = self.session.undo();
                self.report(result);
            }
            Command::Pause => {
                let result = self.session.pause();
                self.report(result);
            }
            Command::Resume => {
                let result = self.session.resume();
                self.report(result);
            }
            Command::New {
                difficulty,
                time_mode,
                color,
            } => self.new_game(difficulty, time_mode, color),
            Command::Reset => {
                self.pending = None;
                let update = self.session.reset();
                self.apply(update);
            }
            Command::Board => {
                let position = self.session.rules().serialize();
                let orientation = self.session.human_color();
                self.view.render(&position, orientation);
                let status = format!("[{}] {}", self.view.clock_line(), self.session.status());
                self.view.line(&status);
            }
            Command::Moves => {
                let rows = self.session.move_list().rows();
                if rows.is_empty() {
                    self.view.line("no moves yet");
                }
                for row in rows {
                    let text = format!(
                        "{:>3}. {:<8} {}",
                        row.number,
                        row.white.as_deref().unwrap_or("..."),
                        row.black.as_deref().unwrap_or("")
                    );
                    self.view.line(&text);
                }
            }
            Command::Legal => {
                let sans: Vec<String> = self
                    .session
                    .rules()
                    .legal_moves()
                    .iter()
                    .map(|m| m.san().to_string())
                    .collect();
                self.view.line(&sans.join(" "));
            }
            Command::Help => {
                self.view.line(HELP);
                let label = format!("pause button: {}", self.view.pause_label());
                self.view.line(&label);
            }
            Command::Quit => return false,
        }
        true
    }
}

async fn wait_for(pending: Option<(Ticket, Instant)>) -> Ticket {
    match pending {
        Some((ticket, deadline)) => {
            sleep_until(deadline).await;
            ticket
        }
        None => std::future::pending().await,
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let session = GameSession::new()
        .with_selector(settings.selector())
        .with_think_scale(settings.pacing.think_time_scale);
    let mut host = Host {
        session,
        view: TerminalView::new(std::io::stdout()),
        config: settings.game,
        anchor: Instant::now(),
        pending: None,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let update = host.session.start(settings.game);
    host.apply(update);
    host.view.line("type 'help' for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !host.handle(&line) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = ticker.tick() => host.tick(),
            ticket = wait_for(host.pending) => host.think_done(ticket),
        }
    }

    tracing::info!("bye");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.settings()?;
    tracing::info!(
        config = ?args.config,
        difficulty = %settings.game.difficulty,
        depth = settings.search.depth,
        "starting chess-play"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(settings))
}
