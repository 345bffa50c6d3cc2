mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use corrguess::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    dataset::Point,
    error::GameResult,
    round::Round,
    runtime::{Command, CrosstermEventSource, EventSource, GameEvent, Runner},
    score::Difficulty,
    session::Session,
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use serde::Serialize;
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    sync::Mutex,
    time::Duration,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const TICK_RATE_MS: u64 = 100;

/// guess the correlation of a scatter plot
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal game for building intuition about correlation: each round draws a noisy point cloud with a hidden correlation coefficient, you guess r, and the guess is scored and graded."
)]
pub struct Cli {
    /// number of points per round (20-500)
    #[clap(short = 'n', long)]
    points: Option<usize>,

    /// seed for the first round, as a plain decimal integer
    #[clap(long)]
    seed: Option<u32>,

    /// how harshly errors are penalized
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// decimal places for the guess (1-4)
    #[clap(long)]
    digits: Option<u32>,

    /// hide the ellipse drawn for your guess
    #[clap(long)]
    no_guess_ellipse: bool,

    /// do not reveal the true ellipse after scoring
    #[clap(long)]
    no_true_ellipse: bool,

    /// print the first round as JSON and exit
    #[clap(long)]
    dump: bool,
}

impl Cli {
    /// Layer the command line over the stored settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(points) = self.points {
            config.n_points = points;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(digits) = self.digits {
            config.r_digits = digits;
        }
        if self.no_guess_ellipse {
            config.show_guess_ellipse = false;
        }
        if self.no_true_ellipse {
            config.show_true_ellipse = false;
        }
        config.sanitized()
    }
}

/// Shareable snapshot of a round's data
#[derive(Debug, Serialize)]
struct RoundDump<'a> {
    seed: u32,
    n: usize,
    true_r: f64,
    points: &'a [Point],
}

impl<'a> From<&'a Round> for RoundDump<'a> {
    fn from(round: &'a Round) -> Self {
        Self {
            seed: round.seed,
            n: round.dataset.len(),
            true_r: round.true_r(),
            points: &round.dataset.points,
        }
    }
}

fn dump_round(round: &Round) -> GameResult<String> {
    Ok(serde_json::to_string_pretty(&RoundDump::from(round))?)
}

pub struct App {
    pub session: Session,
    pub show_settings: bool,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(session: Session, store: Box<dyn ConfigStore>) -> Self {
        Self {
            session,
            show_settings: false,
            store,
        }
    }

    /// Apply one command; returns false when the game should exit
    pub fn apply(&mut self, command: Command) -> GameResult<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Nudge(steps) => {
                self.session.nudge_guess(steps);
            }
            Command::Act => {
                self.session.act()?;
            }
            Command::ToggleSettings => self.show_settings = !self.show_settings,
            Command::ToggleGuessEllipse => {
                self.session.toggle_guess_ellipse();
                self.persist();
            }
            Command::ToggleTrueEllipse => {
                self.session.toggle_true_ellipse();
                self.persist();
            }
            Command::CycleDifficulty => {
                self.session.cycle_difficulty();
                self.persist();
            }
            Command::CycleDigits => {
                self.session.cycle_digits();
                self.persist();
            }
            Command::AdjustPoints(delta) => {
                self.session.adjust_points(delta)?;
                self.persist();
            }
        }
        Ok(true)
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.session.settings) {
            warn!(%err, "could not save settings");
        }
    }
}

/// Log to a file; stdout and stderr belong to the terminal UI
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let store = FileConfigStore::new();
    let settings = cli.apply(store.load());
    let session = Session::new(settings, cli.seed)?;

    if cli.dump {
        println!("{}", dump_round(&session.round)?);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, Box::new(store));
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            // nothing animates, so idle ticks need no redraw
            GameEvent::Tick => continue,
            GameEvent::Closed => {
                warn!("terminal event source closed, exiting");
                break;
            }
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                let Some(command) = Command::from_key(key) else {
                    continue;
                };
                if !app.apply(command)? {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
