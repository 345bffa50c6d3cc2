use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Unified event type consumed by the game loop
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source has gone away; no more input will arrive
    Closed,
}

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the guess by this many digit steps
    Nudge(i32),
    /// Evaluate, or start the next round once scored
    Act,
    ToggleGuessEllipse,
    ToggleTrueEllipse,
    CycleDifficulty,
    CycleDigits,
    /// Change N by this many points
    AdjustPoints(isize),
    ToggleSettings,
    Quit,
}

pub const COARSE_STEPS: i32 = 10;
pub const POINTS_STEP: isize = 10;

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }
        let command = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Command::Quit,
            KeyCode::Left | KeyCode::Char('h') => Command::Nudge(-1),
            KeyCode::Right | KeyCode::Char('l') => Command::Nudge(1),
            KeyCode::Down | KeyCode::Char('j') => Command::Nudge(-COARSE_STEPS),
            KeyCode::Up | KeyCode::Char('k') => Command::Nudge(COARSE_STEPS),
            KeyCode::Enter | KeyCode::Char(' ') => Command::Act,
            KeyCode::Char('g') => Command::ToggleGuessEllipse,
            KeyCode::Char('t') => Command::ToggleTrueEllipse,
            KeyCode::Char('d') => Command::CycleDifficulty,
            KeyCode::Char('p') => Command::CycleDigits,
            KeyCode::Char('+') | KeyCode::Char('=') => Command::AdjustPoints(POINTS_STEP),
            KeyCode::Char('-') => Command::AdjustPoints(-POINTS_STEP),
            KeyCode::Char('s') => Command::ToggleSettings,
            _ => return None,
        };
        Some(command)
    }
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => GameEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed event source for headless tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the game one event/tick at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    tick: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, tick: Duration) -> Self {
        Self { event_source, tick }
    }

    /// Blocks up to one tick and returns the next event, Tick on timeout,
    /// or Closed once the source is disconnected
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }
}
