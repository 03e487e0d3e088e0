use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::entities::GameState;
use crate::game::TickInput;

/// How long a fresh press keeps a key active on terminals that never report
/// releases. Covers the keyboard's delay before auto-repeat starts.
pub const INITIAL_HOLD_WINDOW: Duration = Duration::from_millis(650);

/// How long each auto-repeat keeps a key active once repeating has started
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    Restart,
    Quit,
}

/// Spawns the listener thread that forwards raw terminal events.
///
/// The thread blocks on `event::read` and stops once the receiver is dropped
/// or the terminal stops delivering events.
pub fn spawn_listener() -> Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::warn!("Input listener stopped: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

/// A key that can be held down for continuous input
#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    down: bool,
    last_seen: Option<Instant>,
    /// Set once auto-repeat events arrive for the current hold
    repeating: bool,
}

impl HeldKey {
    /// Records a press or repeat. Without enhancement flags terminals report
    /// repeats as plain presses, so a press arriving while the key is still
    /// held counts as a repeat too.
    fn press(&mut self, now: Instant, kind: KeyEventKind) {
        self.repeating = kind == KeyEventKind::Repeat || self.within_window(now);
        self.down = true;
        self.last_seen = Some(now);
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    fn within_window(&self, now: Instant) -> bool {
        let window = if self.repeating {
            HOLD_WINDOW
        } else {
            INITIAL_HOLD_WINDOW
        };
        self.last_seen
            .is_some_and(|seen| now.saturating_duration_since(seen) <= window)
    }

    fn is_active(&self, now: Instant, reports_release: bool) -> bool {
        if reports_release {
            self.down
        } else {
            self.within_window(now)
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: HeldKey,
    down: HeldKey,
    fire: HeldKey,
}

/// Translates raw key events into per-tick input snapshots and one-shot actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal sends key release events
    reports_release: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
        }
    }

    /// Drains every pending event from the listener without blocking.
    /// Should be called once per tick before [`snapshot`](Self::snapshot).
    pub fn drain(&mut self, events: &Receiver<Event>, game_state: GameState, now: Instant) {
        self.oneshot_actions.clear();
        loop {
            match events.try_recv() {
                Ok(Event::Key(key_event)) => self.handle_key_event(key_event, game_state, now),
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Input channel closed, quitting");
                    self.oneshot_actions.push(InputAction::Quit);
                    break;
                }
            }
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, game_state, now);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::Menu => {
                // Only a fresh press starts the game; nothing is recorded as held
                if key_event.kind == KeyEventKind::Press
                    && matches!(key_event.code, KeyCode::Char(' ') | KeyCode::Enter)
                {
                    self.oneshot_actions.push(InputAction::Start);
                }
            }
            GameState::Playing => {
                let kind = key_event.kind;
                match key_event.code {
                    KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                        self.key_state.up.press(now, kind);
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                        self.key_state.down.press(now, kind);
                    }
                    KeyCode::Char(' ') => {
                        self.key_state.fire.press(now, kind);
                    }
                    _ => {}
                }
            }
            GameState::GameOver => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.oneshot_actions.push(InputAction::Restart);
                }
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up.release();
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down.release();
            }
            KeyCode::Char(' ') => {
                self.key_state.fire.release();
            }
            _ => {}
        }
    }

    /// One-shot actions gathered by the last drain
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Commands active for this tick
    pub fn snapshot(&self, now: Instant) -> TickInput {
        let held = |key: &HeldKey| key.is_active(now, self.reports_release);
        TickInput {
            move_up: held(&self.key_state.up),
            move_down: held(&self.key_state.down),
            fire: held(&self.key_state.fire),
            start: self.oneshot_actions.contains(&InputAction::Start),
        }
    }

    /// Forgets every held key, used when leaving `Playing`
    pub fn clear(&mut self) {
        self.key_state = KeyState::default();
    }
}
