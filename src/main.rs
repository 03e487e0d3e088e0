use color_eyre::eyre::WrapErr;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;

use last_days::app::App;
use last_days::config::GameConfig;
use last_days::game::Game;
use last_days::input::{InputManager, spawn_listener};
use last_days::renderer::GameRenderer;
use last_days::sprites::{DEFAULT_SPRITE_DIR, SpriteSheet};

const LOG_FILE: &str = "last-days.log";

fn init_logging() -> color_eyre::Result<()> {
    // The terminal UI owns stdout/stderr, so diagnostics go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE)
        .wrap_err_with(|| format!("failed to open {}", LOG_FILE))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = GameConfig::default();
    config.validate()?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!(
        "Keyboard enhancement supported: {}",
        supports_keyboard_enhancement
    );

    // Setup terminal manually for full control
    enable_raw_mode().wrap_err("failed to enable raw mode")?;

    // From here on the terminal is restored whatever happens
    let result = run_in_terminal(config, supports_keyboard_enhancement);
    restore_terminal(supports_keyboard_enhancement);

    result
}

fn run_in_terminal(config: GameConfig, keyboard_enhancement: bool) -> color_eyre::Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).wrap_err("failed to enter alternate screen")?;

    // Release events are only reported with enhancement flags pushed
    if keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let game = Game::new(config);
    log::info!("Last Days starting with seed {}", game.seed());

    let app = App::new(
        game,
        InputManager::new(keyboard_enhancement),
        GameRenderer::new(SpriteSheet::load(Path::new(DEFAULT_SPRITE_DIR))),
        spawn_listener(),
    );
    app.run(&mut terminal)
}

/// Best-effort cleanup: every step runs even if an earlier one fails
fn restore_terminal(keyboard_enhancement: bool) {
    let mut stdout = stdout();
    if keyboard_enhancement {
        if let Err(err) = execute!(stdout, PopKeyboardEnhancementFlags) {
            log::warn!("Failed to pop keyboard enhancement flags: {}", err);
        }
    }
    if let Err(err) = execute!(stdout, Show) {
        log::warn!("Failed to show cursor: {}", err);
    }
    if let Err(err) = execute!(stdout, LeaveAlternateScreen) {
        log::warn!("Failed to leave alternate screen: {}", err);
    }
    if let Err(err) = disable_raw_mode() {
        log::warn!("Failed to disable raw mode: {}", err);
    }
}
