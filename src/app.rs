use color_eyre::Result;
use crossterm::event::Event;
use ratatui::{Terminal, backend::Backend};
use std::sync::mpsc::Receiver;
use std::time::Instant;

use crate::entities::GameState;
use crate::game::Game;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The main application: owns the simulation and drives it at a fixed interval.
pub struct App {
    running: bool,
    game: Game,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    events: Receiver<Event>,
}

impl App {
    pub fn new(
        game: Game,
        input_manager: InputManager,
        renderer: GameRenderer,
        events: Receiver<Event>,
    ) -> Self {
        Self {
            running: true,
            game,
            input_manager,
            renderer,
            events,
        }
    }

    /// Run the application's main loop.
    ///
    /// Each pass drains input, advances the simulation one tick, draws a
    /// frame and sleeps for the tick interval. Late ticks are not made up.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_interval = self.game.config().tick_interval;

        while self.running {
            self.tick(Instant::now());

            if let Err(err) = terminal.draw(|frame| {
                let fire_control = self.game.fire_control();
                let view = RenderView {
                    game_state: self.game.state(),
                    player: self.game.player(),
                    enemies: self.game.enemies(),
                    projectiles: self.game.projectiles(),
                    ammo_remaining: fire_control.ammo_remaining(),
                    magazine_size: fire_control.magazine_size(),
                    reloading: fire_control.is_reloading(),
                    enemies_destroyed: self.game.enemies_destroyed(),
                    world_width: self.game.config().world_width,
                    world_height: self.game.config().world_height,
                };
                self.renderer.render(frame, &view);
            }) {
                log::warn!("Render error: {}", err);
            }

            std::thread::sleep(tick_interval);
        }

        log::info!(
            "Quit after {} ticks, {} enemies destroyed",
            self.game.tick_count(),
            self.game.enemies_destroyed()
        );
        Ok(())
    }

    /// One pass of input sampling and simulation
    pub fn tick(&mut self, now: Instant) {
        let state_before = self.game.state();
        self.input_manager.drain(&self.events, state_before, now);

        for action in self.input_manager.actions() {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Restart => self.game.restart(),
                InputAction::Start => {}
            }
        }
        if !self.running {
            return;
        }

        let input = self.input_manager.snapshot(now);
        self.game.step(&input, now);

        let state_after = self.game.state();
        if state_after != state_before {
            log::info!("State {:?} -> {:?}", state_before, state_after);
            if state_after != GameState::Playing {
                self.input_manager.clear();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}
