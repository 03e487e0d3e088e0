use crate::entities::{Aabb, Enemy, GameState, Player, Projectile};
use crate::sprites::SpriteSheet;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub ammo_remaining: u8,
    pub magazine_size: u8,
    pub reloading: bool,
    pub enemies_destroyed: u32,
    pub world_width: u32,
    pub world_height: u32,
}

/// Maps world units onto a terminal rectangle
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub area: Rect,
    pub world_width: u32,
    pub world_height: u32,
}

impl Viewport {
    fn project_x(&self, x: i32) -> i64 {
        x as i64 * self.area.width as i64 / self.world_width.max(1) as i64
    }

    fn project_y(&self, y: i32) -> i64 {
        y as i64 * self.area.height as i64 / self.world_height.max(1) as i64
    }

    /// Cell rectangle covered by `bounds`, clipped to the viewport.
    /// Every visible box covers at least one cell.
    pub fn scale_box(&self, bounds: &Aabb) -> Option<Rect> {
        let width = self.area.width as i64;
        let height = self.area.height as i64;

        let x0 = self.project_x(bounds.x);
        let x1 = self.project_x(bounds.right()).max(x0 + 1);
        let y0 = self.project_y(bounds.y);
        let y1 = self.project_y(bounds.bottom()).max(y0 + 1);

        if x1 <= 0 || y1 <= 0 || x0 >= width || y0 >= height {
            return None;
        }

        let (x0, x1) = (x0.max(0), x1.min(width));
        let (y0, y1) = (y0.max(0), y1.min(height));
        Some(Rect {
            x: self.area.x + x0 as u16,
            y: self.area.y + y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer {
    sprites: SpriteSheet,
}

impl GameRenderer {
    pub fn new(sprites: SpriteSheet) -> Self {
        Self { sprites }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Menu => self.render_menu(frame),
            GameState::Playing => self.render_game(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_menu(&self, frame: &mut Frame) {
        let area = frame.area();
        let menu_text = vec![
            Line::from(""),
            Line::from("L A S T   D A Y S").centered().bold().red(),
            Line::from(""),
            Line::from("Press SPACE to start").centered().white(),
            Line::from(""),
            Line::from("[W/S or Arrows: Move] [Space: Fire] [Q: Quit]")
                .centered()
                .dark_gray(),
        ];

        let menu_area = Rect {
            x: area.x,
            y: area.y + (area.height / 2).saturating_sub(4),
            width: area.width,
            height: area.height.min(8),
        };

        frame.render_widget(
            Paragraph::new(menu_text).alignment(Alignment::Center),
            menu_area,
        );
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();

        // Playfield sits between the HUD row and the controls row
        let playfield = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let viewport = Viewport {
            area: playfield,
            world_width: view.world_width,
            world_height: view.world_height,
        };

        if playfield.height > 0 {
            let block = Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(block, playfield);
        }

        self.render_player(frame, &viewport, view.player);

        let buffer = frame.buffer_mut();
        for enemy in view.enemies {
            if let Some(cells) = viewport.scale_box(&enemy.bounds()) {
                let row = "█".repeat(cells.width as usize);
                for dy in 0..cells.height {
                    buffer.set_string(
                        cells.x,
                        cells.y + dy,
                        &row,
                        Style::default().fg(Color::Red),
                    );
                }
            }
        }

        for projectile in view.projectiles {
            if let Some(cells) = viewport.scale_box(&projectile.bounds()) {
                buffer.set_string(
                    cells.x,
                    cells.y,
                    "-",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        // Stats overlay at the top
        let ammo = if view.reloading {
            Span::styled(
                "Reloading...",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("{}/{}", view.ammo_remaining, view.magazine_size),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let stats = Line::from(vec![
            Span::styled("Ammo: ", Style::default().fg(Color::DarkGray)),
            ammo,
            Span::styled("  Kills: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies_destroyed),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies.len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[W/S or Arrows: Move] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        if area.height > 1 {
            let controls_area = Rect {
                x: area.x + 1,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    fn render_player(&self, frame: &mut Frame, viewport: &Viewport, player: &Player) {
        let Some(cells) = viewport.scale_box(&player.bounds()) else {
            return;
        };

        let color = if player.animation.is_firing() {
            Color::LightYellow
        } else {
            Color::Green
        };

        // Build multi-line text with consistent styling
        let text: Vec<Line> = self
            .sprites
            .frame(player.animation)
            .iter()
            .map(|line| {
                Line::from(line.as_str())
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            })
            .collect();

        frame.render_widget(Paragraph::new(text), cells);
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║      GAME OVER!           ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Enemies destroyed: {}", view.enemies_destroyed))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}
