use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{
    FoodKind, GameMode, GameOverSummary, GamePhase, GameState, Position, PowerUpKind,
};
use crate::metrics::{format_clock, PlayStats};
use crate::storage::HighScore;

/// Everything drawn around the board
pub struct Hud<'a> {
    pub selected_mode: GameMode,
    pub high_score: Option<&'a HighScore>,
    pub stats: &'a PlayStats,
    pub outcome: Option<&'a GameOverSummary>,
    /// Name typed so far, while the high score prompt is open
    pub name_entry: Option<&'a str>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(4), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, hud), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(5),
                Constraint::Percentage(90),
                Constraint::Percentage(5),
            ])
            .split(chunks[1])[1];

        match (state.phase, hud.outcome) {
            (GamePhase::GameOver, Some(outcome)) => {
                frame.render_widget(self.render_game_over(outcome, hud), game_area)
            }
            _ => frame.render_widget(self.render_grid(state), game_area),
        }

        frame.render_widget(self.render_controls(state, hud), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);
        let powered = state.active_power_up.is_some();

        for y in 0..state.grid_height {
            let spans: Vec<Span> = (0..state.grid_width)
                .map(|x| self.cell(state, Position::new(x as i32, y as i32), powered))
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Snake - {} ", state.mode)),
            )
            .alignment(Alignment::Center)
    }

    fn cell(&self, state: &GameState, pos: Position, powered: bool) -> Span<'static> {
        let snake_color = if powered { Color::Yellow } else { Color::Green };

        if pos == state.snake.head() {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(if powered { Color::LightYellow } else { Color::Cyan })
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.snake.contains(pos) {
            Span::styled("□ ", Style::default().fg(snake_color))
        } else if pos == state.food.position {
            let (glyph, color) = food_glyph(state.food.kind);
            Span::styled(
                glyph,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        } else if state.power_up.is_some_and(|p| p.position == pos) {
            Span::styled(
                "★ ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.is_on_obstacle(pos) {
            Span::styled("██", Style::default().fg(Color::Gray))
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_stats(&self, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let best = match hud.high_score {
            Some(record) if !record.name.is_empty() => {
                format!("{} ({})", record.score, record.name)
            }
            Some(record) => record.score.to_string(),
            None => "-".to_string(),
        };

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(best, value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(state.mode.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(format_clock(state.clock_ms), value),
            Span::raw("    "),
            Span::styled("Eaten: ", label),
            Span::styled(hud.stats.total_food_eaten().to_string(), value),
            Span::raw("    "),
            Span::styled("Power-ups: ", label),
            Span::styled(hud.stats.power_ups_collected.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(hud.stats.games_played.to_string(), value),
        ];

        if let (Some(active), Some(remaining)) =
            (state.active_power_up, state.power_up_remaining_ms())
        {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("{} {:.1}s", power_up_label(active.kind), remaining as f64 / 1000.0),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, outcome: &GameOverSummary, hud: &Hud) -> Paragraph<'_> {
        let gray = Style::default().fg(Color::Gray);
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    outcome.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            self.render_run_summary(hud.stats),
            Line::from(""),
        ];

        if let Some(name) = hud.name_entry {
            text.push(Line::from(vec![Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]));
            text.push(Line::from(vec![
                Span::styled("Your name: ", gray),
                Span::styled(format!("{name}_"), Style::default().fg(Color::White)),
            ]));
            text.push(Line::from(""));
            text.push(Line::from(vec![
                key("Enter", Color::Green),
                Span::styled(" to save, ", gray),
                key("Esc", Color::Yellow),
                Span::styled(" to stay anonymous", gray),
            ]));
        } else {
            text.push(Line::from(vec![
                Span::styled("Press ", gray),
                key("R", Color::Green),
                Span::styled(" to restart or ", gray),
                key("Q", Color::Red),
                Span::styled(" to quit", gray),
            ]));
            text.push(Line::from(vec![
                Span::styled("Next mode: ", gray),
                Span::styled(hud.selected_mode.to_string(), Style::default().fg(Color::Cyan)),
                Span::styled("  (1 classic, 2 speed, 3 maze)", gray),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    /// Food eaten by kind and power-ups collected during the run
    fn render_run_summary(&self, stats: &PlayStats) -> Line<'static> {
        let gray = Style::default().fg(Color::Gray);
        let mut spans = Vec::new();
        for kind in FoodKind::ALL {
            let (glyph, color) = food_glyph(kind);
            spans.push(Span::styled(glyph, Style::default().fg(color)));
            spans.push(Span::styled(
                format!("{} {}   ", kind.name(), stats.food_eaten(kind)),
                gray,
            ));
        }
        spans.push(Span::styled("★ ", Style::default().fg(Color::Magenta)));
        spans.push(Span::styled(
            format!("power-ups {}", stats.power_ups_collected),
            gray,
        ));
        Line::from(spans)
    }

    fn render_controls(&self, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        let mut first = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("1/2/3", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" mode (next: {}) | ", hud.selected_mode)),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ];
        if state.phase == GamePhase::NotStarted {
            first.insert(
                0,
                Span::styled(
                    "Press an arrow key to start | ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        }

        let mut legend = Vec::new();
        for kind in FoodKind::ALL {
            let (glyph, color) = food_glyph(kind);
            legend.push(Span::styled(glyph, Style::default().fg(color)));
            legend.push(Span::raw(format!("{} +{}   ", kind.name(), kind.points())));
        }
        legend.push(Span::styled("★ ", Style::default().fg(Color::Magenta)));
        legend.push(Span::raw("power-up"));

        Paragraph::new(vec![Line::from(first), Line::from(legend)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn food_glyph(kind: FoodKind) -> (&'static str, Color) {
    match kind {
        FoodKind::Apple => ("● ", Color::Red),
        FoodKind::Banana => ("◗ ", Color::LightYellow),
        FoodKind::Orange => ("● ", Color::LightRed),
        FoodKind::Mouse => ("ɱ ", Color::Gray),
    }
}

fn power_up_label(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Speed => "SPEED",
        PowerUpKind::Invincibility => "INVINCIBLE",
        PowerUpKind::Magnet => "MAGNET",
    }
}
