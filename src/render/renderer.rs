use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, Position, Snapshot};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_scores(snapshot), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // The board is only drawn during a run
        if snapshot.started {
            frame.render_widget(self.render_grid(snapshot), game_area);
        } else {
            frame.render_widget(self.render_instructions(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(snapshot.started), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let head = snapshot.snake.first().copied();
        let tail = snapshot.snake.last().copied();
        let tail_direction = snapshot.tail_direction();

        let mut lines = Vec::with_capacity(snapshot.grid_size as usize);

        for y in 1..=snapshot.grid_size {
            let mut spans = Vec::with_capacity(snapshot.grid_size as usize);

            for x in 1..=snapshot.grid_size {
                let pos = Position::new(x, y);

                let cell = if head == Some(pos) {
                    Span::styled(
                        head_glyph(snapshot.direction),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if tail == Some(pos) && snapshot.snake.len() > 1 {
                    Span::styled(tail_glyph(tail_direction), Style::default().fg(Color::Green))
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_scores(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_score(snapshot.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_score(snapshot.high_score),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Delay: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", snapshot.delay_ms),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_instructions(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format_score(snapshot.high_score),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_controls(&self, started: bool) -> Paragraph<'static> {
        let mut spans = Vec::new();
        if started {
            spans.push(Span::styled("↑↓←→", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" or "));
            spans.push(Span::styled("WASD", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" to move | "));
        } else {
            spans.push(Span::styled("Space", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" to start | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores are shown with three digits, e.g. `007`
pub fn format_score(score: u32) -> String {
    format!("{:03}", score)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn tail_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up | Direction::Down => "┃ ",
        Direction::Left | Direction::Right => "━ ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot(started: bool) -> Snapshot {
        Snapshot {
            snake: vec![Position::new(3, 2), Position::new(2, 2), Position::new(1, 2)],
            food: Position::new(5, 5),
            score: 2,
            high_score: 14,
            started,
            direction: Direction::Right,
            grid_size: 6,
            delay_ms: 195,
        }
    }

    fn draw(snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, snapshot))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(format_score(0), "000");
        assert_eq!(format_score(7), "007");
        assert_eq!(format_score(123), "123");
        assert_eq!(format_score(1234), "1234");
    }

    #[test]
    fn test_idle_screen_shows_instructions() {
        let screen = draw(&snapshot(false));
        assert!(screen.contains("Press Space to start"));
        assert!(screen.contains("014"));
        assert!(!screen.contains('▶'));
    }

    #[test]
    fn test_running_screen_draws_board() {
        let screen = draw(&snapshot(true));
        assert!(screen.contains("Score: 002"));
        assert!(screen.contains('▶'));
        assert!(screen.contains('●'));
        assert!(screen.contains('━'));
    }

    #[test]
    fn test_deserialized_empty_snake_still_draws() {
        let mut snap = snapshot(true);
        snap.snake.clear();
        let json = serde_json::to_string(&snap).unwrap();
        let snap: Snapshot = serde_json::from_str(&json).unwrap();
        assert!(snap.snake.is_empty());

        let screen = draw(&snap);
        assert!(screen.contains('●'));
        assert!(!screen.contains('▶'));
    }

    #[test]
    fn test_head_glyph_follows_direction() {
        assert_eq!(head_glyph(Direction::Up), "▲ ");
        assert_eq!(head_glyph(Direction::Left), "◀ ");
    }
}
