use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction as Heading, NoticePhase, Position};
use crate::metrics::GameMetrics;
use crate::session::Snapshot;
use crate::tutorial::{CueFrame, TUTORIAL_STEPS};

/// Cells the tutorial arrow travels at the far end of its slide
const CUE_TRAVEL: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_home(&self, frame: &mut Frame, high_score: u32) {
        let area = centered_rect(40, 9, frame.area());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "🐍 Snake Game",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(high_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" start game | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
        ];

        let home = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(home, area);
    }

    /// Draw the game screen. `cue` is the tutorial arrow animation frame,
    /// needed while the tutorial is running.
    pub fn render_game(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot<'_>,
        metrics: &GameMetrics,
        cue: Option<CueFrame>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let board_width = (snapshot.grid_width as u16).saturating_mul(2) + 2;
        let board_height = snapshot.grid_height as u16 + 2;
        let board_area = centered_rect(board_width, board_height, chunks[1]);
        frame.render_widget(self.render_grid(snapshot), board_area);

        if !snapshot.tutorial_done {
            let overlay = centered_rect(36, 13, chunks[1]);
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_tutorial(snapshot, cue), overlay);
        } else if snapshot.game_over {
            let overlay = centered_rect(36, 8, chunks[1]);
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_game_over(snapshot), overlay);
        }

        if snapshot.notice == NoticePhase::Notifying {
            let popup = Rect {
                y: chunks[1].y,
                ..centered_rect(26, 3, chunks[1])
            };
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_notice(), popup);
        }

        frame.render_widget(self.render_controls(snapshot), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let head = snapshot.snake.first().copied();
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        head_glyph(snapshot.direction),
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("██", Style::default().fg(Color::Green))
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

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Paragraph<'static> {
        let ticks_per_second = (1000.0 / snapshot.tick_interval.as_millis().max(1) as f64).round();

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Green)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", ticks_per_second),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Gray)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Gray)),
            Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_tutorial(&self, snapshot: &Snapshot<'_>, cue: Option<CueFrame>) -> Paragraph<'static> {
        let expected = snapshot.tutorial_expected.unwrap_or(TUTORIAL_STEPS[0]);
        let cue = cue.unwrap_or(CueFrame {
            slide: 0.0,
            scale: 1.0,
            opacity: 1.0,
        });

        let offset = cue.offset_cells(CUE_TRAVEL);
        let arrow_style = if cue.is_emphasized() {
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        let mut text = vec![
            Line::from(Span::styled(
                "Gesture Tutorial",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Swipe in the shown direction",
                Style::default().fg(Color::Gray),
            )),
        ];
        text.extend(arrow_lines(expected, offset, arrow_style));
        text.push(Line::from(Span::styled(
            format!("Step {} / {}", snapshot.tutorial_step + 1, TUTORIAL_STEPS.len()),
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_notice(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            "🎉 New High Score!",
            Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Green))
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
    }

    fn render_controls(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Drag", Style::default().fg(Color::Cyan)),
            Span::raw(", "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to swipe | "),
        ];
        if snapshot.tutorial_done {
            spans.push(Span::styled("R", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" restart | "));
        }
        spans.push(Span::styled("B", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" back | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Heading) -> &'static str {
    match direction {
        Heading::Up => "▲▲",
        Heading::Down => "▼▼",
        Heading::Left => "◀◀",
        Heading::Right => "▶▶",
    }
}

/// Five rows holding the arrow, slid `offset` cells toward `direction`
fn arrow_lines(direction: Heading, offset: u16, style: Style) -> Vec<Line<'static>> {
    let rows = 2 * CUE_TRAVEL + 1;
    let (dx, dy) = direction.delta();
    let row = (CUE_TRAVEL as i32 + dy * offset as i32) as u16;
    // The line is centered, so moving the arrow by one two-character cell
    // takes four characters of padding on the trailing side.
    let pad = 4 * offset as usize;
    let (left_pad, right_pad) = match dx {
        1 => (pad, 0),
        -1 => (0, pad),
        _ => (0, 0),
    };

    (0..rows)
        .map(|r| {
            if r == row {
                Line::from(vec![
                    Span::raw(" ".repeat(left_pad)),
                    Span::styled(direction.arrow(), style),
                    Span::raw(" ".repeat(right_pad)),
                ])
            } else {
                Line::from("")
            }
        })
        .collect()
}

/// A `width` x `height` rect centered in `area`, clipped to it
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
