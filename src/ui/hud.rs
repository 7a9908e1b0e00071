use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::engine::GridSnakeEngine;

/// Values the HUD shows that live outside the engine.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    /// High score as it stood when the current round began; the end
    /// screen compares against this to announce a new record.
    pub previous_high_score: u32,
    pub speed_level: u32,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD below the board and returns the remaining
/// play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    engine: &GridSnakeEngine,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, info_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(engine, info)).alignment(Alignment::Right),
        info_area,
    );

    play_area
}

fn info_line(engine: &GridSnakeEngine, info: &HudInfo<'_>) -> Line<'static> {
    let label = Style::default().fg(info.theme.hud_label);
    let value = Style::default().fg(info.theme.hud_value);
    let sep = Span::styled(" │ ", label);

    // Live high score: the stored one is only rewritten when a run ends.
    let high_score = info.high_score.max(engine.score());

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(engine.score().to_string(), value),
        sep.clone(),
        Span::styled("Hi: ", label),
        Span::styled(high_score.to_string(), value),
        sep.clone(),
        Span::styled("Level: ", label),
        Span::styled(info.speed_level.to_string(), value),
        sep,
        Span::styled("Length: ", label),
        Span::styled(engine.snake.len().to_string(), value),
    ])
}
