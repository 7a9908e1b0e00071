use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GridSize, Theme};
use crate::engine::GridSnakeEngine;
use crate::input::Direction;
use crate::snake::Cell;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_end_menu, render_pause_menu, render_start_menu};

const GLYPH_BODY: &str = "█";
const GLYPH_FOOD: &str = "*";
const GLYPH_HEAD_UP: &str = "^";
const GLYPH_HEAD_DOWN: &str = "v";
const GLYPH_HEAD_LEFT: &str = "<";
const GLYPH_HEAD_RIGHT: &str = ">";

/// Which screen the driver is currently showing.
///
/// This is presentation state, not simulation state: the engine keeps
/// running or terminal regardless, and pausing simply means the driver
/// stops calling `tick`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    Ended,
}

/// Renders one full frame from immutable engine state.
pub fn render(frame: &mut Frame<'_>, engine: &GridSnakeEngine, screen: Screen, info: &HudInfo<'_>) {
    let theme = info.theme;
    let area = frame.area();
    let play_area = render_hud(frame, area, engine, info);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, engine, theme);
    render_snake(frame, inner, engine, theme);

    match screen {
        Screen::Start => render_start_menu(frame, play_area, info.high_score, theme),
        Screen::Paused => render_pause_menu(frame, play_area, theme),
        Screen::Ended => render_end_menu(
            frame,
            play_area,
            engine.score(),
            info.previous_high_score,
            engine.state(),
            engine.collision(),
            theme,
        ),
        Screen::Playing => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, engine: &GridSnakeEngine, theme: &Theme) {
    let Some(food) = engine.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, engine.grid(), food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, engine: &GridSnakeEngine, theme: &Theme) {
    let head = engine.snake.head();

    let buffer = frame.buffer_mut();
    for segment in engine.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, engine.grid(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(engine.snake.heading()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_BODY, Style::new().fg(theme.snake_body));
        }
    }
}

fn head_glyph(heading: Direction) -> &'static str {
    match heading {
        Direction::Up => GLYPH_HEAD_UP,
        Direction::Down => GLYPH_HEAD_DOWN,
        Direction::Left => GLYPH_HEAD_LEFT,
        Direction::Right => GLYPH_HEAD_RIGHT,
    }
}

/// Maps a logical grid cell to a terminal coordinate inside `inner`.
///
/// Cells outside the grid or past the visible area map to `None`; the
/// board is simply clipped when the terminal is smaller than the grid.
fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
