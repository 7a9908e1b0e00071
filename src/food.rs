use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GridSize;
use crate::snake::{Cell, Snake};

/// Picks a food cell uniformly at random from the cells the snake does not
/// occupy.
///
/// Returns `None` when the snake covers the whole grid; a fully occupied
/// board is the caller's win condition, not an error. Enumerating the free
/// cells keeps the draw uniform and bounded no matter how long the snake
/// has grown.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    let mut free = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let cell = Cell { x, y };
            if !snake.occupies(cell) {
                free.push(cell);
            }
        }
    }

    free.choose(rng).copied()
}
