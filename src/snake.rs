use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Signed so that a head one step past the boundary is representable while
/// the collision check runs.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns the neighboring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }
}

/// Snake body and heading state.
///
/// The body is an ordered cell sequence, head first. Steering never takes
/// effect immediately: a requested heading is held pending until the next
/// tick commits it, and a request for the exact opposite of the current
/// heading is silently dropped so the snake cannot fold back through its
/// own neck.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Direction,
    pending_heading: Option<Direction>,
}

impl Snake {
    /// Creates a snake of `length` cells with its head at `head` and the
    /// tail extending opposite to `heading`.
    #[must_use]
    pub fn new(head: Cell, heading: Direction, length: usize) -> Self {
        let away = heading.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_back(cell);
            cell = cell.step(away);
        }

        Self {
            body,
            heading,
            pending_heading: None,
        }
    }

    /// Creates a snake from explicit body cells (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, heading: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            heading,
            pending_heading: None,
        }
    }

    /// Requests a heading change for the next tick.
    ///
    /// The request replaces any earlier pending one; the reversal check is
    /// re-applied against the committed heading each time, never against
    /// the pending value, so a 180° turn is ignored no matter how the
    /// requests were interleaved.
    pub fn steer(&mut self, requested: Direction) {
        if requested == self.heading.opposite() {
            return;
        }
        self.pending_heading = Some(requested);
    }

    /// Commits the pending heading, if any, as the active heading.
    pub(crate) fn commit_heading(&mut self) {
        if let Some(direction) = self.pending_heading.take() {
            self.heading = direction;
        }
    }

    /// Returns the cell the head would occupy after one step along the
    /// committed heading.
    #[must_use]
    pub fn next_head(&self) -> Cell {
        self.head().step(self.heading)
    }

    /// Moves the head to `new_head`, dropping the tail unless growing.
    ///
    /// The caller has already established that `new_head` keeps the body
    /// free of overlaps.
    pub(crate) fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one cell")
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one cell")
    }

    /// Returns true if any body cell occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns the committed heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns current cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body cells from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Cell, Snake};

    #[test]
    fn bounds_check_covers_all_four_edges() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Cell { x: 0, y: 0 }.is_within_bounds(bounds));
        assert!(Cell { x: 9, y: 7 }.is_within_bounds(bounds));
        assert!(!Cell { x: -1, y: 3 }.is_within_bounds(bounds));
        assert!(!Cell { x: 4, y: -1 }.is_within_bounds(bounds));
        assert!(!Cell { x: 10, y: 3 }.is_within_bounds(bounds));
        assert!(!Cell { x: 4, y: 8 }.is_within_bounds(bounds));
    }

    #[test]
    fn new_snake_extends_away_from_heading() {
        let snake = Snake::new(Cell { x: 5, y: 5 }, Direction::Right, 3);

        let body: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Cell { x: 5, y: 5 },
                Cell { x: 4, y: 5 },
                Cell { x: 3, y: 5 },
            ]
        );
    }

    #[test]
    fn advance_keeps_length_unless_growing() {
        let mut snake = Snake::new(Cell { x: 5, y: 5 }, Direction::Right, 3);

        snake.advance(snake.next_head(), false);
        assert_eq!(snake.head(), Cell { x: 6, y: 5 });
        assert_eq!(snake.tail(), Cell { x: 4, y: 5 });
        assert_eq!(snake.len(), 3);

        snake.advance(snake.next_head(), true);
        assert_eq!(snake.head(), Cell { x: 7, y: 5 });
        assert_eq!(snake.tail(), Cell { x: 4, y: 5 });
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn steering_is_pending_until_committed() {
        let mut snake = Snake::new(Cell { x: 5, y: 5 }, Direction::Right, 2);

        snake.steer(Direction::Up);
        assert_eq!(snake.heading(), Direction::Right);
        assert_eq!(snake.next_head(), Cell { x: 6, y: 5 });

        snake.commit_heading();
        assert_eq!(snake.heading(), Direction::Up);
        assert_eq!(snake.next_head(), Cell { x: 5, y: 4 });
    }

    #[test]
    fn reversal_request_is_dropped() {
        let mut snake = Snake::new(Cell { x: 5, y: 5 }, Direction::Up, 3);

        snake.steer(Direction::Down);
        snake.commit_heading();

        assert_eq!(snake.heading(), Direction::Up);
    }

    #[test]
    fn later_request_overwrites_pending_heading() {
        let mut snake = Snake::new(Cell { x: 5, y: 5 }, Direction::Right, 3);

        snake.steer(Direction::Up);
        snake.steer(Direction::Down);
        snake.commit_heading();

        assert_eq!(snake.heading(), Direction::Down);
    }

    #[test]
    fn reversal_check_uses_committed_heading_not_pending() {
        let mut snake = Snake::new(Cell { x: 5, y: 5 }, Direction::Right, 3);

        // Up is pending; Down is opposite to pending Up but not to the
        // committed Right heading, so it must still be accepted.
        snake.steer(Direction::Up);
        snake.steer(Direction::Down);
        assert_eq!(snake.heading(), Direction::Right);

        snake.commit_heading();
        assert_eq!(snake.heading(), Direction::Down);

        // Heading is now Down, so Up gets dropped while Left is fine.
        snake.steer(Direction::Up);
        snake.commit_heading();
        assert_eq!(snake.heading(), Direction::Down);

        snake.steer(Direction::Left);
        snake.commit_heading();
        assert_eq!(snake.heading(), Direction::Left);
    }

    #[test]
    fn occupies_checks_every_segment() {
        let snake = Snake::from_segments(
            vec![
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
                Cell { x: 0, y: 2 },
            ],
            Direction::Right,
        );

        assert!(snake.occupies(Cell { x: 2, y: 2 }));
        assert!(snake.occupies(Cell { x: 0, y: 2 }));
        assert!(!snake.occupies(Cell { x: 3, y: 2 }));
    }
}
