use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, EngineConfig, GridSize};
use crate::food::place_food;
use crate::input::Direction;
use crate::snake::{Cell, Snake};

/// Lifecycle state of one engine instance.
///
/// `GameOver` and `BoardFull` are both terminal: no tick leaves them, and
/// nothing mutates once they are reached. `BoardFull` is the win-like
/// ending where the snake occupies every cell and food can no longer be
/// placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EngineState {
    Running,
    GameOver,
    BoardFull,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved one cell; length unchanged.
    Moved,
    /// The snake moved onto food and grew by one cell; new food was placed.
    AteFood,
    /// The snake hit the boundary or itself; the engine is now `GameOver`.
    Collided,
    /// The snake ate the last free cell; the engine is now `BoardFull`.
    BoardFull,
    /// The engine was already terminal and the tick changed nothing.
    GameOver,
}

/// What the snake ran into when a tick ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionKind {
    Wall,
    SelfBite,
}

/// Fixed-tick snake simulation on a bounded grid.
///
/// The engine is a pure state machine: it performs no I/O, knows nothing
/// about time, and is advanced only by [`tick`](Self::tick). A driver
/// samples input between ticks via [`set_heading`](Self::set_heading) and
/// reads the fields and accessors after each tick to render.
///
/// `snake` and `food` are public so tests can stage exact board layouts;
/// the engine maintains its invariants for every mutation it performs
/// itself.
#[derive(Debug, Clone)]
pub struct GridSnakeEngine {
    pub snake: Snake,
    pub food: Option<Cell>,
    grid: GridSize,
    score: u32,
    ticks: u64,
    state: EngineState,
    collision: Option<CollisionKind>,
    rng: StdRng,
}

impl GridSnakeEngine {
    /// Builds a freshly seeded engine from a validated configuration.
    ///
    /// The snake starts horizontally centered, head on the center cell and
    /// tail extending left, heading right.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Builds a deterministic engine for tests and reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: EngineConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid;
        let head = Cell {
            x: i32::from(grid.width / 2),
            y: i32::from(grid.height / 2),
        };
        let snake = Snake::new(head, Direction::Right, usize::from(config.start_length));
        let food = place_food(&mut rng, grid, &snake);
        debug_assert!(
            food.is_some(),
            "validated configurations leave at least one free cell"
        );

        Ok(Self {
            snake,
            food,
            grid,
            score: 0,
            ticks: 0,
            state: EngineState::Running,
            collision: None,
            rng,
        })
    }

    /// Requests a heading for the next tick.
    ///
    /// Repeated calls between ticks overwrite each other; only the last
    /// accepted request matters. A request for the exact opposite of the
    /// current heading is ignored, and nothing is accepted once the engine
    /// has reached a terminal state.
    pub fn set_heading(&mut self, requested: Direction) {
        if self.state == EngineState::Running {
            self.snake.steer(requested);
        }
    }

    /// Advances the simulation by exactly one step.
    ///
    /// Commits the pending heading, then resolves the move: boundary
    /// collision is checked first, then self collision, then food. Either
    /// collision freezes the engine in `GameOver` without touching the
    /// body. Eating the last free cell scores normally and ends the game
    /// in `BoardFull` instead of placing food.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != EngineState::Running {
            return TickOutcome::GameOver;
        }

        self.ticks += 1;
        self.snake.commit_heading();
        let new_head = self.snake.next_head();

        if !new_head.is_within_bounds(self.grid) {
            self.state = EngineState::GameOver;
            self.collision = Some(CollisionKind::Wall);
            return TickOutcome::Collided;
        }

        // Occupancy is the pre-move body including the tail, so stepping
        // into the cell the tail is about to vacate still collides.
        if self.snake.occupies(new_head) {
            self.state = EngineState::GameOver;
            self.collision = Some(CollisionKind::SelfBite);
            return TickOutcome::Collided;
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        match place_food(&mut self.rng, self.grid, &self.snake) {
            Some(cell) => {
                self.food = Some(cell);
                TickOutcome::AteFood
            }
            None => {
                self.food = None;
                self.state = EngineState::BoardFull;
                TickOutcome::BoardFull
            }
        }
    }

    /// Returns the engine lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the number of food cells eaten so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns how many ticks have advanced the simulation.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns what ended the game, once a collision has.
    #[must_use]
    pub fn collision(&self) -> Option<CollisionKind> {
        self.collision
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::{ConfigError, EngineConfig, GridSize};
    use crate::input::Direction;
    use crate::snake::{Cell, Snake};

    use super::{CollisionKind, EngineState, GridSnakeEngine, TickOutcome};

    fn engine_on(width: u16, height: u16, seed: u64) -> GridSnakeEngine {
        GridSnakeEngine::with_seed(EngineConfig::with_grid(width, height), seed)
            .expect("test configuration should be valid")
    }

    #[test]
    fn initialization_centers_snake_and_places_food() {
        let engine = engine_on(20, 20, 1);

        let body: Vec<Cell> = engine.snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Cell { x: 10, y: 10 },
                Cell { x: 9, y: 10 },
                Cell { x: 8, y: 10 },
            ]
        );
        assert_eq!(engine.snake.heading(), Direction::Right);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.state(), EngineState::Running);

        let food = engine.food.expect("fresh boards always have food");
        assert!(food.is_within_bounds(engine.grid()));
        assert!(!engine.snake.occupies(food));
    }

    #[test]
    fn invalid_configuration_is_rejected_at_construction() {
        let err = GridSnakeEngine::with_seed(EngineConfig::with_grid(0, 5), 1)
            .expect_err("zero width must be rejected");
        assert_eq!(
            err,
            ConfigError::ZeroDimension {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn plain_move_keeps_length_and_drops_tail() {
        let mut engine = engine_on(10, 10, 2);
        engine.snake = Snake::new(Cell { x: 4, y: 4 }, Direction::Right, 3);
        engine.food = Some(Cell { x: 0, y: 0 });

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snake.head(), Cell { x: 5, y: 4 });
        assert_eq!(engine.snake.len(), 3);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn eating_food_grows_scores_and_replaces_food() {
        let mut engine = engine_on(10, 10, 3);
        engine.snake = Snake::new(Cell { x: 4, y: 4 }, Direction::Right, 3);
        engine.food = Some(Cell { x: 5, y: 4 });

        assert_eq!(engine.tick(), TickOutcome::AteFood);
        assert_eq!(engine.snake.len(), 4);
        assert_eq!(engine.score(), 1);

        let food = engine.food.expect("food is replaced straight away");
        assert!(!engine.snake.occupies(food));
    }

    #[test]
    fn wall_collision_freezes_the_body() {
        let mut engine = engine_on(6, 6, 4);
        engine.snake = Snake::new(Cell { x: 5, y: 2 }, Direction::Right, 3);
        let before: Vec<Cell> = engine.snake.segments().copied().collect();

        assert_eq!(engine.tick(), TickOutcome::Collided);
        assert_eq!(engine.state(), EngineState::GameOver);
        assert_eq!(engine.collision(), Some(CollisionKind::Wall));

        let after: Vec<Cell> = engine.snake.segments().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn snake_collides_with_its_own_body() {
        let mut engine = engine_on(8, 8, 5);
        // Closed hook: one step down from (2,2) lands on the body at (2,3).
        engine.snake = Snake::from_segments(
            vec![
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
                Cell { x: 1, y: 3 },
                Cell { x: 2, y: 3 },
                Cell { x: 3, y: 3 },
                Cell { x: 3, y: 2 },
            ],
            Direction::Down,
        );
        engine.food = Some(Cell { x: 7, y: 7 });

        assert_eq!(engine.tick(), TickOutcome::Collided);
        assert_eq!(engine.collision(), Some(CollisionKind::SelfBite));
    }

    #[test]
    fn moving_into_vacating_tail_cell_still_collides() {
        let mut engine = engine_on(8, 8, 6);
        // Closed 2x2 loop: the next head cell is the current tail cell.
        engine.snake = Snake::from_segments(
            vec![
                Cell { x: 1, y: 1 },
                Cell { x: 2, y: 1 },
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
            ],
            Direction::Down,
        );
        engine.food = Some(Cell { x: 5, y: 5 });

        // The tail would vacate (1,2) this tick, but occupancy is checked
        // before the tail moves.
        assert_eq!(engine.tick(), TickOutcome::Collided);
        assert_eq!(engine.collision(), Some(CollisionKind::SelfBite));
        assert_eq!(engine.snake.len(), 4);
    }

    #[test]
    fn reversal_request_keeps_original_heading() {
        let mut engine = engine_on(10, 10, 7);
        engine.snake = Snake::new(Cell { x: 4, y: 4 }, Direction::Right, 3);
        engine.food = Some(Cell { x: 0, y: 0 });

        engine.set_heading(Direction::Left);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snake.head(), Cell { x: 5, y: 4 });
    }

    #[test]
    fn terminal_engine_ignores_ticks_and_input() {
        let mut engine = engine_on(6, 6, 8);
        engine.snake = Snake::new(Cell { x: 5, y: 2 }, Direction::Right, 3);

        assert_eq!(engine.tick(), TickOutcome::Collided);
        let ticks = engine.ticks();
        let body: Vec<Cell> = engine.snake.segments().copied().collect();
        let food = engine.food;

        engine.set_heading(Direction::Up);
        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::GameOver);
        }

        assert_eq!(engine.state(), EngineState::GameOver);
        assert_eq!(engine.ticks(), ticks);
        assert_eq!(engine.snake.heading(), Direction::Right);
        assert_eq!(engine.food, food);
        let after: Vec<Cell> = engine.snake.segments().copied().collect();
        assert_eq!(body, after);
    }

    #[test]
    fn eating_the_last_free_cell_wins_with_board_full() {
        let config = EngineConfig {
            grid: GridSize {
                width: 2,
                height: 2,
            },
            start_length: 1,
        };
        let mut engine = GridSnakeEngine::with_seed(config, 9).expect("valid configuration");
        engine.snake = Snake::from_segments(
            vec![
                Cell { x: 0, y: 0 },
                Cell { x: 0, y: 1 },
                Cell { x: 1, y: 1 },
            ],
            Direction::Right,
        );
        engine.food = Some(Cell { x: 1, y: 0 });

        assert_eq!(engine.tick(), TickOutcome::BoardFull);
        assert_eq!(engine.state(), EngineState::BoardFull);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.snake.len(), 4);
        assert_eq!(engine.food, None);

        // Terminal like any other ending.
        assert_eq!(engine.tick(), TickOutcome::GameOver);
        assert_eq!(engine.state(), EngineState::BoardFull);
    }

    #[test]
    fn random_walk_never_breaks_invariants() {
        let mut driver_rng = StdRng::seed_from_u64(42);
        let mut engine = engine_on(9, 9, 42);
        let mut last_score = 0;

        for _ in 0..2_000 {
            let requested = match driver_rng.gen_range(0..4) {
                0 => Direction::Up,
                1 => Direction::Down,
                2 => Direction::Left,
                _ => Direction::Right,
            };
            engine.set_heading(requested);

            let len_before = engine.snake.len();
            let outcome = engine.tick();

            match outcome {
                TickOutcome::Moved => assert_eq!(engine.snake.len(), len_before),
                TickOutcome::AteFood | TickOutcome::BoardFull => {
                    assert_eq!(engine.snake.len(), len_before + 1);
                }
                TickOutcome::Collided | TickOutcome::GameOver => {
                    assert_eq!(engine.snake.len(), len_before);
                }
            }

            let unique: HashSet<Cell> = engine.snake.segments().copied().collect();
            assert_eq!(unique.len(), engine.snake.len(), "body cells overlap");

            if let Some(food) = engine.food {
                assert!(!engine.snake.occupies(food));
            }
            assert!(engine.score() >= last_score);
            last_score = engine.score();

            if engine.state() != EngineState::Running {
                break;
            }
        }
    }
}
