use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::config::GameConfig;
use crate::food::Food;
use crate::grid::Grid;
use crate::input::{Quit, Steering};
use crate::snake::{Direction, Snake};
use crate::term::{Canvas, Glyph};

use anyhow::{bail, Result};
use rand::Rng;
use tracing::{debug, info, warn};

pub const START_DIRECTION: Direction = Direction::Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver { score: u32 },
    Quit,
}

pub struct SnakeGame<R: Rng> {
    grid: Grid,
    snake: Snake,
    food: Food,
    steering: Steering,
    score: u32,
    tick_interval: Duration,
    config: GameConfig,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(grid: Grid, config: GameConfig, steering: Steering, mut rng: R) -> Self {
        let snake = Snake::new(grid.center(), config.initial_length, steering.committed(), &grid);
        if snake.len() < config.initial_length {
            warn!(requested = config.initial_length, length = snake.len(), "starting snake shortened to fit the grid");
        }
        let food = Food::new(&grid, &mut rng);
        let tick_interval = config.speed.base_tick;

        SnakeGame { grid, snake, food, steering, score: 0, tick_interval, config, rng }
    }

    /// The wait between ticks doubles as the quit check.
    pub fn run<C: Canvas>(&mut self, canvas: &mut C, quit: &Receiver<Quit>) -> Result<Outcome> {
        info!(width = self.grid.width(), height = self.grid.height(), "game started");

        loop {
            if self.tick(canvas)? == TickOutcome::Crashed {
                info!(score = self.score, length = self.snake.len(), "game over");
                return Ok(Outcome::GameOver { score: self.score });
            }

            match quit.recv_timeout(self.tick_interval) {
                Ok(Quit) => return Ok(Outcome::Quit),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => bail!("input reader stopped"),
            }
        }
    }

    pub fn tick<C: Canvas>(&mut self, canvas: &mut C) -> Result<TickOutcome> {
        if !self.snake.is_alive() {
            return Ok(TickOutcome::Crashed);
        }

        let direction = self.steering.commit();
        let new_head = self.snake.advance(direction, &self.grid);

        // Checked before trimming: the tail about to leave still counts.
        if self.snake.check_self_collision() {
            return Ok(TickOutcome::Crashed);
        }

        let outcome = if self.food.is_consumed(new_head) {
            self.food.place_random(&self.grid, &mut self.rng);
            self.award_point();
            debug!(score = self.score, food = ?self.food.position(), "food eaten");
            TickOutcome::Ate
        } else {
            self.snake.trim_tail();
            TickOutcome::Moved
        };

        self.draw(canvas)?;
        Ok(outcome)
    }

    fn award_point(&mut self) {
        self.score += 1;

        let speed = &self.config.speed;
        if self.score % speed.points_per_level == 0 {
            self.tick_interval = self.tick_interval.saturating_sub(speed.step).max(speed.min_tick);
            info!(score = self.score, tick_ms = self.tick_interval.as_millis() as u64, "speeding up");
        }
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<()> {
        let body = self.snake.body();

        canvas.clear()?;
        canvas.draw_cells(&body[..body.len() - 1], Glyph::Body)?;
        canvas.draw_cell(self.snake.head(), Glyph::Head)?;
        canvas.draw_cell(self.food.position(), Glyph::Food)?;
        canvas.move_cursor_home()?;
        canvas.flush()
    }
}
