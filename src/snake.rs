use crate::Coords;
use crate::grid::Grid;
use Direction::*;
use SnakeState::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// True when `other` lies on the other axis: Up/Down against Left/Right.
    pub fn is_perpendicular(self, other: Direction) -> bool {
        matches!((self, other), (Up | Down, Left | Right) | (Left | Right, Up | Down))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeState {
    Alive,
    Dead,
}

/// Body cells ordered oldest to newest; the last one is the head.
pub struct Snake {
    body: Vec<Coords>,
    state: SnakeState,
}

impl Snake {
    /// Lays out `size` collinear segments heading in `direction`, centred on `center`.
    /// The length is capped one short of a full line of the grid, which leaves the
    /// cell ahead of the head free.
    pub fn new(center: Coords, size: usize, direction: Direction, grid: &Grid) -> Self {
        let room = match direction {
            Left | Right => grid.width(),
            Up | Down => grid.height(),
        } as usize;
        let size = size.min(room).max(1);

        let mut tail = center;
        for _ in 0..(size - 1) / 2 {
            tail = grid.next(tail, direction.opposite());
        }

        let mut body = Vec::with_capacity(size);
        body.push(tail);
        for _ in 1..size {
            let last = body[body.len() - 1];
            body.push(grid.next(last, direction));
        }

        Snake { body, state: Alive }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body, state: Alive }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn is_alive(&self) -> bool {
        self.state == Alive
    }

    /// Pushes a new head one cell along `direction`. The tail stays put until
    /// `trim_tail` runs, so for one moment the body is a cell longer.
    pub fn advance(&mut self, direction: Direction, grid: &Grid) -> Coords {
        if !self.is_alive() {
            return self.head();
        }

        let new_head = grid.next(self.head(), direction);
        self.body.push(new_head);
        new_head
    }

    pub fn trim_tail(&mut self) -> Option<Coords> {
        if self.body.len() > 1 {
            Some(self.body.remove(0))
        } else {
            None
        }
    }

    /// Compares the head against the untrimmed body. A hit kills the snake for good.
    pub fn check_self_collision(&mut self) -> bool {
        let head = self.head();
        let collided = self.body[..self.body.len() - 1].contains(&head);

        if collided {
            self.state = Dead;
        }

        collided
    }
}
