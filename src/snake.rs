use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::{Coord, Coords};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit step as (row, column) offsets.
    pub fn delta(self) -> (Coord, Coord) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not one of up, down, left, right", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Up),
            "down" | "d" => Ok(Down),
            "left" | "l" => Ok(Left),
            "right" | "r" => Ok(Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Head of the snake is the front of `body`, tail is the back.
///
/// `occupied` mirrors `body` as a set; the two always hold the same cells
/// since a snake never overlaps itself.
///
/// `direction` is where the next step goes, `heading` is where the last one
/// went. They differ between a turn and the step that carries it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    occupied: HashSet<Coords>,
    direction: Direction,
    heading: Direction,
}

impl Snake {
    /// A straight snake of `length` cells with its head at `head`, travelling
    /// in `direction` and trailing behind it.
    pub fn straight(head: Coords, length: usize, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        let body = (0..length.max(1) as Coord)
            .map(|i| (head.0 - dr * i, head.1 - dc * i))
            .collect();
        Snake::from_body(body, direction)
    }

    /// Builds a snake from explicit cells, head first.
    pub fn from_body(body: VecDeque<Coords>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");
        let occupied: HashSet<Coords> = body.iter().copied().collect();
        assert_eq!(occupied.len(), body.len(), "snake cells must be distinct");
        Snake { body, occupied, direction, heading: direction }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.occupied.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Direction of the last step taken. Turning back against it would put
    /// the head on the neck.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Where the head would land after one step. No bounds checking.
    pub fn advance(&self, direction: Direction) -> Coords {
        let (head, (dr, dc)) = (self.head(), direction.delta());
        (head.0 + dr, head.1 + dc)
    }

    /// Whether moving the head to `new_head` bites the body. When the tail
    /// leaves its cell in the same step, that cell is free to enter.
    pub fn collides(&self, new_head: Coords, tail_vacates: bool) -> bool {
        if tail_vacates && new_head == self.tail() {
            return false;
        }
        self.contains(new_head)
    }

    /// Prepends the new head and keeps the tail.
    pub fn grow(&mut self, new_head: Coords) {
        self.heading = self.direction;
        self.body.push_front(new_head);
        self.occupied.insert(new_head);
    }

    /// Prepends the new head and drops the tail. Returns the vacated cell.
    pub fn move_to(&mut self, new_head: Coords) -> Coords {
        self.heading = self.direction;
        let old_tail = self.body.pop_back().expect("snake is never empty");
        self.occupied.remove(&old_tail);
        self.body.push_front(new_head);
        self.occupied.insert(new_head);
        old_tail
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook() -> Snake {
        // head at (1, 1), curling down and left back to (2, 1)
        Snake::from_body(vec![(1, 1), (1, 2), (2, 2), (2, 1)].into(), Left)
    }

    #[test]
    fn straight_trails_behind_the_head() {
        let snake = Snake::straight((2, 2), 3, Right);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(2, 2), (2, 1), (2, 0)]);

        let snake = Snake::straight((5, 5), 2, Up);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(5, 5), (6, 5)]);
    }

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn advance_adds_unit_vector() {
        let snake = Snake::straight((2, 2), 1, Right);
        assert_eq!(snake.advance(Up), (1, 2));
        assert_eq!(snake.advance(Down), (3, 2));
        assert_eq!(snake.advance(Left), (2, 1));
        assert_eq!(snake.advance(Right), (2, 3));

        let corner = Snake::straight((0, 0), 1, Up);
        assert_eq!(corner.advance(Up), (-1, 0));
    }

    #[test]
    fn move_to_keeps_length_and_grow_adds_one() {
        let mut snake = Snake::straight((2, 2), 3, Right);

        let vacated = snake.move_to((2, 3));
        assert_eq!(vacated, (2, 0));
        assert_eq!(snake.len(), 3);
        assert!(!snake.contains((2, 0)));
        assert_eq!(snake.head(), (2, 3));

        snake.grow((2, 4));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), (2, 1));
        assert!(snake.contains((2, 4)));
    }

    #[test]
    fn entering_the_vacating_tail_is_not_a_collision() {
        let snake = hook();
        let new_head = snake.advance(Down);
        assert_eq!(new_head, snake.tail());

        assert!(!snake.collides(new_head, true));
        assert!(snake.collides(new_head, false));
    }

    #[test]
    fn biting_the_body_collides() {
        let snake = hook();
        assert!(snake.collides((1, 2), true));
        assert!(snake.collides((2, 2), true));
        assert!(!snake.collides((0, 1), true));
    }

    #[test]
    fn heading_follows_steps_not_turns() {
        let mut snake = Snake::straight((2, 2), 3, Right);
        snake.set_direction(Up);
        assert_eq!(snake.direction(), Up);
        assert_eq!(snake.heading(), Right);

        snake.move_to(snake.advance(Up));
        assert_eq!(snake.heading(), Up);

        snake.set_direction(Left);
        snake.grow(snake.advance(Left));
        assert_eq!(snake.heading(), Left);
    }

    #[test]
    fn parses_directions() {
        assert_eq!("Up".parse::<Direction>(), Ok(Up));
        assert_eq!("r".parse::<Direction>(), Ok(Right));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    #[should_panic]
    fn overlapping_body_is_rejected() {
        Snake::from_body(vec![(0, 0), (0, 1), (0, 0)].into(), Right);
    }
}
