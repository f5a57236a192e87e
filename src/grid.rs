use crate::{Coord, Coords};
use crate::state::GameState;

/// What occupies a single cell of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    SnakeBody,
    Food,
}

/// The playable rectangle. Rows run over `[0, height)`, columns over `[0, width)`.
///
/// The grid holds no mutable state of its own; what lives on a cell is always
/// derived from the snake and the food of a [`GameState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: Coord,
    height: Coord,
}

impl Grid {
    pub fn new(width: Coord, height: Coord) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    pub fn center(&self) -> Coords {
        (self.height / 2, self.width / 2)
    }

    pub fn in_bounds(&self, (row, col): Coords) -> bool {
        (0..self.height).contains(&row) && (0..self.width).contains(&col)
    }

    pub fn classify(&self, pos: Coords, state: &GameState) -> Cell {
        if state.snake().contains(pos) {
            Cell::SnakeBody
        } else if state.food() == Some(pos) {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    /// Row-major index of an in-bounds cell.
    pub fn index_of(&self, (row, col): Coords) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction, Snake};

    #[test]
    fn bounds_are_half_open() {
        let grid = Grid::new(4, 3);

        assert!(grid.in_bounds((0, 0)));
        assert!(grid.in_bounds((2, 3)));
        assert!(!grid.in_bounds((3, 0)));
        assert!(!grid.in_bounds((0, 4)));
        assert!(!grid.in_bounds((-1, 2)));
        assert!(!grid.in_bounds((1, -1)));
    }

    #[test]
    fn cells_cover_the_whole_grid() {
        let grid = Grid::new(3, 2);
        let cells: Vec<Coords> = grid.cells().collect();

        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(grid.area(), 6);
        assert!(cells.iter().enumerate().all(|(i, c)| grid.index_of(*c) == i));
    }

    #[test]
    fn classify_reads_snake_and_food() {
        let grid = Grid::new(5, 5);
        let snake = Snake::straight((2, 2), 3, Direction::Right);
        let state = GameState::from_parts(grid, snake, Some((2, 4)));

        assert_eq!(grid.classify((2, 2), &state), Cell::SnakeBody);
        assert_eq!(grid.classify((2, 0), &state), Cell::SnakeBody);
        assert_eq!(grid.classify((2, 4), &state), Cell::Food);
        assert_eq!(grid.classify((0, 0), &state), Cell::Empty);
    }
}
