use super::action::Direction;
use super::state::{Cell, Snake};

/// Fixed-size board measured in the same units as cells.
///
/// Valid cells have coordinates that are multiples of `cell_size` inside
/// `[0, width)` x `[0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.columns().max(0) as usize) * (self.rows().max(0) as usize)
    }

    /// Check if a cell is within the grid bounds
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Cell at a column/row index
    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.cell_size, row * self.cell_size)
    }

    /// Every cell of the grid, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }

    /// Orthogonal neighbours of `cell`, in [`Direction::ALL`] order.
    /// Neighbours may lie outside the grid.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| (dir, cell.moved_by(dir.vector(self.cell_size))))
    }

    /// A cell the head may move into: inside the grid and not on the body.
    pub fn is_safe(&self, cell: Cell, snake: &Snake) -> bool {
        self.in_bounds(cell) && !snake.contains(cell)
    }

    /// A cell a multi-step path may pass through.
    ///
    /// Same as [`Grid::is_safe`] except the current tail counts as free,
    /// since it will have moved on by the time a path reaches it.
    pub fn is_traversable(&self, cell: Cell, snake: &Snake) -> bool {
        self.in_bounds(cell) && (cell == snake.tail() || !snake.contains(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(400, 400, 20)
    }

    #[test]
    fn test_bounds_checking() {
        let grid = grid();

        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(380, 380)));
        assert!(!grid.in_bounds(Cell::new(-20, 0)));
        assert!(!grid.in_bounds(Cell::new(400, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 400)));
    }

    #[test]
    fn test_cell_enumeration() {
        let grid = Grid::new(60, 40, 20);
        let cells: Vec<Cell> = grid.cells().collect();

        assert_eq!(grid.cell_count(), 6);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(40, 20));
    }

    #[test]
    fn test_is_safe() {
        let grid = grid();
        let snake = Snake::new(vec![Cell::new(160, 160), Cell::new(140, 160)]);

        assert!(grid.is_safe(Cell::new(180, 160), &snake));
        assert!(!grid.is_safe(Cell::new(160, 160), &snake)); // head
        assert!(!grid.is_safe(Cell::new(140, 160), &snake)); // tail
        assert!(!grid.is_safe(Cell::new(400, 160), &snake)); // wall
        assert!(!grid.is_safe(Cell::new(160, -20), &snake)); // wall
    }

    #[test]
    fn test_tail_is_traversable_but_not_safe() {
        let grid = grid();
        let snake = Snake::new(vec![
            Cell::new(100, 100),
            Cell::new(80, 100),
            Cell::new(60, 100),
        ]);

        assert!(grid.is_traversable(Cell::new(60, 100), &snake));
        assert!(!grid.is_safe(Cell::new(60, 100), &snake));
        assert!(!grid.is_traversable(Cell::new(80, 100), &snake));
        assert!(!grid.is_traversable(Cell::new(-20, 100), &snake));
    }

    #[test]
    fn test_neighbours_follow_direction_order() {
        let grid = grid();
        let neighbours: Vec<_> = grid.neighbours(Cell::new(0, 0)).collect();

        assert_eq!(
            neighbours,
            vec![
                (Direction::Right, Cell::new(20, 0)),
                (Direction::Left, Cell::new(-20, 0)),
                (Direction::Down, Cell::new(0, 20)),
                (Direction::Up, Cell::new(0, -20)),
            ]
        );
    }
}
