/// Steps in the default grid (one bar of sixteenths at resolution 4).
pub const DEFAULT_STEPS: usize = 16;
/// Note rows in the default grid.
pub const DEFAULT_ROWS: usize = 14;

/// On/off pattern of note rows per step.
///
/// Row `r` stands for a note offset of `r` semitones above the base note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepGrid {
    steps: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl StepGrid {
    pub fn new(steps: usize, rows: usize) -> Self {
        Self {
            steps,
            rows,
            cells: vec![false; steps * rows],
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, step: usize, row: usize) -> Option<usize> {
        (step < self.steps && row < self.rows).then(|| step * self.rows + row)
    }

    pub fn is_set(&self, step: usize, row: usize) -> bool {
        self.index(step, row).is_some_and(|i| self.cells[i])
    }

    /// Returns `false` when the cell is outside the grid.
    pub fn set(&mut self, step: usize, row: usize, on: bool) -> bool {
        match self.index(step, row) {
            Some(i) => {
                self.cells[i] = on;
                true
            }
            None => false,
        }
    }

    /// Flip a cell, returning its new value.
    pub fn toggle(&mut self, step: usize, row: usize) -> Option<bool> {
        let i = self.index(step, row)?;
        self.cells[i] = !self.cells[i];
        Some(self.cells[i])
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Active row offsets at `step`, lowest first.
    pub fn notes_at(&self, step: usize) -> Vec<i32> {
        if step >= self.steps {
            return Vec::new();
        }
        let row_cells = &self.cells[step * self.rows..(step + 1) * self.rows];
        row_cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(row, _)| row as i32)
            .collect()
    }
}

impl Default for StepGrid {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS, DEFAULT_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let grid = StepGrid::default();
        assert_eq!(grid.steps(), 16);
        assert_eq!(grid.rows(), 14);
        assert!((0..16).all(|step| grid.notes_at(step).is_empty()));
    }

    #[test]
    fn toggle_and_read_back() {
        let mut grid = StepGrid::default();
        assert_eq!(grid.toggle(3, 7), Some(true));
        grid.set(3, 0, true);
        assert_eq!(grid.notes_at(3), vec![0, 7]);

        assert_eq!(grid.toggle(3, 7), Some(false));
        assert_eq!(grid.notes_at(3), vec![0]);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut grid = StepGrid::new(4, 4);
        assert_eq!(grid.toggle(4, 0), None);
        assert!(!grid.set(0, 4, true));
        assert!(!grid.is_set(9, 9));
        assert!(grid.notes_at(4).is_empty());
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut grid = StepGrid::new(2, 2);
        grid.set(0, 0, true);
        grid.set(1, 1, true);
        grid.clear();
        assert!(grid.notes_at(0).is_empty() && grid.notes_at(1).is_empty());
    }
}
