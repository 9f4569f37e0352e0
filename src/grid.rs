use std::fmt;

use crate::error::FungeError;

/// The program grid: a fixed W×H buffer of cells addressed toroidally.
///
/// Each cell holds a code point as an `i64`, so `p` can store any stack
/// value and `g` reads it back unchanged. Cells built from program text are
/// always valid Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<i64>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Parse program text into a grid. Every line must have the same number
    /// of characters. A trailing newline does not add an empty row.
    pub fn parse(text: &str) -> Result<Self, FungeError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (i, line) in text.lines().enumerate() {
            let start = cells.len();
            cells.extend(line.chars().map(|c| c as i64));
            let found = cells.len() - start;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(FungeError::NonRectangular {
                        line: i + 1,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(FungeError::EmptyProgram);
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Map any coordinate pair onto the flat cell index, wrapping negative
    /// and oversized values into range.
    #[inline(always)]
    fn index(&self, x: i64, y: i64) -> usize {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        y * self.width + x
    }

    /// Read the cell at (x, y), reduced modulo the grid dimensions.
    pub fn read(&self, x: i64, y: i64) -> i64 {
        self.cells[self.index(x, y)]
    }

    /// Write `value` into the cell at (x, y), reduced modulo the grid dimensions.
    pub fn write(&mut self, x: i64, y: i64, value: i64) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }
}

/// Row-per-line listing. Cells that are not valid scalars print as U+FFFD.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(self.width).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &cell in chunk {
                let c = u32::try_from(cell)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
