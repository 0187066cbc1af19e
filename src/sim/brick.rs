//! Bricks and the level brick grid

use serde::{Deserialize, Serialize};

use crate::config::PlayField;
use crate::consts::POINTS_PER_HIT;
use crate::level::LevelLayout;

/// Row/column of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A hittable brick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    /// Hits needed to destroy it
    pub thickness: u32,
    hits: u32,
    alive: bool,
}

impl Brick {
    pub fn new(thickness: u32) -> Self {
        Self {
            thickness,
            hits: 0,
            alive: thickness > 0,
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Total points for destroying it
    pub fn score(&self) -> u64 {
        POINTS_PER_HIT * self.thickness as u64
    }

    /// Register one hit. The caller must not hit a dead brick.
    pub fn hit(&mut self) {
        self.hits += 1;
        self.alive = self.hits < self.thickness;
    }
}

/// Fixed rows x columns arrangement of optional bricks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    cells: Vec<Vec<Option<Brick>>>,
    columns: usize,
    /// Cell size in pixels
    pub brick_width: i32,
    pub brick_height: i32,
    /// Top-left corner of cell (0, 0)
    pub origin_x: f32,
    pub origin_y: f32,
}

impl BrickGrid {
    /// Lay out a level across the full field width
    pub fn from_layout(
        layout: &LevelLayout,
        field: &PlayField,
        brick_height: i32,
        top_offset: i32,
    ) -> Self {
        let columns = layout.column_count();
        let cells = layout
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&thickness| (thickness > 0).then(|| Brick::new(thickness)))
                    .collect()
            })
            .collect();
        let brick_width = ((field.width as i32) / columns.max(1) as i32).max(1);
        Self {
            cells,
            columns,
            brick_width,
            brick_height: brick_height.max(1),
            origin_x: field.left,
            origin_y: field.top + top_offset as f32,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Y coordinate of the lower edge of the last row
    pub fn bottom(&self) -> f32 {
        self.origin_y + (self.rows() as i32 * self.brick_height) as f32
    }

    /// X coordinate of the right edge of the last column
    pub fn right(&self) -> f32 {
        self.origin_x + (self.columns as i32 * self.brick_width) as f32
    }

    pub fn get(&self, cell: CellCoord) -> Option<&Brick> {
        self.cells
            .get(cell.row)
            .and_then(|row| row.get(cell.column))
            .and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, cell: CellCoord) -> Option<&mut Brick> {
        self.cells
            .get_mut(cell.row)
            .and_then(|row| row.get_mut(cell.column))
            .and_then(Option::as_mut)
    }

    pub fn is_alive_at(&self, cell: CellCoord) -> bool {
        self.get(cell).is_some_and(Brick::is_alive)
    }

    pub fn alive_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|b| b.is_alive())
            .count()
    }

    /// Row-major iteration over populated cells
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Brick)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, b)| b.as_ref().map(|b| (CellCoord::new(r, c), b)))
        })
    }
}
