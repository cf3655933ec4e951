//! Occupancy grid construction from quantized positions.
//!
//! [`GridMapper`] is built incrementally while learning a space: each
//! continuous position is quantized to the nearest cell at a fixed
//! granularity and inserted into the occupancy set. The grid is then
//! frozen and used read-only during planning.

mod matrix;

pub use matrix::GridMatrix;

use std::collections::HashSet;

use crate::core::{GridCell, WorldPoint};
use crate::error::{NavError, Result};

/// Tightest bounding box of the occupancy set, in cell indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupancyBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl OccupancyBounds {
    /// Number of columns covered by the bounds
    #[inline]
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    /// Number of rows covered by the bounds
    #[inline]
    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }
}

/// Quantized occupancy grid with a fixed granularity.
///
/// The set stores *traversable* cells: a cell is free space iff it was
/// walked through during learning. Planning treats any cell outside the
/// set as blocked.
#[derive(Clone, Debug)]
pub struct GridMapper {
    granularity: f32,
    cells: HashSet<GridCell>,
    bounds: Option<OccupancyBounds>,
}

impl GridMapper {
    /// Create an empty grid at the given granularity (world units per cell)
    pub fn new(granularity: f32) -> Self {
        Self {
            granularity,
            cells: HashSet::new(),
            bounds: None,
        }
    }

    /// Grid granularity in world units per cell
    #[inline]
    pub fn granularity(&self) -> f32 {
        self.granularity
    }

    /// Quantize a continuous position to its grid cell.
    ///
    /// Rounds to the nearest multiple of the granularity, so two positions
    /// within half a granularity of each other map to the same cell.
    #[inline]
    pub fn quantize(&self, position: WorldPoint) -> GridCell {
        GridCell::from_world(position, self.granularity)
    }

    /// Center of a cell in world coordinates
    #[inline]
    pub fn cell_to_world(&self, cell: GridCell) -> WorldPoint {
        WorldPoint::new(
            cell.x as f32 * self.granularity,
            cell.y as f32 * self.granularity,
        )
    }

    /// Mark a cell as traversable and tighten the bounds around it
    pub fn record(&mut self, cell: GridCell) {
        self.cells.insert(cell);
        self.bounds = Some(match self.bounds {
            None => OccupancyBounds {
                min_x: cell.x,
                max_x: cell.x,
                min_y: cell.y,
                max_y: cell.y,
            },
            Some(b) => OccupancyBounds {
                min_x: b.min_x.min(cell.x),
                max_x: b.max_x.max(cell.x),
                min_y: b.min_y.min(cell.y),
                max_y: b.max_y.max(cell.y),
            },
        });
    }

    /// Quantize a position and record its cell
    pub fn record_position(&mut self, position: WorldPoint) {
        let cell = self.quantize(position);
        self.record(cell);
    }

    /// Whether a cell is in the occupancy set
    #[inline]
    pub fn is_occupied(&self, cell: &GridCell) -> bool {
        self.cells.contains(cell)
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells have been recorded
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tightest bounding box of the set, or `None` when empty
    pub fn bounds(&self) -> Option<OccupancyBounds> {
        self.bounds
    }

    /// Iterate over the occupied cells (unordered)
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Export the set as a dense boolean matrix plus an origin offset.
    ///
    /// The matrix is row-major over x: `matrix[i][j]` is true iff cell
    /// `(i - offset_x, j - offset_y)` is occupied. Offsets are chosen so
    /// matrix indices are always non-negative.
    pub fn to_matrix(&self) -> GridMatrix {
        let Some(bounds) = self.bounds else {
            return GridMatrix::empty();
        };

        let mut matrix = vec![vec![false; bounds.height()]; bounds.width()];
        let offset_x = -bounds.min_x;
        let offset_y = -bounds.min_y;

        for cell in &self.cells {
            matrix[(cell.x + offset_x) as usize][(cell.y + offset_y) as usize] = true;
        }

        GridMatrix::new(offset_x, offset_y, matrix)
    }

    /// Rebuild a grid from a dense matrix snapshot.
    ///
    /// Inverse of [`to_matrix`](Self::to_matrix). Fails with
    /// [`NavError::Format`] if the matrix rows are ragged; no partial
    /// repair is attempted.
    pub fn from_matrix(snapshot: &GridMatrix, granularity: f32) -> Result<Self> {
        let expected = snapshot.matrix.first().map_or(0, |row| row.len());
        if snapshot.matrix.iter().any(|row| row.len() != expected) {
            return Err(NavError::Format(
                "ragged occupancy matrix: rows have differing lengths".to_string(),
            ));
        }

        let mut mapper = Self::new(granularity);
        for (i, row) in snapshot.matrix.iter().enumerate() {
            for (j, &occupied) in row.iter().enumerate() {
                if occupied {
                    mapper.record(GridCell::new(
                        i as i32 - snapshot.offset_x,
                        j as i32 - snapshot.offset_y,
                    ));
                }
            }
        }

        Ok(mapper)
    }
}
