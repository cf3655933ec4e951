//! Dense matrix snapshot of the occupancy grid.
//!
//! The interchange format for the (external) persistence collaborator:
//! a row-major boolean matrix plus the origin offset that maps matrix
//! indices back to signed cell coordinates.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Dense boolean snapshot of an occupancy grid.
///
/// `matrix[i][j]` is true iff cell `(i - offset_x, j - offset_y)` is
/// occupied. Offsets are non-negative for any grid produced by
/// [`GridMapper::to_matrix`](super::GridMapper::to_matrix).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMatrix {
    /// Offset added to cell x to get a matrix row index
    pub offset_x: i32,
    /// Offset added to cell y to get a matrix column index
    pub offset_y: i32,
    /// Row-major occupancy matrix
    pub matrix: Vec<Vec<bool>>,
}

impl GridMatrix {
    /// Create a snapshot from parts
    pub fn new(offset_x: i32, offset_y: i32, matrix: Vec<Vec<bool>>) -> Self {
        Self {
            offset_x,
            offset_y,
            matrix,
        }
    }

    /// Snapshot of an empty grid
    pub fn empty() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            matrix: Vec::new(),
        }
    }

    /// Serialize to the JSON interchange form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from the JSON interchange form.
    ///
    /// Missing fields or malformed structure surface as
    /// [`NavError::Format`](crate::NavError::Format).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// ASCII rendering, one row per line, `1` occupied / `0` free.
    ///
    /// Debug aid for eyeballing learned spaces in logs.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.matrix {
            for &occupied in row {
                out.push(if occupied { '1' } else { '0' });
                out.push(',');
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;

    #[test]
    fn test_json_round_trip() {
        let snapshot = GridMatrix::new(1, 2, vec![vec![true, false], vec![false, true]]);
        let json = snapshot.to_json().unwrap();
        let parsed = GridMatrix::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_missing_offsets_rejected() {
        let result = GridMatrix::from_json(r#"{"matrix": [[true]]}"#);
        assert!(matches!(result, Err(NavError::Format(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = GridMatrix::from_json("not json");
        assert!(matches!(result, Err(NavError::Format(_))));
    }

    #[test]
    fn test_render() {
        let snapshot = GridMatrix::new(0, 0, vec![vec![true, false]]);
        assert_eq!(snapshot.render(), "1,0,\n");
    }
}
