//! Projective transforms from destination to source coordinates.

/// A 4x4 matrix applied to column vectors `[x, y, z, 1]` of normalized
/// destination coordinates, producing normalized source coordinates after the
/// perspective divide.
///
/// Normalized coordinates run from 0 at one edge of the image to 1 at the
/// other, so [`Transform::IDENTITY`] maps the whole destination onto the whole
/// source: a plain resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rows of the matrix.
    pub rows: [[f32; 4]; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Maps every coordinate to itself.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Builds a transform from its rows.
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Scales normalized coordinates about the origin.
    pub const fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Offsets normalized coordinates.
    pub const fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns `self * other`, which applies `other` first.
    pub fn compose(&self, other: &Transform) -> Transform {
        let mut rows = [[0.0f32; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        Transform { rows }
    }

    /// Projects a normalized point.
    ///
    /// The perspective divide is skipped when the projected `w` is zero.
    pub fn project(&self, point: [f64; 3]) -> [f64; 3] {
        let v = [point[0], point[1], point[2], 1.0];
        let row = |r: &[f32; 4]| -> f64 { r.iter().zip(v).map(|(&m, p)| m as f64 * p).sum() };

        let x = row(&self.rows[0]);
        let y = row(&self.rows[1]);
        let z = row(&self.rows[2]);
        let w = row(&self.rows[3]);
        if w == 0.0 {
            [x, y, z]
        } else {
            [x / w, y / w, z / w]
        }
    }
}
