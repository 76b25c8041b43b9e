//! Matrix seam used by the fitting and prediction code
//!
//! The models only ever talk to a design matrix through [`FeatureMatrix`], so any
//! backend that can report its shape and hand out individual elements can be plugged in.
//! Implementations are provided for ndarray's owned arrays and views, and for row-major
//! `Vec<Vec<f64>>` (array-of-arrays).

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};

/// Minimal numeric matrix interface: shape, element access and row/column gather
pub trait FeatureMatrix {
    /// Number of rows and columns
    fn shape(&self) -> (usize, usize);

    /// Element at `(row, col)`
    fn get(&self, row: usize, col: usize) -> f64;

    /// Reject malformed storage before any element is read
    fn check_shape(&self) -> Result<()> {
        Ok(())
    }

    /// Number of rows (observations)
    fn nrows(&self) -> usize {
        self.shape().0
    }

    /// Number of columns (features)
    fn ncols(&self) -> usize {
        self.shape().1
    }

    /// Copy a single row out of the matrix
    fn row(&self, row: usize) -> Array1<f64> {
        (0..self.ncols()).map(|col| self.get(row, col)).collect()
    }

    /// Gather a sub-matrix by row and column index lists; `None` selects everything
    fn mget(&self, rows: Option<&[usize]>, cols: Option<&[usize]>) -> Array2<f64> {
        let (n_rows, n_cols) = self.shape();
        let rows: Vec<usize> = match rows {
            Some(rows) => rows.to_vec(),
            None => (0..n_rows).collect(),
        };
        let cols: Vec<usize> = match cols {
            Some(cols) => cols.to_vec(),
            None => (0..n_cols).collect(),
        };

        Array2::from_shape_fn((rows.len(), cols.len()), |(i, j)| self.get(rows[i], cols[j]))
    }
}

impl<S> FeatureMatrix for ArrayBase<S, Ix2>
where
    S: Data<Elem = f64>,
{
    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self[[row, col]]
    }

    fn row(&self, row: usize) -> Array1<f64> {
        self.index_axis(ndarray::Axis(0), row).to_owned()
    }

    fn mget(&self, rows: Option<&[usize]>, cols: Option<&[usize]>) -> Array2<f64> {
        let selected = match rows {
            Some(rows) => self.select(ndarray::Axis(0), rows),
            None => self.to_owned(),
        };
        match cols {
            Some(cols) => selected.select(ndarray::Axis(1), cols),
            None => selected,
        }
    }
}

impl FeatureMatrix for Vec<Vec<f64>> {
    fn shape(&self) -> (usize, usize) {
        (self.len(), self.first().map_or(0, Vec::len))
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self[row][col]
    }

    fn check_shape(&self) -> Result<()> {
        row_width(self).map(|_| ())
    }
}

/// Common row width of an array-of-arrays
fn row_width(rows: &[Vec<f64>]) -> Result<usize> {
    let n_cols = rows.first().map_or(0, Vec::len);

    if let Some(bad) = rows.iter().position(|row| row.len() != n_cols) {
        return Err(Error::invalid_data(format!(
            "Row {} has {} columns, expected {}",
            bad,
            rows[bad].len(),
            n_cols
        )));
    }

    Ok(n_cols)
}

/// Convert an array-of-arrays into a dense matrix, rejecting ragged input
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_cols = row_width(rows)?;

    let data: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), n_cols), data)
        .map_err(|e| Error::invalid_data(format!("Cannot build matrix: {}", e)))
}

/// Input to the dual-arity prediction entry points
#[derive(Debug, Clone)]
pub enum Observations<'a> {
    /// A single observation vector
    One(ArrayView1<'a, f64>),
    /// A matrix of observations, one per row
    Batch(ArrayView2<'a, f64>),
}

impl Observations<'_> {
    /// Number of observations carried by this input
    pub fn len(&self) -> usize {
        match self {
            Observations::One(_) => 1,
            Observations::Batch(x) => x.nrows(),
        }
    }

    /// Whether the input carries no observations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<ArrayView1<'a, f64>> for Observations<'a> {
    fn from(value: ArrayView1<'a, f64>) -> Self {
        Observations::One(value)
    }
}

impl<'a> From<&'a Array1<f64>> for Observations<'a> {
    fn from(value: &'a Array1<f64>) -> Self {
        Observations::One(value.view())
    }
}

impl<'a> From<&'a [f64]> for Observations<'a> {
    fn from(value: &'a [f64]) -> Self {
        Observations::One(ArrayView1::from(value))
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Observations<'a> {
    fn from(value: &'a [f64; N]) -> Self {
        Observations::One(ArrayView1::from(&value[..]))
    }
}

impl<'a> From<ArrayView2<'a, f64>> for Observations<'a> {
    fn from(value: ArrayView2<'a, f64>) -> Self {
        Observations::Batch(value)
    }
}

impl<'a> From<&'a Array2<f64>> for Observations<'a> {
    fn from(value: &'a Array2<f64>) -> Self {
        Observations::Batch(value.view())
    }
}
