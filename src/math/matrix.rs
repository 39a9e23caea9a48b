use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::ops::Index;

use crate::error::{NetError, Result};

/// Dense row-major matrix whose shape is fixed at construction.
///
/// Every row holds exactly `cols` values; the fields are private so that
/// invariant cannot be broken after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows x cols` matrix with samples from `U[low, high]`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, low: f64, high: f64, rng: &mut R) -> Matrix {
        let dist = Uniform::new_inclusive(low, high);
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = dist.sample(rng);
            }
        }

        res
    }

    /// Builds a matrix from nested rows, rejecting ragged or empty input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(NetError::invalid("matrix must have at least one row and one column"));
        }
        for row in &data {
            NetError::check_len("matrix row", cols, row.len())?;
        }

        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Row vector times matrix: `out[j] = Σ_i v[i] * self[i][j]`.
    pub fn vec_mul(&self, v: &[f64]) -> Result<Vec<f64>> {
        NetError::check_len("row vector", self.rows, v.len())?;

        let mut out = vec![0.0; self.cols];
        for (j, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in 0..self.rows {
                sum += v[i] * self.data[i][j];
            }
            *slot = sum;
        }

        Ok(out)
    }

    /// Matrix times column vector: `out[i] = Σ_j self[i][j] * v[j]`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        NetError::check_len("column vector", self.cols, v.len())?;

        Ok(self.data.iter()
            .map(|row| {
                let mut sum = 0.0;
                for j in 0..self.cols {
                    sum += v[j] * row[j];
                }
                sum
            })
            .collect())
    }

    /// Rank-one update in place: `self[i][j] += scale * left[i] * right[j]`.
    pub fn add_outer(&mut self, scale: f64, left: &[f64], right: &[f64]) -> Result<()> {
        NetError::check_len("outer product rows", self.rows, left.len())?;
        NetError::check_len("outer product cols", self.cols, right.len())?;

        for i in 0..self.rows {
            for j in 0..self.cols {
                self.data[i][j] += scale * left[i] * right[j];
            }
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i][j]
    }
}
