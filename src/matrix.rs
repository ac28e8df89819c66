use std::fmt;
use std::ops::AddAssign;
use std::ops::Index;
use std::ops::IndexMut;

use num::Float;
use num::Num;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use thiserror::Error;

/// Row and column count of a matrix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl Shape {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Shape used to report the length of a plain vector.
    fn vector(len: usize) -> Self {
        Self::new(1, len)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Declared or required dimensions disagree with the actual ones.
    #[error("{op}: expected shape {expected}, found {actual}")]
    Shape {
        op: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error("column index {index} out of bounds for matrix with {columns} columns")]
    Index { index: usize, columns: usize },
}

impl MatrixError {
    pub(crate) fn shape(op: &'static str, expected: Shape, actual: Shape) -> Self {
        MatrixError::Shape {
            op,
            expected,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

pub trait MatrixItem
where
    Self: fmt::Debug + Default + Clone + Copy + Num + AddAssign + PartialOrd,
{
}

impl MatrixItem for f32 {}
impl MatrixItem for f64 {}

/// A dense, row-major matrix.
///
/// `rows` and `columns` are the declared dimensions and `data` holds one vector
/// per row. All fields are public so callers can inspect (or build) the data
/// directly; [`Matrix::validate`] checks that the two agree and every binary
/// operation runs it on both operands before touching any cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Matrix<T>
where
    T: MatrixItem,
{
    pub rows: usize,
    pub columns: usize,
    pub data: Vec<Vec<T>>,
}

impl<T> Matrix<T>
where
    T: MatrixItem,
{
    /// Zero-filled `rows x columns` matrix. Either dimension may be zero.
    pub fn new(rows: usize, columns: usize) -> Self {
        let data = vec![vec![T::zero(); columns]; rows];

        Self {
            rows,
            columns,
            data,
        }
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn with_items<J: Into<Vec<T>>>(items: J, rows: usize, columns: usize) -> Result<Self> {
        let items = items.into();

        if items.len() != rows * columns {
            return Err(MatrixError::shape(
                "with_items",
                Shape::vector(rows * columns),
                Shape::vector(items.len()),
            ));
        }

        let data = match columns {
            0 => vec![Vec::new(); rows],
            _ => items.chunks(columns).map(<[T]>::to_vec).collect(),
        };

        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Build a matrix from its rows, deriving the dimensions from the data.
    pub fn from_rows(data: Vec<Vec<T>>) -> Result<Self> {
        let rows = data.len();
        let columns = data.first().map_or(0, Vec::len);
        let matrix = Self {
            rows,
            columns,
            data,
        };

        matrix.validate()?;
        Ok(matrix)
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.columns)
    }

    /// Check that the stored data matches the declared dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() != self.rows {
            return Err(MatrixError::shape(
                "validate",
                self.shape(),
                Shape::new(self.data.len(), self.columns),
            ));
        }

        if let Some(row) = self.data.iter().find(|row| row.len() != self.columns) {
            return Err(MatrixError::shape(
                "validate",
                self.shape(),
                Shape::new(self.rows, row.len()),
            ));
        }

        Ok(())
    }

    fn map_in_place<F: Fn(T) -> T>(&mut self, f: F) {
        for item in self.data.iter_mut().flatten() {
            *item = f(*item);
        }
    }

    pub fn add_scalar(&mut self, x: T) {
        self.map_in_place(|item| item + x);
    }

    /// `item - x` for every item.
    pub fn subtract_scalar(&mut self, x: T) {
        self.map_in_place(|item| item - x);
    }

    /// `x - item` for every item.
    pub fn scalar_subtract_by_tensor(&mut self, x: T) {
        self.map_in_place(|item| x - item);
    }

    pub fn multiply_scalar(&mut self, x: T) {
        self.map_in_place(|item| item * x);
    }

    /// `item / x` for every item. Dividing by zero follows IEEE semantics.
    pub fn divide_scalar(&mut self, x: T) {
        self.map_in_place(|item| item / x);
    }

    /// `x / item` for every item.
    pub fn scalar_divide_by_tensor(&mut self, x: T) {
        self.map_in_place(|item| x / item);
    }

    /// Both operands must validate and have the same shape.
    fn check_same_shape(&self, other: &Self, op: &'static str) -> Result<()> {
        self.validate()?;
        other.validate()?;

        if self.shape() != other.shape() {
            return Err(MatrixError::shape(op, self.shape(), other.shape()));
        }

        Ok(())
    }

    /// Elementwise `self += other`.
    pub fn add_tensor(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other, "add_tensor")?;

        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (item, &other_item) in row.iter_mut().zip(other_row.iter()) {
                *item += other_item;
            }
        }

        Ok(())
    }

    /// Elementwise `self -= other`.
    pub fn subtract_tensor(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other, "subtract_tensor")?;

        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (item, &other_item) in row.iter_mut().zip(other_row.iter()) {
                *item = *item - other_item;
            }
        }

        Ok(())
    }

    /// Standard matrix product, returned as a new matrix of shape
    /// `self.rows x other.columns`.
    pub fn multiply_tensor(&self, other: &Self) -> Result<Self> {
        self.validate()?;
        other.validate()?;

        if self.columns != other.rows {
            return Err(MatrixError::shape(
                "multiply_tensor",
                Shape::new(self.columns, other.columns),
                other.shape(),
            ));
        }

        let mut result = Matrix::new(self.rows, other.columns);

        for j in 0..other.columns {
            let column = other.get_column(j)?;

            for (i, row) in self.data.iter().enumerate() {
                result.data[i][j] = dot_product(row, &column)?;
            }
        }

        Ok(result)
    }

    /// New `columns x rows` matrix with the entries mirrored.
    pub fn transpose(&self) -> Result<Self> {
        self.validate()?;

        let mut result = Matrix::new(self.columns, self.rows);

        for (i, row) in self.data.iter().enumerate() {
            for (j, &item) in row.iter().enumerate() {
                result.data[j][i] = item;
            }
        }

        Ok(result)
    }

    /// Values of column `index`, top to bottom.
    pub fn get_column(&self, index: usize) -> Result<Vec<T>> {
        if index >= self.columns {
            return Err(MatrixError::Index {
                index,
                columns: self.columns,
            });
        }

        self.validate()?;

        Ok(self.data.iter().map(|row| row[index]).collect())
    }

    /// Append the columns of `other` to the right of `self`. Row counts must
    /// match; the column count is recomputed from the resulting rows.
    pub fn append(&mut self, other: &Self) -> Result<()> {
        self.validate()?;
        other.validate()?;

        if self.rows != other.rows {
            return Err(MatrixError::shape(
                "append",
                Shape::new(self.rows, other.columns),
                other.shape(),
            ));
        }

        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            row.extend_from_slice(other_row);
        }

        self.columns = self
            .data
            .first()
            .map_or(self.columns + other.columns, Vec::len);

        Ok(())
    }
}

impl<T> Matrix<T>
where
    T: MatrixItem + Float,
{
    /// `e^item` for every item.
    pub fn natural_exp(&mut self) {
        self.map_in_place(T::exp);
    }
}

impl<T> Matrix<T>
where
    T: MatrixItem + SampleUniform,
{
    /// Fill every cell with a uniform value in `[-1, 1)`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let (low, high) = (T::zero() - T::one(), T::one());

        for item in self.data.iter_mut().flatten() {
            *item = rng.gen_range(low..high);
        }
    }
}

/// Sum of the elementwise products of two equally long vectors.
pub fn dot_product<T: MatrixItem>(a: &[T], b: &[T]) -> Result<T> {
    if a.len() != b.len() {
        return Err(MatrixError::shape(
            "dot_product",
            Shape::vector(a.len()),
            Shape::vector(b.len()),
        ));
    }

    let mut result = T::zero();

    for (&x, &y) in a.iter().zip(b.iter()) {
        result += x * y;
    }

    Ok(result)
}

impl<T> fmt::Display for Matrix<T>
where
    T: MatrixItem + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.iter() {
            write!(f, "[")?;
            for (j, item) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                match f.precision() {
                    Some(precision) => write!(f, "{item:.precision$}")?,
                    None => write!(f, "{item}")?,
                }
            }
            writeln!(f, "]")?;
        }

        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: MatrixItem,
{
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        if row >= self.rows || column >= self.columns {
            panic!("Index out of bounds while indexing matrix.");
        }

        &self.data[row][column]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: MatrixItem,
{
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        if row >= self.rows || column >= self.columns {
            panic!("Index out of bounds while indexing matrix.");
        }

        &mut self.data[row][column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_shape_is_single_row() {
        assert_eq!(Shape::vector(4), Shape::new(1, 4));
        assert_eq!(Shape::vector(4).to_string(), "1x4");
    }

    #[test]
    fn map_in_place_touches_ragged_rows() {
        let mut matrix = Matrix {
            rows: 2,
            columns: 2,
            data: vec![vec![1.0, 2.0], vec![3.0]],
        };

        matrix.map_in_place(|x: f64| x * 10.0);

        assert_eq!(matrix.data, vec![vec![10.0, 20.0], vec![30.0]]);
    }
}
