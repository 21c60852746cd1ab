use crate::{assert, ComplexField};

/// Heap allocated resizable matrix, similar to a 2D [`Vec`].
///
/// # Note
///
/// The memory layout of `Mat` is column-major: the element at `(i, j)` is stored at index
/// `i + j * nrows`.
#[derive(Clone, PartialEq)]
pub struct Mat<E> {
    data: Vec<E>,
    nrows: usize,
    ncols: usize,
}

impl<E> Default for Mat<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Mat<E> {
    /// Returns an empty matrix of dimension `0×0`.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            nrows: 0,
            ncols: 0,
        }
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with the provided function.
    #[inline]
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> E) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Returns a new matrix from a list of rows.
    ///
    /// # Panics
    /// The function panics if the rows do not all have the same length.
    #[track_caller]
    pub fn from_rows(rows: Vec<Vec<E>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        assert!(rows.iter().all(|row| row.len() == ncols));

        let mut columns: Vec<Vec<E>> = (0..ncols).map(|_| Vec::with_capacity(nrows)).collect();
        for row in rows {
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }
        Self {
            data: columns.into_iter().flatten().collect(),
            nrows,
            ncols,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline(always)]
    #[track_caller]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(all(row < self.nrows, col < self.ncols));
        row + col * self.nrows
    }

    /// Returns a reference to the element at the given indices, with bound checks.
    ///
    /// # Panics
    /// The function panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn get(&self, row: usize, col: usize) -> &E {
        let offset = self.offset(row, col);
        &self.data[offset]
    }

    /// Returns a mutable reference to the element at the given indices, with bound checks.
    ///
    /// # Panics
    /// The function panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut E {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    /// Writes the value to the element at the given indices, with bound checks.
    ///
    /// # Panics
    /// The function panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        *self.get_mut(row, col) = value;
    }

    /// Returns the column at the given index as a contiguous slice.
    #[inline(always)]
    #[track_caller]
    pub fn col(&self, col: usize) -> &[E] {
        assert!(col < self.ncols);
        &self.data[col * self.nrows..(col + 1) * self.nrows]
    }

    /// Returns the column at the given index as a contiguous mutable slice.
    #[inline(always)]
    #[track_caller]
    pub fn col_mut(&mut self, col: usize) -> &mut [E] {
        assert!(col < self.ncols);
        &mut self.data[col * self.nrows..(col + 1) * self.nrows]
    }

    /// Swaps the rows at indices `a` and `b`.
    #[track_caller]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(all(a < self.nrows, b < self.nrows));
        if a == b {
            return;
        }
        for j in 0..self.ncols {
            self.data.swap(a + j * self.nrows, b + j * self.nrows);
        }
    }

    /// Swaps the columns at indices `a` and `b`.
    #[track_caller]
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        assert!(all(a < self.ncols, b < self.ncols));
        if a == b {
            return;
        }
        for i in 0..self.nrows {
            self.data.swap(i + a * self.nrows, i + b * self.nrows);
        }
    }

    /// Returns a new matrix obtained by applying `f` to every element.
    #[inline]
    pub fn map<F>(&self, mut f: impl FnMut(&E) -> F) -> Mat<F> {
        Mat {
            data: self.data.iter().map(&mut f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Returns an iterator over the elements in column-major order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.data.iter()
    }
}

impl<E: Clone> Mat<E> {
    /// Reads the value of the element at the given indices, with bound checks.
    ///
    /// # Panics
    /// The function panics if `row >= self.nrows()` or `col >= self.ncols()`.
    #[inline(always)]
    #[track_caller]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.get(row, col).clone()
    }

    /// Returns a copy of the block starting at `(row_start, col_start)` with dimensions
    /// `(nrows, ncols)`.
    ///
    /// # Panics
    /// The function panics if the block is not contained in the matrix.
    #[track_caller]
    pub fn submatrix(
        &self,
        row_start: usize,
        col_start: usize,
        nrows: usize,
        ncols: usize,
    ) -> Self {
        assert!(all(
            row_start + nrows <= self.nrows,
            col_start + ncols <= self.ncols
        ));
        Self::from_fn(nrows, ncols, |i, j| self.read(row_start + i, col_start + j))
    }

    /// Returns the transpose of the matrix.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self.read(j, i))
    }

    /// Returns the row at the given index.
    #[track_caller]
    pub fn row(&self, row: usize) -> Vec<E> {
        assert!(row < self.nrows);
        (0..self.ncols).map(|j| self.read(row, j)).collect()
    }
}

impl<E: ComplexField> Mat<E> {
    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros.
    #[inline]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |_, _| E::zero())
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros, except the main
    /// diagonal which is filled with ones.
    #[inline]
    #[doc(alias = "eye")]
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |i, j| if i == j { E::one() } else { E::zero() })
    }

    /// Returns a square diagonal matrix whose diagonal is `diag`.
    pub fn from_diagonal(diag: &[E]) -> Self {
        let n = diag.len();
        Self::from_fn(n, n, |i, j| if i == j { diag[i] } else { E::zero() })
    }

    /// Returns the conjugate transpose of the matrix.
    pub fn adjoint(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self.read(j, i).conj())
    }

    /// Returns the main diagonal of the matrix.
    pub fn diagonal(&self) -> Vec<E> {
        (0..Ord::min(self.nrows, self.ncols))
            .map(|i| self.read(i, i))
            .collect()
    }
}

impl<E> core::ops::Index<(usize, usize)> for Mat<E> {
    type Output = E;

    #[inline(always)]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &E {
        self.get(row, col)
    }
}

impl<E> core::ops::IndexMut<(usize, usize)> for Mat<E> {
    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        self.get_mut(row, col)
    }
}

impl<E: ComplexField> core::ops::Mul<&Mat<E>> for &Mat<E> {
    type Output = Mat<E>;

    #[inline]
    #[track_caller]
    fn mul(self, rhs: &Mat<E>) -> Mat<E> {
        crate::linalg::matmul::matmul(self, rhs)
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for Mat<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct DebugRow<'a, T>(&'a Mat<T>, usize);

        impl<T: core::fmt::Debug> core::fmt::Debug for DebugRow<'_, T> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_list()
                    .entries((0..self.0.ncols()).map(|j| self.0.get(self.1, j)))
                    .finish()
            }
        }

        writeln!(f, "[")?;
        for i in 0..self.nrows() {
            DebugRow(self, i).fmt(f)?;
            f.write_str(",\n")?;
        }
        write!(f, "]")
    }
}
