//! Dense matrix helpers on top of `nalgebra::DMatrix`.
//!
//! Determinant and inverse deliberately use cofactor expansion rather than an
//! LU factorization, so they stay exact for small integer matrices entered by
//! hand. The cost is exponential in the dimension.

use crate::error::{CalcError, CalcResult};
use nalgebra::DMatrix;

/// Below this magnitude a determinant is treated as zero.
pub const SINGULAR_TOLERANCE: f64 = 1e-10;

pub fn from_rows(rows: &[Vec<f64>]) -> CalcResult<DMatrix<f64>> {
    let nrows = rows.len();
    if nrows == 0 {
        return Err(CalcError::Dimension("matrix must have at least one row".into()));
    }
    let ncols = rows[0].len();
    if ncols == 0 {
        return Err(CalcError::Dimension("matrix must have at least one column".into()));
    }
    if let Some(bad) = rows.iter().position(|row| row.len() != ncols) {
        return Err(CalcError::Dimension(format!(
            "row {} has {} entries, expected {}",
            bad,
            rows[bad].len(),
            ncols
        )));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(nrows, ncols, &flat))
}

pub fn to_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

fn same_shape(a: &DMatrix<f64>, b: &DMatrix<f64>) -> CalcResult<()> {
    if a.shape() != b.shape() {
        return Err(CalcError::Dimension(format!(
            "{}x{} and {}x{} matrices differ in shape",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(())
}

fn require_square(a: &DMatrix<f64>) -> CalcResult<usize> {
    if !a.is_square() || a.nrows() == 0 {
        return Err(CalcError::Dimension(format!(
            "expected a non-empty square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    Ok(a.nrows())
}

pub fn add(a: &DMatrix<f64>, b: &DMatrix<f64>) -> CalcResult<DMatrix<f64>> {
    same_shape(a, b)?;
    Ok(a + b)
}

pub fn subtract(a: &DMatrix<f64>, b: &DMatrix<f64>) -> CalcResult<DMatrix<f64>> {
    same_shape(a, b)?;
    Ok(a - b)
}

pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> CalcResult<DMatrix<f64>> {
    if a.ncols() != b.nrows() {
        return Err(CalcError::Dimension(format!(
            "cannot multiply {}x{} by {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(a * b)
}

pub fn scale(a: &DMatrix<f64>, factor: f64) -> DMatrix<f64> {
    a * factor
}

pub fn transpose(a: &DMatrix<f64>) -> DMatrix<f64> {
    a.transpose()
}

fn minor(a: &DMatrix<f64>, row: usize, col: usize) -> DMatrix<f64> {
    a.clone().remove_row(row).remove_column(col)
}

fn laplace(a: &DMatrix<f64>) -> f64 {
    let n = a.nrows();
    match n {
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        _ => (0..n)
            .map(|j| {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                sign * a[(0, j)] * laplace(&minor(a, 0, j))
            })
            .sum(),
    }
}

/// Laplace expansion along the first row.
pub fn determinant(a: &DMatrix<f64>) -> CalcResult<f64> {
    require_square(a)?;
    Ok(laplace(a))
}

/// Adjugate divided by the determinant.
pub fn inverse(a: &DMatrix<f64>) -> CalcResult<DMatrix<f64>> {
    let n = require_square(a)?;
    let det = laplace(a);
    if det.abs() < SINGULAR_TOLERANCE {
        return Err(CalcError::Singular);
    }
    if n == 1 {
        return Ok(DMatrix::from_element(1, 1, 1.0 / det));
    }
    // adj(A)[j][i] = cofactor(i, j)
    let adjugate = DMatrix::from_fn(n, n, |row, col| {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * laplace(&minor(a, col, row))
    });
    Ok(adjugate / det)
}

/// Splits `[[a, b], [c, d]]` into element sources without evaluating them.
///
/// Commas nested inside parentheses (function arguments) do not separate
/// elements.
pub fn split_matrix_literal(text: &str) -> CalcResult<Vec<Vec<String>>> {
    let inner = strip_brackets(text.trim())?;
    let rows = split_top_level(inner)?;
    rows.iter()
        .map(|row| {
            let row_inner = strip_brackets(row.trim())?;
            split_top_level(row_inner)
        })
        .collect()
}

/// Splits `[a, b, c]` into element sources.
pub fn split_vector_literal(text: &str) -> CalcResult<Vec<String>> {
    split_top_level(strip_brackets(text.trim())?)
}

fn strip_brackets(text: &str) -> CalcResult<&str> {
    text.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| CalcError::Parse(format!("expected a bracketed list, got '{text}'")))
}

fn split_top_level(text: &str) -> CalcResult<Vec<String>> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(CalcError::Parse("unbalanced brackets in list".into()));
        }
        if c == ',' && depth == 0 {
            parts.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    if depth != 0 {
        return Err(CalcError::Parse("unbalanced brackets in list".into()));
    }
    parts.push(current.trim().to_string());
    if parts.iter().any(|p| p.is_empty()) {
        return Err(CalcError::Parse("empty list element".into()));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> DMatrix<f64> {
        let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        from_rows(&rows).expect("valid matrix")
    }

    #[test]
    fn determinant_small_cases() {
        assert_eq!(determinant(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap(), -2.0);
        assert_eq!(determinant(&m(&[&[5.0]])).unwrap(), 5.0);
        let three = m(&[&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 1.0, 2.0]]);
        assert!((determinant(&three).unwrap() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn determinant_requires_square() {
        let err = determinant(&m(&[&[1.0, 2.0, 3.0]])).expect_err("non-square");
        assert!(matches!(err, CalcError::Dimension(_)));
    }

    #[test]
    fn inverse_via_adjugate() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = inverse(&a).expect("invertible");
        let product = &a * &inv;
        let identity = DMatrix::<f64>::identity(2, 2);
        assert!((product - identity).abs().max() < 1e-12);
        assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
        assert!((inv[(0, 1)] + 0.7).abs() < 1e-12);
    }

    #[test]
    fn inverse_of_three_by_three() {
        let a = m(&[&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 1.0, 2.0]]);
        let inv = inverse(&a).expect("invertible");
        let product = &a * &inv;
        assert!((product - DMatrix::<f64>::identity(3, 3)).abs().max() < 1e-12);
        assert!((inv[(0, 0)] - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let err = inverse(&m(&[&[1.0, 2.0], &[2.0, 4.0]])).expect_err("singular");
        assert_eq!(err, CalcError::Singular);
    }

    #[test]
    fn shape_checks() {
        let a = m(&[&[1.0, 2.0]]);
        let b = m(&[&[1.0], &[2.0]]);
        assert!(add(&a, &b).is_err());
        let product = multiply(&a, &b).expect("1x2 * 2x1");
        assert_eq!(product[(0, 0)], 5.0);
        assert_eq!(transpose(&a), b);
        assert!(from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn splits_literals_respecting_nested_commas() {
        let rows = split_matrix_literal("[[1, root(8,3)], [pi, 4]]").expect("literal");
        assert_eq!(rows, vec![vec!["1", "root(8,3)"], vec!["pi", "4"]]);
        let v = split_vector_literal("[1, 2, 3]").expect("vector");
        assert_eq!(v, vec!["1", "2", "3"]);
        assert!(split_vector_literal("1, 2").is_err());
        assert!(split_vector_literal("[1,,2]").is_err());
    }
}
