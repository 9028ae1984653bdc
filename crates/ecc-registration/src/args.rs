//! Loosely-typed argument values and the positional tail cursor.
//!
//! The builder accepts its arguments as a flat list whose meaning depends on
//! the mode flags. [`ArgValue`] carries one such argument and [`TailCursor`]
//! hands out the fixed-length slices each extension parser consumes.

use nalgebra::DMatrix;

use crate::error::{ConfigError, Result};

/// One positional argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Scalar(f64),
    Bool(bool),
    Text(String),
    Matrix(DMatrix<f64>),
}

impl ArgValue {
    /// Short description of the value's kind, for error messages.
    pub fn kind(&self) -> String {
        match self {
            ArgValue::Scalar(_) => "a scalar".to_string(),
            ArgValue::Bool(_) => "a boolean".to_string(),
            ArgValue::Text(_) => "a string".to_string(),
            ArgValue::Matrix(m) => format!("a {}x{} matrix", m.nrows(), m.ncols()),
        }
    }

    /// Numeric scalar view: a `Scalar` or a 1x1 `Matrix`.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ArgValue::Scalar(v) => Some(*v),
            ArgValue::Matrix(m) if m.shape() == (1, 1) => Some(m[(0, 0)]),
            _ => None,
        }
    }

    /// Boolean view: a `Bool`, or a numeric scalar that is not NaN.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => self.as_scalar().filter(|v| !v.is_nan()).map(|v| v != 0.0),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Matrix view: a `Matrix`, or a `Scalar` as 1x1.
    pub fn as_matrix(&self) -> Option<DMatrix<f64>> {
        match self {
            ArgValue::Matrix(m) => Some(m.clone()),
            ArgValue::Scalar(v) => Some(DMatrix::from_element(1, 1, *v)),
            _ => None,
        }
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Scalar(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Scalar(value as f64)
    }
}

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        ArgValue::Scalar(value as f64)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<DMatrix<f64>> for ArgValue {
    fn from(value: DMatrix<f64>) -> Self {
        ArgValue::Matrix(value)
    }
}

/// Left-to-right reader over the tail arguments.
#[derive(Debug)]
pub struct TailCursor<'a> {
    remaining: &'a [ArgValue],
}

impl<'a> TailCursor<'a> {
    pub fn new(tail: &'a [ArgValue]) -> Self {
        Self { remaining: tail }
    }

    /// Take exactly `count` elements for `stage`.
    ///
    /// Fails with an arity error without consuming anything if fewer are left.
    pub fn take(&mut self, stage: &str, count: usize) -> Result<&'a [ArgValue]> {
        if self.remaining.len() < count {
            return Err(ConfigError::arity(stage, count, self.remaining.len()));
        }
        let (taken, rest) = self.remaining.split_at(count);
        self.remaining = rest;
        Ok(taken)
    }

    /// Number of elements not yet consumed.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}
