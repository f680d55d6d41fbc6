#![forbid(unsafe_code)]

//! Array input boundary.
//!
//! Manual entry is validated here, before anything reaches a generator.
//! Random arrays for the self-contained flow are drawn here too. Generators
//! themselves accept any integer array of any length.

use std::ops::Range;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors raised while accepting a user array.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("array must have between {min} and {max} elements, got {len}")]
    InvalidArraySize { len: usize, min: usize, max: usize },
    #[error("element {index} is {value}; entries must be between {min} and {max}")]
    InvalidElementValue {
        index: usize,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("could not parse `{token}` as an integer")]
    Parse { token: String },
}

/// Bounds enforced on manually entered arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrayLimits {
    pub min_len: usize,
    pub max_len: usize,
    pub min_value: i32,
    pub max_value: i32,
}

impl Default for ArrayLimits {
    /// Five to fifteen two-digit numbers.
    fn default() -> Self {
        Self {
            min_len: 5,
            max_len: 15,
            min_value: 10,
            max_value: 99,
        }
    }
}

impl ArrayLimits {
    /// Check `values` against these limits.
    pub fn validate(&self, values: &[i32]) -> Result<(), InputError> {
        if values.len() < self.min_len || values.len() > self.max_len {
            return Err(InputError::InvalidArraySize {
                len: values.len(),
                min: self.min_len,
                max: self.max_len,
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| **v < self.min_value || **v > self.max_value)
        {
            return Err(InputError::InvalidElementValue {
                index,
                value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }
}

/// Validate a manually entered array with the default limits.
pub fn validate_manual_entry(values: &[i32]) -> Result<Vec<i32>, InputError> {
    ArrayLimits::default().validate(values)?;
    Ok(values.to_vec())
}

/// Parse comma and/or whitespace separated integers.
pub fn parse_array(text: &str) -> Result<Vec<i32>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|token| {
            token.parse::<i32>().map_err(|_| InputError::Parse {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Shape of a randomly generated array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomArraySpec {
    pub len: usize,
    /// Half-open value range.
    pub values: Range<i32>,
}

impl Default for RandomArraySpec {
    /// Ten values in `1..100`.
    fn default() -> Self {
        Self {
            len: 10,
            values: 1..100,
        }
    }
}

impl RandomArraySpec {
    /// Draw an array. An empty value range yields `len` copies of its start.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Vec<i32> {
        if self.values.is_empty() {
            return vec![self.values.start; self.len];
        }
        (0..self.len)
            .map(|_| rng.random_range(self.values.clone()))
            .collect()
    }
}
