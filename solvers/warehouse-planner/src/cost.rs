//! An explicit "infinite cost" sentinel.
//!
//! Per the design notes, path cost ordering must not lean on IEEE `inf`
//! semantics across a serialization boundary — `Cost` defines its own total
//! order instead, with `Infinite` always greater than any `Finite` value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cost {
    Finite(u32),
    Infinite,
}

impl Cost {
    pub fn is_finite(self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Cost::Finite(v) => v as f64,
            Cost::Infinite => f64::INFINITY,
        }
    }

    pub fn finite_or(self, default: u32) -> u32 {
        match self {
            Cost::Finite(v) => v,
            Cost::Infinite => default,
        }
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Infinite,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(v) => write!(f, "{v}"),
            Cost::Infinite => write!(f, "inf"),
        }
    }
}
