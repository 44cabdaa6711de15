#![deny(missing_docs)]
//! Interface crate to unify how the hashing work of Merkle tree operations is
//! passed and retrieved.

pub mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Piece of data representing the hashing work done by an operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times raw item bytes were hashed into a leaf digest.
    pub hash_byte_calls: u32,
    /// How many times two child digests were merged into a parent digest.
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// Returns true if no hashing was recorded.
    pub fn is_nothing(&self) -> bool {
        self == &Self::default()
    }

    /// Total number of hash primitive invocations.
    pub fn total_hash_calls(&self) -> u64 {
        self.hash_byte_calls as u64 + self.hash_node_calls as u64
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_byte_calls`.
    pub fn with_hash_byte_calls(hash_byte_calls: u32) -> Self {
        OperationCost {
            hash_byte_calls,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_node_calls`.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_byte_calls: self.hash_byte_calls.saturating_add(rhs.hash_byte_calls),
            hash_node_calls: self.hash_node_calls.saturating_add(rhs.hash_node_calls),
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// `?` for a `CostResult`: adds the step's cost to `$cost`, yields the `Ok`
/// value, or returns the error wrapped with everything accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
