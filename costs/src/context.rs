//! Values paired with the hashing work it took to produce them.

use crate::OperationCost;

/// An operation's output together with its hashing cost.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Output of the operation.
    pub value: T,
    /// Hash calls spent producing `value`.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Move the cost into `acc` and return the output.
    pub fn unwrap_add_cost(self, acc: &mut OperationCost) -> T {
        *acc += self.cost;
        self.value
    }

    /// Return the output, discarding the cost.
    pub fn unwrap(self) -> T {
        self.value
    }
}

/// A fallible operation's `Result` with its cost.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

/// Attach a cost to any value.
pub trait CostsExt: Sized {
    /// Pair `self` with `cost`.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self> {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}
