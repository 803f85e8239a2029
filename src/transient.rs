//! Transaction-scoped storage
//!
//! Cells are keyed by the transaction that wrote them. Reading a cell that
//! was never written in the current transaction yields zero, and every cell a
//! transaction wrote is dropped when that transaction ends.

use std::collections::HashMap;

use alloy::primitives::{TxHash, B256, U256};

#[derive(Debug, Default)]
pub struct TransientStorage {
    cells: HashMap<(TxHash, B256), U256>,
}

impl TransientStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` into `slot` for transaction `tx`
    pub fn tstore(&mut self, tx: TxHash, slot: B256, value: U256) {
        if value.is_zero() {
            self.cells.remove(&(tx, slot));
        } else {
            self.cells.insert((tx, slot), value);
        }
    }

    /// Read `slot` for transaction `tx`; zero when unset
    pub fn tload(&self, tx: TxHash, slot: B256) -> U256 {
        self.cells.get(&(tx, slot)).copied().unwrap_or(U256::ZERO)
    }

    /// End of transaction `tx`: forget everything it wrote
    pub fn clear(&mut self, tx: TxHash) {
        self.cells.retain(|(owner, _), _| *owner != tx);
    }

    /// Drop cells of every transaction other than `tx`
    ///
    /// Returns how many stale cells were purged.
    pub fn retain_only(&mut self, tx: TxHash) -> usize {
        let before = self.cells.len();
        self.cells.retain(|(owner, _), _| *owner == tx);
        before - self.cells.len()
    }

    /// Number of live cells across all transactions
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
