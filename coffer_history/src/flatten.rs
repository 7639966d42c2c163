// SPDX-License-Identifier: MIT OR Apache-2.0
//! History flattener: replaces a long history with a minimal
//! describe-equivalent one.
//!
//! The rebuild goes through `clear` + one `execute` batch, so the
//! replay invariant holds by construction and the new history ends in
//! a single pad line.

use crate::describe::describe_dataset;
use crate::error::Result;
use crate::executor::HistoryExecutor;

/// Histories shorter than this are not worth flattening.
pub const FLATTEN_THRESHOLD: usize = 100;

/// Flattens the history of a borrowed executor.
pub struct Flattener<'a> {
    executor: &'a mut HistoryExecutor,
}

impl<'a> Flattener<'a> {
    /// Wrap an executor for flattening.
    pub fn new(executor: &'a mut HistoryExecutor) -> Self {
        Self { executor }
    }

    /// Whether the history is long enough and the dataset non-empty.
    pub fn can_be_flattened(&self) -> bool {
        self.executor.history().len() >= FLATTEN_THRESHOLD
            && !self.executor.dataset().is_empty()
    }

    /// Rebuild the history from a describe of the current dataset.
    ///
    /// The dataset is unchanged. On a failed rebuild the previous state
    /// is restored and the error propagated.
    pub fn flatten(&mut self) -> Result<()> {
        let described = describe_dataset(self.executor.dataset())?;
        let dataset_before = self.executor.dataset().clone();
        let history_before = self.executor.history().to_vec();
        let dirty_before = self.executor.is_dirty();

        self.executor.clear()?;
        if let Err(err) = self.executor.execute(&described) {
            self.executor
                .restore_state(dataset_before, history_before, dirty_before);
            return Err(err);
        }

        debug_assert_eq!(&dataset_before, self.executor.dataset());
        tracing::debug!(
            before = history_before.len(),
            after = self.executor.history().len(),
            "flattened history"
        );
        Ok(())
    }
}
