//! Batch Selection: resume work on a previously persisted batch.

use tracing::warn;

use bge_domain::Batch;

use crate::gateway::RemoteGateway;
use crate::wizard::MountRequest;

#[derive(Debug, Clone)]
pub struct BatchSelector {
    batches: Vec<Batch>,
}

impl BatchSelector {
    /// Lists persisted batches. A failed load leaves the list empty.
    pub fn open(gateway: &dyn RemoteGateway) -> Self {
        let batches = gateway.load_batches().unwrap_or_else(|err| {
            warn!(error = %err, "loading batches failed");
            Vec::new()
        });
        Self { batches }
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Mounts data entry for the batch at `index`; `None` when out of range.
    pub fn continue_batch(&self, index: usize) -> Option<MountRequest> {
        self.batches
            .get(index)
            .map(|batch| MountRequest::EnterData { batch_id: batch.id })
    }

    pub fn next_to_initial(&self) -> MountRequest {
        MountRequest::Initial
    }
}
