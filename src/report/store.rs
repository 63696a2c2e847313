use serde::Serialize;
use tokio::sync::mpsc;

use super::draft::{ContractContext, DraftField, ReportDraft};

/// Point-in-time view of a draft, pushed to subscribers after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub revision: u64,
    pub contract_id: String,
    pub irregularity_type: String,
    pub description: String,
    pub entity: String,
    pub amount: String,
    pub is_valid_contract_id: bool,
}

impl DraftSnapshot {
    fn capture(draft: &ReportDraft, revision: u64) -> Self {
        Self {
            revision,
            contract_id: draft.contract_id().to_string(),
            irregularity_type: draft.irregularity_type().to_string(),
            description: draft.description().to_string(),
            entity: draft.entity().to_string(),
            amount: draft.amount().to_string(),
            is_valid_contract_id: draft.is_valid(),
        }
    }
}

/// Owns the one [`ReportDraft`] of an editing session.
///
/// Direct reads and subscriptions see the same storage. Mutations notify
/// subscribers before returning, so no observer can see a draft whose
/// validity disagrees with its contract ID.
#[derive(Debug, Default)]
pub struct DraftStore {
    draft: ReportDraft,
    revision: u64,
    subscribers: Vec<mpsc::UnboundedSender<DraftSnapshot>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    /// Bumped on every change that reached subscribers.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot::capture(&self.draft, self.revision)
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DraftSnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        let changed = self.draft.set(field, value);
        if changed {
            log::debug!("Draft field {field} updated (valid={})", self.draft.is_valid());
            self.publish();
        }
        changed
    }

    pub fn import_context(&mut self, context: &ContractContext) -> bool {
        let changed = self.draft.import_context(context);
        if changed {
            log::debug!("Draft context imported for contract {}", context.contract_id);
            self.publish();
        }
        changed
    }

    pub fn reset(&mut self) {
        self.draft.reset();
        log::debug!("Draft reset");
        self.publish();
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = self.snapshot();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::draft::NO_SELECTION;

    fn context() -> ContractContext {
        ContractContext {
            contract_id: "CO1.PCCNTR.987654".to_string(),
            entity: "Gobernación de Antioquia".to_string(),
            amount: "$480.000.000".to_string(),
        }
    }

    #[test]
    fn subscribers_see_validity_of_each_write() {
        let mut store = DraftStore::new();
        let mut rx = store.subscribe();

        store.set(DraftField::ContractId, "abc12");
        let first = rx.try_recv().expect("first notification");
        assert_eq!(first.contract_id, "abc12");
        assert!(!first.is_valid_contract_id);

        store.set(DraftField::ContractId, "abc123");
        let second = rx.try_recv().expect("second notification");
        assert!(second.is_valid_contract_id);
        assert!(second.revision > first.revision);
        assert_eq!(second, store.snapshot());
    }

    #[test]
    fn unchanged_writes_do_not_notify() {
        let mut store = DraftStore::new();
        let mut rx = store.subscribe();

        assert!(store.import_context(&context()));
        assert!(!store.import_context(&context()));
        assert!(!store.set(DraftField::Entity, "Gobernación de Antioquia"));

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn reset_always_notifies() {
        let mut store = DraftStore::new();
        store.import_context(&context());
        let mut rx = store.subscribe();

        store.reset();
        let snapshot = rx.try_recv().expect("reset notification");
        assert_eq!(snapshot.contract_id, "");
        assert_eq!(snapshot.irregularity_type, NO_SELECTION);
        assert_eq!(snapshot.entity, "Gobernación de Antioquia");
        assert!(!snapshot.is_valid_contract_id);

        store.reset();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = DraftStore::new();
        let kept = store.subscribe();
        let dropped = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        drop(dropped);
        assert_eq!(store.subscriber_count(), 1);

        store.set(DraftField::Description, "algo");
        assert_eq!(store.subscribers.len(), 1);
        drop(kept);
    }

    #[test]
    fn snapshot_and_direct_reads_agree() {
        let mut store = DraftStore::new();
        store.import_context(&context());
        store.set(DraftField::Description, "Pagos anticipados sin soporte");

        let snapshot = store.snapshot();
        let draft = store.draft();
        assert_eq!(snapshot.contract_id, draft.contract_id());
        assert_eq!(snapshot.description, draft.description());
        assert_eq!(snapshot.amount, draft.amount());
        assert_eq!(snapshot.is_valid_contract_id, store.is_valid());
    }

    #[test]
    fn snapshot_serializes_in_camel_case() {
        let store = DraftStore::new();
        let json = serde_json::to_value(store.snapshot()).expect("serialize");
        assert_eq!(json["contractId"], "");
        assert_eq!(json["isValidContractId"], false);
        assert_eq!(json["irregularityType"], NO_SELECTION);
        assert_eq!(json["revision"], 0);
    }
}
