//! Record of every `send` round trip.
//!
//! Purely observational: nothing in evaluation reads it back. It sits behind
//! a mutex so a driver can share it with whoever displays it.

use std::sync::Arc;

use gx_ir::Data;
use parking_lot::Mutex;

/// One request and the reply it received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRecord {
    pub request: Data,
    pub response: Data,
}

/// Collects [`SendRecord`]s in the order they happened.
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Mutex<Vec<SendRecord>>,
}

/// An audit log shared between an evaluator and its observers.
pub type SharedAuditLog = Arc<AuditLog>;

/// Create a new empty shared audit log.
pub fn shared_audit_log() -> SharedAuditLog {
    Arc::new(AuditLog::new())
}

impl AuditLog {
    pub fn new() -> Self {
        AuditLog {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn record(&self, request: Data, response: Data) {
        self.records.lock().push(SendRecord { request, response });
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<SendRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove and return all records.
    pub fn drain(&self) -> Vec<SendRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_in_order() {
        let log = shared_audit_log();
        let observer = Arc::clone(&log);
        log.record(Data::from(0), Data::Nil);
        log.record(Data::list([Data::from(1)]), Data::from(2));

        assert_eq!(observer.len(), 2);
        assert_eq!(
            observer.records().last(),
            Some(&SendRecord {
                request: Data::list([Data::from(1)]),
                response: Data::from(2),
            })
        );
        let drained = observer.drain();
        assert_eq!(drained[0].request, Data::from(0));
        assert!(log.is_empty());
    }
}
