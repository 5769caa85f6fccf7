//! Recording fakes for the search-index and event-stream seams. They count
//! calls, keep the observable state, and can be switched into failure mode
//! to exercise the partial-failure paths.

use async_trait::async_trait;
use furlough::errors::FurloughError;
use furlough::events::{EventSink, OperationKind};
use furlough::search::{PermissionDocument, SearchIndex};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingIndex {
    docs: Mutex<BTreeMap<i32, PermissionDocument>>,
    upserts: AtomicUsize,
    fail_writes: AtomicBool,
}

impl RecordingIndex {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn doc(&self, id: i32) -> Option<PermissionDocument> {
        self.docs.lock().unwrap().get(&id).cloned()
    }

    pub fn doc_count(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchIndex for RecordingIndex {
    async fn ensure_index(&self) -> Result<(), FurloughError> {
        Ok(())
    }

    async fn upsert(&self, doc: &PermissionDocument) -> Result<(), FurloughError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FurloughError::Index("simulated write failure".to_string()));
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.docs.lock().unwrap().insert(doc.id, doc.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, FurloughError> {
        Ok(self.docs.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<OperationKind>>,
    fail: AtomicBool,
}

impl RecordingSink {
    pub fn fail_publishes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<OperationKind> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, kind: OperationKind) -> Result<(), FurloughError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(FurloughError::Publish(
                "simulated broker failure".to_string(),
            ));
        }
        self.published.lock().unwrap().push(kind);
        Ok(())
    }
}
