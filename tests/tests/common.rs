// Shared by several test binaries, each of which uses a subset
#![allow(unused)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docmux::bson::Document;
use docmux::{Collection, DatabaseConfig, DocumentHandle, FindOptions, Model, Store, StoreError, UpdateResult};
use tracing::Level;

#[derive(Model, Debug, Clone, Default, PartialEq)]
pub struct L3 {
    #[docmux("value,omitempty")]
    pub value: i32,
}

#[derive(Model, Debug, Clone, Default, PartialEq)]
pub struct L2 {
    #[docmux("value")]
    pub value: String,
    #[docmux("l3,omitempty")]
    pub l3: L3,
}

#[derive(Model, Debug, Clone, Default, PartialEq)]
pub struct L1 {
    #[docmux("value")]
    pub value: String,
    #[docmux("l2", omitempty)]
    pub l2: L2,
    #[docmux(omitempty)]
    pub tags: Vec<String>,
    #[docmux("attrs,omitempty")]
    pub attrs: HashMap<String, i64>,
    pub note: Option<String>,
}

/// Row of a grouped count
#[derive(Model, Debug, Clone, Default, PartialEq)]
pub struct GroupCount {
    pub group: Document,
    pub count: i64,
}

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok().and_then(|level| level.parse::<Level>().ok()).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).with_test_writer().init();
}

pub fn l1(value: &str, l2_value: &str, l3_value: i32) -> L1 {
    L1 { value: value.into(), l2: L2 { value: l2_value.into(), l3: L3 { value: l3_value } }, ..Default::default() }
}

/// A collaborator round trip seen by [`MockStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find { collection: String, filter: Document, options: FindOptions },
    Aggregate { collection: String, pipeline: Vec<Document> },
    UpdateMany { collection: String, filter: Document, update: Document },
    InsertOne { collection: String, document: Document },
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    responses: VecDeque<Vec<Document>>,
    matched: u64,
}

/// Records every round trip and answers reads from a queue of canned responses.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    pub fn new() -> Self { Self::default() }

    /// Queue the rows returned by the next find or aggregate
    pub fn respond(&self, rows: Vec<Document>) { self.state.lock().unwrap().responses.push_back(rows); }

    /// Matched count reported by update_many
    pub fn set_matched(&self, matched: u64) { self.state.lock().unwrap().matched = matched; }

    pub fn calls(&self) -> Vec<Call> { self.state.lock().unwrap().calls.clone() }

    pub fn handle(&self) -> DocumentHandle<MockStore> {
        DocumentHandle::new(self.clone(), DatabaseConfig::new("localhost:27017", "docmux_test")).expect("valid test config")
    }
}

struct MockCollection {
    name: String,
    state: Arc<Mutex<MockState>>,
}

impl MockCollection {
    fn record(&self, call: Call) -> Vec<Document> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.responses.pop_front().unwrap_or_default()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn collection(&self, name: &str) -> Result<Arc<dyn Collection>, StoreError> {
        Ok(Arc::new(MockCollection { name: name.to_string(), state: self.state.clone() }))
    }
}

#[async_trait]
impl Collection for MockCollection {
    async fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Document>, StoreError> {
        Ok(self.record(Call::Find { collection: self.name.clone(), filter, options }))
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, StoreError> {
        Ok(self.record(Call::Aggregate { collection: self.name.clone(), pipeline }))
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateResult, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UpdateMany { collection: self.name.clone(), filter, update });
        Ok(UpdateResult { matched: state.matched })
    }

    async fn insert_one(&self, document: Document) -> Result<(), StoreError> {
        self.state.lock().unwrap().calls.push(Call::InsertOne { collection: self.name.clone(), document });
        Ok(())
    }
}
