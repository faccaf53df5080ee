//! In-crate fakes for service tests

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use domain::{ClientId, RateLimitEntry};

use crate::ports::{Clock, InboundRequest, RateLimitStore};

/// Clock that only moves when told to
#[derive(Debug)]
pub struct FakeClock {
    now: Mutex<Instant>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

/// Single-lock store; enough for sequential tests
#[derive(Debug, Default)]
pub struct HashMapStore {
    entries: Mutex<HashMap<ClientId, RateLimitEntry>>,
}

impl RateLimitStore for HashMapStore {
    fn upsert(
        &self,
        client: &ClientId,
        update: &mut dyn FnMut(Option<RateLimitEntry>) -> RateLimitEntry,
    ) -> RateLimitEntry {
        let mut entries = self.entries.lock().unwrap();
        let next = update(entries.get(client).copied());
        entries.insert(client.clone(), next);
        next
    }

    fn remove_expired(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Header map backed request
#[derive(Debug, Default)]
pub struct FakeRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl FakeRequest {
    pub fn post(path: &str) -> Self {
        Self {
            method: "POST".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

impl InboundRequest for FakeRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }
}
