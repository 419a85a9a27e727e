//! Mock implementations for testing
//!
//! Provides in-memory DirectoryClient and QuoteSubmitter implementations so
//! sessions can be exercised without a backend.

use crate::directory::{DirectoryClient, DirectoryEntry, DirectoryList};
use crate::error::{QuoteError, QuoteResult};
use crate::quote::{QuoteRequest, QuoteSubmitter};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock directory backed by in-memory lists
#[derive(Debug, Clone, Default)]
pub struct MockDirectory {
    pub lists: HashMap<DirectoryList, Vec<DirectoryEntry>>,
    pub communes: HashMap<String, Vec<DirectoryEntry>>,
    pub users: HashSet<String>,
    pub failing_lists: HashSet<DirectoryList>,
    pub fail_user_lookup: bool,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two regions with one commune each and one entry per other list
    pub fn with_sample_data() -> Self {
        let mut directory = Self::new();
        directory.lists.insert(
            DirectoryList::Regions,
            vec![
                DirectoryEntry::new(13, "Metropolitana"),
                DirectoryEntry::new(5, "Valparaiso"),
            ],
        );
        directory.lists.insert(
            DirectoryList::FreightTypes,
            vec![DirectoryEntry::new(2, "Carga general")],
        );
        directory.lists.insert(
            DirectoryList::ContainerTypes,
            vec![DirectoryEntry::new("40HC", "40' High Cube")],
        );
        directory.lists.insert(
            DirectoryList::TruckTypes,
            vec![DirectoryEntry::new(1, "Rampla")],
        );
        directory.lists.insert(
            DirectoryList::Equipment,
            vec![DirectoryEntry::new(7, "Grua horquilla")],
        );
        directory
            .communes
            .insert("13".to_string(), vec![DirectoryEntry::new(131, "Santiago")]);
        directory
            .communes
            .insert("5".to_string(), vec![DirectoryEntry::new(51, "Valparaiso")]);
        directory
    }

    pub fn with_user(mut self, email: &str) -> Self {
        self.users.insert(email.to_string());
        self
    }

    pub fn failing_list(mut self, list: DirectoryList) -> Self {
        self.failing_lists.insert(list);
        self
    }

    pub fn failing_users(mut self) -> Self {
        self.fail_user_lookup = true;
        self
    }

    /// Paths requested so far, in order
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, path: String) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(path);
        }
    }
}

#[async_trait]
impl DirectoryClient for MockDirectory {
    async fn list(&self, list: DirectoryList) -> QuoteResult<Vec<DirectoryEntry>> {
        let path = format!("/directory/{}/", list.resource());
        self.record(path.clone());

        if self.failing_lists.contains(&list) {
            return Err(QuoteError::unexpected_status(
                path,
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
        Ok(self.lists.get(&list).cloned().unwrap_or_default())
    }

    async fn communes(&self, region_id: &str) -> QuoteResult<Vec<DirectoryEntry>> {
        let path = format!("/directory/commune/{region_id}/");
        self.record(path.clone());

        self.communes
            .get(region_id)
            .cloned()
            .ok_or_else(|| QuoteError::unexpected_status(path, StatusCode::NOT_FOUND))
    }

    async fn user_exists(&self, email: &str) -> QuoteResult<bool> {
        let path = format!("/directory/user/{email}");
        self.record(path.clone());

        if self.fail_user_lookup {
            return Err(QuoteError::transport(path, "connection refused"));
        }
        Ok(self.users.contains(email))
    }
}

/// Mock submitter recording every request it receives
#[derive(Debug, Clone, Default)]
pub struct MockSubmitter {
    pub submitted: Arc<Mutex<Vec<QuoteRequest>>>,
    pub should_fail: bool,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn submitted_requests(&self) -> Vec<QuoteRequest> {
        self.submitted
            .lock()
            .map(|submitted| submitted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuoteSubmitter for MockSubmitter {
    async fn submit(&self, request: &QuoteRequest) -> QuoteResult<()> {
        if self.should_fail {
            return Err(QuoteError::unexpected_status(
                "/directory/freightfirststep/",
                StatusCode::BAD_REQUEST,
            ));
        }
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(request.clone());
        }
        Ok(())
    }
}
