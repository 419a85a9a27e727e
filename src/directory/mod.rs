//! Directory API: dropdown options and contact lookup
//!
//! The directory is a read-only backend service listing the options a quote
//! form offers (regions, communes per region, freight, container and truck
//! types, equipment) and answering whether an e-mail belongs to a registered
//! user.

pub mod client;

pub use client::HttpDirectoryClient;

use crate::error::QuoteResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One selectable option returned by the directory.
///
/// Only `id` is required; any other fields the backend sends are preserved in
/// `extra` so they can be echoed back or displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DirectoryEntry {
    pub fn new(id: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            extra: Map::new(),
        }
    }

    /// The id as it appears in a URL path or a form field
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Display label, falling back to the id
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id_string())
    }
}

/// The static option lists a quote form loads up front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryList {
    Regions,
    FreightTypes,
    ContainerTypes,
    TruckTypes,
    Equipment,
}

impl DirectoryList {
    pub const ALL: [DirectoryList; 5] = [
        DirectoryList::Regions,
        DirectoryList::FreightTypes,
        DirectoryList::ContainerTypes,
        DirectoryList::TruckTypes,
        DirectoryList::Equipment,
    ];

    /// Path segment under `/directory/`
    pub fn resource(&self) -> &'static str {
        match self {
            DirectoryList::Regions => "region",
            DirectoryList::FreightTypes => "freighttype",
            DirectoryList::ContainerTypes => "containertype",
            DirectoryList::TruckTypes => "trucktype",
            DirectoryList::Equipment => "equipment",
        }
    }
}

impl fmt::Display for DirectoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

/// Read-only access to the directory service
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch one of the static option lists
    async fn list(&self, list: DirectoryList) -> QuoteResult<Vec<DirectoryEntry>>;

    /// Fetch the communes of a region
    async fn communes(&self, region_id: &str) -> QuoteResult<Vec<DirectoryEntry>>;

    /// Whether `email` belongs to a registered user
    async fn user_exists(&self, email: &str) -> QuoteResult<bool>;

    async fn regions(&self) -> QuoteResult<Vec<DirectoryEntry>> {
        self.list(DirectoryList::Regions).await
    }

    async fn freight_types(&self) -> QuoteResult<Vec<DirectoryEntry>> {
        self.list(DirectoryList::FreightTypes).await
    }

    async fn container_types(&self) -> QuoteResult<Vec<DirectoryEntry>> {
        self.list(DirectoryList::ContainerTypes).await
    }

    async fn truck_types(&self) -> QuoteResult<Vec<DirectoryEntry>> {
        self.list(DirectoryList::TruckTypes).await
    }

    async fn equipment(&self) -> QuoteResult<Vec<DirectoryEntry>> {
        self.list(DirectoryList::Equipment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_preserves_unknown_fields() {
        let entry: DirectoryEntry = serde_json::from_value(json!({
            "id": 13,
            "name": "Metropolitana",
            "ordinal": "XIII"
        }))
        .unwrap();

        assert_eq!(entry.id_string(), "13");
        assert_eq!(entry.label(), "Metropolitana");
        assert_eq!(entry.extra.get("ordinal"), Some(&json!("XIII")));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["ordinal"], "XIII");
    }

    #[test]
    fn test_entry_without_name_uses_id_label() {
        let entry: DirectoryEntry = serde_json::from_value(json!({"id": "reefer"})).unwrap();
        assert_eq!(entry.name, None);
        assert_eq!(entry.id_string(), "reefer");
        assert_eq!(entry.label(), "reefer");
    }

    #[test]
    fn test_entry_requires_id() {
        let result: Result<DirectoryEntry, _> = serde_json::from_value(json!({"name": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_resources() {
        let resources: Vec<&str> = DirectoryList::ALL.iter().map(|l| l.resource()).collect();
        assert_eq!(
            resources,
            vec!["region", "freighttype", "containertype", "trucktype", "equipment"]
        );
        assert_eq!(DirectoryList::TruckTypes.to_string(), "trucktype");
    }
}
