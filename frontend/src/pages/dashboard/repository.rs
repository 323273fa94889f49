use crate::api::{ApiClient, ApiError, MedicalRequest};
use serde_json::Value;
use std::{collections::BTreeMap, rc::Rc};

/// One family-status record flattened into label/value rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FamilyEntry {
    pub rows: Vec<(String, String)>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

#[derive(Clone)]
pub struct DashboardRepository {
    client: Rc<ApiClient>,
}

impl DashboardRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn family_status(&self) -> Result<Vec<FamilyEntry>, ApiError> {
        let value = self.client.family_status().await?;
        Ok(family_entries(&value))
    }

    pub async fn request_summary(&self) -> Result<RequestSummary, ApiError> {
        let requests = self.client.list_requests().await?;
        Ok(summarize(&requests))
    }
}

pub fn family_entries(value: &Value) -> Vec<FamilyEntry> {
    match value {
        Value::Array(items) => items.iter().map(describe).collect(),
        Value::Null => Vec::new(),
        other => vec![describe(other)],
    }
}

fn describe(item: &Value) -> FamilyEntry {
    let rows = match item {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| display_value(value).map(|v| (key.clone(), v)))
            .collect(),
        scalar => display_value(scalar)
            .map(|v| vec![("Value".to_string(), v)])
            .unwrap_or_default(),
    };
    FamilyEntry { rows }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        nested => Some(nested.to_string()),
    }
}

pub fn summarize(requests: &[MedicalRequest]) -> RequestSummary {
    let mut by_status = BTreeMap::new();
    for request in requests {
        *by_status.entry(request.status()).or_insert(0) += 1;
    }
    RequestSummary {
        total: requests.len(),
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn family_entries_flatten_objects_and_skip_empty_values() {
        let entries = family_entries(&json!([
            { "name": "Ali", "relation": "Son", "note": null, "insured": true },
            "Spouse"
        ]));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].rows.contains(&("relation".into(), "Son".into())));
        assert!(entries[0].rows.contains(&("insured".into(), "Yes".into())));
        assert!(!entries[0].rows.iter().any(|(k, _)| k == "note"));
        assert_eq!(entries[1].rows, vec![("Value".to_string(), "Spouse".to_string())]);
        assert!(family_entries(&Value::Null).is_empty());
    }

    #[test]
    fn summary_counts_by_status() {
        let requests = vec![
            MedicalRequest(json!({ "id": 1, "status": "Approved" })),
            MedicalRequest(json!({ "id": 2, "Status": "Approved" })),
            MedicalRequest(json!({ "id": 3 })),
        ];
        let summary = summarize(&requests);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_status.get("Approved"), Some(&2));
        assert_eq!(summary.by_status.get("Under review"), Some(&1));
    }
}
