use std::collections::HashMap;

use client_core::{Resource, ResourceApi};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

/// Reference lists a form loaded for its pickers.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    lists: HashMap<Resource, Vec<Value>>,
    degraded: bool,
}

impl ReferenceData {
    pub fn from_lists(lists: impl IntoIterator<Item = (Resource, Vec<Value>)>) -> Self {
        Self {
            lists: lists.into_iter().collect(),
            degraded: false,
        }
    }

    /// Empty lists standing in for a batch that failed to load.
    pub fn degraded() -> Self {
        Self {
            lists: HashMap::new(),
            degraded: true,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn raw(&self, resource: Resource) -> &[Value] {
        self.lists.get(&resource).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Decoded records of one resource; undecodable entries are skipped.
    pub fn records<T: DeserializeOwned>(&self, resource: Resource) -> Vec<T> {
        self.raw(resource)
            .iter()
            .filter_map(|value| match serde_json::from_value(value.clone()) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(resource = resource.path(), "skipping undecodable lookup record: {err}");
                    None
                }
            })
            .collect()
    }
}

/// Issues every lookup concurrently and waits for all of them.
///
/// If any lookup fails the whole batch is reported as degraded with no lists,
/// so a form never renders a partial set of pickers.
pub async fn load_reference_data<A>(api: &A, resources: &[Resource]) -> ReferenceData
where
    A: ResourceApi + ?Sized,
{
    let results = join_all(
        resources
            .iter()
            .map(|resource| async move { (*resource, api.get_all(*resource).await) }),
    )
    .await;

    let mut lists = Vec::with_capacity(results.len());
    let mut failed = false;
    for (resource, result) in results {
        match result {
            Ok(items) => lists.push((resource, items)),
            Err(err) => {
                error!(resource = resource.path(), "failed to load lookup list: {err}");
                failed = true;
            }
        }
    }

    if failed {
        ReferenceData::degraded()
    } else {
        ReferenceData::from_lists(lists)
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
