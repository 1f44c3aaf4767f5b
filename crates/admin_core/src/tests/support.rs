//! In-memory API double and a driver loop for reducer tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use client_core::{ClientError, PartValue, Payload, Resource, ResourceApi};
use serde_json::{json, Map, Value};
use shared::error::ValidationErrorMap;

use crate::{
    commands::{execute, Command},
    forms::EntityForm,
    screen::EntityScreen,
};

#[derive(Default)]
pub struct InMemoryApi {
    lists: Mutex<HashMap<Resource, Vec<Value>>>,
    failing_lists: Mutex<HashSet<Resource>>,
    save_rejection: Mutex<Option<ValidationErrorMap>>,
    save_outage: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    payloads: Mutex<Vec<Payload>>,
}

impl InMemoryApi {
    pub fn with_records(self, resource: Resource, records: Vec<Value>) -> Self {
        self.lists.lock().expect("lists").insert(resource, records);
        self
    }

    pub fn fail_list(&self, resource: Resource) {
        self.failing_lists.lock().expect("failing").insert(resource);
    }

    pub fn reject_saves_with(&self, fields: ValidationErrorMap) {
        *self.save_rejection.lock().expect("rejection") = Some(fields);
    }

    pub fn fail_saves(&self) {
        *self.save_outage.lock().expect("outage") = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|recorded| *recorded == call).count()
    }

    pub fn last_payload(&self) -> Option<Payload> {
        self.payloads.lock().expect("payloads").last().cloned()
    }

    pub fn stored(&self, resource: Resource) -> Vec<Value> {
        self.lists
            .lock()
            .expect("lists")
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: &str, resource: Resource) {
        self.calls
            .lock()
            .expect("calls")
            .push(format!("{call}:{}", resource.path()));
    }

    fn check_save(&self, payload: &Payload) -> Result<(), ClientError> {
        self.payloads.lock().expect("payloads").push(payload.clone());
        if let Some(fields) = self.save_rejection.lock().expect("rejection").clone() {
            return Err(ClientError::Validation {
                status: 422,
                message: None,
                fields,
            });
        }
        if *self.save_outage.lock().expect("outage") {
            return Err(ClientError::Status {
                status: 503,
                url: "memory://".to_string(),
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn payload_to_record(payload: Payload) -> Map<String, Value> {
    match payload {
        Payload::Json(Value::Object(map)) => map,
        Payload::Json(_) => Map::new(),
        Payload::Multipart(form) => {
            let mut map = Map::new();
            for (name, value) in form.parts() {
                let PartValue::Text(text) = value else {
                    continue;
                };
                if let Some(list_name) = name.strip_suffix("[]") {
                    let entry = map
                        .entry(list_name.to_string())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    if let Value::Array(items) = entry {
                        items.push(Value::String(text.clone()));
                    }
                } else {
                    map.insert(name.clone(), Value::String(text.clone()));
                }
            }
            map
        }
    }
}

#[async_trait]
impl ResourceApi for InMemoryApi {
    async fn get_all(&self, resource: Resource) -> Result<Vec<Value>, ClientError> {
        self.record("get_all", resource);
        if self.failing_lists.lock().expect("failing").contains(&resource) {
            return Err(ClientError::Status {
                status: 500,
                url: format!("memory://{}", resource.path()),
                body: "boom".to_string(),
            });
        }
        Ok(self.stored(resource))
    }

    async fn create(&self, resource: Resource, payload: Payload) -> Result<Value, ClientError> {
        self.record("create", resource);
        self.check_save(&payload)?;
        let mut lists = self.lists.lock().expect("lists");
        let list = lists.entry(resource).or_default();
        let id = list
            .iter()
            .filter_map(|record| record["id"].as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let mut record = payload_to_record(payload);
        record.insert("id".to_string(), json!(id));
        let record = Value::Object(record);
        list.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        resource: Resource,
        id: i64,
        payload: Payload,
    ) -> Result<Value, ClientError> {
        self.record("update", resource);
        self.check_save(&payload)?;
        let mut record = payload_to_record(payload);
        record.insert("id".to_string(), json!(id));
        let record = Value::Object(record);
        let mut lists = self.lists.lock().expect("lists");
        if let Some(existing) = lists
            .entry(resource)
            .or_default()
            .iter_mut()
            .find(|existing| existing["id"].as_i64() == Some(id))
        {
            *existing = record.clone();
        }
        Ok(record)
    }

    async fn delete(&self, resource: Resource, id: i64) -> Result<(), ClientError> {
        self.record("delete", resource);
        self.lists
            .lock()
            .expect("lists")
            .entry(resource)
            .or_default()
            .retain(|record| record["id"].as_i64() != Some(id));
        Ok(())
    }
}

/// Executes `command` and every follow-up the screen asks for.
pub async fn drive<F: EntityForm>(
    screen: &mut EntityScreen<F>,
    api: &InMemoryApi,
    command: Option<Command>,
) {
    let mut next = command;
    while let Some(command) = next.take() {
        let outcome = execute(api, command).await;
        next = screen.apply(outcome);
    }
}
