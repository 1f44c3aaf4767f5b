use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use shared::error::ValidationErrorBody;
use tracing::{debug, info};

pub mod config;
pub mod error;
pub mod normalize;
pub mod payload;

pub use config::{load_settings, LookupFailurePolicy, Settings};
pub use error::ClientError;
pub use normalize::{normalize_list, normalize_record};
pub use payload::{FileAttachment, MultipartPayload, PartValue, Payload};

/// A named record collection exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Students,
    Instructors,
    Courses,
    Recitations,
    Lessons,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Students => "students",
            Resource::Instructors => "instructors",
            Resource::Courses => "courses",
            Resource::Recitations => "recitation",
            Resource::Lessons => "lessons",
        }
    }

    /// Extra top-level keys the server wraps this resource's lists in.
    pub fn envelope_keys(self) -> &'static [&'static str] {
        match self {
            Resource::Recitations => &["student_recitation", "recitations"],
            Resource::Courses => &["course"],
            Resource::Students | Resource::Instructors | Resource::Lessons => &[],
        }
    }
}

#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn get_all(&self, resource: Resource) -> Result<Vec<Value>, ClientError>;
    async fn create(&self, resource: Resource, payload: Payload) -> Result<Value, ClientError>;
    async fn update(
        &self,
        resource: Resource,
        id: i64,
        payload: Payload,
    ) -> Result<Value, ClientError>;
    async fn delete(&self, resource: Resource, id: i64) -> Result<(), ClientError>;
}

/// HTTP implementation of [`ResourceApi`] against `{base_url}/{resource}`.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, config::SettingsError> {
        Ok(Self {
            http: Client::new(),
            base_url: config::validate_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    fn record_url(&self, resource: Resource, id: i64) -> String {
        format!("{}/{}/{id}", self.base_url, resource.path())
    }

    fn with_payload(request: RequestBuilder, payload: Payload) -> Result<RequestBuilder, ClientError> {
        debug!(multipart = payload.is_multipart(), "attaching request body");
        Ok(match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(parts) => request.multipart(parts.into_form()?),
        })
    }

    async fn send(request: RequestBuilder) -> Result<Value, ClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        read_response(response).await
    }
}

async fn read_response(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(parsed) = serde_json::from_str::<ValidationErrorBody>(&body) {
            return Err(ClientError::Validation {
                status: status.as_u16(),
                message: parsed.message,
                fields: parsed.errors,
            });
        }
    }

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            url,
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl ResourceApi for ApiClient {
    async fn get_all(&self, resource: Resource) -> Result<Vec<Value>, ClientError> {
        let body = Self::send(self.http.get(self.collection_url(resource))).await?;
        let items = normalize_list(resource, body);
        debug!(resource = resource.path(), count = items.len(), "fetched records");
        Ok(items)
    }

    async fn create(&self, resource: Resource, payload: Payload) -> Result<Value, ClientError> {
        let request = Self::with_payload(self.http.post(self.collection_url(resource)), payload)?;
        let body = Self::send(request).await?;
        info!(resource = resource.path(), "record created");
        Ok(normalize_record(body))
    }

    async fn update(
        &self,
        resource: Resource,
        id: i64,
        payload: Payload,
    ) -> Result<Value, ClientError> {
        let url = self.record_url(resource, id);
        // Multipart bodies are only parsed on POST; the verb travels as a field.
        let request = match payload {
            Payload::Multipart(parts) => Self::with_payload(
                self.http.post(url),
                Payload::Multipart(parts.text("_method", "PUT")),
            )?,
            json @ Payload::Json(_) => Self::with_payload(self.http.put(url), json)?,
        };
        let body = Self::send(request).await?;
        info!(resource = resource.path(), id, "record updated");
        Ok(normalize_record(body))
    }

    async fn delete(&self, resource: Resource, id: i64) -> Result<(), ClientError> {
        Self::send(self.http.delete(self.record_url(resource, id))).await?;
        info!(resource = resource.path(), id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
