//! API work requested by screens, and the outcomes fed back to them.

use client_core::{ClientError, Payload, Resource, ResourceApi};
use serde_json::Value;

use crate::lookup::{load_reference_data, ReferenceData};

/// Every command and outcome names the screen it belongs to (`resource`) so
/// the shell can route results back. `session` identifies the modal opening
/// a form command was issued from.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchAll {
        resource: Resource,
    },
    LoadLookups {
        resource: Resource,
        session: u64,
        lookups: Vec<Resource>,
    },
    Create {
        resource: Resource,
        session: u64,
        payload: Payload,
    },
    Update {
        resource: Resource,
        session: u64,
        id: i64,
        payload: Payload,
    },
    Delete {
        resource: Resource,
        id: i64,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::FetchAll { .. } => "fetch_all",
            Command::LoadLookups { .. } => "load_lookups",
            Command::Create { .. } => "create",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            Command::FetchAll { resource }
            | Command::LoadLookups { resource, .. }
            | Command::Create { resource, .. }
            | Command::Update { resource, .. }
            | Command::Delete { resource, .. } => *resource,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Listed {
        resource: Resource,
        result: Result<Vec<Value>, ClientError>,
    },
    LookupsLoaded {
        resource: Resource,
        session: u64,
        data: ReferenceData,
    },
    Saved {
        resource: Resource,
        session: u64,
        result: Result<Value, ClientError>,
    },
    Deleted {
        resource: Resource,
        id: i64,
        result: Result<(), ClientError>,
    },
}

impl Outcome {
    pub fn resource(&self) -> Resource {
        match self {
            Outcome::Listed { resource, .. }
            | Outcome::LookupsLoaded { resource, .. }
            | Outcome::Saved { resource, .. }
            | Outcome::Deleted { resource, .. } => *resource,
        }
    }
}

/// Runs one command against the API. Each call is attempted exactly once.
pub async fn execute<A>(api: &A, command: Command) -> Outcome
where
    A: ResourceApi + ?Sized,
{
    match command {
        Command::FetchAll { resource } => Outcome::Listed {
            resource,
            result: api.get_all(resource).await,
        },
        Command::LoadLookups {
            resource,
            session,
            lookups,
        } => Outcome::LookupsLoaded {
            resource,
            session,
            data: load_reference_data(api, &lookups).await,
        },
        Command::Create {
            resource,
            session,
            payload,
        } => Outcome::Saved {
            resource,
            session,
            result: api.create(resource, payload).await,
        },
        Command::Update {
            resource,
            session,
            id,
            payload,
        } => Outcome::Saved {
            resource,
            session,
            result: api.update(resource, id, payload).await,
        },
        Command::Delete { resource, id } => Outcome::Deleted {
            resource,
            id,
            result: api.delete(resource, id).await,
        },
    }
}
