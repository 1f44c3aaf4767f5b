//! The entity management screen as a reducer.
//!
//! User intents and backend [`Outcome`]s go in; [`Command`]s for the backend
//! come out. The screen owns the record list, the search term and the modal;
//! the open modal owns its form, the form's draft and the field errors.

use client_core::{ClientError, LookupFailurePolicy};
use shared::error::ValidationErrorMap;
use tracing::{debug, error, info, warn};

use crate::{
    commands::{Command, Outcome},
    entity::{matches_search, Entity},
    forms::EntityForm,
    lookup::ReferenceData,
};

/// Error key for problems that belong to the whole form rather than a field.
pub const REFERENCE_DATA_FIELD: &str = "_reference_data";
pub const REFERENCE_DATA_UNAVAILABLE: &str =
    "Reference data could not be loaded; close the form and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupState {
    NotNeeded,
    Pending,
    Loaded { degraded: bool },
}

/// An open create/edit modal.
pub struct FormSession<F> {
    form: F,
    session: u64,
    errors: ValidationErrorMap,
    lookups: LookupState,
    saving: bool,
}

impl<F: EntityForm> FormSession<F> {
    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Field errors from the last submit attempt.
    pub fn errors(&self) -> &ValidationErrorMap {
        &self.errors
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn lookups_pending(&self) -> bool {
        self.lookups == LookupState::Pending
    }

    pub fn lookups_degraded(&self) -> bool {
        self.lookups == LookupState::Loaded { degraded: true }
    }

    pub fn title(&self) -> String {
        let label = <F::Record as Entity>::LABEL;
        if self.form.is_edit() {
            format!("Edit {label}")
        } else {
            format!("Add New {label}")
        }
    }
}

pub struct EntityScreen<F: EntityForm> {
    records: Vec<F::Record>,
    loading: bool,
    search: String,
    modal: Option<FormSession<F>>,
    next_session: u64,
    policy: LookupFailurePolicy,
}

impl<F: EntityForm> EntityScreen<F> {
    pub fn new(policy: LookupFailurePolicy) -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            search: String::new(),
            modal: None,
            next_session: 0,
            policy,
        }
    }

    fn resource() -> client_core::Resource {
        <F::Record as Entity>::RESOURCE
    }

    fn fetch(&mut self) -> Command {
        self.loading = true;
        Command::FetchAll {
            resource: Self::resource(),
        }
    }

    /// First load when the screen is shown.
    pub fn mount(&mut self) -> Command {
        self.fetch()
    }

    pub fn records(&self) -> &[F::Record] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Loaded records matching the search term. Never fetches.
    pub fn visible_records(&self) -> Vec<&F::Record> {
        self.records
            .iter()
            .filter(|record| matches_search(*record, &self.search))
            .collect()
    }

    pub fn modal(&self) -> Option<&FormSession<F>> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut FormSession<F>> {
        self.modal.as_mut()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn open_create(&mut self) -> Option<Command> {
        self.open(F::blank())
    }

    /// Opens the modal on a copy of the loaded record with this id.
    pub fn open_edit(&mut self, id: i64) -> Option<Command> {
        let Some(record) = self.records.iter().find(|record| record.id() == Some(id)) else {
            warn!(resource = Self::resource().path(), id, "edit requested for unknown record");
            return None;
        };
        let form = F::edit(record);
        self.open(form)
    }

    fn open(&mut self, form: F) -> Option<Command> {
        self.next_session += 1;
        let session = self.next_session;
        let lookups = F::lookups();
        self.modal = Some(FormSession {
            form,
            session,
            errors: ValidationErrorMap::new(),
            lookups: if lookups.is_empty() {
                LookupState::NotNeeded
            } else {
                LookupState::Pending
            },
            saving: false,
        });

        (!lookups.is_empty()).then(|| Command::LoadLookups {
            resource: Self::resource(),
            session,
            lookups: lookups.to_vec(),
        })
    }

    /// Cancel or backdrop dismiss: the draft and its errors are dropped.
    pub fn cancel(&mut self) {
        if self.modal.take().is_some() {
            debug!(resource = Self::resource().path(), "form dismissed");
        }
    }

    /// Validates the open form and, if it passes, asks for create or update.
    pub fn submit(&mut self) -> Option<Command> {
        let policy = self.policy;
        let modal = self.modal.as_mut()?;
        if modal.saving {
            return None;
        }
        modal.errors.clear();

        if policy == LookupFailurePolicy::BlockSubmit
            && matches!(
                modal.lookups,
                LookupState::Pending | LookupState::Loaded { degraded: true }
            )
        {
            modal
                .errors
                .push(REFERENCE_DATA_FIELD, REFERENCE_DATA_UNAVAILABLE);
            return None;
        }

        let errors = modal.form.validate();
        if !errors.is_empty() {
            modal.errors = errors;
            return None;
        }

        let payload = match modal.form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                error!(resource = Self::resource().path(), "failed to encode submission: {err}");
                return None;
            }
        };

        modal.saving = true;
        let resource = Self::resource();
        let session = modal.session;
        Some(match modal.form.record_id() {
            Some(id) => Command::Update {
                resource,
                session,
                id,
                payload,
            },
            None => Command::Create {
                resource,
                session,
                payload,
            },
        })
    }

    /// Deletes after `confirm` approves the record; a declined prompt is a no-op.
    pub fn delete(&mut self, id: i64, confirm: impl FnOnce(&F::Record) -> bool) -> Option<Command> {
        let record = self.records.iter().find(|record| record.id() == Some(id))?;
        if !confirm(record) {
            debug!(resource = Self::resource().path(), id, "delete aborted by user");
            return None;
        }
        Some(Command::Delete {
            resource: Self::resource(),
            id,
        })
    }

    /// Folds a backend outcome into the screen, possibly asking for a refetch.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        let resource = Self::resource();
        if outcome.resource() != resource {
            warn!(
                resource = resource.path(),
                outcome_resource = outcome.resource().path(),
                "ignoring outcome routed to the wrong screen"
            );
            return None;
        }

        match outcome {
            Outcome::Listed { result, .. } => {
                self.loading = false;
                self.records = match result {
                    Ok(items) => decode_records(items),
                    Err(err) => {
                        error!(resource = resource.path(), "failed to fetch records: {err}");
                        Vec::new()
                    }
                };
                None
            }
            Outcome::LookupsLoaded { session, data, .. } => {
                self.apply_lookups(session, data);
                None
            }
            Outcome::Saved {
                session, result, ..
            } => self.apply_saved(session, result),
            Outcome::Deleted { id, result, .. } => match result {
                Ok(()) => Some(self.fetch()),
                Err(err) => {
                    error!(resource = resource.path(), id, "failed to delete record: {err}");
                    None
                }
            },
        }
    }

    fn current_session(&mut self, session: u64) -> Option<&mut FormSession<F>> {
        self.modal
            .as_mut()
            .filter(|modal| modal.session == session)
    }

    fn apply_lookups(&mut self, session: u64, data: ReferenceData) {
        let Some(modal) = self.current_session(session) else {
            debug!(session, "dropping lookups for a closed form");
            return;
        };
        modal.form.apply_reference_data(&data);
        modal.lookups = LookupState::Loaded {
            degraded: data.is_degraded(),
        };
    }

    fn apply_saved(&mut self, session: u64, result: Result<serde_json::Value, ClientError>) -> Option<Command> {
        let resource = Self::resource();
        let is_current = self.current_session(session).is_some();

        match result {
            Ok(_) => {
                info!(resource = resource.path(), "record saved");
                if is_current {
                    self.modal = None;
                }
                Some(self.fetch())
            }
            Err(err) => {
                let rejected = err.validation_fields().cloned();
                if rejected.is_none() {
                    error!(resource = resource.path(), "failed to save record: {err}");
                }
                if let Some(modal) = self.current_session(session) {
                    modal.saving = false;
                    if let Some(fields) = rejected {
                        modal.errors = fields;
                    }
                }
                None
            }
        }
    }
}

fn decode_records<R: Entity>(items: Vec<serde_json::Value>) -> Vec<R> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(resource = R::RESOURCE.path(), "skipping undecodable record: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
