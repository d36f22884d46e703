//! Coach-side application state.
//!
//! [`CoachState`] owns the backend handle, the customer list, the catalog
//! index, and the open plan drafts. Every edit goes through
//! [`crate::plan::apply_edit`]; drafts are in memory only and disappear when
//! submitted or abandoned.
//!
//! Backend failures are logged and returned unchanged. Nothing is retried.

use std::collections::HashMap;

use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;
use tracing::{error, info};

use crate::backend::{BackendError, CoachBackend};
use crate::catalog::CatalogIndex;
use crate::model::{Customer, NewCustomer, Plan};
use crate::payload::ServerPlanRecord;
use crate::plan::{EditAction, EditError, PlanParseError, apply_edit, validate_plan};
use crate::status::{StatusReport, derive_status};

/// Errors raised by [`CoachState`] actions.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("plan is not valid: {0}")]
    Invalid(#[from] PlanParseError),

    #[error("customer {0:?} not found")]
    UnknownCustomer(String),

    #[error("no open draft for customer {0:?}")]
    NoDraft(String),
}

/// Application state of one coach session.
pub struct CoachState<B> {
    backend: B,
    customers: Vec<Customer>,
    catalog: CatalogIndex,
    drafts: HashMap<String, Plan>,
}

impl<B: CoachBackend> CoachState<B> {
    /// Fetch the catalog and customer list once and build the state.
    pub fn load(backend: B) -> Result<Self, StateError> {
        let definitions = backend.exercises().inspect_err(|e| {
            error!(error = %e, "failed to load exercise catalog");
        })?;
        let customers = backend.customers().inspect_err(|e| {
            error!(error = %e, "failed to load customers");
        })?;
        info!(
            exercises = definitions.len(),
            customers = customers.len(),
            "coach state loaded"
        );
        Ok(Self {
            backend,
            customers,
            catalog: CatalogIndex::build(definitions),
            drafts: HashMap::new(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Register a customer through the backend and append it to the list.
    pub fn add_customer(&mut self, new: NewCustomer) -> Result<&Customer, StateError> {
        let customer = self.backend.create_customer(new).inspect_err(|e| {
            error!(error = %e, "failed to create customer");
        })?;
        self.customers.push(customer);
        Ok(&self.customers[self.customers.len() - 1])
    }

    /// Status of every customer, most urgent first, then by last name.
    pub fn status_board(&self, now: DateTime<Utc>) -> Vec<(&Customer, StatusReport)> {
        let mut board: Vec<(&Customer, StatusReport)> = self
            .customers
            .iter()
            .map(|c| (c, derive_status(c.last_plan_end_date, now)))
            .collect();
        board.sort_by(|(a, ra), (b, rb)| {
            ra.status
                .urgency()
                .cmp(&rb.status.urgency())
                .then_with(|| a.last_name.cmp(&b.last_name))
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        board
    }

    // -----------------------------------------------------------------------
    // Drafts
    // -----------------------------------------------------------------------

    /// Start editing `plan` for a customer, replacing any open draft.
    pub fn open_draft(&mut self, customer_id: &str, plan: Plan) -> Result<&Plan, StateError> {
        if self.customer(customer_id).is_none() {
            return Err(StateError::UnknownCustomer(customer_id.to_owned()));
        }
        self.drafts.insert(customer_id.to_owned(), plan);
        self.draft(customer_id)
            .ok_or_else(|| StateError::NoDraft(customer_id.to_owned()))
    }

    pub fn draft(&self, customer_id: &str) -> Option<&Plan> {
        self.drafts.get(customer_id)
    }

    /// Apply one edit to a customer's draft. On error the draft is unchanged.
    pub fn edit_draft(&mut self, customer_id: &str, action: &EditAction) -> Result<&Plan, StateError> {
        let draft = self
            .drafts
            .get_mut(customer_id)
            .ok_or_else(|| StateError::NoDraft(customer_id.to_owned()))?;
        *draft = apply_edit(draft, action, &self.catalog)?;
        Ok(&*draft)
    }

    /// Discard a customer's draft.
    pub fn abandon_draft(&mut self, customer_id: &str) -> Option<Plan> {
        self.drafts.remove(customer_id)
    }

    /// Validate and submit a customer's draft.
    ///
    /// On success the draft is discarded and the customer's last plan end
    /// date is updated. On failure the draft stays open.
    pub fn submit_draft(&mut self, customer_id: &str) -> Result<ServerPlanRecord, StateError> {
        let draft = self
            .drafts
            .get(customer_id)
            .ok_or_else(|| StateError::NoDraft(customer_id.to_owned()))?;
        validate_plan(draft)?;

        let record = self
            .backend
            .create_plan(customer_id, draft)
            .inspect_err(|e| {
                error!(customer_id = %customer_id, error = %e, "failed to submit plan");
            })?;

        if let Some(customer) = self.customers.iter_mut().find(|c| c.id == customer_id) {
            customer.last_plan_end_date = Some(record.plan.end_date.and_time(NaiveTime::MIN).and_utc());
        }
        self.drafts.remove(customer_id);
        Ok(record)
    }
}
