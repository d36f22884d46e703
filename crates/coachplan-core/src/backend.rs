//! The backend seam: where the catalog, the customer list, and submitted
//! plans come from and go to.
//!
//! [`DirectoryBackend`] keeps everything as JSON files under one directory:
//!
//! ```text
//! <dir>/catalog.json              flat list of exercise definitions
//! <dir>/customers.json            list of customers
//! <dir>/plans/<customer-id>.json  submitted plans of one customer
//! ```

use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::model::{Customer, ExerciseDefinition, NewCustomer, Plan};
use crate::payload::ServerPlanRecord;

/// Errors raised by a [`CoachBackend`].
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("customer {0:?} not found")]
    UnknownCustomer(String),
}

/// Source of catalog and customer data, and sink for submitted plans.
///
/// The trait is object-safe, so callers can hold a `Box<dyn CoachBackend>`.
pub trait CoachBackend {
    /// The full exercise catalog as a flat list.
    fn exercises(&self) -> Result<Vec<ExerciseDefinition>, BackendError>;

    /// All customers of the coach.
    fn customers(&self) -> Result<Vec<Customer>, BackendError>;

    /// Register a customer and return it with its assigned id.
    fn create_customer(&mut self, new: NewCustomer) -> Result<Customer, BackendError>;

    /// Store a plan for a customer.
    ///
    /// The customer's `last_plan_end_date` becomes the plan's end date.
    fn create_plan(&mut self, customer_id: &str, plan: &Plan) -> Result<ServerPlanRecord, BackendError>;

    /// Plans previously submitted for a customer, oldest first.
    fn plans_for(&self, customer_id: &str) -> Result<Vec<ServerPlanRecord>, BackendError>;
}

// Compile-time assertion: CoachBackend must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CoachBackend) {}
};

/// A [`CoachBackend`] backed by JSON files in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    dir: PathBuf,
}

impl DirectoryBackend {
    pub const CATALOG_FILE: &str = "catalog.json";
    pub const CUSTOMERS_FILE: &str = "customers.json";
    pub const PLANS_DIR: &str = "plans";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(Self::CATALOG_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.dir.join(Self::CUSTOMERS_FILE)
    }

    pub fn plans_path(&self, customer_id: &str) -> PathBuf {
        self.dir.join(Self::PLANS_DIR).join(format!("{customer_id}.json"))
    }

    /// Replace the catalog file.
    pub fn write_catalog(&self, definitions: &[ExerciseDefinition]) -> Result<(), BackendError> {
        write_json(&self.catalog_path(), definitions)
    }

    fn write_customers(&self, customers: &[Customer]) -> Result<(), BackendError> {
        write_json(&self.customers_path(), customers)
    }
}

impl CoachBackend for DirectoryBackend {
    fn exercises(&self) -> Result<Vec<ExerciseDefinition>, BackendError> {
        read_json_or_empty(&self.catalog_path())
    }

    fn customers(&self) -> Result<Vec<Customer>, BackendError> {
        read_json_or_empty(&self.customers_path())
    }

    fn create_customer(&mut self, new: NewCustomer) -> Result<Customer, BackendError> {
        let mut customers = self.customers()?;
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            first_name: new.first_name,
            last_name: new.last_name,
            phone_number: new.phone_number,
            last_plan_end_date: None,
        };
        customers.push(customer.clone());
        self.write_customers(&customers)?;
        info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    fn create_plan(&mut self, customer_id: &str, plan: &Plan) -> Result<ServerPlanRecord, BackendError> {
        let mut customers = self.customers()?;
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| BackendError::UnknownCustomer(customer_id.to_owned()))?;
        customer.last_plan_end_date = Some(plan.end_date.and_time(NaiveTime::MIN).and_utc());

        let record = ServerPlanRecord {
            id: Uuid::new_v4(),
            customer_id: customer_id.to_owned(),
            created_at: Utc::now(),
            plan: plan.clone(),
        };

        // Everything is read before anything is written. The customer goes
        // first, so a failed plan write leaves no record for a retry to
        // duplicate.
        let path = self.plans_path(customer_id);
        let mut records: Vec<ServerPlanRecord> = read_json_or_empty(&path)?;
        records.push(record.clone());
        self.write_customers(&customers)?;
        write_json(&path, &records)?;

        info!(customer_id = %customer_id, plan_id = %record.id, "plan created");
        Ok(record)
    }

    fn plans_for(&self, customer_id: &str) -> Result<Vec<ServerPlanRecord>, BackendError> {
        read_json_or_empty(&self.plans_path(customer_id))
    }
}

// ---------------------------------------------------------------------------
// JSON file helpers
// ---------------------------------------------------------------------------

/// Read a JSON list; a missing file reads as empty.
fn read_json_or_empty<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, BackendError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(BackendError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        warn!(path = %path.display(), "data file is empty");
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|source| BackendError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write pretty JSON, creating parent directories as needed.
///
/// The content goes to a sibling `.tmp` file that is then renamed over
/// `path`, so readers never see a half-written file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), BackendError> {
    let io_err = |source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(value).map_err(|source| BackendError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content).map_err(|source| BackendError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(io_err)
}
