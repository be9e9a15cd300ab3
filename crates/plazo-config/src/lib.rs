//! Plazo Configuration Layer
//!
//! This crate sits between the deadline engine and its callers:
//!
//! - **Catalog**: the request categories and their statutory terms
//! - **Settings**: jurisdiction or holiday table, working hours and overlap
//!   policies, loaded from TOML
//! - **Service**: [`DeadlineService`], which builds the calendar and strategies
//!   once and computes deadlines for [`DeadlineRequest`]s
//!
//! # Example
//!
//! ```rust
//! use plazo_config::{DeadlineRequest, DeadlineService, EngineSettings, RequestType};
//! use plazo_core::Timestamp;
//!
//! let service = DeadlineService::new(EngineSettings::default()).unwrap();
//!
//! let created_at = Timestamp::parse("2024-01-15 10:00:00").unwrap();
//! let request = DeadlineRequest::for_type(RequestType::PeticionGeneral, created_at, false);
//!
//! let deadline = service.calculate(&request).unwrap();
//! assert_eq!(deadline.to_string(), "2024-02-05 23:59:59");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod catalog;
mod error;
mod service;
mod settings;

pub use catalog::{RequestType, Term};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use service::{DeadlineRequest, DeadlineService};
pub use settings::{EngineSettings, OverlapSettings, WorkingHoursSettings, KNOWN_JURISDICTIONS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::RequestType;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::service::{DeadlineRequest, DeadlineService};
    pub use crate::settings::EngineSettings;
}
