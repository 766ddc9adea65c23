//! # carebridge-translate
//!
//! The record translation and reference-resolution core of CareBridge.
//!
//! Two independent translators convert stored clinical records to and from
//! their interoperable representations:
//!
//! - [`ObservationTranslator`] — measurements and findings, including
//!   grouped-observation reconstruction and update-vs-create reconciliation.
//! - [`RequestTranslator`] — medication and procedure orders, including
//!   requester/subject resolution and care-setting classification through an
//!   extension.
//!
//! Both compose two shared leaves: the reference resolver ([`refs`]), which
//! extracts native UUIDs from cross-reference strings and looks targets up
//! in the registries, and the coding-system resolver ([`coding`]), which
//! maps external terminology URIs to native coding-system names.
//!
//! Builder-level problems do not abort eagerly: they accumulate in an
//! [`Issues`] collector threaded through the call chain and are checked at
//! one validation gate per operation, immediately before persistence.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use carebridge_registry::MemoryRegistry;
//! use carebridge_translate::{CodingConfig, ObservationTranslator};
//! use uuid::Uuid;
//!
//! let registry = Arc::new(MemoryRegistry::new());
//! let translator = ObservationTranslator::new(
//!     registry.clone(),
//!     registry.clone(),
//!     registry.clone(),
//!     registry.clone(),
//!     CodingConfig::default(),
//! );
//!
//! // Nothing stored yet: lookups come back empty, not failed.
//! assert!(translator.fetch_by_identifier(Uuid::new_v4()).unwrap().is_none());
//! ```

pub mod coding;
pub mod error;
pub mod issues;
pub mod observation;
pub mod refs;
pub mod request;

pub use coding::{
    CodingConfig, CodingResolver, ConceptResolution, ConceptSelector, NATIVE_CODING_SYSTEM,
    system_name_for_uri, uri_for_system,
};
pub use error::{Result, TranslateError};
pub use issues::Issues;
pub use observation::ObservationTranslator;
pub use refs::{resolve_encounter, resolve_patient, resolve_provider};
pub use request::RequestTranslator;
