//! Validoc Core - Precondition Assertions + Document Entity Marshaling
//!
//! # The Ground Rules (Non-Negotiable)
//! 1. Checks Are Pure - no mutation, no caching, no shared state
//! 2. Fail Fast - the first violated constraint aborts the operation
//! 3. Absent Is Not Empty - a missing attribute and an empty string differ
//! 4. Bad Wiring Is Not Bad Input - configuration and validation failures
//!    stay distinguishable

pub mod assert;
pub mod document;
pub mod entity;
pub mod enums;
pub mod error;

pub use assert::{ValueKind, DEFAULT_ID_LENGTH};
pub use document::{Document, Element};
pub use entity::{expect_node, get_attr, set_attr, DocumentEntity, DocumentSource};
pub use enums::{EnumDomain, EnumEntry, EnumRegistry};
pub use error::{AssertError, AssertResult, EntityError};

pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");
