//! Shared contracts of the master-data console: entity records, form data,
//! field metadata and the wire shapes of the REST API.

pub mod domain;
pub mod shared;
pub mod system;
