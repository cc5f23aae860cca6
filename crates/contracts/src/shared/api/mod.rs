//! Wire contracts of the master-data REST surface

pub mod bulk_upload;
pub mod envelope;
pub mod page;

pub use bulk_upload::{BulkRowError, BulkUploadReport};
pub use envelope::{ApiEnvelope, ApiErrorBody, MaybeEnvelope};
pub use page::{PageRequest, PageResult, SortDirection, WirePage};
