//! carenav-storage
//!
//! Saved checklist records in S3, one JSON object per client and checklist
//! type. Writes are conditional so two coordinators editing the same record
//! cannot silently overwrite each other.

pub mod client;
pub mod error;
pub mod records;
