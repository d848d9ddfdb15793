//! Boundary wrappers around managed cloud services.
//!
//! # Design
//! Each service is a trait the host implements over its own pre-authenticated
//! SDK session. The free functions here do the argument checks and
//! local-file handling that sit in front of the provider call, then delegate.
//! Retries, auth and encryption stay with the provider.

pub mod email;
pub mod parameters;
pub mod storage;

pub use email::{send_email, EmailMessage, EmailSender};
pub use parameters::{get_parameter, ParameterStore};
pub use storage::{copy_file, download_file, upload_file, FsObjectStore, ObjectStore};
