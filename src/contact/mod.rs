pub mod service;

pub use service::{ContactOutcome, ContactService, ContactSubmission, SubmitError};
