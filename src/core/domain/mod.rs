//! Domain types.

mod outcome;
mod recipient;
mod record;
pub mod report;
mod secret_set;

pub use outcome::{ApplyOutcome, ApplySummary, PublishOutcome, PublishStage, PublishSummary};
pub use recipient::{CiRecipientKey, EncryptedSecretEntry};
pub use record::RemoteSecretRecord;
pub use report::{MaskPolicy, Report};
pub use secret_set::SecretSet;
