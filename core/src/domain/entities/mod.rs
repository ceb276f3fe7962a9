pub mod verification_record;

pub use verification_record::{VerificationRecord, CODE_MAX, CODE_MIN, DEFAULT_VALIDITY_SECONDS};
