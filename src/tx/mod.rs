//! Transaction pipeline: preflight validation, canonical records, signing

pub mod record;
pub mod signer;
pub mod validate;

pub use record::{SigningPayload, TransactionRecord, FEE_PER_BYTE};
pub use signer::{recover_signer, sign_transfer, SIGNATURE_LEN};
pub use validate::{preflight, TransferPlan};
