pub mod supervision_agreement;

pub use supervision_agreement::{AgreementStatus, SupervisionAgreement};
