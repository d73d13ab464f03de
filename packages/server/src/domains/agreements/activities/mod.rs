pub mod activate_agreement;
pub mod create_agreement;
pub mod participants;
pub mod pause_agreement;
pub mod queries;
pub mod record_signature;
pub mod resume_agreement;
pub mod terminate_agreement;
pub mod update_agreement;

pub use activate_agreement::activate_agreement;
pub use create_agreement::{create_agreement, CreateAgreementInput};
pub use pause_agreement::pause_agreement;
pub use queries::get_agreement_for_match;
pub use record_signature::record_signature;
pub use resume_agreement::resume_agreement;
pub use terminate_agreement::terminate_agreement;
pub use update_agreement::{update_agreement, UpdateAgreementInput};
