pub mod close_request;
pub mod create_request;
pub mod queries;

pub use close_request::close_request;
pub use create_request::{create_request, CreateRequestInput, CreatedRequest};
pub use queries::{get_request, list_own_requests};
