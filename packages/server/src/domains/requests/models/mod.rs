pub mod collaboration_request;

pub use collaboration_request::{
    CollaborationRequest, PracticeModel, ProfessionType, RequestStatus,
};
