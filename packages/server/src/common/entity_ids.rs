//! Typed ID aliases for the domain entities.
//!
//! ```rust
//! use server_core::common::{CollaborationRequestId, PhysicianProfileId};
//!
//! let request_id = CollaborationRequestId::new();
//! let profile_id = PhysicianProfileId::new();
//! // let wrong: PhysicianProfileId = request_id; // compile error
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker for platform user accounts (practitioners, physicians, admins).
pub struct User;

/// Marker for PhysicianProfile entities.
pub struct PhysicianProfile;

/// Marker for CollaborationRequest entities.
pub struct CollaborationRequest;

/// Marker for CollaborationMatch entities.
pub struct CollaborationMatch;

/// Marker for SupervisionAgreement entities.
pub struct SupervisionAgreement;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for a platform user account.
pub type UserId = Id<User>;

/// Typed ID for a physician's supervision profile.
pub type PhysicianProfileId = Id<PhysicianProfile>;

/// Typed ID for a practitioner's supervision request.
pub type CollaborationRequestId = Id<CollaborationRequest>;

/// Typed ID for a candidate pairing between a request and a physician.
pub type CollaborationMatchId = Id<CollaborationMatch>;

/// Typed ID for a supervision agreement.
pub type SupervisionAgreementId = Id<SupervisionAgreement>;
