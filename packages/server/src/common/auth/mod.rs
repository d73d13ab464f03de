/// Actor and capability model for the supervision core.
///
/// Every lifecycle operation declares the capability it requires:
///
/// ```rust,ignore
/// actor.require(Capability::RespondToMatch)?;
/// ```
///
/// Role membership comes from the verified token (tokens are issued by the
/// platform's identity service, not here), so the check is a pure function
/// of the actor with no database round trip.
mod actor;
mod capability;

pub use actor::{Actor, ActorRole};
pub use capability::Capability;
