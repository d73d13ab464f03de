// Auth domain: bearer-token verification. Issuance lives in the platform's
// identity service.

pub mod jwt;

pub use jwt::{Claims, JwtService};
