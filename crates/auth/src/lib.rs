//! `myfit-auth`: client-side session and role gating.
//!
//! Pure logic only: no HTTP, no rendering. The token is trusted for routing
//! decisions alone; the API re-validates it on every request.

pub mod claims;
pub mod guard;
pub mod roles;
pub mod session;

pub use claims::{RoleClaim, decode_role, decode_subject};
pub use guard::{DenyReason, GuardDecision, LOGIN_PATH, RouteGuard};
pub use roles::{ROLE_PREFIX, Role, UnknownRole};
pub use session::{MemoryStorage, Session, SessionStorage, TOKEN_KEY};
