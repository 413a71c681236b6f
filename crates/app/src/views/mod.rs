//! View state and actions, independent of how they are drawn.
//!
//! Each view fetches its own data on open and refetches after a successful
//! mutation. Failures end up in the view's [`Notice`]; nothing here returns
//! an error to the caller.

pub mod admin;
pub mod login;
pub mod member;
pub mod notice;
pub mod trainer;

#[cfg(test)]
pub(crate) mod testing;

pub use login::LoginView;
pub use member::MemberDashboard;
pub use notice::Notice;
pub use trainer::{BookedMembers, ClassForm, TrainerDashboard};
