//! Business logic use cases
//!
//! One controller per user-facing flow, plus the team cache and the join
//! request that feeds it.

pub mod flow;
pub mod password_reset;
pub mod team;

pub use flow::{FlowController, FlowSettings};
pub use password_reset::PasswordResetController;
pub use team::{JoinTeam, TeamStore};
