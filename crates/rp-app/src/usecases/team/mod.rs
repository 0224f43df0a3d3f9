mod join_team;
mod store;

pub use join_team::{JoinTeam, JOIN_FALLBACK};
pub use store::TeamStore;
