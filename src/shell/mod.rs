//! Interactive terminal shell.
//!
//! Pages read the controller state, collect input with `dialoguer` and call
//! the controller. Rendering of state changes happens in [`ConsoleObserver`],
//! which the controllers notify.

mod prompt;
mod render;
mod reset;
mod signup;
mod team;

pub use render::ConsoleObserver;
pub use reset::run_password_reset;
pub use signup::run_signup;
pub use team::{join_team, offer_team_join, print_login_required};
