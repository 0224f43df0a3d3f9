mod context;
mod controller;
mod settings;

pub(crate) use context::StateCell;
pub use controller::FlowController;
pub use settings::FlowSettings;
pub(crate) use settings::with_timeout;
