mod controller;

pub use controller::PasswordResetController;
