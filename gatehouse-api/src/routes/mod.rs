/// API route handlers
///
/// - [`auth`]: login
/// - [`users`]: registration and account management
/// - [`health`]: liveness

pub mod auth;
pub mod health;
pub mod users;
