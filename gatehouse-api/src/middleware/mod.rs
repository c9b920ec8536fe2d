/// Response-level middleware
///
/// - [`security`]: security-related HTTP headers on every response

pub mod security;
