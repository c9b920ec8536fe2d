/// Domain models
///
/// - [`account`]: Account records, their outward-facing profile view,
///   and the input structs consumed by the account directory

pub mod account;
