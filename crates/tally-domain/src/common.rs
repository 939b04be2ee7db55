//! Shared identifier aliases and read-only accessor traits.

/// Server-assigned category identifier.
pub type CategoryId = i64;

/// Server-assigned expense identifier.
pub type ExpenseId = i64;

/// Exposes the server-assigned identifier of an entity.
pub trait Identifiable {
    fn id(&self) -> i64;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}
