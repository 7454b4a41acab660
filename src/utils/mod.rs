//! Small shared helpers.

pub mod ids;

pub use ids::random_uuid;
