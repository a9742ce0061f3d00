//! Utilities shared by the facade.

pub mod pivots;
