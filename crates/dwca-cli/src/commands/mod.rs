//! CLI command implementations.

pub mod head;
pub mod inspect;
