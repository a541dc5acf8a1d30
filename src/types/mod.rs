//! Core type definitions using newtype patterns for type safety.
//!
//! An `Identifier` can only hold validated hex text, so code that receives one
//! never has to check it again.

mod identifier;

pub use identifier::Identifier;
