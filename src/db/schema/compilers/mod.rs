//! Database schema compilers.
//!
//! Converts `SchemaRelation` definitions into the storage engine's native
//! script syntax.

pub mod cozo;

pub use cozo::CozoCompiler;
