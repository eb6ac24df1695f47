//! Utility Module
//!
//! - [`interner`]: String interning for shader variable names
//!
//! # String Interning
//!
//! Variable names are looked up in the semantic registry once per declared
//! variable at link time, and again whenever a uniform override is set or
//! resolved. Interned names (Symbols) hash and compare as integers.

pub mod interner;

pub use interner::Symbol;
