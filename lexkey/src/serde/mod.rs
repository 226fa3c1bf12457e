//! Primitive order-preserving encodings.
//!
//! - [`sortable`]: fixed-width booleans, integers, floats and complex numbers
//! - [`terminated`]: variable-length strings and raw bytes

pub mod sortable;
pub mod terminated;
