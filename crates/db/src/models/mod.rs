//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus the DTOs handlers need (create inputs, safe response shapes).

pub mod user;
