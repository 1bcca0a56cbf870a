//! Shared contracts between the INDICEIA server and its clients.
//!
//! Everything in this crate is plain data: serde-serializable aggregates,
//! DTOs and use-case request/response types. No I/O happens here.

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
