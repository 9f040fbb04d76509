//! Types shared between the fridge client crates: domain records and the
//! request/response bodies of the recipe service.

pub mod domain;
pub mod error;
pub mod protocol;
