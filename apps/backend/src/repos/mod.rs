//! Repository functions mapping adapter rows to domain types.

pub mod games;
