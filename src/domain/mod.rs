//! Core domain types and logic.

pub mod artifact;
pub mod bar;
pub mod config_validation;
pub mod error;
pub mod grid;
pub mod indicator;
pub mod info;
pub mod interval;
pub mod ledger;
pub mod manifest;
pub mod sync;
