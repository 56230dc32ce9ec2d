pub mod batch;
pub mod config;
pub mod data_core;
pub mod field_policy;
pub mod merge;
