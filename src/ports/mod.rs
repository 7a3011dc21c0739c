pub mod artifact_store;
pub mod config_port;
pub mod data_source;
pub mod state_store;
