//! Configuration for the storefront state layer
//!
//! This crate provides:
//! - The `Configuration` consumed once when the store boots
//! - Config file discovery (CWD, config dir, home directory)
//! - TOML parsing with per-field defaults

pub mod config_file;
pub mod configuration;

pub use config_file::{config_file_path, load_config_file, read_config_file};
pub use configuration::{
    AutocompleteConfig, CollectionsConfig, Configuration, NavigationsConfig, PageSizeConfig,
    SearchConfig, SortConfig, SortOption,
};
