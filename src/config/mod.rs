//! Configuration management for the simulation engine

pub mod settings;

pub use settings::{
    CliOverrides, ClockConfig, GridConfig, OutputConfig, OutputFormat, RulesConfig, Settings,
};
