pub mod config;
pub mod controllers;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod providers;
pub mod registry;
pub mod remap;
pub mod service;
pub mod types;
