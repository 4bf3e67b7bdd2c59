pub mod app;
pub mod browser_core;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod markdown;
pub mod toc;
