pub mod board;
pub mod config;
pub mod dataset;
pub mod error;
pub mod kpi;
pub mod logging;
pub mod model;
pub mod page;
pub mod render;
pub mod slides;
pub mod stats;
