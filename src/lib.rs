pub mod config;
pub mod coverage;
pub mod geometry;
pub mod propagation;
pub mod swath;
pub mod web;

pub use config::Config;
