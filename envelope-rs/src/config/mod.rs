//! Configuration module

pub mod risk;
pub mod strategy;

pub use risk::*;
pub use strategy::*;
