#![forbid(unsafe_code)]

pub mod filter;
pub mod handler;
pub mod loader;
pub mod model;

#[cfg(test)]
pub mod fixtures;
