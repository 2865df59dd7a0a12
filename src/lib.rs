pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod generation;
pub mod handlers;
pub mod paths;
pub mod quiz;
pub mod state;
#[cfg(test)]
pub mod testing;
