//! Library exports for whelps-shell, shared between the binary and tests.

pub mod catalogue;
pub mod config;
pub mod favorites;
pub mod models;
pub mod preferences;
pub mod routes;
pub mod session;
pub mod shell;
pub mod startup;
pub mod state;
pub mod storage;
pub mod utils;
