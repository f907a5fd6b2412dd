//! Command-line front end and HTTP API for the Planner task scheduler.

pub mod cli;
pub mod commands;
pub mod config;
pub mod parser;
pub mod server;
pub mod timezone;
pub mod util;
pub mod views;
