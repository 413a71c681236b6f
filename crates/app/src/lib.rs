//! Terminal client for the My Fit Journey gym API.
//!
//! Routing and guards live in [`routes`] and [`navigator`]; page state and
//! actions in [`views`]; the interactive front end in [`shell`].

pub mod config;
pub mod navigator;
pub mod routes;
pub mod shell;
pub mod views;
