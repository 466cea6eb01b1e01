//! Live public transport departure board.
//!
//! Configure up to four stations in one country, then watch their departures
//! refresh on a fixed interval, rendered to fit the screen.

pub mod board;
pub mod cache;
pub mod config;
pub mod domain;
pub mod monitor;
pub mod provider;
pub mod state;
pub mod timer;
pub mod web;
pub mod wizard;
