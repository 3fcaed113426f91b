//! Command line front end for the view state query codec.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;
