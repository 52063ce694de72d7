//! Property Finder (propfinder)
//!
//! TUI application for searching property listings by place name, postcode
//! or current location.
//!
//! Pure state machines live in `state`; `view` is the impure shell that
//! owns the terminal and runs requests on worker threads.

pub mod api;
pub mod config;
pub mod location;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;
