//! Sub-command implementations.

pub mod capture;
pub mod dispatcher;
pub mod link_wrapper;
pub mod resolve;
