//! SDK discovery: version constraints, probing, and path validation.

pub mod probe;
pub mod resolver;
pub mod symlink;
pub mod version;
