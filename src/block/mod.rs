//! Environment block format: ordered mapping and byte codec.

pub mod codec;
pub mod mapping;
