//! Environment block serialization.
//!
//! The block is the byte format native process-creation APIs consume
//! directly: `KEY=value` pairs, each terminated by a single NUL, with one
//! additional NUL after the last pair. It is written once and then treated
//! as immutable, so it can be handed to a process-creation call without
//! reprocessing.

use crate::block::mapping::EnvMap;
use crate::error::{Result, ScoutError};

/// Encode a mapping as an environment block.
///
/// Keys must not contain NUL or `=`, and values must not contain NUL; the
/// format cannot represent them and such a block will not decode.
pub fn serialize(mapping: &EnvMap) -> Vec<u8> {
    let mut block = Vec::new();
    for (key, value) in mapping.iter() {
        block.extend_from_slice(key.as_bytes());
        block.push(b'=');
        block.extend_from_slice(value.as_bytes());
        block.push(0);
    }
    block.push(0);
    if block.len() == 1 {
        // An empty mapping still carries the full double-NUL terminator.
        block.push(0);
    }
    block
}

/// Decode an environment block back into a mapping.
pub fn parse(block: &[u8]) -> Result<EnvMap> {
    // Drop the last two NULs: one pair terminator, one list terminator.
    let Some(body) = block
        .strip_suffix(&[0, 0])
        .or_else(|| block.strip_suffix(&[0]).filter(|body| body.is_empty()))
    else {
        return Err(ScoutError::MalformedBlock {
            detail: "missing double-NUL terminator".to_string(),
        });
    };

    let mut mapping = EnvMap::new();
    if body.is_empty() {
        return Ok(mapping);
    }
    for pair in body.split(|&byte| byte == 0) {
        let pair = String::from_utf8_lossy(pair);
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ScoutError::MalformedBlock {
                detail: format!("entry without '=': {pair:?}"),
            });
        };
        mapping.insert(key, value);
    }
    Ok(mapping)
}
