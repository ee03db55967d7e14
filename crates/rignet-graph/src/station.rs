//! Station frames and their identifying keys.

use std::fmt;

/// Station identifier, referencing an external orientation collection.
pub type StaKey = usize;

/// Reserved key denoting "no station".
pub const NULL_STA_KEY: StaKey = usize::MAX;

/// True unless `key` is the reserved null value.
pub fn key_is_valid(key: StaKey) -> bool {
    key != NULL_STA_KEY
}

/// Station frame: the rigid body associated with one network vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaFrame {
    /// Key of the station this frame belongs to.
    pub key: StaKey,
}

impl StaFrame {
    /// Frame for the given station key.
    pub fn new(key: StaKey) -> Self {
        Self { key }
    }
}

impl fmt::Display for StaFrame {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{}", self.key)
    }
}
