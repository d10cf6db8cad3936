//! Qubit and classical bit types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit.
///
/// Qubit `k` is bit `k` of a computational-basis index, so qubit 0 is the
/// least significant bit of a statevector offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Bit mask of this qubit in a basis-state index.
    #[inline]
    pub fn mask(self) -> usize {
        1usize << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A quantum bit, optionally a member of a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The circuit-wide identifier.
    pub id: QubitId,
    /// Register name and index within it.
    pub register: Option<(String, u32)>,
}

impl Qubit {
    /// A qubit outside any register.
    pub fn new(id: QubitId) -> Self {
        Self { id, register: None }
    }

    /// A qubit at `index` of register `name`.
    pub fn in_register(id: QubitId, name: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some((name.into(), index)),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.register {
            Some((reg, idx)) => write!(f, "{reg}[{idx}]"),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A classical bit, optionally a member of a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The circuit-wide identifier.
    pub id: ClbitId,
    /// Register name and index within it.
    pub register: Option<(String, u32)>,
}

impl Clbit {
    /// A classical bit outside any register.
    pub fn new(id: ClbitId) -> Self {
        Self { id, register: None }
    }

    /// A classical bit at `index` of register `name`.
    pub fn in_register(id: ClbitId, name: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some((name.into(), index)),
        }
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.register {
            Some((reg, idx)) => write!(f, "{reg}[{idx}]"),
            None => write!(f, "{}", self.id),
        }
    }
}
