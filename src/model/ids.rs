// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Identifier of a node within a single diagram.
///
/// IDs are positive integers; `0` is rejected at construction so the JSON form can never carry a
/// sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    pub fn new(value: u32) -> Result<Self, IdError> {
        NonZeroU32::new(value).map(Self).ok_or(IdError::Zero)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The ID following this one, or `None` at `u32::MAX`.
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self(NonZeroU32::MIN)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u32>().map_err(|_| IdError::NotANumber)?;
        Self::new(value)
    }
}

impl TryFrom<i64> for NodeId {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(IdError::Zero);
        }
        let value = u32::try_from(value).map_err(|_| IdError::TooLarge)?;
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("node id must be a positive integer")]
    Zero,
    #[error("node id does not fit in 32 bits")]
    TooLarge,
    #[error("node id is not a number")]
    NotANumber,
}

#[cfg(test)]
mod tests {
    use super::{IdError, NodeId};

    #[test]
    fn node_id_rejects_zero() {
        assert_eq!(NodeId::new(0), Err(IdError::Zero));
        assert_eq!(NodeId::try_from(-3i64), Err(IdError::Zero));
    }

    #[test]
    fn node_id_rejects_out_of_range() {
        assert_eq!(NodeId::try_from(i64::from(u32::MAX) + 1), Err(IdError::TooLarge));
    }

    #[test]
    fn node_id_parses_and_displays() {
        let id: NodeId = " 42 ".parse().expect("node id");
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.checked_next().map(NodeId::get), Some(43));
    }

    #[test]
    fn checked_next_stops_at_max() {
        let last = NodeId::new(u32::MAX).expect("node id");
        assert_eq!(last.checked_next(), None);
    }
}
