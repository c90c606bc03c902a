use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Modification and access time of one entry, as reported by one mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTime {
    pub modification: Timestamp,
    pub access: Timestamp,
}

impl EntryTime {
    /// What an enumeration that doesn't report times hands out.
    pub const UNKNOWN: EntryTime = EntryTime {
        modification: Timestamp::UNKNOWN,
        access: Timestamp::UNKNOWN,
    };

    /// The entry disappeared before it could be queried.
    pub const NONEXISTENT: EntryTime = EntryTime {
        modification: Timestamp::NONEXISTENT,
        access: Timestamp::NONEXISTENT,
    };

    pub fn new(modification: Timestamp, access: Timestamp) -> EntryTime {
        EntryTime {
            modification,
            access,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != EntryTime::UNKNOWN
    }

    pub fn is_nonexistent(&self) -> bool {
        *self == EntryTime::NONEXISTENT
    }

    /// Whether times obtained while listing a directory agree with times
    /// obtained by querying the entry afterwards.
    ///
    /// Modification times must be equal. Access time may only have moved
    /// forward between the two: some filesystems defer access time updates
    /// (NTFS by up to an hour), so a later query can legitimately see a newer
    /// value than the listing did, never an older one.
    pub fn consistent_with(&self, queried: &EntryTime) -> bool {
        self.modification == queried.modification && self.access <= queried.access
    }
}

impl std::fmt::Display for EntryTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "mod {} acc {}", self.modification, self.access)
    }
}
