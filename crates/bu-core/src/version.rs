use core::fmt;

use crate::{CoreError, CoreResult};

/// Level/version pair of the model description format.
///
/// Ordering is lexicographic: level first, then version. Every unit term and
/// unit expression carries one of these; it decides which kinds are legal and
/// which attribute defaults apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatVersion {
    pub level: u32,
    pub version: u32,
}

impl FormatVersion {
    pub const L1V1: Self = Self::new(1, 1);
    pub const L1V2: Self = Self::new(1, 2);
    pub const L2V1: Self = Self::new(2, 1);
    pub const L2V2: Self = Self::new(2, 2);
    pub const L2V3: Self = Self::new(2, 3);
    pub const L2V4: Self = Self::new(2, 4);
    pub const L2V5: Self = Self::new(2, 5);
    pub const L3V1: Self = Self::new(3, 1);
    pub const L3V2: Self = Self::new(3, 2);

    /// Every combination the unit tables know about, oldest first.
    pub const SUPPORTED: [Self; 9] = [
        Self::L1V1,
        Self::L1V2,
        Self::L2V1,
        Self::L2V2,
        Self::L2V3,
        Self::L2V4,
        Self::L2V5,
        Self::L3V1,
        Self::L3V2,
    ];

    pub const LATEST: Self = Self::L3V2;

    /// Unchecked constructor.
    pub const fn new(level: u32, version: u32) -> Self {
        Self { level, version }
    }

    /// Constructor that rejects combinations outside [`Self::SUPPORTED`].
    pub fn checked(level: u32, version: u32) -> CoreResult<Self> {
        let fv = Self::new(level, version);
        if fv.is_supported() {
            Ok(fv)
        } else {
            Err(CoreError::UnsupportedVersion { level, version })
        }
    }

    pub fn is_supported(self) -> bool {
        Self::SUPPORTED.contains(&self)
    }

    /// True if this version is `level.version` or newer.
    pub fn at_least(self, level: u32, version: u32) -> bool {
        self >= Self::new(level, version)
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}V{}", self.level, self.version)
    }
}
