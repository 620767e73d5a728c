//! Process-wide version → layout table
//!
//! Built once, on first use, from the layouts compiled into this crate.
//! Validation runs at that point too, so a broken table panics on the first
//! `lookup` or `decode` rather than at startup; the
//! `test_every_builtin_layout_is_valid` test catches it before release.
//! Adding a version is a code change: append it to [`builtin_layouts`].

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;

use super::{LayoutError, VersionLayout, VERSION_0, VERSION_BITS};
use crate::error::SnowflakeError;

/// 2026-01-01T00:00:00Z
const VERSION_0_EPOCH_SECS: i64 = 1_767_225_600;

const SLOTS: usize = 1 << VERSION_BITS;

static REGISTRY: Lazy<LayoutRegistry> = Lazy::new(|| {
    LayoutRegistry::from_layouts(builtin_layouts())
        .unwrap_or_else(|err| panic!("built-in layout table is invalid: {err}"))
});

/// Every layout ever shipped. Entries are never edited or removed.
///
/// Version 1 (`[3][41][10][10]`) is planned but has no epoch yet, so it is
/// not registered.
fn builtin_layouts() -> [VersionLayout; 1] {
    [VersionLayout::new(
        VERSION_0,
        45,
        8,
        8,
        Duration::from_millis(1),
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(VERSION_0_EPOCH_SECS),
    )]
}

/// Immutable lookup table from version number to layout
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    slots: [Option<VersionLayout>; SLOTS],
}

impl LayoutRegistry {
    /// The registry of all built-in layouts
    #[inline]
    pub fn global() -> &'static LayoutRegistry {
        &REGISTRY
    }

    /// Validate and index `layouts`
    pub(crate) fn from_layouts<I>(layouts: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = VersionLayout>,
    {
        let mut slots = [None; SLOTS];
        for layout in layouts {
            layout.validate()?;
            let slot = &mut slots[usize::from(layout.version())];
            if slot.is_some() {
                return Err(LayoutError::DuplicateVersion {
                    version: layout.version(),
                });
            }
            *slot = Some(layout);
        }
        Ok(Self { slots })
    }

    /// Layout registered for `version`, if any
    #[inline]
    pub fn get(&self, version: u8) -> Option<&VersionLayout> {
        self.slots.get(usize::from(version))?.as_ref()
    }

    /// Registered version numbers in ascending order
    pub fn versions(&self) -> impl Iterator<Item = u8> + '_ {
        self.layouts().map(VersionLayout::version)
    }

    /// Registered layouts in ascending version order
    pub fn layouts(&self) -> impl Iterator<Item = &VersionLayout> + '_ {
        self.slots.iter().flatten()
    }
}

/// Resolve `version` in the global registry
pub fn lookup(version: u8) -> Result<&'static VersionLayout, SnowflakeError> {
    LayoutRegistry::global()
        .get(version)
        .ok_or(SnowflakeError::UnsupportedVersion { version })
}
