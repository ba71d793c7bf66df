//! Construct payload types shared across the callback surface.

use std::ops::{BitOr, BitOrAssign};

/// Ordered/unordered distinction for list and list-item callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    /// Numbered list starting at `start` (usually 1).
    Ordered { start: u64 },
}

/// Column alignment for table cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// What an autolink points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutolinkKind {
    Uri,
    Email,
}

/// Capability bitmask a renderer reports to its caller.
///
/// Concrete backends honor the bits they understand; decorators that only
/// observe the callback stream report [`RenderFlags::empty`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderFlags(u32);

impl RenderFlags {
    /// Suppress raw HTML blocks and inline tags.
    pub const SKIP_HTML: Self = Self(1);
    /// Emit self-closing void elements (`<hr />`, `<br />`, `<img ... />`).
    pub const USE_XHTML: Self = Self(1 << 1);

    /// No capabilities requested.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RenderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RenderFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_contains_nothing() {
        assert!(!RenderFlags::empty().contains(RenderFlags::SKIP_HTML));
        assert!(RenderFlags::empty().contains(RenderFlags::empty()));
    }

    #[test]
    fn test_bitor_combines_flags() {
        let flags = RenderFlags::SKIP_HTML | RenderFlags::USE_XHTML;
        assert!(flags.contains(RenderFlags::SKIP_HTML));
        assert!(flags.contains(RenderFlags::USE_XHTML));
    }

    #[test]
    fn test_bitor_assign() {
        let mut flags = RenderFlags::empty();
        flags |= RenderFlags::USE_XHTML;
        assert!(flags.contains(RenderFlags::USE_XHTML));
        assert!(!flags.contains(RenderFlags::SKIP_HTML));
    }
}
