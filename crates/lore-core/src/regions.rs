//! Clickable-region registry
//!
//! A paint pass records one region per link it draws. Coordinates are
//! document-space, so a registry stays valid for as long as its document is
//! bound, regardless of scrolling.

use crate::layout::commands::Rect;

/// An interactive rectangle discovered during a paint pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickableRegion {
    /// Bounding box in document space.
    pub bounds: Rect,
    /// Where activating the region should go; interpreted by the embedder's
    /// link opener.
    pub destination: String,
    /// Hover text, one entry per line.
    pub tooltip: Option<Vec<String>>,
}

/// Regions in traversal order. On overlap, the earliest registered region
/// wins.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<ClickableRegion>,
}

impl RegionRegistry {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn replace(&mut self, regions: Vec<ClickableRegion>) {
        self.regions = regions;
    }

    /// First region containing the document-space point.
    pub fn resolve(&self, x: i32, y: i32) -> Option<&ClickableRegion> {
        self.regions.iter().find(|r| r.bounds.contains(x, y))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClickableRegion> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: i32, dest: &str) -> ClickableRegion {
        ClickableRegion {
            bounds: Rect { x, y: 0, w: 10, h: 5 },
            destination: dest.to_string(),
            tooltip: None,
        }
    }

    #[test]
    fn first_containing_region_wins() {
        let mut registry = RegionRegistry::default();
        // Overlapping bounds: both contain (7, 2).
        registry.replace(vec![region(0, "first"), region(5, "second")]);
        let hit = registry.resolve(7, 2).map(|r| r.destination.as_str());
        assert_eq!(hit, Some("first"));
    }

    #[test]
    fn miss_outside_all_bounds() {
        let mut registry = RegionRegistry::default();
        registry.replace(vec![region(0, "only")]);
        assert!(registry.resolve(50, 50).is_none());
        assert!(registry.resolve(0, 5).is_none(), "bottom edge is exclusive");
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry = RegionRegistry::default();
        registry.replace(vec![region(0, "gone")]);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.resolve(1, 1).is_none());
    }
}
