//! Page-template slot geometry.
//!
//! The resolution engine only needs one fact from the page-composition
//! side: the target aspect ratio of a template slot. That boundary is
//! the [`LayoutProvider`] trait; [`BuiltinLayouts`] ships the standard
//! comic-page templates as static configuration data so the engine
//! works out of the box. An embedding application with its own template
//! store plugs in behind the same trait.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One placement region inside a page template.
#[derive(Debug, Clone, Copy)]
pub struct SlotGeometry {
    /// Slot id, unique within its template.
    pub id: &'static str,
    /// Target aspect ratio of the region.
    pub aspect_ratio: f32,
}

/// A named page-composition template.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    /// Template id for lookup.
    pub id: &'static str,
    /// Slots in reading order.
    pub slots: &'static [SlotGeometry],
    /// Human-readable description.
    pub description: &'static str,
}

// Slot ratios assume a 2:3 page; cells are even subdivisions with
// gutters ignored. These are configuration data, not derived values.

pub const TEMPLATE_SINGLE: PageTemplate = PageTemplate {
    id: "single",
    slots: &[SlotGeometry { id: "panel_1", aspect_ratio: 0.7 }],
    description: "One full-page splash panel.",
};

pub const TEMPLATE_GRID_2X2: PageTemplate = PageTemplate {
    id: "grid_2x2",
    slots: &[
        SlotGeometry { id: "panel_1", aspect_ratio: 0.7 },
        SlotGeometry { id: "panel_2", aspect_ratio: 0.7 },
        SlotGeometry { id: "panel_3", aspect_ratio: 0.7 },
        SlotGeometry { id: "panel_4", aspect_ratio: 0.7 },
    ],
    description: "Four equal panels in a 2x2 grid.",
};

pub const TEMPLATE_STRIP_3: PageTemplate = PageTemplate {
    id: "strip_3",
    slots: &[
        SlotGeometry { id: "panel_1", aspect_ratio: 2.1 },
        SlotGeometry { id: "panel_2", aspect_ratio: 2.1 },
        SlotGeometry { id: "panel_3", aspect_ratio: 2.1 },
    ],
    description: "Three full-width horizontal strips.",
};

pub const TEMPLATE_SPLASH_TOP: PageTemplate = PageTemplate {
    id: "splash_top",
    slots: &[
        SlotGeometry { id: "splash", aspect_ratio: 1.4 },
        SlotGeometry { id: "panel_1", aspect_ratio: 0.7 },
        SlotGeometry { id: "panel_2", aspect_ratio: 0.7 },
    ],
    description: "Half-page splash over two portrait panels.",
};

pub const TEMPLATE_WEBTOON_3: PageTemplate = PageTemplate {
    id: "webtoon_3",
    slots: &[
        SlotGeometry { id: "panel_1", aspect_ratio: 0.56 },
        SlotGeometry { id: "panel_2", aspect_ratio: 0.56 },
        SlotGeometry { id: "panel_3", aspect_ratio: 0.56 },
    ],
    description: "Three tall cells for vertical-scroll layouts.",
};

/// All built-in templates.
pub const ALL_TEMPLATES: &[&PageTemplate] = &[
    &TEMPLATE_SINGLE,
    &TEMPLATE_GRID_2X2,
    &TEMPLATE_STRIP_3,
    &TEMPLATE_SPLASH_TOP,
    &TEMPLATE_WEBTOON_3,
];

static TEMPLATE_INDEX: Lazy<HashMap<&'static str, &'static PageTemplate>> = Lazy::new(|| {
    ALL_TEMPLATES.iter().map(|t| (t.id, *t)).collect()
});

/// Source of slot geometry for the slot-aware resolution path.
pub trait LayoutProvider: Send + Sync {
    /// Aspect ratio of one slot, or `None` if the template or slot is
    /// unknown.
    fn slot_aspect_ratio(&self, template_id: &str, slot_id: &str) -> Option<f32>;

    /// All slots of a template in reading order, or `None` if the
    /// template is unknown.
    fn template_slots(&self, template_id: &str) -> Option<&[SlotGeometry]>;
}

/// The crate-shipped provider over [`ALL_TEMPLATES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLayouts;

impl LayoutProvider for BuiltinLayouts {
    fn slot_aspect_ratio(&self, template_id: &str, slot_id: &str) -> Option<f32> {
        let template = TEMPLATE_INDEX.get(template_id)?;
        template
            .slots
            .iter()
            .find(|s| s.id == slot_id)
            .map(|s| s.aspect_ratio)
    }

    fn template_slots(&self, template_id: &str) -> Option<&[SlotGeometry]> {
        TEMPLATE_INDEX.get(template_id).map(|t| t.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let layouts = BuiltinLayouts;
        let ar = layouts.slot_aspect_ratio("grid_2x2", "panel_3").unwrap();
        assert!(ar > 0.0);
        assert_eq!(layouts.template_slots("strip_3").unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_template_and_slot() {
        let layouts = BuiltinLayouts;
        assert!(layouts.slot_aspect_ratio("no_such_template", "panel_1").is_none());
        assert!(layouts.slot_aspect_ratio("grid_2x2", "panel_99").is_none());
        assert!(layouts.template_slots("no_such_template").is_none());
    }

    #[test]
    fn test_all_templates_well_formed() {
        for template in ALL_TEMPLATES {
            assert!(!template.slots.is_empty(), "{}", template.id);
            for slot in template.slots {
                assert!(slot.aspect_ratio > 0.0, "{}/{}", template.id, slot.id);
            }
            let ids: std::collections::HashSet<_> =
                template.slots.iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), template.slots.len(), "{}", template.id);
        }
    }

    #[test]
    fn test_template_ids_unique() {
        let ids: std::collections::HashSet<_> = ALL_TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), ALL_TEMPLATES.len());
    }
}
