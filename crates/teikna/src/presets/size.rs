//! Size presets: named aspect-ratio buckets with pre-validated,
//! per-family dimensions.
//!
//! Every dimension in these tables is a multiple of 64 and inside the
//! engine's hard bounds. Presets are never synthesized at runtime; the
//! nearest-preset search either returns one of these verbatim or the
//! caller falls through to pixel-budget synthesis.

use serde::{Deserialize, Serialize};

use crate::common::ModelFamily;

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Realized aspect ratio of this pair.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// A named size preset.
#[derive(Debug, Clone)]
pub struct SizePreset {
    /// Preset id for lookup.
    pub id: &'static str,
    /// Target aspect ratio this preset represents.
    pub aspect_ratio: f32,
    /// Per-family dimensions, one entry per known family.
    pub dimensions: &'static [(ModelFamily, Dimensions)],
    /// Human-readable description.
    pub description: &'static str,
}

impl SizePreset {
    /// Dimensions for the given model family.
    ///
    /// The tables carry one entry per family, so this lookup is total;
    /// the `Sd15` entry doubles as the fallback.
    pub fn dimensions_for(&self, family: ModelFamily) -> Dimensions {
        self.dimensions
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, d)| *d)
            .unwrap_or_else(|| self.dimensions[0].1)
    }
}

// Dimension tables. SD 1.5 runs near its 512 native resolution; the
// XL-class families (sdxl, illustrious, pony, realistic) and flux run
// near 1 MP at SDXL's bucketed resolutions.

macro_rules! family_dims {
    (sd15: $sw:expr, $sh:expr, xl: $xw:expr, $xh:expr) => {
        &[
            (ModelFamily::Sd15, Dimensions::new($sw, $sh)),
            (ModelFamily::Sdxl, Dimensions::new($xw, $xh)),
            (ModelFamily::Illustrious, Dimensions::new($xw, $xh)),
            (ModelFamily::Pony, Dimensions::new($xw, $xh)),
            (ModelFamily::Flux, Dimensions::new($xw, $xh)),
            (ModelFamily::Realistic, Dimensions::new($xw, $xh)),
        ]
    };
}

/// 1:1 panel.
pub const SIZE_SQUARE: SizePreset = SizePreset {
    id: "square",
    aspect_ratio: 1.0,
    dimensions: family_dims!(sd15: 512, 512, xl: 1024, 1024),
    description: "Square panel.",
};

/// 3:4 portrait panel.
pub const SIZE_PORTRAIT: SizePreset = SizePreset {
    id: "portrait",
    aspect_ratio: 0.75,
    dimensions: family_dims!(sd15: 576, 768, xl: 896, 1152),
    description: "Portrait panel, standard character shot.",
};

/// 4:3 landscape panel.
pub const SIZE_LANDSCAPE: SizePreset = SizePreset {
    id: "landscape",
    aspect_ratio: 4.0 / 3.0,
    dimensions: family_dims!(sd15: 768, 576, xl: 1152, 896),
    description: "Landscape panel, establishing shot.",
};

/// 9:16 tall panel.
pub const SIZE_TALL: SizePreset = SizePreset {
    id: "tall",
    aspect_ratio: 9.0 / 16.0,
    dimensions: family_dims!(sd15: 512, 896, xl: 768, 1344),
    description: "Tall panel, full-body or vertical strip.",
};

/// 16:9 wide panel.
pub const SIZE_WIDE: SizePreset = SizePreset {
    id: "wide",
    aspect_ratio: 16.0 / 9.0,
    dimensions: family_dims!(sd15: 896, 512, xl: 1344, 768),
    description: "Wide panel, scene or action spread.",
};

/// 21:9 cinematic panel.
pub const SIZE_CINEMA: SizePreset = SizePreset {
    id: "cinema",
    aspect_ratio: 21.0 / 9.0,
    dimensions: family_dims!(sd15: 1024, 448, xl: 1536, 640),
    description: "Cinematic banner panel.",
};

/// All registered size presets, in registration order.
///
/// The order is load-bearing: `find_closest_preset` breaks ties by
/// first registration, so reordering this slice changes tie-break
/// results.
pub const ALL_SIZE_PRESETS: &[&SizePreset] = &[
    &SIZE_SQUARE,
    &SIZE_PORTRAIT,
    &SIZE_LANDSCAPE,
    &SIZE_TALL,
    &SIZE_WIDE,
    &SIZE_CINEMA,
];

/// Find a size preset by id (case-insensitive).
pub fn get_size_preset(id: &str) -> Option<&'static SizePreset> {
    let id_lower = id.to_lowercase();

    ALL_SIZE_PRESETS
        .iter()
        .find(|p| p.id.to_lowercase() == id_lower)
        .copied()
}

/// Find the registered preset whose target aspect ratio is closest to
/// `aspect_ratio`, measured by relative error.
///
/// Returns `None` when even the best candidate misses by more than
/// `tolerance`. Among equal minima the first-registered preset wins;
/// iteration over [`ALL_SIZE_PRESETS`] is stable, which keeps the
/// result reproducible across calls and builds.
pub fn find_closest_preset(aspect_ratio: f32, tolerance: f32) -> Option<&'static SizePreset> {
    if aspect_ratio <= 0.0 {
        return None;
    }

    let mut best: Option<(&'static SizePreset, f32)> = None;

    for preset in ALL_SIZE_PRESETS {
        let relative_error = (preset.aspect_ratio - aspect_ratio).abs() / aspect_ratio;
        match best {
            // Strict comparison: an equal error never displaces the
            // earlier registration.
            Some((_, best_error)) if relative_error >= best_error => {}
            _ => best = Some((preset, relative_error)),
        }
    }

    best.filter(|(_, error)| *error <= tolerance).map(|(p, _)| p)
}

/// List all registered size preset ids.
pub fn list_size_presets() -> Vec<&'static str> {
    ALL_SIZE_PRESETS.iter().map(|p| p.id).collect()
}
