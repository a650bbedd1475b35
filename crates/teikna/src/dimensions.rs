//! Pure dimension math: 64-multiple snapping, pixel-budget synthesis,
//! and bound enforcement.
//!
//! The downstream models tile latents in 64-pixel blocks, so every
//! dimension leaving this module is a multiple of 64, clamped to
//! `[256, 2048]`, with a total pixel count between 0.2 and 2.0 MP.

use crate::common::{ModelFamily, ResolveWarning};
use crate::presets::Dimensions;

/// Hard lower bound on either axis.
pub const MIN_DIMENSION: u32 = 256;
/// Hard upper bound on either axis.
pub const MAX_DIMENSION: u32 = 2048;
/// Minimum total pixel count (0.2 MP).
pub const MIN_PIXELS: u64 = 200_000;
/// Maximum total pixel count (2.0 MP).
pub const MAX_PIXELS: u64 = 2_000_000;

/// Fallback dimensions when nothing supplies a size (3:4 portrait).
pub const DEFAULT_WIDTH: u32 = 768;
/// See [`DEFAULT_WIDTH`].
pub const DEFAULT_HEIGHT: u32 = 1024;

/// Coarse resolution tier used to pick a pixel budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionTier {
    /// Preview budget.
    Low,
    /// Native-resolution budget.
    #[default]
    Medium,
    /// Above-native budget for final renders.
    High,
}

/// Round to the nearest multiple of 64, minimum 64.
///
/// Uses `f32::round`, which rounds halves away from zero; for the
/// positive pixel counts seen here that means the halfway point (32
/// past a multiple) rounds up. Upstream behavior at the exact halfway
/// point is unspecified, so this choice is an assumption, not a
/// contract.
pub fn round64(px: f32) -> u32 {
    let snapped = (px / 64.0).round() as u32 * 64;
    snapped.max(64)
}

/// Target pixel budget for a family at a given tier.
///
/// These are configuration data, not derived values: SD 1.5 budgets sit
/// around its 512 native resolution, the XL-class families around 1 MP,
/// and flux is allowed a larger final-render budget.
pub fn target_pixel_count(family: ModelFamily, tier: ResolutionTier) -> u64 {
    match (family, tier) {
        // Flux diverges from the rest of the XL class only at the top
        // tier, so it is matched before the class-wide arms.
        (ModelFamily::Flux, ResolutionTier::High) => 1360 * 1360,

        (f, ResolutionTier::Low) if f.is_xl_class() => 768 * 768,
        (f, ResolutionTier::Medium) if f.is_xl_class() => 1024 * 1024,
        (f, ResolutionTier::High) if f.is_xl_class() => 1280 * 1280,

        // sd15
        (_, ResolutionTier::Low) => 512 * 512,
        (_, ResolutionTier::Medium) => 640 * 640,
        (_, ResolutionTier::High) => 768 * 768,
    }
}

/// Synthesize dimensions for an aspect ratio from a pixel budget.
///
/// `width = round64(sqrt(pixels * ar))`, `height = round64(pixels /
/// width)`, both clamped to `[256, 2048]`. Snapping and clamping mean
/// the realized ratio can drift slightly from the request; callers must
/// recompute the ratio from the returned pair (see
/// [`Dimensions::aspect_ratio`]). That drift is accepted behavior, not
/// a defect.
pub fn calculate_dimensions_for_pixel_count(aspect_ratio: f32, target_pixels: u64) -> Dimensions {
    let ar = if aspect_ratio > 0.0 { aspect_ratio } else { 1.0 };
    let pixels = target_pixels as f32;

    let raw_width = (pixels * ar).sqrt();
    let width = round64(raw_width);
    // Height derives from the snapped-but-unclamped width so the
    // product stays near the budget even when the width clamps.
    let height = round64(pixels / width as f32);

    Dimensions {
        width: width.clamp(MIN_DIMENSION, MAX_DIMENSION),
        height: height.clamp(MIN_DIMENSION, MAX_DIMENSION),
    }
}

/// Force an arbitrary width/height pair into the engine's invariants.
///
/// Snaps both axes to 64 and clamps them to the hard bounds. If the
/// resulting pixel count falls outside `[MIN_PIXELS, MAX_PIXELS]` the
/// pair is re-synthesized at the nearest allowed budget, keeping the
/// requested aspect ratio. Returns the corrected pair plus a warning
/// for each correction that changed a value.
pub fn sanitize_dimensions(width: u32, height: u32) -> (Dimensions, Vec<ResolveWarning>) {
    let mut warnings = Vec::new();

    let snapped_w = round64(width as f32).clamp(MIN_DIMENSION, MAX_DIMENSION);
    let snapped_h = round64(height as f32).clamp(MIN_DIMENSION, MAX_DIMENSION);

    if snapped_w != width || snapped_h != height {
        warnings.push(ResolveWarning::new(
            "dimensions",
            format!("{width}x{height} adjusted to {snapped_w}x{snapped_h} (64-multiple, 256-2048)"),
        ));
    }

    let pixels = snapped_w as u64 * snapped_h as u64;
    if (MIN_PIXELS..=MAX_PIXELS).contains(&pixels) {
        return (Dimensions::new(snapped_w, snapped_h), warnings);
    }

    // Pixel count left the sane band; rebuild at the nearest budget
    // with the same shape. The budget is kept inside the band with
    // headroom, since 64-snapping can move the realized product by up
    // to 32 pixels per axis.
    const RESYNTH_MIN: u64 = 230_000;
    const RESYNTH_MAX: u64 = 1_900_000;
    let budget = pixels.clamp(RESYNTH_MIN, RESYNTH_MAX);
    let ar = snapped_w as f32 / snapped_h as f32;
    let rebuilt = calculate_dimensions_for_pixel_count(ar, budget);
    warnings.push(ResolveWarning::new(
        "dimensions",
        format!(
            "{snapped_w}x{snapped_h} is outside the 0.2-2.0 MP band, resized to {}x{}",
            rebuilt.width, rebuilt.height
        ),
    ));

    (rebuilt, warnings)
}
