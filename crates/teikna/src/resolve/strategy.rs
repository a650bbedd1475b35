//! Resolution strategies.
//!
//! Merges explicit overrides, named presets, slot geometry, and
//! model-family defaults into a fully resolved configuration.
//!
//! # Precedence (highest to lowest)
//!
//! 1. Explicit caller overrides
//! 2. Named presets (size preset for dimensions, quality preset for
//!    sampler settings)
//! 3. Slot geometry (dimensions only, slot-aware strategy only; sits
//!    between explicit and the named size preset)
//! 4. Model-family and engine defaults
//!
//! There is no failure path. Unknown preset ids, unknown slots, and
//! out-of-range overrides all degrade to the nearest sane value, each
//! leaving a [`ResolveWarning`] on the result.

use std::sync::Arc;

use crate::common::{detect_model_family, ModelFamily, ResolveWarning};
use crate::config::EngineConfig;
use crate::dimensions::{
    calculate_dimensions_for_pixel_count, sanitize_dimensions, target_pixel_count, ResolutionTier,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use crate::layout::LayoutProvider;
use crate::presets::{
    find_closest_preset, get_model_preset, get_quality_preset, get_quality_preset_safe,
    get_size_preset, QualityPreset, DEFAULT_QUALITY,
};
use crate::resolve::request::ResolutionRequest;
use crate::resolve::resolved::{FieldSources, ResolvedConfig, SourceTier};

/// Sane override bounds. Values outside these clamp with a warning.
pub const MIN_STEPS: u32 = 1;
pub const MAX_STEPS: u32 = 150;
pub const MIN_CFG: f32 = 1.0;
pub const MAX_CFG: f32 = 30.0;
pub const MAX_LORA_WEIGHT: f32 = 2.0;

/// Recommended dimensions for an aspect ratio, with the preset that
/// matched when one did.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OptimalSize {
    pub width: u32,
    pub height: u32,
    /// Size preset whose dimensions were used, `None` when the pair was
    /// synthesized from a pixel budget.
    pub preset_id: Option<&'static str>,
}

/// Shared dependencies handed to a strategy on every call.
///
/// Holds the global-tier configuration and the layout collaborator.
/// Explicit state, passed by the engine; strategies themselves are
/// stateless.
#[derive(Clone)]
pub struct ResolveContext {
    pub config: EngineConfig,
    pub layout: Arc<dyn LayoutProvider>,
}

/// A resolution strategy: one complete precedence policy.
pub trait ResolveStrategy: Send + Sync {
    /// Reconcile a request into a complete configuration. Never fails.
    fn resolve(&self, request: &ResolutionRequest, ctx: &ResolveContext) -> ResolvedConfig;

    /// Best dimensions for an aspect ratio: the nearest registered size
    /// preset when one is within the configured tolerance, otherwise a
    /// pair synthesized from the family's pixel budget at the given
    /// tier.
    fn calculate_optimal_size(
        &self,
        ctx: &ResolveContext,
        aspect_ratio: f32,
        family: ModelFamily,
        tier: ResolutionTier,
    ) -> OptimalSize {
        if let Some(preset) = find_closest_preset(aspect_ratio, ctx.config.preset_tolerance) {
            let dims = preset.dimensions_for(family);
            return OptimalSize {
                width: dims.width,
                height: dims.height,
                preset_id: Some(preset.id),
            };
        }

        let dims =
            calculate_dimensions_for_pixel_count(aspect_ratio, target_pixel_count(family, tier));
        OptimalSize {
            width: dims.width,
            height: dims.height,
            preset_id: None,
        }
    }
}

/// Flat precedence, no layout awareness. `request.slot` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl ResolveStrategy for DefaultStrategy {
    fn resolve(&self, request: &ResolutionRequest, ctx: &ResolveContext) -> ResolvedConfig {
        resolve_request(request, ctx, None, Vec::new())
    }
}

/// Derives dimensions from page-template slot geometry when the request
/// names a slot; identical to [`DefaultStrategy`] otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotAwareStrategy;

impl ResolveStrategy for SlotAwareStrategy {
    fn resolve(&self, request: &ResolutionRequest, ctx: &ResolveContext) -> ResolvedConfig {
        let mut warnings = Vec::new();
        let mut slot_size = None;

        // An explicit pair outranks slot geometry, so the slot lookup
        // only runs when no complete pair was supplied.
        if !request.overrides.has_dimension_pair() {
            if let Some(slot) = &request.slot {
                match ctx
                    .layout
                    .slot_aspect_ratio(&slot.template_id, &slot.slot_id)
                {
                    Some(aspect_ratio) => {
                        let (model, _, _) = effective_model(request, ctx);
                        let family = detect_model_family(&model);
                        let tier = resolution_tier_for(request);
                        slot_size =
                            Some(self.calculate_optimal_size(ctx, aspect_ratio, family, tier));
                    }
                    None => {
                        log::debug!(
                            "slot {}/{} not found, using default dimension path",
                            slot.template_id,
                            slot.slot_id
                        );
                        warnings.push(ResolveWarning::new(
                            "slot",
                            format!(
                                "unknown template or slot '{}/{}', dimensions fall back to defaults",
                                slot.template_id, slot.slot_id
                            ),
                        ));
                    }
                }
            }
        }

        resolve_request(request, ctx, slot_size, warnings)
    }
}

/// Resolution tier implied by the request's quality preset.
pub(crate) fn resolution_tier_for(request: &ResolutionRequest) -> ResolutionTier {
    let id = match &request.quality_preset {
        Some(id) => get_quality_preset_safe(id).id,
        None => return ResolutionTier::Medium,
    };
    match id {
        "draft" => ResolutionTier::Low,
        "high" | "ultra" => ResolutionTier::High,
        _ => ResolutionTier::Medium,
    }
}

/// Model name for this request, its tier, and a warning if the override
/// was unusable.
fn effective_model(
    request: &ResolutionRequest,
    ctx: &ResolveContext,
) -> (String, SourceTier, Option<ResolveWarning>) {
    match request.overrides.model.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            (name.to_string(), SourceTier::Explicit, None)
        }
        Some(_) => (
            ctx.config.default_model.clone(),
            SourceTier::Global,
            Some(ResolveWarning::new(
                "model",
                "empty model override, using the configured default",
            )),
        ),
        None => (ctx.config.default_model.clone(), SourceTier::Global, None),
    }
}

/// Quality preset named by the request, if any, with fallback handling.
fn effective_quality(
    request: &ResolutionRequest,
    warnings: &mut Vec<ResolveWarning>,
) -> Option<&'static QualityPreset> {
    let id = request.quality_preset.as_deref()?;
    match get_quality_preset(id) {
        Some(preset) => Some(preset),
        None => {
            warnings.push(ResolveWarning::new(
                "quality_preset",
                format!("unknown quality preset '{id}', using '{}'", DEFAULT_QUALITY.id),
            ));
            Some(DEFAULT_QUALITY)
        }
    }
}

fn clamp_steps(steps: u32, warnings: &mut Vec<ResolveWarning>) -> u32 {
    let clamped = steps.clamp(MIN_STEPS, MAX_STEPS);
    if clamped != steps {
        warnings.push(ResolveWarning::new(
            "steps",
            format!("steps {steps} out of range, clamped to {clamped}"),
        ));
    }
    clamped
}

fn clamp_cfg(cfg: f32, fallback: f32, warnings: &mut Vec<ResolveWarning>) -> f32 {
    if !cfg.is_finite() {
        warnings.push(ResolveWarning::new(
            "cfg",
            format!("non-finite cfg, using {fallback}"),
        ));
        return fallback;
    }
    let clamped = cfg.clamp(MIN_CFG, MAX_CFG);
    if clamped != cfg {
        warnings.push(ResolveWarning::new(
            "cfg",
            format!("cfg {cfg} out of range, clamped to {clamped}"),
        ));
    }
    clamped
}

/// The shared resolution core.
///
/// `slot_size` carries pre-computed slot dimensions from the slot-aware
/// strategy; `None` means the flat path (explicit pair > size preset >
/// default) decides the dimensions.
pub(crate) fn resolve_request(
    request: &ResolutionRequest,
    ctx: &ResolveContext,
    slot_size: Option<OptimalSize>,
    mut warnings: Vec<ResolveWarning>,
) -> ResolvedConfig {
    let mut sources = FieldSources::all_global();

    // Model and family first: everything per-family keys off them.
    let (model, model_tier, model_warning) = effective_model(request, ctx);
    warnings.extend(model_warning);
    sources.model = model_tier;
    let model_family = detect_model_family(&model);
    let model_preset = get_model_preset(model_family);

    let quality = effective_quality(request, &mut warnings);
    let quality_preset_used = quality.map(|q| q.id.to_string());

    // Sampler settings: explicit > quality preset > family preset.
    let steps = match request.overrides.steps {
        Some(steps) => {
            sources.steps = SourceTier::Explicit;
            clamp_steps(steps, &mut warnings)
        }
        None => match quality {
            Some(q) => {
                sources.steps = SourceTier::Preset;
                q.steps
            }
            None => model_preset.default_steps,
        },
    };

    let cfg = match request.overrides.cfg {
        Some(cfg) => {
            sources.cfg = SourceTier::Explicit;
            let fallback = quality.map(|q| q.cfg).unwrap_or(model_preset.cfg);
            clamp_cfg(cfg, fallback, &mut warnings)
        }
        None => match quality {
            Some(q) => {
                sources.cfg = SourceTier::Preset;
                q.cfg
            }
            None => model_preset.cfg,
        },
    };

    let sampler = match request.overrides.sampler.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            sources.sampler = SourceTier::Explicit;
            name.to_string()
        }
        other => {
            if other.is_some() {
                warnings.push(ResolveWarning::new(
                    "sampler",
                    "empty sampler override ignored",
                ));
            }
            match quality {
                Some(q) => {
                    sources.sampler = SourceTier::Preset;
                    q.sampler.to_string()
                }
                None => model_preset.sampler.to_string(),
            }
        }
    };

    let scheduler = match request.overrides.scheduler.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            sources.scheduler = SourceTier::Explicit;
            name.to_string()
        }
        other => {
            if other.is_some() {
                warnings.push(ResolveWarning::new(
                    "scheduler",
                    "empty scheduler override ignored",
                ));
            }
            match quality {
                Some(q) => {
                    sources.scheduler = SourceTier::Preset;
                    q.scheduler.to_string()
                }
                None => model_preset.scheduler.to_string(),
            }
        }
    };

    let (hires_fix, upscale) = match quality {
        Some(q) => (q.hires_fix, q.upscale),
        None => (false, 1.0),
    };

    // Dimensions: explicit pair > slot geometry > named size preset >
    // built-in default.
    let mut size_preset_used = None;
    let (width, height) = if request.overrides.has_dimension_pair() {
        let (dims, dim_warnings) = sanitize_dimensions(
            request.overrides.width.unwrap_or(DEFAULT_WIDTH),
            request.overrides.height.unwrap_or(DEFAULT_HEIGHT),
        );
        warnings.extend(dim_warnings);
        sources.width = SourceTier::Explicit;
        sources.height = SourceTier::Explicit;
        (dims.width, dims.height)
    } else {
        if request.overrides.width.is_some() != request.overrides.height.is_some() {
            warnings.push(ResolveWarning::new(
                "dimensions",
                "width and height must be overridden together, partial pair ignored",
            ));
        }

        if let Some(slot) = slot_size {
            sources.width = SourceTier::Slot;
            sources.height = SourceTier::Slot;
            size_preset_used = slot.preset_id.map(str::to_string);
            (slot.width, slot.height)
        } else if let Some(id) = request.size_preset.as_deref() {
            match get_size_preset(id) {
                Some(preset) => {
                    let dims = preset.dimensions_for(model_family);
                    sources.width = SourceTier::Preset;
                    sources.height = SourceTier::Preset;
                    size_preset_used = Some(preset.id.to_string());
                    (dims.width, dims.height)
                }
                None => {
                    warnings.push(ResolveWarning::new(
                        "size_preset",
                        format!("unknown size preset '{id}', using default dimensions"),
                    ));
                    (DEFAULT_WIDTH, DEFAULT_HEIGHT)
                }
            }
        } else {
            (DEFAULT_WIDTH, DEFAULT_HEIGHT)
        }
    };

    let negative_prompt = match &request.overrides.negative_prompt {
        Some(prompt) => {
            sources.negative_prompt = SourceTier::Explicit;
            prompt.clone()
        }
        None => ctx.config.default_negative_prompt.clone(),
    };

    let loras = match &request.overrides.loras {
        Some(loras) => {
            sources.loras = SourceTier::Explicit;
            loras
                .iter()
                .map(|lora| {
                    let mut lora = lora.clone();
                    let clamped = lora.weight.clamp(-MAX_LORA_WEIGHT, MAX_LORA_WEIGHT);
                    if !lora.weight.is_finite() {
                        warnings.push(ResolveWarning::new(
                            "loras",
                            format!("non-finite weight for '{}', using 1.0", lora.name),
                        ));
                        lora.weight = 1.0;
                    } else if clamped != lora.weight {
                        warnings.push(ResolveWarning::new(
                            "loras",
                            format!("weight for '{}' clamped to {clamped}", lora.name),
                        ));
                        lora.weight = clamped;
                    }
                    lora
                })
                .collect()
        }
        None => Vec::new(),
    };

    ResolvedConfig {
        width,
        height,
        aspect_ratio: width as f32 / height as f32,
        size_preset_used,
        steps,
        cfg,
        sampler,
        scheduler,
        quality_preset_used,
        hires_fix,
        upscale,
        model,
        model_family,
        negative_prompt,
        loras,
        sources,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BuiltinLayouts;
    use crate::resolve::request::{GenerationOverrides, LoraSpec};

    fn ctx() -> ResolveContext {
        ResolveContext {
            config: EngineConfig::default(),
            layout: Arc::new(BuiltinLayouts),
        }
    }

    #[test]
    fn test_empty_request_builtin_defaults() {
        let resolved = DefaultStrategy.resolve(&ResolutionRequest::default(), &ctx());

        assert_eq!(resolved.width, 768);
        assert_eq!(resolved.height, 1024);
        assert_eq!(resolved.steps, 28);
        assert_eq!(resolved.cfg, 7.0);
        assert_eq!(resolved.sampler, "euler_ancestral");
        assert_eq!(resolved.scheduler, "normal");
        assert_eq!(resolved.model_family, crate::common::ModelFamily::Sd15);
        assert_eq!(resolved.sources.width, SourceTier::Global);
        assert_eq!(resolved.sources.steps, SourceTier::Global);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_explicit_overrides_win_over_quality_preset() {
        let request = ResolutionRequest {
            quality_preset: Some("draft".to_string()),
            overrides: GenerationOverrides {
                steps: Some(100),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!(resolved.steps, 100);
        assert_eq!(resolved.sources.steps, SourceTier::Explicit);
        // Untouched fields still come from the preset.
        assert_eq!(resolved.sampler, "euler");
        assert_eq!(resolved.sources.sampler, SourceTier::Preset);
    }

    #[test]
    fn test_quality_preset_supplies_sampler_settings() {
        let request = ResolutionRequest::with_quality_preset("ultra");
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!(resolved.steps, 60);
        assert!(resolved.hires_fix);
        assert_eq!(resolved.upscale, 2.0);
        assert_eq!(resolved.quality_preset_used.as_deref(), Some("ultra"));
    }

    #[test]
    fn test_unknown_quality_preset_degrades() {
        let request = ResolutionRequest::with_quality_preset("no-such-quality");
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!(resolved.steps, 28);
        assert_eq!(resolved.quality_preset_used.as_deref(), Some("standard"));
        assert!(resolved.is_degraded());
    }

    #[test]
    fn test_size_preset_by_family() {
        let request = ResolutionRequest {
            size_preset: Some("wide".to_string()),
            overrides: GenerationOverrides {
                model: Some("sd_xl_base_1.0.safetensors".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!((resolved.width, resolved.height), (1344, 768));
        assert_eq!(resolved.size_preset_used.as_deref(), Some("wide"));
        assert_eq!(resolved.sources.width, SourceTier::Preset);
    }

    #[test]
    fn test_explicit_pair_beats_size_preset() {
        let request = ResolutionRequest {
            size_preset: Some("square".to_string()),
            overrides: GenerationOverrides {
                width: Some(1024),
                height: Some(576),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!((resolved.width, resolved.height), (1024, 576));
        assert_eq!(resolved.sources.width, SourceTier::Explicit);
        assert!(resolved.size_preset_used.is_none());
    }

    #[test]
    fn test_partial_pair_is_invalid_override() {
        let request = ResolutionRequest {
            overrides: GenerationOverrides {
                width: Some(1024),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!((resolved.width, resolved.height), (768, 1024));
        assert!(resolved.warnings.iter().any(|w| w.field == "dimensions"));
    }

    #[test]
    fn test_out_of_range_overrides_clamp() {
        let request = ResolutionRequest {
            overrides: GenerationOverrides {
                steps: Some(0),
                cfg: Some(-3.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!(resolved.steps, MIN_STEPS);
        assert_eq!(resolved.cfg, MIN_CFG);
        assert!(resolved.warnings.len() >= 2);
    }

    #[test]
    fn test_lora_weights_clamped() {
        let request = ResolutionRequest {
            overrides: GenerationOverrides {
                loras: Some(vec![
                    LoraSpec::new("style.safetensors", 0.8),
                    LoraSpec::new("detail.safetensors", 9.0),
                ]),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!(resolved.loras[0].weight, 0.8);
        assert_eq!(resolved.loras[1].weight, MAX_LORA_WEIGHT);
        assert_eq!(resolved.sources.loras, SourceTier::Explicit);
    }

    #[test]
    fn test_default_strategy_ignores_slot() {
        let request = ResolutionRequest::for_slot("strip_3", "panel_1");
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        assert_eq!((resolved.width, resolved.height), (768, 1024));
        assert_eq!(resolved.sources.width, SourceTier::Global);
    }

    #[test]
    fn test_slot_aware_uses_slot_geometry() {
        let request = ResolutionRequest::for_slot("webtoon_3", "panel_2");
        let resolved = SlotAwareStrategy.resolve(&request, &ctx());
        // webtoon cells (0.56) match the tall preset (0.5625).
        assert_eq!(resolved.size_preset_used.as_deref(), Some("tall"));
        assert_eq!(resolved.sources.width, SourceTier::Slot);
        assert_eq!(resolved.sources.height, SourceTier::Slot);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_slot_aware_unknown_slot_falls_back() {
        let request = ResolutionRequest::for_slot("grid_2x2", "panel_99");
        let resolved = SlotAwareStrategy.resolve(&request, &ctx());
        assert_eq!((resolved.width, resolved.height), (768, 1024));
        assert_eq!(resolved.sources.width, SourceTier::Global);
        assert!(resolved.warnings.iter().any(|w| w.field == "slot"));
    }

    #[test]
    fn test_slot_aware_explicit_pair_beats_slot() {
        let mut request = ResolutionRequest::for_slot("grid_2x2", "panel_1");
        request.overrides.width = Some(512);
        request.overrides.height = Some(512);
        let resolved = SlotAwareStrategy.resolve(&request, &ctx());
        assert_eq!((resolved.width, resolved.height), (512, 512));
        assert_eq!(resolved.sources.width, SourceTier::Explicit);
    }

    #[test]
    fn test_slot_aware_scalar_chain_unchanged() {
        let mut request = ResolutionRequest::for_slot("single", "panel_1");
        request.quality_preset = Some("high".to_string());
        let resolved = SlotAwareStrategy.resolve(&request, &ctx());
        assert_eq!(resolved.steps, 40);
        assert_eq!(resolved.sources.steps, SourceTier::Preset);
        assert_eq!(resolved.sources.width, SourceTier::Slot);
    }

    #[test]
    fn test_calculate_optimal_size_preset_match() {
        let size = DefaultStrategy.calculate_optimal_size(
            &ctx(),
            1.0,
            crate::common::ModelFamily::Sdxl,
            ResolutionTier::Medium,
        );
        assert_eq!((size.width, size.height), (1024, 1024));
        assert_eq!(size.preset_id, Some("square"));
    }

    #[test]
    fn test_calculate_optimal_size_synthesized() {
        // 3.2 is far from every preset; expect budget synthesis.
        let size = DefaultStrategy.calculate_optimal_size(
            &ctx(),
            3.2,
            crate::common::ModelFamily::Sdxl,
            ResolutionTier::Medium,
        );
        assert!(size.preset_id.is_none());
        assert_eq!(size.width % 64, 0);
        assert_eq!(size.height % 64, 0);
        assert!(size.width > size.height);
    }

    #[test]
    fn test_resolution_tier_mapping() {
        let draft = ResolutionRequest::with_quality_preset("draft");
        assert_eq!(resolution_tier_for(&draft), ResolutionTier::Low);
        let ultra = ResolutionRequest::with_quality_preset("ultra");
        assert_eq!(resolution_tier_for(&ultra), ResolutionTier::High);
        assert_eq!(
            resolution_tier_for(&ResolutionRequest::default()),
            ResolutionTier::Medium
        );
    }

    #[test]
    fn test_aspect_ratio_recomputed() {
        let request = ResolutionRequest {
            overrides: GenerationOverrides {
                width: Some(1000),
                height: Some(600),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = DefaultStrategy.resolve(&request, &ctx());
        // Snapped to 1024x576; the ratio reflects the snapped pair.
        assert_eq!(
            resolved.aspect_ratio,
            resolved.width as f32 / resolved.height as f32
        );
    }
}
