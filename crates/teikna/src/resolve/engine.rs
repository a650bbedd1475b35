//! The resolution engine façade.
//!
//! Owns both strategies, the global configuration, and the layout
//! collaborator, and exposes the operations callers actually use:
//! `resolve`, per-slot pre-sizing, whole-template size maps, and
//! standalone family detection.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::common::{detect_model_family, ModelFamily};
use crate::config::EngineConfig;
use crate::dimensions::{sanitize_dimensions, ResolutionTier, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::layout::{BuiltinLayouts, LayoutProvider};
use crate::resolve::request::ResolutionRequest;
use crate::resolve::resolved::ResolvedConfig;
use crate::resolve::strategy::{
    DefaultStrategy, OptimalSize, ResolveContext, ResolveStrategy, SlotAwareStrategy,
};

/// Which strategy handles `resolve` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Flat precedence, slot contexts ignored.
    #[default]
    Default,
    /// Slot geometry drives dimensions when a request names a slot.
    SlotAware,
}

/// Swappable-strategy façade over the resolution core.
///
/// The active strategy is the engine's only mutable state, guarded by a
/// single-writer `RwLock`: swaps are explicit calls, and concurrent
/// `resolve` calls run against whichever strategy is current when each
/// one reads the slot.
///
/// # Example
///
/// ```ignore
/// let engine = ResolutionEngine::default();
/// let resolved = engine.resolve(&ResolutionRequest::default()).await;
/// assert_eq!(resolved.width % 64, 0);
/// ```
pub struct ResolutionEngine {
    ctx: ResolveContext,
    default_strategy: DefaultStrategy,
    slot_strategy: SlotAwareStrategy,
    active: RwLock<StrategyKind>,
}

impl ResolutionEngine {
    /// Engine with the given configuration and the built-in layouts.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_layout_provider(config, Arc::new(BuiltinLayouts))
    }

    /// Engine with a caller-supplied layout collaborator.
    pub fn with_layout_provider(config: EngineConfig, layout: Arc<dyn LayoutProvider>) -> Self {
        Self {
            ctx: ResolveContext { config, layout },
            default_strategy: DefaultStrategy,
            slot_strategy: SlotAwareStrategy,
            active: RwLock::new(StrategyKind::default()),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.ctx.config
    }

    /// Currently active strategy.
    pub fn active_strategy(&self) -> StrategyKind {
        // The guarded value is a plain Copy enum that is always valid,
        // so a poisoned lock is recovered rather than propagated;
        // resolution must stay available after an unrelated panic.
        *self.active.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Route `resolve` calls through the flat strategy.
    pub fn use_default_strategy(&self) {
        self.swap(StrategyKind::Default);
    }

    /// Route `resolve` calls through the slot-aware strategy.
    pub fn use_slot_aware_strategy(&self) {
        self.swap(StrategyKind::SlotAware);
    }

    /// Restore the initial strategy. Intended for test isolation.
    pub fn reset(&self) {
        self.swap(StrategyKind::default());
    }

    fn swap(&self, kind: StrategyKind) {
        log::debug!("resolution strategy set to {kind:?}");
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = kind;
    }

    fn strategy(&self, kind: StrategyKind) -> &dyn ResolveStrategy {
        match kind {
            StrategyKind::Default => &self.default_strategy,
            StrategyKind::SlotAware => &self.slot_strategy,
        }
    }

    /// Reconcile a request into a complete, internally consistent
    /// configuration. Never fails: degraded inputs are reported through
    /// the result's warning list.
    ///
    /// Async for interface forward-compatibility (a remote preset
    /// source would suspend here); the current implementation performs
    /// no I/O and never awaits.
    pub async fn resolve(&self, request: &ResolutionRequest) -> ResolvedConfig {
        let kind = self.active_strategy();
        self.strategy(kind).resolve(request, &self.ctx)
    }

    /// Recommended dimensions for one template slot.
    ///
    /// Always computed slot-aware, regardless of the active strategy;
    /// callers rely on this for pre-sizing independent of the global
    /// mode. Unknown templates or slots degrade to the engine's default
    /// dimensions.
    pub fn get_dimensions_for_slot(&self, template_id: &str, slot_id: &str) -> OptimalSize {
        match self.ctx.layout.slot_aspect_ratio(template_id, slot_id) {
            Some(aspect_ratio) => {
                let family = detect_model_family(&self.ctx.config.default_model);
                self.slot_strategy.calculate_optimal_size(
                    &self.ctx,
                    aspect_ratio,
                    family,
                    ResolutionTier::Medium,
                )
            }
            None => {
                log::debug!("slot {template_id}/{slot_id} not found, returning defaults");
                let (dims, _) = sanitize_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT);
                OptimalSize {
                    width: dims.width,
                    height: dims.height,
                    preset_id: None,
                }
            }
        }
    }

    /// Recommended dimensions for every slot of a template, keyed by
    /// slot id. Used to pre-size a whole page before any generation
    /// call. Unknown templates yield an empty map.
    pub fn get_template_size_map(&self, template_id: &str) -> BTreeMap<String, OptimalSize> {
        let Some(slots) = self.ctx.layout.template_slots(template_id) else {
            return BTreeMap::new();
        };

        slots
            .iter()
            .map(|slot| {
                (
                    slot.id.to_string(),
                    self.get_dimensions_for_slot(template_id, slot.id),
                )
            })
            .collect()
    }

    /// Standalone family inference for callers that do not need a full
    /// resolution.
    pub fn detect_model_family(&self, filename: &str) -> ModelFamily {
        detect_model_family(filename)
    }
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
