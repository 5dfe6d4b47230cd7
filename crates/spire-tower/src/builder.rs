//! Tower assembly: stacks nodes, decorates them and arranges the stack.

use std::f32::consts::FRAC_PI_4;

use glam::Vec3;
use rand::Rng;
use serde::Serialize;
use spire_config::{BiomeType, DecorationKind, NodeSize, SceneParameters, SizeRange, StackPattern};
use spire_materials::{MaterialProvider, SurfaceDescriptor};
use tracing::{debug, info};

use crate::decoration::{Decoration, DecorationPlacer};
use crate::error::TowerError;
use crate::geometry::{ShapeDescriptor, Transform};
use crate::node::{Node, NodeFactory};
use crate::pool::{DecorationHandle, DecorationPool};

/// Each tier shrinks by this fraction of its progress up the tower.
pub const TIER_TAPER: f32 = 0.3;

/// Tiers below this progress push decorations down and enlarge them.
const LOW_TIER_PROGRESS: f32 = 0.3;
/// Tiers above this progress lift decorations and shrink them.
const HIGH_TIER_PROGRESS: f32 = 0.7;

/// Tint the tower partway from another biome's surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BiomeTransition {
    pub from: BiomeType,
    /// 0 keeps `from`'s surface, 1 is fully the current biome.
    pub factor: f32,
}

impl BiomeTransition {
    pub fn new(from: BiomeType, factor: f32) -> Self {
        Self { from, factor }
    }

    /// No blending.
    pub fn none() -> Option<Self> {
        None
    }

    fn is_active(&self) -> bool {
        self.factor > 0.0
    }
}

/// A finished tower. Replaced wholesale by the next build.
#[derive(Clone, Debug, Serialize)]
pub struct Tower {
    pub biome: BiomeType,
    pub stack_pattern: StackPattern,
    pub decoration_density: f32,
    pub total_height: f32,
    /// Bottom tier first.
    pub nodes: Vec<PlacedNode>,
}

impl Tower {
    pub fn tier_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn decoration_count(&self) -> usize {
        self.nodes.iter().map(|n| n.decorations.len()).sum()
    }
}

/// One tier of a tower.
#[derive(Clone, Debug, Serialize)]
pub struct PlacedNode {
    pub tier: usize,
    pub tier_progress: f32,
    pub node: Node,
    pub shape: ShapeDescriptor,
    /// Height of the node's base above the ground.
    pub base_height: f32,
    /// Transform of the drawable's center.
    pub transform: Transform,
    pub decorations: Vec<PlacedDecoration>,
}

/// A decoration attached to a node, relative to the node's center.
#[derive(Clone, Debug, Serialize)]
pub struct PlacedDecoration {
    pub handle: DecorationHandle,
    pub kind: DecorationKind,
    pub transform: Transform,
    pub surface: SurfaceDescriptor,
    pub geometry: ShapeDescriptor,
}

/// Builds towers and owns the caches shared between builds.
#[derive(Debug, Default)]
pub struct TowerBuilder {
    materials: MaterialProvider,
    node_factory: NodeFactory,
    placer: DecorationPlacer,
    pool: DecorationPool,
    builds: u64,
}

impl TowerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tower from `params`, drawing every random choice from `rng`.
    pub fn build<R: Rng + ?Sized>(
        &mut self,
        params: &SceneParameters,
        transition: Option<BiomeTransition>,
        rng: &mut R,
    ) -> Result<Tower, TowerError> {
        validate(params)?;

        let biome = params.current_biome;
        let pattern = params.tower.stack_pattern;
        let reclaimed = self.pool.begin_pass();

        let count = rng.random_range(params.tower.height.min..=params.tower.height.max);
        let mut nodes = Vec::with_capacity(count as usize);
        let mut current_height = 0.0_f32;

        for tier in 0..count as usize {
            let tier_progress = tier as f32 / count as f32;
            let size = sample_size(&params.node.size, rng)
                .scaled(1.0 - TIER_TAPER * tier_progress);

            let mut node = self.node_factory.generate_node(
                &mut self.materials,
                params.node.shape,
                size,
                biome,
                Some(&params.material),
            );
            if let Some(t) = transition
                && t.is_active()
            {
                node.surface = self.materials.blend(t.from, biome, t.factor);
            }
            node.user_data.insert("tier".into(), tier.to_string());

            let decorations = self.placer.generate(&node, biome, rng);
            let mut placed = Vec::with_capacity(decorations.len());
            for decoration in &decorations {
                placed.push(self.place_decoration(decoration, tier, tier_progress, size, biome)?);
            }

            let origin = Vec3::new(0.0, current_height, 0.0);
            let mut transform = Transform::from_translation(origin + node.drawable_offset());
            apply_stack_pattern(pattern, tier, tier_progress, &mut transform, rng);

            debug!(
                tier,
                height = size.height,
                decorations = placed.len(),
                "Placed tower node"
            );

            nodes.push(PlacedNode {
                tier,
                tier_progress,
                shape: node.shape_descriptor(),
                node,
                base_height: current_height,
                transform,
                decorations: placed,
            });
            current_height += size.height;
        }

        let released = self.pool.release_unattached();
        self.builds += 1;

        let tower = Tower {
            biome,
            stack_pattern: pattern,
            decoration_density: params.tower.decoration_density,
            total_height: current_height,
            nodes,
        };
        info!(
            %biome,
            tiers = tower.tier_count(),
            decorations = tower.decoration_count(),
            pooled = self.pool.len(),
            reclaimed,
            released,
            "Built tower"
        );
        Ok(tower)
    }

    /// [`TowerBuilder::build`] with the thread-local random source.
    pub fn build_random(
        &mut self,
        params: &SceneParameters,
        transition: Option<BiomeTransition>,
    ) -> Result<Tower, TowerError> {
        self.build(params, transition, &mut rand::rng())
    }

    /// Drops every cached surface, asset and pooled drawable.
    pub fn clear_caches(&mut self) {
        self.materials.clear_cache();
        self.pool.clear();
    }

    pub fn materials(&self) -> &MaterialProvider {
        &self.materials
    }

    pub fn pool(&self) -> &DecorationPool {
        &self.pool
    }

    /// Completed builds since this builder was created.
    pub fn build_count(&self) -> u64 {
        self.builds
    }

    fn place_decoration(
        &mut self,
        decoration: &Decoration,
        tier: usize,
        tier_progress: f32,
        size: NodeSize,
        biome: BiomeType,
    ) -> Result<PlacedDecoration, TowerError> {
        let handle = self
            .pool
            .acquire_or_construct(decoration.kind, biome, &mut self.materials);
        let transform = decoration_transform(decoration, size.height, tier_progress, biome);
        let entry = self
            .pool
            .attach(handle, tier, transform)
            .ok_or(TowerError::StaleHandle(handle))?;

        Ok(PlacedDecoration {
            handle,
            kind: decoration.kind,
            transform,
            surface: entry.surface.clone(),
            geometry: ShapeDescriptor::clone(&entry.geometry),
        })
    }
}

fn validate(params: &SceneParameters) -> Result<(), TowerError> {
    let height = params.tower.height;
    if height.min == 0 || height.min > height.max {
        return Err(TowerError::DegenerateHeightRange {
            min: height.min,
            max: height.max,
        });
    }

    let range = &params.node.size;
    for (axis, min, max) in [
        ("width", range.min.width, range.max.width),
        ("height", range.min.height, range.max.height),
        ("depth", range.min.depth, range.max.depth),
    ] {
        if !min.is_finite() || !max.is_finite() {
            return Err(TowerError::NonFiniteSize { axis, min, max });
        }
        if min <= 0.0 {
            return Err(TowerError::NonPositiveSize { axis, value: min });
        }
        if min > max {
            return Err(TowerError::DegenerateSizeRange { axis, min, max });
        }
    }
    Ok(())
}

fn sample_size<R: Rng + ?Sized>(range: &SizeRange, rng: &mut R) -> NodeSize {
    NodeSize::new(
        rng.random_range(range.min.width..=range.max.width),
        rng.random_range(range.min.height..=range.max.height),
        rng.random_range(range.min.depth..=range.max.depth),
    )
}

/// Decoration placement after tier and biome adjustments.
fn decoration_transform(
    decoration: &Decoration,
    node_height: f32,
    tier_progress: f32,
    biome: BiomeType,
) -> Transform {
    let mut translation = decoration.local_position;
    let mut scale = Vec3::splat(decoration.scale);

    if tier_progress < LOW_TIER_PROGRESS {
        translation.y -= node_height * 0.2;
        scale *= 1.2;
    } else if tier_progress > HIGH_TIER_PROGRESS {
        translation.y += node_height * 0.1;
        scale *= 0.8;
    }

    match (biome, decoration.kind) {
        (BiomeType::Forest, DecorationKind::Vine) if tier_progress > 0.5 => {
            scale.y *= 1.5;
            translation.y -= node_height * 0.1;
        }
        (BiomeType::Ocean, DecorationKind::Coral) if tier_progress > 0.6 => {
            scale.y *= 1.3;
            translation.y += node_height * 0.1;
        }
        (BiomeType::Desert, DecorationKind::Moss) if tier_progress < 0.4 => {
            scale *= 1.4;
        }
        _ => {}
    }

    Transform {
        translation,
        rotation: decoration.rotation,
        scale,
    }
}

fn apply_stack_pattern<R: Rng + ?Sized>(
    pattern: StackPattern,
    tier: usize,
    tier_progress: f32,
    transform: &mut Transform,
    rng: &mut R,
) {
    match pattern {
        StackPattern::Alternating => {
            let yaw = FRAC_PI_4 * (1.0 + 0.5 * tier_progress);
            transform.rotation.y = if tier % 2 == 0 { yaw } else { -yaw };
        }
        StackPattern::Clustered => {
            let angle = tier as f32 * FRAC_PI_4;
            let radius = 0.5 * (1.0 + 0.5 * tier_progress);
            transform.translation.x = angle.cos() * radius;
            transform.translation.z = angle.sin() * radius;
            transform.rotation.x = (rng.random::<f32>() - 0.5) * 0.1 * tier_progress;
            transform.rotation.z = (rng.random::<f32>() - 0.5) * 0.1 * tier_progress;
        }
        StackPattern::Spiral | StackPattern::Random => {}
    }
}
