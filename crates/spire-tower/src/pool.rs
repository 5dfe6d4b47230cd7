//! Decoration drawable pool.
//!
//! Rebuilding a tower would otherwise allocate a fresh drawable for every
//! decoration. The [`DecorationPool`] keeps every drawable it ever built and
//! hands hidden ones back out by kind. Entries are only dropped by
//! [`DecorationPool::clear`].

use std::rc::Rc;

use serde::Serialize;
use spire_config::{BiomeType, DecorationKind};
use spire_materials::{MaterialProvider, SurfaceDescriptor};
use tracing::debug;

use crate::assets::DecorationAssets;
use crate::geometry::{ShapeDescriptor, Transform};

/// Index of an entry in a [`DecorationPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DecorationHandle(pub u32);

/// A decoration drawable owned by the pool.
#[derive(Clone, Debug)]
pub struct PooledDecoration {
    pub kind: DecorationKind,
    /// Biome whose surface the entry currently wears.
    pub biome: BiomeType,
    pub geometry: Rc<ShapeDescriptor>,
    pub surface: SurfaceDescriptor,
    pub transform: Transform,
    pub visible: bool,
    /// Tier of the node the entry is attached to.
    owner: Option<usize>,
}

impl PooledDecoration {
    pub fn owner(&self) -> Option<usize> {
        self.owner
    }
}

/// Reuse cache of decoration drawables keyed by kind.
///
/// A visible entry belongs to exactly one node; hidden entries are free.
#[derive(Debug, Default)]
pub struct DecorationPool {
    entries: Vec<PooledDecoration>,
    assets: DecorationAssets,
    /// Entries built since the last clear.
    constructed: u64,
    /// Entries handed back out by `acquire`.
    reused: u64,
}

impl DecorationPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// First hidden entry of `kind`, if any. Never allocates.
    pub fn acquire(&mut self, kind: DecorationKind) -> Option<DecorationHandle> {
        let index = self
            .entries
            .iter()
            .position(|e| e.kind == kind && !e.visible)?;
        self.reused += 1;
        Some(handle(index))
    }

    /// Builds a new hidden entry from the cached assets and registers it.
    pub fn construct(
        &mut self,
        kind: DecorationKind,
        biome: BiomeType,
        materials: &mut MaterialProvider,
    ) -> DecorationHandle {
        let entry = PooledDecoration {
            kind,
            biome,
            geometry: self.assets.geometry(kind),
            surface: self.assets.surface(kind, biome, materials),
            transform: Transform::IDENTITY,
            visible: false,
            owner: None,
        };
        self.entries.push(entry);
        self.constructed += 1;
        handle(self.entries.len() - 1)
    }

    /// Reuses a hidden entry of `kind` or builds one.
    ///
    /// A reused entry last worn in another biome is re-dressed with this
    /// biome's surface.
    pub fn acquire_or_construct(
        &mut self,
        kind: DecorationKind,
        biome: BiomeType,
        materials: &mut MaterialProvider,
    ) -> DecorationHandle {
        let Some(h) = self.acquire(kind) else {
            return self.construct(kind, biome, materials);
        };

        let entry = &mut self.entries[h.0 as usize];
        if entry.biome != biome {
            entry.surface = self.assets.surface(kind, biome, materials);
            entry.biome = biome;
        }
        h
    }

    /// Shows the entry, places it and records the owning tier.
    ///
    /// Returns `None` for a handle this pool never issued.
    pub fn attach(
        &mut self,
        handle: DecorationHandle,
        tier: usize,
        transform: Transform,
    ) -> Option<&PooledDecoration> {
        let entry = self.entries.get_mut(handle.0 as usize)?;
        entry.visible = true;
        entry.owner = Some(tier);
        entry.transform = transform;
        Some(entry)
    }

    /// Hides the entry and detaches it from its node.
    ///
    /// Returns `false` for a handle this pool never issued.
    pub fn release(&mut self, handle: DecorationHandle) -> bool {
        match self.entries.get_mut(handle.0 as usize) {
            Some(entry) => {
                entry.visible = false;
                entry.owner = None;
                true
            }
            None => false,
        }
    }

    /// Reclaims every entry owned by the previous tower. Returns how many.
    pub fn begin_pass(&mut self) -> usize {
        let mut reclaimed = 0;
        for entry in self.entries.iter_mut().filter(|e| e.owner.is_some()) {
            entry.visible = false;
            entry.owner = None;
            reclaimed += 1;
        }
        reclaimed
    }

    /// Hides visible entries that no node owns. Returns how many.
    pub fn release_unattached(&mut self) -> usize {
        let mut released = 0;
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.visible && e.owner.is_none())
        {
            entry.visible = false;
            released += 1;
        }
        released
    }

    /// Drops every entry and the shared assets.
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "Clearing decoration pool");
        self.entries.clear();
        self.assets.clear();
        self.constructed = 0;
        self.reused = 0;
    }

    pub fn get(&self, handle: DecorationHandle) -> Option<&PooledDecoration> {
        self.entries.get(handle.0 as usize)
    }

    pub fn get_mut(&mut self, handle: DecorationHandle) -> Option<&mut PooledDecoration> {
        self.entries.get_mut(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of hidden entries ready for reuse.
    pub fn free_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.visible).count()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }

    pub fn constructed_count(&self) -> u64 {
        self.constructed
    }

    pub fn reused_count(&self) -> u64 {
        self.reused
    }

    pub fn assets(&self) -> &DecorationAssets {
        &self.assets
    }

    pub fn iter(&self) -> impl Iterator<Item = (DecorationHandle, &PooledDecoration)> {
        self.entries.iter().enumerate().map(|(i, e)| (handle(i), e))
    }
}

fn handle(index: usize) -> DecorationHandle {
    DecorationHandle(index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_on_empty_pool() {
        let mut pool = DecorationPool::new();
        assert_eq!(pool.acquire(DecorationKind::Coral), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_construct_then_acquire_reuses() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        let h = pool.construct(DecorationKind::Rock, BiomeType::Desert, &mut materials);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.free_count(), 1);

        // Hidden entries are handed back out
        assert_eq!(pool.acquire(DecorationKind::Rock), Some(h));
        assert_eq!(pool.acquire(DecorationKind::Cactus), None);
    }

    #[test]
    fn test_attached_entries_are_not_acquirable() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        let h = pool.construct(DecorationKind::Vine, BiomeType::Forest, &mut materials);
        let entry = pool.attach(h, 2, Transform::IDENTITY).unwrap();
        assert!(entry.visible);
        assert_eq!(entry.owner(), Some(2));
        assert_eq!(pool.acquire(DecorationKind::Vine), None);

        assert!(pool.release(h));
        assert_eq!(pool.get(h).unwrap().owner(), None);
        assert_eq!(pool.acquire(DecorationKind::Vine), Some(h));
    }

    #[test]
    fn test_unknown_handle() {
        let mut pool = DecorationPool::new();
        assert!(!pool.release(DecorationHandle(9)));
        assert!(pool.attach(DecorationHandle(9), 0, Transform::IDENTITY).is_none());
        assert!(pool.get(DecorationHandle(9)).is_none());
    }

    #[test]
    fn test_acquire_or_construct_grows_only_when_needed() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        let a = pool.acquire_or_construct(DecorationKind::Shell, BiomeType::Ocean, &mut materials);
        pool.attach(a, 0, Transform::IDENTITY);
        let b = pool.acquire_or_construct(DecorationKind::Shell, BiomeType::Ocean, &mut materials);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);

        pool.release(a);
        let c = pool.acquire_or_construct(DecorationKind::Shell, BiomeType::Ocean, &mut materials);
        assert_eq!(c, a);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.constructed_count(), 2);
        assert_eq!(pool.reused_count(), 1);
    }

    #[test]
    fn test_reuse_across_biomes_redresses_surface() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        let h = pool.construct(DecorationKind::Moss, BiomeType::Forest, &mut materials);
        let forest = pool.get(h).unwrap().surface.clone();

        let again =
            pool.acquire_or_construct(DecorationKind::Moss, BiomeType::Desert, &mut materials);
        assert_eq!(again, h);
        let entry = pool.get(h).unwrap();
        assert_eq!(entry.biome, BiomeType::Desert);
        assert_ne!(entry.surface, forest);
        assert_eq!(entry.surface, materials.surface_for(BiomeType::Desert, None));
    }

    #[test]
    fn test_geometry_is_shared_per_kind() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        let a = pool.construct(DecorationKind::Coral, BiomeType::Ocean, &mut materials);
        let b = pool.construct(DecorationKind::Coral, BiomeType::Ocean, &mut materials);
        assert!(Rc::ptr_eq(
            &pool.get(a).unwrap().geometry,
            &pool.get(b).unwrap().geometry
        ));
        assert_eq!(pool.assets().geometry_count(), 1);
    }

    #[test]
    fn test_begin_pass_reclaims_owned_entries() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        for tier in 0..3 {
            let h = pool.construct(DecorationKind::Leaf, BiomeType::Forest, &mut materials);
            pool.attach(h, tier, Transform::IDENTITY);
        }
        assert_eq!(pool.visible_count(), 3);

        assert_eq!(pool.begin_pass(), 3);
        assert_eq!(pool.visible_count(), 0);
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_release_unattached_only_touches_ownerless_visible() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();

        let owned = pool.construct(DecorationKind::Rock, BiomeType::Desert, &mut materials);
        pool.attach(owned, 0, Transform::IDENTITY);
        let stray = pool.construct(DecorationKind::Rock, BiomeType::Desert, &mut materials);
        pool.get_mut(stray).unwrap().visible = true;
        pool.construct(DecorationKind::Rock, BiomeType::Desert, &mut materials);

        assert_eq!(pool.release_unattached(), 1);
        assert!(pool.get(owned).unwrap().visible);
        assert!(!pool.get(stray).unwrap().visible);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut pool = DecorationPool::new();
        let mut materials = MaterialProvider::new();
        pool.construct(DecorationKind::Crystal, BiomeType::Desert, &mut materials);

        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.assets().geometry_count(), 0);
        assert_eq!(pool.assets().surface_count(), 0);
        assert_eq!(pool.acquire(DecorationKind::Crystal), None);
    }
}
