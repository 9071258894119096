//! Arena storage for CST nodes.
//!
//! - [`BumpAllocator`] does the address bookkeeping: downward bumping,
//!   block rollover, last-in deallocation.
//! - [`Arena`] pairs the allocator with one typed pool per node type.
//! - [`Node<T>`] is the sole owner of one value in an arena. It is neither
//!   `Clone` nor `Copy`, so ownership moves with the handle.
//! - [`node_variant!`](crate::node_variant) generates tagged unions of
//!   handles with an `Empty` default.
//!
//! # Drop discipline
//!
//! A value leaves its pool either through [`Node::destroy`] or when the arena
//! itself drops. Each value is therefore dropped exactly once. An owner that
//! holds handles (a translation unit, say) keeps its arena in its last field
//! so the handles go first.

mod allocator;
mod node;
mod variant;

use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashMap;

pub use allocator::{Address, BumpAllocator};
pub use node::Node;
pub use variant::{Alternative, Release};

/// Block size used when none is given.
pub const DEFAULT_BLOCK_CAPACITY: usize = 1024;

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(0);

struct Pool<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Pool {
            slots: Vec::new(),
            live: 0,
        }
    }
}

/// Typed node storage over a [`BumpAllocator`].
pub struct Arena<const BLOCK_CAPACITY: usize = DEFAULT_BLOCK_CAPACITY> {
    id: u32,
    allocator: BumpAllocator<BLOCK_CAPACITY>,
    pools: FxHashMap<TypeId, Box<dyn Any>>,
}

impl<const BLOCK_CAPACITY: usize> Arena<BLOCK_CAPACITY> {
    pub fn new() -> Self {
        Arena {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            allocator: BumpAllocator::new(),
            pools: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn allocator(&self) -> &BumpAllocator<BLOCK_CAPACITY> {
        &self.allocator
    }

    fn pool<T: 'static>(&self) -> Option<&Pool<T>> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_ref::<Pool<T>>())
    }

    fn pool_mut<T: 'static>(&mut self) -> Option<&mut Pool<T>> {
        self.pools
            .get_mut(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_mut::<Pool<T>>())
    }

    /// Store `value`, returning its slot and address.
    ///
    /// # Panics
    /// Panics if the pool for `T` holds a different type, which the
    /// `TypeId` keying rules out.
    #[track_caller]
    fn insert<T: 'static>(&mut self, value: T) -> (usize, Address) {
        let address = self.allocator.allocate_for::<T>();
        let pool = self
            .pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Pool::<T>::default()))
            .downcast_mut::<Pool<T>>()
            .unwrap_or_else(|| panic!("arena pool keyed by a foreign TypeId"));
        pool.slots.push(Some(value));
        pool.live += 1;
        (pool.slots.len() - 1, address)
    }

    /// Take the value out of `slot`, popping trailing empty slots.
    fn remove<T: 'static>(&mut self, slot: usize, address: Address) -> Option<T> {
        let pool = self.pool_mut::<T>()?;
        let value = pool.slots.get_mut(slot)?.take()?;
        pool.live -= 1;
        while matches!(pool.slots.last(), Some(None)) {
            pool.slots.pop();
        }
        self.allocator.deallocate_for::<T>(address);
        Some(value)
    }

    /// Shared access to the value owned by `node`.
    ///
    /// # Panics
    /// Panics if `node` belongs to another arena.
    #[inline]
    #[track_caller]
    pub fn get<T: 'static>(&self, node: &Node<T>) -> &T {
        debug_assert_eq!(node.arena(), self.id, "node used with a foreign arena");
        self.pool::<T>()
            .and_then(|pool| pool.slots.get(node.slot()))
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("node handle does not refer to a live value in this arena"))
    }

    /// Exclusive access to the value owned by `node`.
    ///
    /// # Panics
    /// Panics if `node` belongs to another arena.
    #[inline]
    #[track_caller]
    pub fn get_mut<T: 'static>(&mut self, node: &Node<T>) -> &mut T {
        debug_assert_eq!(node.arena(), self.id, "node used with a foreign arena");
        self.pool_mut::<T>()
            .and_then(|pool| pool.slots.get_mut(node.slot()))
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("node handle does not refer to a live value in this arena"))
    }

    /// Number of live `T` values.
    pub fn live<T: 'static>(&self) -> usize {
        self.pool::<T>().map_or(0, |pool| pool.live)
    }
}

impl<const BLOCK_CAPACITY: usize> Default for Arena<BLOCK_CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BLOCK_CAPACITY: usize> std::fmt::Debug for Arena<BLOCK_CAPACITY> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("pools", &self.pools.len())
            .field("blocks", &self.allocator.block_count())
            .field("used_bytes", &self.allocator.used_bytes())
            .finish()
    }
}
