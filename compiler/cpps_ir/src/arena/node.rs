use std::fmt;
use std::marker::PhantomData;

use super::{Address, Arena};

/// Owning handle to one `T` stored in an [`Arena`].
///
/// Not `Clone`, not `Copy`: moving the handle moves ownership. An empty
/// owner is `Option<Node<T>>::None`.
pub struct Node<T> {
    arena: u32,
    slot: u32,
    address: Address,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Node<T> {
    /// Move `value` into `arena` and return its owner.
    ///
    /// # Panics
    /// Panics if the pool for `T` grows past `u32::MAX` slots.
    #[track_caller]
    pub fn create<const C: usize>(arena: &mut Arena<C>, value: T) -> Self {
        let (slot, address) = arena.insert(value);
        Node {
            arena: arena.id,
            slot: u32::try_from(slot)
                .unwrap_or_else(|_| panic!("arena pool exceeds u32::MAX slots ({slot})")),
            address,
            _marker: PhantomData,
        }
    }

    /// Take the value back out of the arena, consuming the handle.
    ///
    /// The space is returned to the allocator when this was the most recent
    /// allocation. `None` only for a handle from another arena.
    pub fn destroy<const C: usize>(self, arena: &mut Arena<C>) -> Option<T> {
        debug_assert_eq!(self.arena, arena.id, "node destroyed in a foreign arena");
        arena.remove(self.slot(), self.address)
    }

    #[inline]
    pub(super) fn slot(&self) -> usize {
        self.slot as usize
    }

    #[inline]
    pub(super) fn arena(&self) -> u32 {
        self.arena
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node<{}>#{}",
            std::any::type_name::<T>().rsplit("::").next().unwrap_or("?"),
            self.slot
        )
    }
}
