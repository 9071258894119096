//! Downward bump allocation over fixed-capacity blocks.
//!
//! The allocator hands out [`Address`]es and does the bookkeeping a bump
//! pointer would: alignment, block rollover, last-in deallocation. It never
//! constructs or drops values; [`Arena`](crate::Arena) stores those.

use std::marker::PhantomData;
use std::mem::{align_of, size_of};

/// Position of an allocation: block index and byte offset inside it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Address {
    pub block: usize,
    pub offset: usize,
}

/// Bump allocator that grows downward from the top of each block.
///
/// When an allocation does not fit below the current offset a new block is
/// appended and the allocation is taken from its top. Only the most recent
/// allocation can be given back.
#[derive(Clone, Debug)]
pub struct BumpAllocator<const BLOCK_CAPACITY: usize> {
    blocks: usize,
    offset: usize,
    /// `current()` before each live allocation, most recent last.
    marks: Vec<Address>,
}

struct Fits<T, const BLOCK_CAPACITY: usize>(PhantomData<T>);

impl<T, const BLOCK_CAPACITY: usize> Fits<T, BLOCK_CAPACITY> {
    const CHECK: () = assert!(
        size_of::<T>() <= BLOCK_CAPACITY,
        "type does not fit in a single arena block"
    );
}

impl<const BLOCK_CAPACITY: usize> BumpAllocator<BLOCK_CAPACITY> {
    const NON_EMPTY: () = assert!(BLOCK_CAPACITY > 0, "block capacity must be non-zero");

    pub fn new() -> Self {
        let () = Self::NON_EMPTY;
        BumpAllocator {
            blocks: 1,
            offset: BLOCK_CAPACITY,
            marks: Vec::new(),
        }
    }

    #[inline]
    fn align_down(value: usize, align: usize) -> usize {
        value & !(align - 1)
    }

    /// Reserve `size` bytes aligned to `align` (a power of two).
    pub fn allocate(&mut self, size: usize, align: usize) -> Address {
        debug_assert!(align.is_power_of_two(), "alignment must be a power of two");
        debug_assert!(size <= BLOCK_CAPACITY, "allocation larger than a block");

        self.marks.push(self.current());
        match self.offset.checked_sub(size) {
            Some(top) => self.offset = Self::align_down(top, align),
            None => {
                self.blocks += 1;
                self.offset = Self::align_down(BLOCK_CAPACITY.saturating_sub(size), align);
            }
        }
        self.current()
    }

    /// Reserve space for one `T`. Types larger than a block are rejected at
    /// compile time.
    #[inline]
    pub fn allocate_for<T>(&mut self) -> Address {
        let () = Fits::<T, BLOCK_CAPACITY>::CHECK;
        self.allocate(size_of::<T>(), align_of::<T>())
    }

    /// Give back `address` if it is the most recent allocation; otherwise a
    /// no-op. The allocator returns to exactly where it stood before that
    /// allocation, alignment padding and block rollover included.
    pub fn deallocate(&mut self, address: Address, size: usize, align: usize) {
        debug_assert!(align.is_power_of_two(), "alignment must be a power of two");
        if address != self.current() {
            return;
        }
        if let Some(mark) = self.marks.pop() {
            debug_assert!(
                mark.block < address.block || mark.offset >= address.offset + size,
                "deallocated size exceeds the allocation"
            );
            self.blocks = mark.block + 1;
            self.offset = mark.offset;
        }
    }

    #[inline]
    pub fn deallocate_for<T>(&mut self, address: Address) {
        self.deallocate(address, size_of::<T>(), align_of::<T>());
    }

    /// Address the next allocation bumps down from.
    #[inline]
    pub fn current(&self) -> Address {
        Address {
            block: self.blocks - 1,
            offset: self.offset,
        }
    }

    #[inline]
    pub const fn block_capacity(&self) -> usize {
        BLOCK_CAPACITY
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Bytes reserved across all blocks.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.blocks * BLOCK_CAPACITY
    }

    /// Bytes handed out, counting earlier blocks as full.
    #[inline]
    pub fn used_bytes(&self) -> usize {
        (self.blocks - 1) * BLOCK_CAPACITY + (BLOCK_CAPACITY - self.offset)
    }
}

impl<const BLOCK_CAPACITY: usize> Default for BumpAllocator<BLOCK_CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
