use super::*;
use proptest::prelude::*;

#[test]
fn test_fresh_allocator() {
    let allocator = BumpAllocator::<64>::new();
    assert_eq!(allocator.block_capacity(), 64);
    assert_eq!(allocator.block_count(), 1);
    assert_eq!(allocator.allocated_bytes(), 64);
    assert_eq!(allocator.used_bytes(), 0);
}

#[test]
fn test_allocates_downward() {
    let mut allocator = BumpAllocator::<64>::new();
    let a = allocator.allocate(8, 8);
    let b = allocator.allocate(8, 8);
    assert_eq!(a, Address { block: 0, offset: 56 });
    assert_eq!(b, Address { block: 0, offset: 48 });
    assert_eq!(allocator.used_bytes(), 16);
}

#[test]
fn test_alignment_pads() {
    let mut allocator = BumpAllocator::<64>::new();
    allocator.allocate(1, 1);
    let aligned = allocator.allocate(4, 4);
    assert_eq!(aligned.offset, 56);
    assert_eq!(aligned.offset % 4, 0);
}

#[test]
fn test_rollover_to_new_block() {
    let mut allocator = BumpAllocator::<16>::new();
    allocator.allocate(12, 4);
    let next = allocator.allocate(8, 8);
    assert_eq!(next, Address { block: 1, offset: 8 });
    assert_eq!(allocator.block_count(), 2);
    assert_eq!(allocator.allocated_bytes(), 32);
    assert_eq!(allocator.used_bytes(), 16 + 8);
}

#[test]
fn test_deallocate_last_only() {
    let mut allocator = BumpAllocator::<64>::new();
    let a = allocator.allocate(8, 8);
    let b = allocator.allocate(8, 8);

    // Not the most recent: ignored.
    allocator.deallocate(a, 8, 8);
    assert_eq!(allocator.used_bytes(), 16);

    allocator.deallocate(b, 8, 8);
    assert_eq!(allocator.used_bytes(), 8);
    allocator.deallocate(a, 8, 8);
    assert_eq!(allocator.used_bytes(), 0);
}

#[test]
fn test_deallocate_restores_alignment_padding() {
    let mut allocator = BumpAllocator::<64>::new();
    let byte = allocator.allocate(1, 1);
    let word = allocator.allocate(4, 4);
    assert_eq!(word.offset, 56);

    allocator.deallocate(word, 4, 4);
    assert_eq!(allocator.current(), byte);
    assert_eq!(allocator.used_bytes(), 1);

    allocator.deallocate(byte, 1, 1);
    assert_eq!(allocator.used_bytes(), 0);
}

#[test]
fn test_deallocate_pops_rolled_over_block() {
    let mut allocator = BumpAllocator::<16>::new();
    let first = allocator.allocate(12, 4);
    let second = allocator.allocate(8, 8);
    assert_eq!(allocator.block_count(), 2);

    allocator.deallocate(second, 8, 8);
    assert_eq!(allocator.block_count(), 1);
    assert_eq!(allocator.current(), first);

    allocator.deallocate(first, 12, 4);
    assert_eq!(
        (allocator.block_count(), allocator.used_bytes()),
        (1, 0)
    );
}

#[test]
fn test_reallocate_after_rollover_reuses_block() {
    let mut allocator = BumpAllocator::<16>::new();
    allocator.allocate(12, 4);
    let second = allocator.allocate(8, 8);
    allocator.deallocate(second, 8, 8);

    let again = allocator.allocate(8, 8);
    assert_eq!(again, second);
    assert_eq!(allocator.block_count(), 2);
}

#[test]
fn test_typed_allocation() {
    let mut allocator = BumpAllocator::<64>::new();
    let address = allocator.allocate_for::<u64>();
    assert_eq!(address.offset, 56);
    allocator.deallocate_for::<u64>(address);
    assert_eq!(allocator.used_bytes(), 0);
}

fn size_and_align() -> impl Strategy<Value = (usize, usize)> {
    (0usize..=16, 0u32..=3).prop_map(|(size, shift)| (size, 1usize << shift))
}

proptest! {
    #[test]
    fn reverse_order_deallocation_restores_start(sizes in prop::collection::vec(1usize..=16, 1..16)) {
        let mut allocator = BumpAllocator::<256>::new();
        let addresses: Vec<_> = sizes.iter().map(|&size| allocator.allocate(size, 1)).collect();
        for (address, &size) in addresses.iter().zip(&sizes).rev() {
            allocator.deallocate(*address, size, 1);
        }
        prop_assert_eq!(allocator.used_bytes(), 0);
    }

    #[test]
    fn reverse_order_deallocation_unwinds_every_step(
        requests in prop::collection::vec(size_and_align(), 1..32),
    ) {
        let mut allocator = BumpAllocator::<16>::new();
        let mut history = Vec::new();
        for &(size, align) in &requests {
            let before = allocator.current();
            let address = allocator.allocate(size, align);
            prop_assert_eq!(address.offset % align, 0);
            prop_assert!(address.offset + size <= 16);
            history.push((before, address, size, align));
        }
        for &(before, address, size, align) in history.iter().rev() {
            allocator.deallocate(address, size, align);
            prop_assert_eq!(allocator.current(), before);
        }
        prop_assert_eq!(
            (allocator.block_count(), allocator.used_bytes()),
            (1, 0)
        );
    }
}
