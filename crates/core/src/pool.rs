//! Free pool of block handles.
//!
//! Handles are recycled instead of minted for every spawn. An empty pool never fails: it
//! allocates a fresh handle on demand, so the initial size is an optimization only.

use crate::types::BlockId;

#[derive(Debug, Clone, Default)]
pub struct BlockPool {
    free: Vec<BlockId>,
    next_id: u32,
}

impl BlockPool {
    /// Create a pool pre-filled with `initial` idle handles
    pub fn new(initial: usize) -> Self {
        let mut pool = Self {
            free: Vec::with_capacity(initial),
            next_id: 0,
        };
        for _ in 0..initial {
            let id = pool.mint();
            pool.free.push(id);
        }
        pool
    }

    fn mint(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Take an idle handle, or mint one when the pool is empty
    pub fn acquire(&mut self) -> BlockId {
        match self.free.pop() {
            Some(id) => id,
            None => self.mint(),
        }
    }

    /// Return a handle to the pool
    pub fn release(&mut self, id: BlockId) {
        debug_assert!(!self.free.contains(&id), "{:?} released twice", id);
        self.free.push(id);
    }

    /// Idle handles
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Handles ever minted
    pub fn allocated(&self) -> u32 {
        self.next_id
    }

    /// Whether `id` is currently idle
    pub fn contains(&self, id: BlockId) -> bool {
        self.free.contains(&id)
    }

    pub fn idle(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.free.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_prefills() {
        let pool = BlockPool::new(150);
        assert_eq!(pool.available(), 150);
        assert_eq!(pool.allocated(), 150);
    }

    #[test]
    fn test_empty_pool_allocates_on_demand() {
        let mut pool = BlockPool::new(0);
        let a = pool.acquire();
        let b = pool.acquire();
        assert_ne!(a, b);
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_released_handles_are_reused() {
        let mut pool = BlockPool::new(1);
        let a = pool.acquire();
        pool.release(a);
        assert!(pool.contains(a));
        assert_eq!(pool.acquire(), a);
        assert_eq!(pool.allocated(), 1);
    }
}
