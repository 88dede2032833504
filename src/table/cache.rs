use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use parking_lot::Mutex;
use crate::utils::common::hash;

struct Entry<V> {
    value: V,
    charge: usize,
    tick: u64,
}

/// Charge-bounded LRU. `lru` maps a monotonically increasing access tick to
/// the key, so its first entry is always the least recently used one.
struct LRUCache<K, V> {
    capacity: usize,
    usage: usize,
    tick: u64,
    table: HashMap<K, Entry<V>>,
    lru: BTreeMap<u64, K>,
}

impl<K, V> LRUCache<K, V> where K: Eq + Hash + Copy, V: Clone {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            usage: 0,
            tick: 0,
            table: HashMap::new(),
            lru: BTreeMap::new(),
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn lookup(&mut self, key: &K) -> Option<V> {
        let tick = self.next_tick();
        let entry = self.table.get_mut(key)?;
        self.lru.remove(&entry.tick);
        entry.tick = tick;
        self.lru.insert(tick, *key);
        Some(entry.value.clone())
    }

    fn insert(&mut self, key: K, value: V, charge: usize) {
        self.erase(&key);
        if charge > self.capacity {
            return;
        }

        let tick = self.next_tick();
        self.table.insert(key, Entry { value, charge, tick });
        self.lru.insert(tick, key);
        self.usage += charge;

        while self.usage > self.capacity {
            match self.lru.pop_first() {
                Some((_, oldest)) => {
                    if let Some(entry) = self.table.remove(&oldest) {
                        self.usage -= entry.charge;
                    }
                }
                None => break,
            }
        }
    }

    fn erase(&mut self, key: &K) -> bool {
        match self.table.remove(key) {
            Some(entry) => {
                self.lru.remove(&entry.tick);
                self.usage -= entry.charge;
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct BlockKey {
    file_number: u64,
    offset: u64,
}

impl BlockKey {
    fn hash_key(&self) -> u32 {
        let mut k = [0u8; 16];
        k[..8].copy_from_slice(&self.file_number.to_le_bytes());
        k[8..].copy_from_slice(&self.offset.to_le_bytes());
        hash(&k, 0)
    }
}

type BlockLRUCache = LRUCache<BlockKey, Arc<Vec<u8>>>;

/// Cache of uncompressed table blocks keyed by file number and block
/// offset, charged by block length. Sized by the `block_cache_size` option.
pub struct BlockCache {
    capacity: usize,
    shard: [Mutex<BlockLRUCache>; BlockCache::NUM_SHARDS],
}

impl BlockCache {
    const NUM_SHARD_BITS: usize = 4;
    const NUM_SHARDS: usize = 1 << BlockCache::NUM_SHARD_BITS;

    pub fn new(capacity: usize) -> Self {
        let per_shard = (capacity + (Self::NUM_SHARDS - 1)) / Self::NUM_SHARDS;
        Self {
            capacity,
            shard: std::array::from_fn(|_| Mutex::new(LRUCache::new(per_shard))),
        }
    }

    fn shard(key: &BlockKey) -> usize {
        (key.hash_key() as usize) >> (32 - BlockCache::NUM_SHARD_BITS)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn usage(&self) -> usize {
        self.shard.iter().map(|shard| shard.lock().usage).sum()
    }

    pub fn len(&self) -> usize {
        self.shard.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Caches `block`, evicting least recently used blocks of the same shard
    /// as needed. A block larger than a shard is handed back uncached.
    pub fn insert(&self, file_number: u64, offset: u64, block: Vec<u8>) -> Arc<Vec<u8>> {
        let key = BlockKey { file_number, offset };
        let charge = block.len();
        let block = Arc::new(block);
        self.shard[Self::shard(&key)].lock().insert(key, block.clone(), charge);
        block
    }

    pub fn lookup(&self, file_number: u64, offset: u64) -> Option<Arc<Vec<u8>>> {
        let key = BlockKey { file_number, offset };
        self.shard[Self::shard(&key)].lock().lookup(&key)
    }

    pub fn erase(&self, file_number: u64, offset: u64) -> bool {
        let key = BlockKey { file_number, offset };
        self.shard[Self::shard(&key)].lock().erase(&key)
    }
}
