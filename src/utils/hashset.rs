//! A hash-set whose hasher is seeded with a fixed state, so iteration order
//! only depends on the inserted keys.

/// Hashset using [`hashbrown::HashSet`].
pub type HashSet<K> = hashbrown::hash_set::HashSet<K, foldhash::fast::FixedState>;
