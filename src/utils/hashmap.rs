//! A hash-map whose hasher is seeded with a fixed state, so iteration order
//! only depends on the inserted keys.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, foldhash::fast::FixedState>;
