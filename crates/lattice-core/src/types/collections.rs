//! Hash collection aliases used on hot paths.

/// FxHash-backed map for lookups where iteration order does not matter.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// FxHash-backed set for lookups where iteration order does not matter.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
