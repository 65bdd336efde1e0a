//! FNV-1a hash functions for structural schema hashing
//!
//! Structural hashes must not depend on process-random seeds: two equal
//! schemas built in different places have to agree, so the traversal in
//! `compare` folds everything through these fixed functions.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

/// FNV-1a 64-bit hash (compile-time capable)
pub const fn fnv1a_64(data: &[u8]) -> u64 {
    fnv1a_64_from(FNV_OFFSET_BASIS, data)
}

/// Continue an FNV-1a 64-bit hash from `seed`
const fn fnv1a_64_from(seed: u64, data: &[u8]) -> u64 {
    let mut hash = seed;
    let mut i = 0;
    while i < data.len() {
        hash ^= data[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Order-sensitive combination of a running hash with another value
///
/// `mix(mix(s, a), b)` differs from `mix(mix(s, b), a)` for `a != b`, which
/// is what makes field order part of a schema's hash.
#[inline]
pub const fn mix(seed: u64, value: u64) -> u64 {
    fnv1a_64_from(seed, &value.to_le_bytes())
}

/// Hash a string at runtime
#[inline]
pub fn hash_str(s: &str) -> u64 {
    fnv1a_64(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_64_empty() {
        // Empty input should return offset basis
        assert_eq!(fnv1a_64(b""), 0xcbf29ce484222325);
    }

    #[test]
    fn test_fnv1a_64_basic() {
        // Known test vectors
        assert_eq!(fnv1a_64(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_mix_is_order_sensitive() {
        let a = hash_str("name");
        let b = hash_str("sibling");
        assert_ne!(mix(mix(0, a), b), mix(mix(0, b), a));
    }

    #[test]
    fn test_const_evaluation() {
        const HASH: u64 = fnv1a_64(b"test");
        const MIXED: u64 = mix(HASH, 7);
        assert!(HASH != 0);
        assert!(MIXED != HASH);
    }
}
