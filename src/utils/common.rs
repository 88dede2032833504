use crate::utils::coding;

/// Murmur-like hash shared by the bloom filter and the cache sharding.
pub fn hash(data: &[u8], seed: u32) -> u32 {
    let mut slice = data;
    let m: u32 = 0xc6a4a793;
    let r: u32 = 24;
    let mut h: u32 = seed ^ m.wrapping_mul(slice.len() as u32);

    while slice.len() >= 4 {
        let w = coding::decode_fixed32(slice);
        slice = &slice[4..];
        h = h.wrapping_add(w);
        h = h.wrapping_mul(m);
        h ^= h >> 16;
    }

    // tail bytes fall through from the highest to the lowest
    if slice.len() == 3 {
        h = h.wrapping_add((slice[2] as u32) << 16);
    }
    if slice.len() >= 2 {
        h = h.wrapping_add((slice[1] as u32) << 8);
    }
    if !slice.is_empty() {
        h = h.wrapping_add(slice[0] as u32);
        h = h.wrapping_mul(m);
        h ^= h >> r;
    }
    h
}
