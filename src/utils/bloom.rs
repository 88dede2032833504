use crate::FilterPolicy;
use crate::utils::common::hash;

#[derive(Debug)]
pub struct BloomFilterPolicy {
    // k: num of hash
    k: u32,
    bits_per_key: u32,
}

impl BloomFilterPolicy {
    pub fn new(bits_per_key: u32) -> Self {
        // 0.69 =~ ln(2) minimizes the false positive rate
        let k = (bits_per_key as f64 * 0.69) as u32;

        Self {
            k: k.clamp(1, 30),
            bits_per_key,
        }
    }

    pub fn bits_per_key(&self) -> u32 {
        self.bits_per_key
    }

    pub fn num_probes(&self) -> u32 {
        self.k
    }

    pub fn bloom_hash(key: &[u8]) -> u32 {
        hash(key, 0xbc9f1d34)
    }
}

impl FilterPolicy for BloomFilterPolicy {
    fn name(&self) -> String {
        String::from("leveldb.BuiltinBloomFilter2")
    }

    fn key_may_match(&self, filter: &[u8], key: &[u8]) -> bool {
        let length = filter.len();

        if length < 2 {
            return false;
        }

        let bits = (length - 1) * 8;
        let k = filter[length - 1];
        if k > 30 {
            // reserved for potentially new encodings
            return true;
        }

        let mut h = Self::bloom_hash(key);
        let delta = h.rotate_right(17);

        for _ in 0..k {
            let bit_pos = h as usize % bits;
            if filter[bit_pos / 8] & (1 << (bit_pos % 8)) == 0 {
                return false;
            }
            h = h.wrapping_add(delta);
        }
        true
    }

    fn create_filter(&self, keys: &[&[u8]]) -> Vec<u8> {
        let bits = keys.len().saturating_mul(self.bits_per_key as usize).max(64);
        let bytes = bits.div_ceil(8);
        let bits = bytes * 8;

        // probe count trails the bit array
        let mut ans: Vec<u8> = vec![0; bytes + 1];
        ans[bytes] = self.k as u8;

        for key in keys {
            let mut h = Self::bloom_hash(key);
            let delta = h.rotate_right(17);
            for _ in 0..self.k {
                let bit_pos = h as usize % bits;
                ans[bit_pos / 8] |= 1 << (bit_pos % 8);
                h = h.wrapping_add(delta);
            }
        }

        ans
    }
}
