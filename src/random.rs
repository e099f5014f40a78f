//! Deterministic random sources for maze generation.
//!
//! A generator is a value owned by whoever runs the generation, never a process wide singleton,
//! so independent mazes can be generated concurrently without sharing anything.

use rand::Rng;

/// A stateful source of uniformly distributed floats.
pub trait RandomSource {
    /// The next float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A uniform index in `[0, len)`, `floor(next_f64() * len)`.
    ///
    /// Panics if `len` is zero.
    fn next_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range");
        let index = (self.next_f64() * len as f64) as usize;
        // Guard against a misbehaving source returning exactly 1.0
        index.min(len - 1)
    }
}

impl<'a, R: RandomSource + ?Sized> RandomSource for &'a mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

const WIDTH: usize = 256;
const CHUNKS: u32 = 6;
const START_DENOM: f64 = 281_474_976_710_656.0; // 256^6
const SIGNIFICANCE: f64 = 4_503_599_627_370_496.0; // 2^52
const OVERFLOW: f64 = 9_007_199_254_740_992.0; // 2^53

/// String seeded ARC4 keystream generator.
///
/// The key schedule mixes the seed's UTF-16 code units, the first 256 keystream bytes are
/// discarded and each float is assembled from at least 52 bits of keystream. This is the
/// generator the browser maze application seeded, so the same seed string yields the same
/// sequence of draws and therefore the same maze.
#[derive(Clone)]
pub struct Arc4Random {
    s: [u8; WIDTH],
    i: u8,
    j: u8,
}

impl Arc4Random {
    pub fn new(seed: &str) -> Arc4Random {
        let key = mix_key(seed);
        let mut s = [0u8; WIDTH];
        for (n, slot) in s.iter_mut().enumerate() {
            *slot = n as u8;
        }

        let mut j: u8 = 0;
        for i in 0..WIDTH {
            let t = s[i];
            j = j.wrapping_add(key[i % key.len()]).wrapping_add(t);
            s[i] = s[j as usize];
            s[j as usize] = t;
        }

        let mut arc4 = Arc4Random { s, i: 0, j: 0 };
        for _ in 0..WIDTH {
            let _ = arc4.next_byte();
        }
        arc4
    }

    #[inline]
    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        let t = self.s[self.i as usize];
        self.j = self.j.wrapping_add(t);
        self.s[self.i as usize] = self.s[self.j as usize];
        self.s[self.j as usize] = t;
        let k = self.s[self.i as usize].wrapping_add(t);
        self.s[k as usize]
    }

    /// `count` keystream bytes as a big endian integer.
    fn next_bytes(&mut self, count: u32) -> u64 {
        (0..count).fold(0u64, |r, _| (r << 8) | u64::from(self.next_byte()))
    }
}

impl RandomSource for Arc4Random {
    fn next_f64(&mut self) -> f64 {
        let mut n = self.next_bytes(CHUNKS) as f64;
        let mut d = START_DENOM;
        let mut x: u64 = 0;
        while n < SIGNIFICANCE {
            n = (n + x as f64) * WIDTH as f64;
            d *= WIDTH as f64;
            x = self.next_bytes(1);
        }
        while n >= OVERFLOW {
            n /= 2.0;
            d /= 2.0;
            x >>= 1;
        }
        (n + x as f64) / d
    }
}

/// Key schedule input: up to 256 bytes smeared from the seed's UTF-16 code units.
fn mix_key(seed: &str) -> Vec<u8> {
    let mut key: Vec<u8> = Vec::with_capacity(WIDTH);
    let mut smear: i32 = 0;
    for (j, code_unit) in seed.encode_utf16().enumerate() {
        let slot = j % WIDTH;
        let previous = key.get(slot).cloned().unwrap_or(0);
        smear ^= i32::from(previous) * 19;
        let mixed = (smear.wrapping_add(i32::from(code_unit)) & 0xff) as u8;
        if slot < key.len() {
            key[slot] = mixed;
        } else {
            key.push(mixed);
        }
    }
    if key.is_empty() {
        key.push(0);
    }
    key
}

/// Adapts any `rand` generator to a `RandomSource`.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> RngSource<R> {
        RngSource { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn arc4_matches_reference_sequence() {
        let mut rng = Arc4Random::new("hello.");
        assert_eq!(rng.next_f64(), 0.9282578795792454);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Arc4Random::new("1");
        let mut b = Arc4Random::new("1");
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Arc4Random::new("1");
        let mut b = Arc4Random::new("2");
        let draws_a = (0..16).map(|_| a.next_f64()).collect::<Vec<_>>();
        let draws_b = (0..16).map(|_| b.next_f64()).collect::<Vec<_>>();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn draws_are_in_unit_interval() {
        let mut rng = Arc4Random::new("range check");
        for _ in 0..10_000 {
            let f = rng.next_f64();
            assert!(f >= 0.0 && f < 1.0, "{} out of range", f);
        }
    }

    #[test]
    fn long_seeds_wrap_the_key() {
        let long_seed = "x".repeat(300);
        assert_eq!(mix_key(&long_seed).len(), 256);
        assert_eq!(mix_key("abc"), vec![b'a', b'b', b'c']);
        assert_eq!(mix_key(""), vec![0]);

        let mut a = Arc4Random::new(&long_seed);
        let mut b = Arc4Random::new(&"x".repeat(256));
        assert_ne!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn next_index_stays_in_range() {
        let mut rng = Arc4Random::new("indices");
        let mut seen = [false; 3];
        for _ in 0..300 {
            let index = rng.next_index(3);
            assert!(index < 3);
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn rand_generators_can_be_injected() {
        let mut a = RngSource::new(StdRng::seed_from_u64(7));
        let mut b = RngSource::new(StdRng::seed_from_u64(7));
        for _ in 0..100 {
            let f = a.next_f64();
            assert!(f >= 0.0 && f < 1.0);
            assert_eq!(f, b.next_f64());
        }
    }
}
