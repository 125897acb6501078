//! Seeded random streams and the uniform roll helpers every town outcome uses.
//!
//! Each helper consumes exactly one `next_u32` draw, so a stubbed source can
//! force any branch and a counted source can verify draw sequencing.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use sha2::Sha256;

use crate::numbers::floor_f64_to_u32;

/// Default random source held by a town.
pub type TownRng = CountingRng<SmallRng>;

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    /// Construct a stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self::wrap(SmallRng::seed_from_u64(derive_stream_seed(seed, b"town")))
    }

    /// Construct the stream for the `index`-th town of an expedition.
    #[must_use]
    pub fn for_town(seed: u64, index: u32) -> Self {
        let mut tag = *b"town-\0\0\0\0";
        tag[5..].copy_from_slice(&index.to_le_bytes());
        Self::wrap(SmallRng::seed_from_u64(derive_stream_seed(seed, &tag)))
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Wrap an arbitrary source, starting the draw count at zero.
    pub const fn wrap(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

pub(crate) fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Map a raw sample onto the open interval (0, 1).
#[must_use]
pub fn sample_ratio(sample: u32) -> f64 {
    let denom = f64::from(u32::MAX) + 1.0;
    ((f64::from(sample) + 0.5) / denom).clamp(0.0, 1.0)
}

/// Draw a uniform ratio in (0, 1).
pub fn ratio<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    sample_ratio(rng.next_u32())
}

/// Roll a die with `sides` faces, yielding a value in `1..=sides`.
///
/// A zero-sided die still consumes its draw and yields 1.
pub fn die<R: RngCore + ?Sized>(rng: &mut R, sides: u32) -> u32 {
    let draw = ratio(rng);
    if sides <= 1 {
        return 1;
    }
    let offset = floor_f64_to_u32(draw * f64::from(sides)).min(sides - 1);
    offset + 1
}
