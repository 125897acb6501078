#![allow(dead_code)]

use rand::RngCore;
use std::collections::VecDeque;

pub const LOW: u32 = 0;
pub const HIGH: u32 = u32::MAX;

/// Replays queued samples in order and counts every draw.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    samples: VecDeque<u32>,
    pub calls: u32,
}

impl ScriptedRng {
    pub fn new(samples: &[u32]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            calls: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.calls += 1;
        self.samples.pop_front().expect("scripted rng exhausted")
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let value = self.next_u32().to_le_bytes();
        for (idx, byte) in dest.iter_mut().enumerate() {
            *byte = value[idx % value.len()];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Sample that lands a die with `sides` faces on `face`.
pub fn face(face: u32, sides: u32) -> u32 {
    let offset = (u64::from(face - 1) << 32) / u64::from(sides) + 1;
    u32::try_from(offset).expect("face sample fits in u32")
}
