//! Delay line on a buffer allocated once at construction.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

use alloc::boxed::Box;
use alloc::vec;

#[derive(Debug, Clone)]
pub struct DelayLine {
    write_ptr: usize,
    line: Box<[f32]>,
}

impl DelayLine {
    pub fn new(max_delay: usize) -> Self {
        Self {
            write_ptr: 0,
            line: vec![0.0; max_delay].into_boxed_slice(),
        }
    }

    pub fn reset(&mut self) {
        self.line.fill(0.0);
        self.write_ptr = 0;
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        let size = self.line.len();
        self.line[self.write_ptr] = sample;
        self.write_ptr = (self.write_ptr + size - 1) % size;
    }

    /// Integral delay, from `1` up to the line length minus one.
    #[inline]
    pub fn read(&self, delay: usize) -> f32 {
        self.line[(self.write_ptr + delay) % self.line.len()]
    }

    /// Linearly interpolated fractional delay.
    #[inline]
    pub fn read_frac(&self, delay: f32) -> f32 {
        let delay_integral = delay as usize;
        let delay_fractional = delay - delay_integral as f32;
        let a = self.read(delay_integral);
        let b = self.read(delay_integral + 1);

        a + (b - a) * delay_fractional
    }
}
