//! Accumulation buffer and image encoding.
//!
//! A canvas stores the running *sum* of radiance samples per pixel, plus how
//! many samples per pixel went into that sum. Averaging happens only when
//! encoding, so new samples can keep landing without rescaling history.

use crate::Color;
use image::RgbImage;
use luma_math::Interval;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit gamma-encoded RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let encode = |c: f32| (255.0 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Largest pixel count a render may allocate canvases for (8192 x 8192).
pub const MAX_PIXELS: u64 = 1 << 26;

/// Row-major buffer of accumulated color. Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    sample_count: u32,
}

impl Canvas {
    /// Create a new canvas filled with black and no samples.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
            sample_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel summed into this canvas.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Record that every pixel received `samples` more samples.
    pub fn add_sample_count(&mut self, samples: u32) {
        self.sample_count = self.sample_count.saturating_add(samples);
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Add a radiance sample to the pixel at (x, y).
    #[inline]
    pub fn accumulate(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] += color;
    }

    /// Reset every pixel to black and the sample count to zero.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
        self.sample_count = 0;
    }

    /// Merge another canvas of the same size into this one.
    ///
    /// Pixel sums and sample counts both add, so merging is commutative.
    pub fn add(&mut self, other: &Canvas) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "cannot merge canvases of different sizes"
        );
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst += *src;
        }
        self.add_sample_count(other.sample_count);
    }

    /// Averaged copy clamped to [0, 1], carrying a sample count of 1.
    pub fn normalized(&self) -> Canvas {
        let scale = if self.sample_count > 0 {
            1.0 / self.sample_count as f32
        } else {
            0.0
        };
        let unit = Interval::UNIT;
        let pixels = self
            .pixels
            .iter()
            .map(|c| {
                let c = *c * scale;
                Color::new(unit.clamp(c.x), unit.clamp(c.y), unit.clamp(c.z))
            })
            .collect();

        Canvas {
            width: self.width,
            height: self.height,
            pixels,
            sample_count: 1,
        }
    }

    /// Encode to a gamma-corrected 8-bit RGB image.
    ///
    /// Each sum is divided by the sample count, square-rooted and clamped.
    /// Returns None if the output buffer cannot be allocated; callers skip
    /// the frame and try again after the next pass.
    pub fn make_image(&self) -> Option<RgbImage> {
        let scale = 1.0 / self.sample_count.max(1) as f32;

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(self.pixels.len() * 3).ok()?;
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color * scale));
        }

        RgbImage::from_raw(self.width, self.height, bytes)
    }
}
