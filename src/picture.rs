use std::iter::Sum;
use std::ops::{Add, Div, Mul};
use std::path::Path;

use bytemuck_derive::{AnyBitPattern, NoUninit};
use image::ColorType;

use crate::error::Result;

/// Linear RGB radiance, unbounded above.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Sum for Color {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        iter.fold(Color::BLACK, |acc, color| acc + color)
    }
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Color::new(rng.f64(), rng.f64(), rng.f64())
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

/// Component-wise product, used to apply attenuation.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Self) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, rhs: f64) -> Self::Output {
        Color::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, AnyBitPattern, NoUninit)]
#[repr(C)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Gamma-corrects one channel of an averaged sample and quantizes it to `[0, 255]`.
fn quantize(value: f64, gamma: f64) -> u8 {
    let corrected = value.powf(1.0 / gamma);
    // NaN falls through clamp unchanged and saturates to 0 in the cast
    (256.0 * corrected.clamp(0.0, 0.999)) as u8
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }

    /// `sum` is the accumulated color of `samples` samples.
    pub fn from_samples(sum: Color, samples: u32, gamma: f64) -> Self {
        let average = sum / samples as f64;
        Rgb8::new(
            quantize(average.r, gamma),
            quantize(average.g, gamma),
            quantize(average.b, gamma),
        )
    }
}

pub struct Picture<P> {
    pixels: P,
    size: (u32, u32),
}

impl<P> Picture<P> {
    pub fn new(pixels: P, size: (u32, u32)) -> Self {
        Picture { pixels, size }
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    fn to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }
}

impl Picture<Vec<Rgb8>> {
    pub fn blank(width: u32, height: u32) -> Self {
        Picture::new(vec![Rgb8::default(); width as usize * height as usize], (width, height))
    }

    pub fn pixel(&self, x: u32, y: u32) -> &Rgb8 {
        &self.pixels[self.to_index(x, y)]
    }

    pub fn buffer(&self) -> &[Rgb8] {
        &self.pixels
    }

    pub fn buffer_mut(&mut self) -> &mut [Rgb8] {
        &mut self.pixels
    }

    /// Encodes the picture with the format implied by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        image::save_buffer(
            path,
            bytemuck::cast_slice(self.pixels.as_slice()),
            self.width(),
            self.height(),
            ColorType::Rgb8,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_clamps_to_byte_range() {
        assert_eq!(quantize(0.0, 2.0), 0);
        assert_eq!(quantize(1.0, 2.0), 255);
        assert_eq!(quantize(4.0, 2.0), 255);
        assert_eq!(quantize(-1.0, 1.0), 0);
    }

    #[test]
    fn test_quantize_applies_gamma() {
        // sqrt(0.25) = 0.5, 0.5 * 256 = 128
        assert_eq!(quantize(0.25, 2.0), 128);
        assert_eq!(quantize(0.25, 1.0), 64);
    }

    #[test]
    fn test_from_samples_averages() {
        let sum = Color::new(1.0, 2.0, 0.0);
        assert_eq!(Rgb8::from_samples(sum, 4, 2.0), Rgb8::new(128, 181, 0));
    }

    #[test]
    fn test_color_ops() {
        let a = Color::new(0.5, 1.0, 2.0);
        let b = Color::new(2.0, 0.5, 0.25);
        assert_eq!(a * b, Color::new(1.0, 0.5, 0.5));
        assert_eq!(2.0 * a, Color::new(1.0, 2.0, 4.0));
        assert_eq!([a, b].into_iter().sum::<Color>(), Color::new(2.5, 1.5, 2.25));
    }

    #[test]
    fn test_rgb8_is_packed() {
        let picture = Picture::new(vec![Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)], (2, 1));
        let bytes: &[u8] = bytemuck::cast_slice(picture.buffer());
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(picture.pixel(1, 0), &Rgb8::new(4, 5, 6));
    }
}
