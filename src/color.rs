use image::{Rgb, RgbImage};
use num::pow::Pow;

use crate::error::{MosaicError, Result};

/// Mean of every channel over all pixels, truncated toward zero.
pub(crate) fn average_color(image: &RgbImage) -> Result<Rgb<u8>> {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return Err(MosaicError::input("cannot average a zero-sized image"));
    }
    let mut sums = [0u64; 3];
    for Rgb(rgb) in image.pixels() {
        for (sum, &c) in sums.iter_mut().zip(rgb) {
            *sum += u64::from(c);
        }
    }
    // a mean of u8 values always fits back into u8
    Ok(Rgb(sums.map(|sum| (sum / count) as u8)))
}

/// Euclidean distance in RGB space.
pub(crate) fn distance(a: &Rgb<u8>, b: &Rgb<u8>) -> f64 {
    let Rgb(a) = a;
    let Rgb(b) = b;
    a.iter()
        .zip(b)
        .map(|(&a, &b)| (f64::from(a) - f64::from(b)).pow(2u8))
        .sum::<f64>()
        .sqrt()
}

/// Squared Euclidean distance, exact in integers.
///
/// Orders candidates the same way as [`distance`] without rounding, so equal
/// colors always compare equal.
pub(crate) fn squared_distance(a: &Rgb<u8>, b: &Rgb<u8>) -> u32 {
    let Rgb(a) = a;
    let Rgb(b) = b;
    a.iter()
        .zip(b)
        .map(|(&a, &b)| (i32::from(a) - i32::from(b)).unsigned_abs().pow(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_truncates() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([10, 0, 255]));
        image.put_pixel(1, 0, Rgb([11, 1, 254]));
        assert_eq!(average_color(&image).unwrap(), Rgb([10, 0, 254]));
    }

    #[test]
    fn average_of_uniform_image_is_its_color() {
        let image = RgbImage::from_pixel(32, 32, Rgb([12, 200, 99]));
        assert_eq!(average_color(&image).unwrap(), Rgb([12, 200, 99]));
    }

    #[test]
    fn average_rejects_empty_image() {
        let image = RgbImage::new(0, 4);
        assert!(matches!(average_color(&image), Err(MosaicError::Input(_))));
    }

    #[test]
    fn distances_agree() {
        let a = Rgb([200, 10, 10]);
        let b = Rgb([255, 0, 0]);
        assert_eq!(squared_distance(&a, &b), 55 * 55 + 10 * 10 + 10 * 10);
        assert!((distance(&a, &b) - 56.789).abs() < 1e-3);
        assert_eq!(distance(&a, &a), 0.0);
    }
}
