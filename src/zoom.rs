//! Zoom clips: a sequence of ever smaller centered crops of one image, each
//! resized to a fixed frame size, written as an animated GIF.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    imageops::{crop_imm, resize, FilterType::Lanczos3},
    Delay, DynamicImage, Frame, RgbImage,
};
use indicatif::ProgressBar;

use crate::{
    config::ZoomSettings,
    error::{MosaicError, Result},
};

/// Frame geometry derived once from the source dimensions and settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ZoomPlan {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) total_frames: u32,
    pub(crate) short_side: u32,
    pub(crate) final_short_side: u32,
    pub(crate) step: u32,
    /// Output frame size, `(width, height)`.
    pub(crate) frame_size: (u32, u32),
}

impl ZoomPlan {
    pub(crate) fn new(width: u32, height: u32, settings: &ZoomSettings) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MosaicError::input("cannot zoom into a zero-sized image"));
        }
        if settings.zoom_factor.is_nan() || settings.zoom_factor <= 1.0 {
            return Err(MosaicError::input("zoom factor must be greater than 1"));
        }
        if settings.fps == 0 || settings.resolution == 0 || settings.duration.is_nan() || settings.duration <= 0.0 {
            return Err(MosaicError::input(
                "frame rate, duration and resolution must be positive",
            ));
        }
        let total_frames = (f64::from(settings.fps) * settings.duration).round() as u32;
        if total_frames == 0 {
            return Err(MosaicError::input("clip would have no frames"));
        }
        let short_side = width.min(height);
        let final_short_side = (f64::from(short_side) / settings.zoom_factor).round() as u32;
        let step =
            (f64::from(short_side - final_short_side) / f64::from(total_frames)).round() as u32;
        if step == 0 {
            return Err(MosaicError::input(format!(
                "a {short_side}px short side cannot shrink to {final_short_side}px over {total_frames} frames"
            )));
        }
        let resolution = settings.resolution;
        let long_side = if width <= height {
            scale(height, resolution, width)
        } else {
            scale(width, resolution, height)
        };
        let long_side = u32::try_from(long_side)
            .ok()
            .filter(|&side| side <= MAX_FRAME_SIDE && resolution <= MAX_FRAME_SIDE)
            .ok_or_else(|| {
                MosaicError::input(format!(
                    "a {resolution}px short side gives a {long_side}px long side; frames are limited to {MAX_FRAME_SIDE}px"
                ))
            })?;
        let frame_size = if width <= height {
            (resolution, long_side)
        } else {
            (long_side, resolution)
        };
        Ok(ZoomPlan {
            width,
            height,
            total_frames,
            short_side,
            final_short_side,
            step,
            frame_size,
        })
    }

    /// Short side of every crop, largest first, stopping before the final
    /// short side.
    pub(crate) fn crop_sizes(&self) -> impl Iterator<Item = u32> {
        (self.final_short_side + 1..=self.short_side)
            .rev()
            .step_by(self.step as usize)
    }

    pub(crate) fn frame_count(&self) -> u32 {
        (self.short_side - self.final_short_side).div_ceil(self.step)
    }

    /// Centered crop whose short side is `size`, resized to the frame size.
    pub(crate) fn frame(&self, image: &RgbImage, size: u32) -> RgbImage {
        // size <= short side, so the long side of the crop fits inside the image
        let (crop_width, crop_height) = if self.width <= self.height {
            (size, scale(self.height, size, self.width).min(u64::from(self.height)) as u32)
        } else {
            (scale(self.width, size, self.height).min(u64::from(self.width)) as u32, size)
        };
        let x = (self.width - crop_width) / 2;
        let y = (self.height - crop_height) / 2;
        let crop = crop_imm(image, x, y, crop_width, crop_height).to_image();
        let (frame_width, frame_height) = self.frame_size;
        resize(&crop, frame_width, frame_height, Lanczos3)
    }
}

/// Largest side a GIF frame can have.
const MAX_FRAME_SIDE: u32 = u16::MAX as u32;

/// `value * numerator / denominator`, truncated, at least one.
fn scale(value: u32, numerator: u32, denominator: u32) -> u64 {
    (u64::from(value) * u64::from(numerator) / u64::from(denominator)).max(1)
}

/// Streams frames into an animated GIF.
pub(crate) struct ClipWriter<W: Write> {
    encoder: GifEncoder<W>,
    delay: Delay,
}

impl ClipWriter<BufWriter<File>> {
    pub(crate) fn create(path: &Path, fps: u32) -> Result<Self> {
        let file = File::create(path).map_err(|e| MosaicError::storage(path, e))?;
        ClipWriter::new(BufWriter::new(file), fps).map_err(|e| MosaicError::storage(path, e))
    }
}

impl<W: Write> ClipWriter<W> {
    pub(crate) fn new(writer: W, fps: u32) -> image::ImageResult<Self> {
        let mut encoder = GifEncoder::new_with_speed(writer, 10);
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(ClipWriter {
            encoder,
            delay: Delay::from_numer_denom_ms(1000, fps),
        })
    }

    pub(crate) fn write_frame(&mut self, frame: RgbImage) -> image::ImageResult<()> {
        let rgba = DynamicImage::ImageRgb8(frame).into_rgba8();
        self.encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))
    }
}

/// Write every frame of `plan` for `image` to `path`. Returns the number of
/// frames written.
pub(crate) fn write_clip(image: &RgbImage, plan: &ZoomPlan, fps: u32, path: &Path, pb: &ProgressBar) -> Result<u32> {
    let mut writer = ClipWriter::create(path, fps)?;
    pb.set_length(u64::from(plan.frame_count()));
    let mut written = 0;
    for size in plan.crop_sizes() {
        writer
            .write_frame(plan.frame(image, size))
            .map_err(|e| MosaicError::storage(path, e))?;
        written += 1;
        pb.inc(1);
    }
    log::debug!("{written} frames written to {}", path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use image::{codecs::gif::GifDecoder, AnimationDecoder, Rgb};
    use tempfile::tempdir;

    use super::*;

    fn settings(resolution: u32, zoom_factor: f64, fps: u32, duration: f64) -> ZoomSettings {
        ZoomSettings {
            resolution,
            zoom_factor,
            fps,
            duration,
        }
    }

    #[test]
    fn plan_arithmetic_for_a_five_second_clip() {
        let plan = ZoomPlan::new(1000, 1500, &settings(1080, 60.0, 24, 5.0)).unwrap();
        assert_eq!(plan.total_frames, 120);
        assert_eq!(plan.short_side, 1000);
        assert_eq!(plan.final_short_side, 17);
        assert_eq!(plan.step, 8);
        assert_eq!(plan.frame_size, (1080, 1620));
        let sizes = plan.crop_sizes().collect::<Vec<_>>();
        assert_eq!(sizes.len(), 123);
        assert_eq!(plan.frame_count(), 123);
        assert_eq!(sizes.first(), Some(&1000));
        assert_eq!(sizes.last(), Some(&24));
        assert!(sizes.windows(2).all(|w| w[0] - w[1] == 8));
    }

    #[test]
    fn landscape_frames_keep_the_resolution_on_the_height() {
        let plan = ZoomPlan::new(1920, 1080, &settings(720, 2.0, 10, 1.0)).unwrap();
        assert_eq!(plan.frame_size, (1280, 720));
    }

    #[test]
    fn zero_step_is_rejected() {
        let result = ZoomPlan::new(30, 40, &settings(12, 2.0, 24, 5.0));
        assert!(matches!(result, Err(MosaicError::Input(_))));
    }

    #[test]
    fn oversized_frames_are_rejected_before_rendering() {
        let tall = ZoomPlan::new(1000, 4000, &settings(20_000, 60.0, 24, 5.0));
        assert!(matches!(tall, Err(MosaicError::Input(_))));
        let wrapping = ZoomPlan::new(10_000, u32::MAX, &settings(u32::MAX, 60.0, 24, 5.0));
        assert!(matches!(wrapping, Err(MosaicError::Input(_))));
        let short = ZoomPlan::new(1000, 1000, &settings(70_000, 60.0, 24, 5.0));
        assert!(matches!(short, Err(MosaicError::Input(_))));
        let widest = ZoomPlan::new(1000, 2000, &settings(32_767, 60.0, 24, 5.0)).unwrap();
        assert_eq!(widest.frame_size, (32_767, 65_534));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        for s in [
            settings(12, 1.0, 24, 5.0),
            settings(12, 2.0, 0, 5.0),
            settings(12, 2.0, 24, 0.0),
            settings(0, 2.0, 24, 5.0),
        ] {
            assert!(matches!(ZoomPlan::new(100, 100, &s), Err(MosaicError::Input(_))));
        }
    }

    #[test]
    fn frames_are_centered_crops_at_frame_size() {
        let mut image = RgbImage::from_pixel(40, 30, Rgb([0, 0, 0]));
        for x in 10..30 {
            for y in 8..23 {
                image.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let plan = ZoomPlan::new(40, 30, &settings(12, 2.0, 4, 1.0)).unwrap();
        assert_eq!(plan.frame_size, (16, 12));
        let first = plan.frame(&image, 30);
        assert_eq!(first.dimensions(), (16, 12));
        let last = plan.frame(&image, 15);
        assert_eq!(last.dimensions(), (16, 12));
        assert_eq!(last.get_pixel(8, 6), &Rgb([255, 255, 255]));
    }

    #[test]
    fn clip_contains_one_frame_per_crop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("1.gif");
        let image = RgbImage::from_pixel(40, 30, Rgb([30, 60, 90]));
        let plan = ZoomPlan::new(40, 30, &settings(12, 2.0, 4, 1.0)).unwrap();
        assert_eq!(plan.crop_sizes().collect::<Vec<_>>(), vec![30, 26, 22, 18]);

        let pb = ProgressBar::hidden();
        let written = write_clip(&image, &plan, 4, &path, &pb).unwrap();
        assert_eq!(written, 4);
        assert_eq!(pb.position(), 4);

        let decoder = GifDecoder::new(BufReader::new(File::open(&path).unwrap())).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.buffer().dimensions() == (16, 12)));
    }
}
