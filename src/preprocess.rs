use image::{
    buffer::Rows,
    imageops::{crop_imm, resize, FilterType::Lanczos3},
    Rgb, RgbImage,
};

use crate::error::{MosaicError, Result};

/// Centered square of side `min(width, height)`.
pub(crate) fn crop_center(image: &RgbImage) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(MosaicError::input("cannot crop a zero-sized image"));
    }
    let side = width.min(height);
    Ok(crop_imm(image, (width - side) / 2, (height - side) / 2, side, side).to_image())
}

/// Height after scaling `width`×`height` to `target_width`, rounded to the
/// nearest pixel and never below one.
pub(crate) fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let ratio = f64::from(target_width) / f64::from(width);
    ((f64::from(height) * ratio).round() as u32).max(1)
}

/// Row-major grid of target colors, one cell per mosaic tile.
///
/// Always holds at least one row and one column.
#[derive(Debug)]
pub(crate) struct PixelGrid(RgbImage);

impl PixelGrid {
    pub(crate) fn new(image: RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(MosaicError::input("target grid needs at least one row and one column"));
        }
        Ok(PixelGrid(image))
    }

    pub(crate) fn width(&self) -> u32 {
        self.0.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.0.height()
    }

    pub(crate) fn cells(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub(crate) fn rows(&self) -> Rows<'_, Rgb<u8>> {
        self.0.rows()
    }
}

/// Crop `image` to a centered square, then scale it so its width is
/// `working_width`.
pub(crate) fn preprocess(image: &RgbImage, working_width: u32) -> Result<PixelGrid> {
    if working_width == 0 {
        return Err(MosaicError::input("working width must be positive"));
    }
    let square = crop_center(image)?;
    let height = scaled_height(square.width(), square.height(), working_width);
    log::debug!(
        "target {}x{} -> {}x{}",
        image.width(),
        image.height(),
        working_width,
        height
    );
    PixelGrid::new(resize(&square, working_width, height, Lanczos3))
}
