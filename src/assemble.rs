use image::{imageops::replace, RgbImage};
use indicatif::ProgressBar;

use crate::{
    color::distance,
    error::{MosaicError, Result},
    matcher::nearest,
    preprocess::PixelGrid,
    tiles::{open_rgb, DomainTile},
};

/// Replace every cell of `grid` with its closest domain tile and stitch the
/// tiles together in the same row and column order.
///
/// `pb` advances by one per resolved cell.
pub(crate) fn assemble(grid: &PixelGrid, tiles: &[DomainTile], pb: &ProgressBar) -> Result<RgbImage> {
    if tiles.is_empty() {
        return Err(MosaicError::input("no domain tiles to build the mosaic from"));
    }
    pb.set_length(grid.cells());
    let mut rows = Vec::with_capacity(grid.height() as usize);
    for (y, row) in grid.rows().enumerate() {
        let mut images = Vec::with_capacity(grid.width() as usize);
        for (x, color) in row.enumerate() {
            let tile = nearest(color, tiles)?;
            log::trace!(
                "({x}, {y}) {:?} -> {} at {:.1}",
                color.0,
                tile.path.display(),
                distance(color, &tile.color)
            );
            images.push(open_rgb(&tile.path)?);
            pb.inc(1);
        }
        rows.push(concat_horizontal(&images)?);
    }
    log::debug!("compiling {} rows", rows.len());
    concat_vertical(&rows)
}

/// Place `images` side by side. All must share one height.
pub(crate) fn concat_horizontal(images: &[RgbImage]) -> Result<RgbImage> {
    let Some(first) = images.first() else {
        return Err(MosaicError::Assembly("cannot concatenate an empty row".to_string()));
    };
    let height = first.height();
    if let Some(odd) = images.iter().find(|img| img.height() != height) {
        return Err(MosaicError::Assembly(format!(
            "tile heights differ within a row: {} vs {}",
            height,
            odd.height()
        )));
    }
    let width = images.iter().map(|img| img.width()).sum();
    let mut canvas = RgbImage::new(width, height);
    let mut x = 0i64;
    for img in images {
        replace(&mut canvas, img, x, 0);
        x += i64::from(img.width());
    }
    Ok(canvas)
}

/// Stack `images` top to bottom. All must share one width.
pub(crate) fn concat_vertical(images: &[RgbImage]) -> Result<RgbImage> {
    let Some(first) = images.first() else {
        return Err(MosaicError::Assembly("cannot concatenate zero rows".to_string()));
    };
    let width = first.width();
    if let Some(odd) = images.iter().find(|img| img.width() != width) {
        return Err(MosaicError::Assembly(format!(
            "row widths differ: {} vs {}",
            width,
            odd.width()
        )));
    }
    let height = images.iter().map(|img| img.height()).sum();
    let mut canvas = RgbImage::new(width, height);
    let mut y = 0i64;
    for img in images {
        replace(&mut canvas, img, 0, y);
        y += i64::from(img.height());
    }
    Ok(canvas)
}
