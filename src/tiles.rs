use std::path::{Path, PathBuf};

use image::{
    imageops::{resize, FilterType::Lanczos3},
    ImageReader, Rgb, RgbImage,
};
use indicatif::ProgressBar;

use crate::{
    color::average_color,
    error::{MosaicError, Result},
    output::{clear_dir, list_files},
    preprocess::crop_center,
};

/// A domain image reduced to its average color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DomainTile {
    pub(crate) color: Rgb<u8>,
    pub(crate) path: PathBuf,
}

pub(crate) fn open_rgb(path: &Path) -> Result<RgbImage> {
    let image = ImageReader::open(path)
        .map_err(|e| MosaicError::storage(path, e))?
        .with_guessed_format()
        .map_err(|e| MosaicError::storage(path, e))?
        .decode()
        .map_err(|e| MosaicError::storage(path, e))?;
    Ok(image.into_rgb8())
}

/// Square-crop and resize every image of `folder` to `size`×`size`, writing
/// them into the emptied `processed` folder. Returns the thumbnail paths in
/// input order.
pub(crate) fn prepare_thumbnails(
    folder: &Path,
    processed: &Path,
    size: u32,
    pb: &ProgressBar,
) -> Result<Vec<PathBuf>> {
    if size == 0 {
        return Err(MosaicError::input("thumbnail size must be positive"));
    }
    let images = list_files(folder)?;
    if images.is_empty() {
        return Err(MosaicError::input(format!(
            "no images to convert in {}",
            folder.display()
        )));
    }
    clear_dir(processed)?;
    pb.set_length(images.len() as u64);
    let mut thumbnails = Vec::with_capacity(images.len());
    for (i, path) in images.iter().enumerate() {
        let image = open_rgb(path)?;
        let square = crop_center(&image)?;
        let thumbnail = resize(&square, size, size, Lanczos3);
        let target = processed.join(format!("img_{i:05}.jpg"));
        thumbnail
            .save(&target)
            .map_err(|e| MosaicError::storage(&target, e))?;
        log::debug!("{} -> {}", path.display(), target.display());
        thumbnails.push(target);
        pb.inc(1);
    }
    Ok(thumbnails)
}

/// One [`DomainTile`] per image, in input order.
pub(crate) fn extract_tiles(paths: &[PathBuf]) -> Result<Vec<DomainTile>> {
    if paths.is_empty() {
        return Err(MosaicError::input("no domain images to extract colors from"));
    }
    paths
        .iter()
        .map(|path| {
            let color = average_color(&open_rgb(path)?)?;
            Ok(DomainTile {
                color,
                path: path.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
        RgbImage::from_pixel(width, height, Rgb(color))
            .save(path)
            .unwrap();
    }

    #[test]
    fn extraction_preserves_length_and_order() {
        let dir = tempdir().unwrap();
        let colors = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 0, 0]];
        let paths = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let path = dir.path().join(format!("{i}.png"));
                write_png(&path, 8, 8, c);
                path
            })
            .collect::<Vec<_>>();
        let tiles = extract_tiles(&paths).unwrap();
        assert_eq!(tiles.len(), paths.len());
        for ((tile, path), color) in tiles.iter().zip(&paths).zip(colors) {
            assert_eq!(&tile.path, path);
            assert_eq!(tile.color, Rgb(color));
        }
    }

    #[test]
    fn extraction_rejects_empty_input() {
        assert!(matches!(extract_tiles(&[]), Err(MosaicError::Input(_))));
    }

    #[test]
    fn unreadable_tile_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            extract_tiles(&[path]),
            Err(MosaicError::Storage { .. })
        ));
    }

    #[test]
    fn thumbnails_are_uniform_squares() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("holiday");
        let processed = dir.path().join("ProcessedImages");
        fs::create_dir(&source).unwrap();
        fs::create_dir(&processed).unwrap();
        fs::write(processed.join("stale.jpg"), b"").unwrap();
        write_png(&source.join("a.png"), 64, 40, [10, 20, 30]);
        write_png(&source.join("b.png"), 20, 90, [200, 100, 0]);
        write_png(&source.join("c.png"), 16, 16, [0, 0, 0]);

        let pb = ProgressBar::hidden();
        let thumbnails = prepare_thumbnails(&source, &processed, 32, &pb).unwrap();
        assert_eq!(pb.position(), 3);
        assert_eq!(thumbnails.len(), 3);
        assert!(!processed.join("stale.jpg").exists());
        for path in &thumbnails {
            assert_eq!(open_rgb(path).unwrap().dimensions(), (32, 32));
        }
        assert_eq!(list_files(&processed).unwrap(), thumbnails);
        let tiles = extract_tiles(&thumbnails).unwrap();
        assert_eq!(
            tiles.iter().map(|t| &t.path).collect::<Vec<_>>(),
            thumbnails.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_source_folder_is_an_input_error() {
        let dir = tempdir().unwrap();
        let pb = ProgressBar::hidden();
        let result = prepare_thumbnails(dir.path(), &dir.path().join("out"), 32, &pb);
        assert!(matches!(result, Err(MosaicError::Input(_))));
    }
}
