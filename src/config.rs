use std::path::{Path, PathBuf};

use clap::ArgMatches;

pub(crate) const SOURCE_IMAGES: &str = "SourceImages";
pub(crate) const PROCESSED_IMAGES: &str = "ProcessedImages";
pub(crate) const IMAGES_TO_CONVERT: &str = "ImagesToConvert";
pub(crate) const CONVERTED_IMAGES: &str = "ConvertedImages";
pub(crate) const GENERATED_CLIPS: &str = "GeneratedClips";

/// Folders and sizes for one mosaic run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MosaicConfig {
    /// Holds one subfolder per domain image set.
    pub(crate) source_root: PathBuf,
    /// Emptied and refilled with thumbnails on every run.
    pub(crate) processed_dir: PathBuf,
    pub(crate) targets_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) tile_size: u32,
    pub(crate) working_width: u32,
    pub(crate) folder: Option<String>,
    pub(crate) image: Option<String>,
}

impl MosaicConfig {
    pub(crate) fn with_root(root: &Path) -> Self {
        MosaicConfig {
            source_root: root.join(SOURCE_IMAGES),
            processed_dir: root.join(PROCESSED_IMAGES),
            targets_dir: root.join(IMAGES_TO_CONVERT),
            output_dir: root.join(CONVERTED_IMAGES),
            tile_size: 32,
            working_width: 200,
            folder: None,
            image: None,
        }
    }

    pub(crate) fn from_matches(root: &Path, matches: &ArgMatches) -> Self {
        let defaults = MosaicConfig::with_root(root);
        MosaicConfig {
            source_root: path_or(matches, "source", defaults.source_root),
            processed_dir: path_or(matches, "processed", defaults.processed_dir),
            targets_dir: path_or(matches, "targets", defaults.targets_dir),
            output_dir: path_or(matches, "output", defaults.output_dir),
            tile_size: matches
                .get_one::<u32>("tile_size")
                .copied()
                .unwrap_or(defaults.tile_size),
            working_width: matches
                .get_one::<u32>("width")
                .copied()
                .unwrap_or(defaults.working_width),
            folder: matches.get_one::<String>("folder").cloned(),
            image: matches.get_one::<String>("image").cloned(),
        }
    }
}

/// Clip parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ZoomSettings {
    /// Short side of every output frame, in pixels.
    pub(crate) resolution: u32,
    pub(crate) zoom_factor: f64,
    pub(crate) fps: u32,
    /// Seconds.
    pub(crate) duration: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        ZoomSettings {
            resolution: 1080,
            zoom_factor: 60.0,
            fps: 24,
            duration: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ZoomConfig {
    pub(crate) source_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) settings: ZoomSettings,
    pub(crate) image: Option<String>,
}

impl ZoomConfig {
    pub(crate) fn with_root(root: &Path) -> Self {
        ZoomConfig {
            source_dir: root.join(CONVERTED_IMAGES),
            output_dir: root.join(GENERATED_CLIPS),
            settings: ZoomSettings::default(),
            image: None,
        }
    }

    pub(crate) fn from_matches(root: &Path, matches: &ArgMatches) -> Self {
        let defaults = ZoomConfig::with_root(root);
        let d = defaults.settings;
        ZoomConfig {
            source_dir: path_or(matches, "source", defaults.source_dir),
            output_dir: path_or(matches, "output", defaults.output_dir),
            settings: ZoomSettings {
                resolution: matches
                    .get_one::<u32>("resolution")
                    .copied()
                    .unwrap_or(d.resolution),
                zoom_factor: matches
                    .get_one::<f64>("zoom")
                    .copied()
                    .unwrap_or(d.zoom_factor),
                fps: matches.get_one::<u32>("fps").copied().unwrap_or(d.fps),
                duration: matches
                    .get_one::<f64>("duration")
                    .copied()
                    .unwrap_or(d.duration),
            },
            image: matches.get_one::<String>("image").cloned(),
        }
    }
}

fn path_or(matches: &ArgMatches, id: &str, default: PathBuf) -> PathBuf {
    matches.get_one::<PathBuf>(id).cloned().unwrap_or(default)
}
