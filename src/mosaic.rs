use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    assemble::assemble,
    config::{MosaicConfig, ZoomConfig},
    menu::select,
    output::{clear_dir, file_name, list_dirs, list_files, next_output_path, save_sequential},
    preprocess::preprocess,
    progress::bar,
    tiles::{extract_tiles, open_rgb, prepare_thumbnails},
    zoom::{write_clip, ZoomPlan},
};

/// Thumbnails a chosen image set, picks a target image and writes the mosaic
/// as the next numbered file of the output folder.
pub(crate) fn mosaic(config: &MosaicConfig) -> Result<PathBuf> {
    println!("[1/4] Clearing processed thumbnails.");
    clear_dir(&config.processed_dir).context("Failed to clear the thumbnail folder.")?;
    println!("[1/4] Processed images cleared.");

    println!("[2/4] Preprocessing the source images.");
    let folders = list_dirs(&config.source_root).context("Failed to list the source folders.")?;
    let names = folders.iter().map(|p| file_name(p)).collect::<Vec<_>>();
    let folder = &folders[select("Choose folder to use:", &names, config.folder.as_deref())
        .context("No folder to choose images from.")?];
    let pb = bar(0, "Preparing thumbnails:")?;
    let thumbnails = prepare_thumbnails(folder, &config.processed_dir, config.tile_size, &pb)
        .context("Failed to prepare the thumbnails.")?;
    pb.finish();
    log::info!("{} thumbnails from {}", thumbnails.len(), folder.display());
    println!("[2/4] Source images processed.");

    println!("[3/4] Calculating the average colors.");
    let tiles = extract_tiles(&thumbnails).context("Failed to calculate the average colors.")?;
    println!("[3/4] Avg color calculated for every image.");

    println!("[4/4] Generating the mosaic image.");
    let targets = list_files(&config.targets_dir).context("Failed to list the images to convert.")?;
    let names = targets.iter().map(|p| file_name(p)).collect::<Vec<_>>();
    let target = &targets[select("Choose image to convert:", &names, config.image.as_deref())
        .context("No image to convert.")?];
    let grid = preprocess(&open_rgb(target)?, config.working_width)
        .context("Failed to preprocess the target image.")?;
    log::info!(
        "{}x{} tiles of {}px",
        grid.width(),
        grid.height(),
        config.tile_size
    );
    let pb = bar(grid.cells(), "Generating image:")?;
    let image = assemble(&grid, &tiles, &pb).context("Failed to generate the mosaic image.")?;
    pb.finish();
    println!("Compiling final image...");
    let path = save_sequential(&image, &config.output_dir, "jpg")
        .context("Failed to save the mosaic image.")?;
    println!("[4/4] Image compiled: {}", path.display());
    Ok(path)
}

/// Picks an image and writes a zoom clip toward its center.
pub(crate) fn zoom(config: &ZoomConfig) -> Result<PathBuf> {
    let images = list_files(&config.source_dir).context("Failed to list the images to zoom.")?;
    let names = images.iter().map(|p| file_name(p)).collect::<Vec<_>>();
    let source = &images[select("Choose image to zoom:", &names, config.image.as_deref())
        .context("No images to zoom.")?];
    println!("Retrieving image...");
    let image = open_rgb(source)?;
    let plan = ZoomPlan::new(image.width(), image.height(), &config.settings)
        .context("Failed to plan the zoom.")?;
    log::info!(
        "{} frames ({} planned) from {}px down to {}px, step {}px",
        plan.frame_count(),
        plan.total_frames,
        plan.short_side,
        plan.final_short_side,
        plan.step
    );
    let path = next_output_path(&config.output_dir, "gif")?;
    let pb = bar(u64::from(plan.frame_count()), "Generating video:")?;
    write_clip(&image, &plan, config.settings.fps, &path, &pb)
        .context("Failed to write the zoom clip.")?;
    pb.finish();
    println!("Video generated: {}", path.display());
    Ok(path)
}
