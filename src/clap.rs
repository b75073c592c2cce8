use std::path::PathBuf;

use clap::{arg, value_parser, Arg, ArgAction, ArgMatches, Command};

pub fn command() -> Command {
    Command::new("mosaic-clip")
        .version("0.1.0")
        .about("Builds photo mosaics from a folder of images and zoom clips from a single image.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(--root [ROOT] "Directory holding SourceImages, ProcessedImages, ImagesToConvert, ConvertedImages and GeneratedClips")
                .value_parser(value_parser!(PathBuf))
                .default_value(".")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .help("Log debug details")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("mosaic")
                .about("Replace every pixel of a target image with the closest-colored image of a folder.")
                .arg(
                    arg!(--source [DIR] "Folder with one subfolder per image set [default: <root>/SourceImages]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--processed [DIR] "Thumbnail folder, emptied on every run [default: <root>/ProcessedImages]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--targets [DIR] "Folder of images to convert [default: <root>/ImagesToConvert]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-o --output [DIR] "Folder receiving numbered mosaics [default: <root>/ConvertedImages]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("tile_size")
                        .help("Side of each square tile in pixels [default: 32]")
                        .short('t')
                        .long("tile-size")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("width")
                        .help("Number of tiles across the mosaic [default: 200]")
                        .short('w')
                        .long("width")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(arg!(--folder [NAME] "Image set subfolder to use instead of asking"))
                .arg(arg!(--image [NAME] "Target image to convert instead of asking")),
        )
        .subcommand(
            Command::new("zoom")
                .about("Render a zoom-in clip toward the center of one image.")
                .arg(
                    arg!(--source [DIR] "Folder of images to zoom into [default: <root>/ConvertedImages]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-o --output [DIR] "Folder receiving numbered clips [default: <root>/GeneratedClips]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-r --resolution [PIXELS] "Short side of the output frames [default: 1080]")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    arg!(-z --zoom [FACTOR] "How far to zoom in, greater than 1 [default: 60]")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    arg!(--fps [FPS] "Frames per second [default: 24]")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    arg!(-d --duration [SECONDS] "Clip length [default: 5]")
                        .value_parser(value_parser!(f64)),
                )
                .arg(arg!(--image [NAME] "Image to zoom into instead of asking")),
        )
}

pub fn get_matches() -> ArgMatches {
    command().get_matches()
}
