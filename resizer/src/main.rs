use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use image::{DynamicImage, ImageFormat, ImageReader};
use image_resample as ir;
use log::debug;

mod structs;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Path to source image file
    #[clap(value_parser)]
    source_path: PathBuf,

    /// Path to result image file
    #[clap(value_parser)]
    destination_path: Option<PathBuf>,

    /// Width of result image, in pixels or percentage of the source image's width.
    /// It is calculated from height with preserving of aspect ratio if omitted.
    #[clap(short, long, value_parser)]
    width: Option<structs::Size>,

    /// Height of result image, in pixels or percentage of the source image's height.
    /// It is calculated from width with preserving of aspect ratio if omitted.
    #[clap(short, long, value_parser)]
    height: Option<structs::Size>,

    /// Overwrite destination file
    #[clap(short, long, action)]
    overwrite: bool,

    /// Interpolation kernel used to resize image
    #[clap(short, long, value_enum, default_value_t = structs::Kernel::Lanczos3)]
    kernel: structs::Kernel,

    /// Multiplier of kernel width, values greater than 1.0 blur the result
    #[clap(short, long, value_parser, default_value_t = 1.0)]
    blur: f64,

    /// Count of workers, 0 means count of CPU cores
    #[clap(short, long, value_parser, default_value_t = 0)]
    threads: usize,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    resize(&cli)
}

fn resize(cli: &Cli) -> Result<()> {
    let result_path = get_result_path(cli)?;
    let src_image = open_source_image(cli)?;

    let width = cli.width.map_or(0, |w| w.calculate_size(src_image.width()));
    let height = cli.height.map_or(0, |h| h.calculate_size(src_image.height()));
    let options = ir::ResizeOptions::new()
        .blur(cli.blur)
        .workers(cli.threads);
    let resizer = ir::Resizer::with_options(options);

    debug!("Resize the source image with {:?} kernel", cli.kernel);
    let dst_image = resizer
        .resize(width, height, &src_image, cli.kernel.into())
        .with_context(|| "Failed to resize image")?;
    debug!(
        "Size of the result image is {}x{}",
        dst_image.width(),
        dst_image.height()
    );

    save_result(result_path, DynamicImage::from(dst_image.as_ref()))
}

fn open_source_image(cli: &Cli) -> Result<ir::Image> {
    let source_path = &cli.source_path;
    debug!("Opening the source image {:?}", source_path);
    let image = ImageReader::open(source_path)
        .with_context(|| format!("Failed to read source file from {:?}", source_path))?
        .decode()
        .with_context(|| "Failed to decode source image")?;
    debug!(
        "The source image has {}x{} pixels of {:?} type",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(ir::Image::from(&image))
}

fn get_result_path(cli: &Cli) -> Result<PathBuf> {
    let result_path = if let Some(path) = cli.destination_path.clone() {
        path
    } else {
        let mut path = PathBuf::from("./");
        let ext = cli
            .source_path
            .extension()
            .unwrap_or_else(|| OsStr::new("png"));
        path.push("result");
        path.set_extension(ext);
        path
    };
    if result_path.exists() && !cli.overwrite {
        return Err(anyhow!(
            "Destination path {:?} already exists.",
            result_path
        ));
    };
    Ok(result_path)
}

fn save_result(result_path: PathBuf, image: DynamicImage) -> Result<()> {
    let format = ImageFormat::from_path(&result_path)
        .with_context(|| format!("Unknown format of result file {:?}", result_path))?;
    // JPEG supports neither alpha channel nor 16-bit components.
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    };
    debug!("Save the result image into the file {:?}", result_path);
    image
        .save_with_format(&result_path, format)
        .with_context(|| "Failed to save the result image")?;
    Ok(())
}
