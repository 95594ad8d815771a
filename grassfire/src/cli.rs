//! Command-line front end
//!
//! Every subcommand reads one image, applies one operation and writes the
//! result. The output format follows the output file extension and falls
//! back to BMP. Nothing is written when the operation fails.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use argh::FromArgs;
use grassfire_core::{Histogram, ImageFormat, Pix};
use grassfire_filter::{EdgeOrientation, Kernel, ThresholdOptions};
use grassfire_morph::Sel;
use grassfire_region::{
    DEFAULT_AREA_THRESHOLD, DEFAULT_LABEL_CAPACITY, LabelingMode, LabelingOptions,
};
use grassfire_transform::RotateOptions;

use crate::{CliError, CliResult};

#[derive(FromArgs, Debug)]
/// Connected-component labeling and 8-bit image processing
pub struct Cli {
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Invert(InvertArgs),
    Brightness(BrightnessArgs),
    Contrast(ContrastArgs),
    Histogram(HistogramArgs),
    Binarize(BinarizeArgs),
    Stretch(StretchArgs),
    Equalize(EqualizeArgs),
    Convolve(ConvolveArgs),
    Rank(RankArgs),
    Label(LabelArgs),
    Edge(EdgeArgs),
    Flip(FlipArgs),
    Translate(TranslateArgs),
    Scale(ScaleArgs),
    Rotate(RotateArgs),
    Erode(ErodeArgs),
    Dilate(DilateArgs),
    Thin(ThinArgs),
}

#[derive(FromArgs, Debug)]
/// Invert gray levels
#[argh(subcommand, name = "invert")]
pub struct InvertArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
}

#[derive(FromArgs, Debug)]
/// Add a constant to every pixel, clipping to [0, 255]
#[argh(subcommand, name = "brightness")]
pub struct BrightnessArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// value added to every pixel (may be negative)
    #[argh(option)]
    pub delta: i32,
}

#[derive(FromArgs, Debug)]
/// Multiply every pixel by a non-negative factor, clipping to 255
#[argh(subcommand, name = "contrast")]
pub struct ContrastArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// multiplication factor
    #[argh(option)]
    pub factor: f32,
}

#[derive(FromArgs, Debug)]
/// Print the 256-bin histogram as "value, count" lines
#[argh(subcommand, name = "histogram")]
pub struct HistogramArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
}

#[derive(FromArgs, Debug)]
/// Binarize with a fixed or automatically selected threshold
#[argh(subcommand, name = "binarize")]
pub struct BinarizeArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// fixed threshold; selected from the histogram when absent
    #[argh(option)]
    pub threshold: Option<u8>,
    /// convergence tolerance of the automatic threshold (default: 2)
    #[argh(option, default = "grassfire_filter::threshold::DEFAULT_EPSILON")]
    pub epsilon: u32,
}

#[derive(FromArgs, Debug)]
/// Stretch the occupied gray range to [0, 255]
#[argh(subcommand, name = "stretch")]
pub struct StretchArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
}

#[derive(FromArgs, Debug)]
/// Equalize the histogram
#[argh(subcommand, name = "equalize")]
pub struct EqualizeArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
}

#[derive(FromArgs, Debug)]
/// Apply a 3x3 filter: average, gaussian, laplacian, sharpen, prewitt,
/// prewitt-x, prewitt-y, sobel, sobel-x, sobel-y
#[argh(subcommand, name = "convolve")]
pub struct ConvolveArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// kernel name
    #[argh(option, short = 'k')]
    pub kernel: String,
}

/// Order statistic picked by the rank subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOp {
    Min,
    Median,
    Max,
}

impl FromStr for RankOp {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(RankOp::Min),
            "median" => Ok(RankOp::Median),
            "max" => Ok(RankOp::Max),
            other => Err(CliError::InvalidArgument(format!(
                "unknown rank operation '{other}' (expected min, median or max)"
            ))),
        }
    }
}

#[derive(FromArgs, Debug)]
/// Min, median or max filter over an odd square window
#[argh(subcommand, name = "rank")]
pub struct RankArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// min, median or max
    #[argh(option)]
    pub op: RankOp,
    /// odd window side length (default: 3)
    #[argh(option, default = "3")]
    pub size: u32,
}

#[derive(FromArgs, Debug)]
/// Label 8-connected regions of foreground pixels
#[argh(subcommand, name = "label")]
pub struct LabelArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// largest, area or gray (or 1, 2, 3)
    #[argh(option, short = 'm')]
    pub mode: LabelingMode,
    /// maximum number of regions (default: 999)
    #[argh(option, default = "DEFAULT_LABEL_CAPACITY")]
    pub capacity: u32,
    /// keep regions strictly larger than this in the area mode (default: 500)
    #[argh(option, default = "DEFAULT_AREA_THRESHOLD")]
    pub area_threshold: usize,
    /// input value treated as foreground (default: 255)
    #[argh(option, default = "255")]
    pub foreground: u8,
}

#[derive(FromArgs, Debug)]
/// Extract object boundaries (object pixels with a non-object 4-neighbor)
#[argh(subcommand, name = "edge")]
pub struct EdgeArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// gray value of object pixels (default: 0)
    #[argh(option, default = "0")]
    pub object: u8,
}

/// Mirror axis for the flip subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror left-right
    Horizontal,
    /// Mirror top-bottom
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(FlipAxis::Horizontal),
            "v" | "vertical" => Ok(FlipAxis::Vertical),
            other => Err(CliError::InvalidArgument(format!(
                "unknown flip axis '{other}' (expected horizontal or vertical)"
            ))),
        }
    }
}

#[derive(FromArgs, Debug)]
/// Mirror the image
#[argh(subcommand, name = "flip")]
pub struct FlipArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// horizontal or vertical
    #[argh(option)]
    pub axis: FlipAxis,
}

#[derive(FromArgs, Debug)]
/// Shift by whole pixels; positive ty moves up
#[argh(subcommand, name = "translate")]
pub struct TranslateArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// horizontal shift
    #[argh(option)]
    pub tx: i32,
    /// vertical shift
    #[argh(option)]
    pub ty: i32,
    /// value for uncovered pixels (default: 0)
    #[argh(option, default = "0")]
    pub fill: u8,
}

#[derive(FromArgs, Debug)]
/// Resize by nearest-neighbor sampling
#[argh(subcommand, name = "scale")]
pub struct ScaleArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// horizontal factor
    #[argh(option)]
    pub sx: f32,
    /// vertical factor
    #[argh(option)]
    pub sy: f32,
}

#[derive(FromArgs, Debug)]
/// Rotate about the image center; positive angles turn counterclockwise
#[argh(subcommand, name = "rotate")]
pub struct RotateArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// angle in degrees
    #[argh(option, short = 'a')]
    pub angle: f32,
    /// value for uncovered pixels (default: 0)
    #[argh(option, default = "0")]
    pub fill: u8,
}

#[derive(FromArgs, Debug)]
/// Binary erosion (foreground = 255)
#[argh(subcommand, name = "erode")]
pub struct ErodeArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// square brick side; the 3x3 cross when absent
    #[argh(option)]
    pub size: Option<u32>,
}

#[derive(FromArgs, Debug)]
/// Binary dilation (foreground = 255)
#[argh(subcommand, name = "dilate")]
pub struct DilateArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// square brick side; the 3x3 cross when absent
    #[argh(option)]
    pub size: Option<u32>,
}

#[derive(FromArgs, Debug)]
/// Zhang-Suen thinning
#[argh(subcommand, name = "thin")]
pub struct ThinArgs {
    /// input image path
    #[argh(option, short = 'i')]
    pub input: PathBuf,
    /// output image path
    #[argh(option, short = 'o')]
    pub output: PathBuf,
    /// gray value of object pixels (default: 0)
    #[argh(option, default = "0")]
    pub object: u8,
}

/// Result of applying a subcommand to an image
#[derive(Debug)]
pub enum Output {
    Image(Pix),
    Histogram(Histogram),
}

impl Command {
    /// Path of the input image
    pub fn input(&self) -> &Path {
        match self {
            Command::Invert(a) => &a.input,
            Command::Brightness(a) => &a.input,
            Command::Contrast(a) => &a.input,
            Command::Histogram(a) => &a.input,
            Command::Binarize(a) => &a.input,
            Command::Stretch(a) => &a.input,
            Command::Equalize(a) => &a.input,
            Command::Convolve(a) => &a.input,
            Command::Rank(a) => &a.input,
            Command::Label(a) => &a.input,
            Command::Edge(a) => &a.input,
            Command::Flip(a) => &a.input,
            Command::Translate(a) => &a.input,
            Command::Scale(a) => &a.input,
            Command::Rotate(a) => &a.input,
            Command::Erode(a) => &a.input,
            Command::Dilate(a) => &a.input,
            Command::Thin(a) => &a.input,
        }
    }

    /// Path of the output image; `None` for subcommands that only report
    pub fn output(&self) -> Option<&Path> {
        match self {
            Command::Invert(a) => Some(a.output.as_path()),
            Command::Brightness(a) => Some(a.output.as_path()),
            Command::Contrast(a) => Some(a.output.as_path()),
            Command::Histogram(_) => None,
            Command::Binarize(a) => Some(a.output.as_path()),
            Command::Stretch(a) => Some(a.output.as_path()),
            Command::Equalize(a) => Some(a.output.as_path()),
            Command::Convolve(a) => Some(a.output.as_path()),
            Command::Rank(a) => Some(a.output.as_path()),
            Command::Label(a) => Some(a.output.as_path()),
            Command::Edge(a) => Some(a.output.as_path()),
            Command::Flip(a) => Some(a.output.as_path()),
            Command::Translate(a) => Some(a.output.as_path()),
            Command::Scale(a) => Some(a.output.as_path()),
            Command::Rotate(a) => Some(a.output.as_path()),
            Command::Erode(a) => Some(a.output.as_path()),
            Command::Dilate(a) => Some(a.output.as_path()),
            Command::Thin(a) => Some(a.output.as_path()),
        }
    }
}

fn sel_for(size: Option<u32>) -> CliResult<Sel> {
    match size {
        None => Ok(Sel::cross()),
        Some(s) => Ok(Sel::brick(s, s)?),
    }
}

fn apply_kernel(pix: &Pix, name: &str) -> CliResult<Pix> {
    use grassfire_filter as f;

    let out = match name.to_ascii_lowercase().as_str() {
        "laplacian" => f::laplacian_edge(pix)?,
        "sharpen" => f::sharpen(pix)?,
        "prewitt" => f::prewitt_edge(pix, EdgeOrientation::All)?,
        "prewitt-x" => f::prewitt_edge(pix, EdgeOrientation::Vertical)?,
        "prewitt-y" => f::prewitt_edge(pix, EdgeOrientation::Horizontal)?,
        "sobel" => f::sobel_edge(pix, EdgeOrientation::All)?,
        "sobel-x" => f::sobel_edge(pix, EdgeOrientation::Vertical)?,
        "sobel-y" => f::sobel_edge(pix, EdgeOrientation::Horizontal)?,
        other => f::convolve_gray(pix, &Kernel::by_name(other)?)?,
    };
    Ok(out)
}

/// Apply a subcommand to an already loaded image.
pub fn apply(command: &Command, pix: &Pix) -> CliResult<Output> {
    let image = match command {
        Command::Invert(_) => pix.invert(),
        Command::Brightness(a) => pix.add_constant(a.delta),
        Command::Contrast(a) => pix.multiply_constant(a.factor)?,
        Command::Histogram(_) => return Ok(Output::Histogram(Histogram::from_pix(pix))),
        Command::Binarize(a) => match a.threshold {
            Some(t) => grassfire_filter::binarize(pix, t)?,
            None => {
                let options = ThresholdOptions::new().with_epsilon(a.epsilon);
                let (out, t) = grassfire_filter::binarize_auto(pix, &options)?;
                log::info!("binarize: selected threshold {t}");
                out
            }
        },
        Command::Stretch(_) => grassfire_filter::stretch_contrast(pix)?,
        Command::Equalize(_) => grassfire_filter::equalize(pix)?,
        Command::Convolve(a) => apply_kernel(pix, &a.kernel)?,
        Command::Rank(a) => match a.op {
            RankOp::Min => grassfire_filter::min_filter(pix, a.size)?,
            RankOp::Median => grassfire_filter::median_filter(pix, a.size)?,
            RankOp::Max => grassfire_filter::max_filter(pix, a.size)?,
        },
        Command::Label(a) => {
            let options = LabelingOptions::new()
                .with_capacity(a.capacity)
                .with_area_threshold(a.area_threshold)
                .with_foreground(a.foreground);
            grassfire_region::label_pix(pix, a.mode, &options)?
        }
        Command::Edge(a) => grassfire_morph::extract_boundary(pix, a.object)?,
        Command::Flip(a) => match a.axis {
            FlipAxis::Horizontal => grassfire_transform::flip_lr(pix)?,
            FlipAxis::Vertical => grassfire_transform::flip_tb(pix)?,
        },
        Command::Translate(a) => grassfire_transform::translate(pix, a.tx, a.ty, a.fill)?,
        Command::Scale(a) => grassfire_transform::scale_by_sampling(pix, a.sx, a.sy)?,
        Command::Rotate(a) => {
            let options = RotateOptions::new().with_fill(a.fill);
            grassfire_transform::rotate(pix, a.angle, &options)?
        }
        Command::Erode(a) => grassfire_morph::erode(pix, &sel_for(a.size)?)?,
        Command::Dilate(a) => grassfire_morph::dilate(pix, &sel_for(a.size)?)?,
        Command::Thin(a) => grassfire_morph::thin_zhang_suen(pix, a.object)?,
    };
    Ok(Output::Image(image))
}

/// Write a histogram as one `value, count` line per gray level.
pub fn write_histogram<W: Write>(hist: &Histogram, mut out: W) -> std::io::Result<()> {
    for (value, count) in hist.bins().iter().enumerate() {
        writeln!(out, "{value}, {count}")?;
    }
    out.flush()
}

/// Read the input, apply the subcommand and write or print the result.
pub fn run(command: &Command) -> CliResult<()> {
    let pix = grassfire_io::read_image(command.input())?;
    log::debug!(
        "read {} ({}x{})",
        command.input().display(),
        pix.width(),
        pix.height()
    );

    match apply(command, &pix)? {
        Output::Histogram(hist) => {
            write_histogram(&hist, std::io::stdout().lock())
                .map_err(|e| CliError::Io(grassfire_io::IoError::Io(e)))?;
        }
        Output::Image(out) => {
            let path = command.output().ok_or_else(|| {
                CliError::InvalidArgument("subcommand has no output path".to_string())
            })?;
            grassfire_io::write_image(&out, path, ImageFormat::Unknown)?;
            log::info!("wrote {}", path.display());
        }
    }
    Ok(())
}
