use error_chain::bail;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use log::{info, warn};
use std::env;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use crate::cells::CompassPrimary;
use crate::errors::*;
use crate::grid::Grid;
use crate::units::CellPixels;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// The file formats a maze image can be saved as.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum OutputFormat {
    Png,
    Bmp,
    /// Plain (ASCII) portable pixmap, `P3`.
    PlainPpm,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::PlainPpm => "ppm",
        }
    }

    pub fn writer(self) -> Box<dyn MazeImageWriter> {
        match self {
            OutputFormat::Png => Box::new(RasterImageWriter(image::ImageFormat::Png)),
            OutputFormat::Bmp => Box::new(RasterImageWriter(image::ImageFormat::Bmp)),
            OutputFormat::PlainPpm => Box::new(PlainPixmapWriter),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Png
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "bmp" => Ok(OutputFormat::Bmp),
            "ppm" | "plain-ppm" => Ok(OutputFormat::PlainPpm),
            other => Err(format!("unknown maze image format '{}', expected png, bmp or ppm", other)),
        }
    }
}

/// Encodes a finished maze canvas into a file.
pub trait MazeImageWriter {
    fn write_canvas(&self, canvas: &RgbImage, destination: &Path) -> Result<()>;
}

/// Compressed/binary raster formats through the `image` crate's encoders.
#[derive(Debug, Copy, Clone)]
pub struct RasterImageWriter(pub image::ImageFormat);

impl MazeImageWriter for RasterImageWriter {
    fn write_canvas(&self, canvas: &RgbImage, destination: &Path) -> Result<()> {
        canvas.save_with_format(destination, self.0)?;
        Ok(())
    }
}

/// Human readable `P3` pixmap, one decimal sample per colour channel.
#[derive(Debug, Copy, Clone)]
pub struct PlainPixmapWriter;

impl MazeImageWriter for PlainPixmapWriter {
    fn write_canvas(&self, canvas: &RgbImage, destination: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(destination)?);
        PnmEncoder::new(&mut writer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
            .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ColorType::Rgb8)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions {
    cell_side_pixels_length: u32,
    wall_colour: Rgb<u8>,
    background_colour: Rgb<u8>,
    format: OutputFormat,
}

impl RenderOptions {
    pub fn cell_side_pixels_length(&self) -> CellPixels {
        CellPixels(self.cell_side_pixels_length)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

#[derive(Debug)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                wall_colour: BLACK,
                background_colour: WHITE,
                format: OutputFormat::default(),
            },
        }
    }

    pub fn cell_side_pixels_length(mut self, CellPixels(cell_side_pixels): CellPixels) -> Self {
        self.options.cell_side_pixels_length = cell_side_pixels;
        self
    }

    pub fn wall_colour(mut self, colour: Rgb<u8>) -> Self {
        self.options.wall_colour = colour;
        self
    }

    pub fn background_colour(mut self, colour: Rgb<u8>) -> Self {
        self.options.background_colour = colour;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.options.format = format;
        self
    }

    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Rasterize a maze: every cell side without a passage becomes a 1 pixel wide wall line the
/// length of the cell side, drawn just inside that cell's square.
pub fn draw_square_grid(grid: &Grid, options: &RenderOptions) -> Result<RgbImage> {

    let cell_size_pixels = options.cell_side_pixels_length;
    if cell_size_pixels == 0 {
        bail!(ErrorKind::InvalidScale(cell_size_pixels));
    }

    let (columns, rows) = (grid.width().0, grid.height().0);
    let canvas_length = |cells: usize| {
        u32::try_from(cells).ok().and_then(|n| n.checked_mul(cell_size_pixels))
    };
    let (img_width, img_height) = match (canvas_length(columns), canvas_length(rows)) {
        (Some(w), Some(h)) => (w, h),
        _ => bail!(ErrorKind::CanvasTooLarge(columns, rows, cell_size_pixels)),
    };

    let mut canvas = RgbImage::from_pixel(img_width, img_height, options.background_colour);
    let wall = options.wall_colour;

    for cell in grid.iter() {
        let x1 = cell.x * cell_size_pixels;
        let y1 = cell.y * cell_size_pixels;
        let x2 = x1 + cell_size_pixels - 1;
        let y2 = y1 + cell_size_pixels - 1;

        if !grid.has_passage(cell, CompassPrimary::North) {
            for x in x1..=x2 {
                canvas.put_pixel(x, y1, wall);
            }
        }
        if !grid.has_passage(cell, CompassPrimary::South) {
            for x in x1..=x2 {
                canvas.put_pixel(x, y2, wall);
            }
        }
        if !grid.has_passage(cell, CompassPrimary::West) {
            for y in y1..=y2 {
                canvas.put_pixel(x1, y, wall);
            }
        }
        if !grid.has_passage(cell, CompassPrimary::East) {
            for y in y1..=y2 {
                canvas.put_pixel(x2, y, wall);
            }
        }
    }

    Ok(canvas)
}

/// Draw the maze and save it to `destination` in the options' format.
///
/// The image is encoded into a staging file next to `destination` and renamed over it once
/// complete. Returns the absolute path written to. On failure only the staging file is removed;
/// whatever was already at `destination` is left untouched.
pub fn render_square_grid(grid: &Grid,
                          options: &RenderOptions,
                          destination: &Path)
                          -> Result<PathBuf> {

    let canvas = draw_square_grid(grid, options)?;

    let destination = if destination.is_absolute() {
        destination.to_path_buf()
    } else {
        env::current_dir()
            .chain_err(|| ErrorKind::WriteFailure(destination.to_path_buf()))?
            .join(destination)
    };

    let staging = match staging_path(&destination) {
        Some(path) => path,
        None => bail!(ErrorKind::WriteFailure(destination)),
    };

    let written = options.format
        .writer()
        .write_canvas(&canvas, &staging)
        .and_then(|_| fs::rename(&staging, &destination).map_err(Error::from));
    if let Err(e) = written {
        discard_staging_output(&staging);
        return Err(e).chain_err(|| ErrorKind::WriteFailure(destination.clone()));
    }

    info!("wrote {}x{} maze image ({}x{} pixels) to {}",
          grid.width().0,
          grid.height().0,
          canvas.width(),
          canvas.height(),
          destination.display());

    Ok(destination)
}

/// `<dir>/.<file name>.<pid>.partial`, in the destination's directory so the final rename
/// stays on one filesystem.
fn staging_path(destination: &Path) -> Option<PathBuf> {
    let file_name = destination.file_name()?.to_string_lossy();
    Some(destination.with_file_name(format!(".{}.{}.partial", file_name, process::id())))
}

fn discard_staging_output(staging: &Path) {
    if staging.exists() {
        if let Err(e) = fs::remove_file(staging) {
            warn!("could not remove partially written {}: {}", staging.display(), e);
        }
    }
}
