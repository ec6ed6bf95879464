//! One shot maze pipeline: build a grid, carve a perfect maze into it and save it as an image.
//!
//! Nothing here keeps state between calls; every request gets its own grid, and the caller
//! supplies the random source.

use error_chain::bail;
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::renderers::{self, OutputFormat, RenderOptionsBuilder};
use crate::units::{CellPixels, Height, Width};

/// Everything needed to produce one maze image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeRequest {
    pub width: usize,
    pub height: usize,
    pub cell_pixels: u32,
    /// Base name of the image. The caller keeps it unique, e.g. with a timestamp suffix.
    pub output_name: String,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl MazeRequest {
    pub fn new<S: Into<String>>(width: usize, height: usize, cell_pixels: u32, output_name: S) -> MazeRequest {
        MazeRequest {
            width,
            height,
            cell_pixels,
            output_name: output_name.into(),
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
        }
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> MazeRequest {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> MazeRequest {
        self.format = format;
        self
    }

    /// Reject a request that can never be rendered, before any work is done for it.
    pub fn check_scale(&self) -> Result<()> {
        if self.cell_pixels == 0 {
            bail!(ErrorKind::InvalidScale(self.cell_pixels));
        }
        Ok(())
    }

    /// `<output_dir>/maze-<output_name>.<extension>`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("maze-{}.{}", self.output_name, self.format.extension()))
    }
}

/// Build a `width * height` grid and carve a perfect maze into it.
pub fn generate_maze<R: Rng + ?Sized>(width: Width, height: Height, rng: &mut R) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;
    generators::recursive_backtracker(&mut grid, rng)?;
    Ok(grid)
}

/// Save an already generated maze as the image the request describes.
pub fn render_maze(grid: &Grid, request: &MazeRequest) -> Result<PathBuf> {
    let options = RenderOptionsBuilder::new()
        .cell_side_pixels_length(CellPixels(request.cell_pixels))
        .format(request.format)
        .build();
    renderers::render_square_grid(grid, &options, &request.output_path())
}

/// Generate a maze and write it to an image file, returning the file's absolute path.
///
/// On failure no image file is left behind.
pub fn generate_maze_image<R: Rng + ?Sized>(request: &MazeRequest, rng: &mut R) -> Result<PathBuf> {
    request.check_scale()?;
    let grid = generate_maze(Width(request.width), Height(request.height), rng)?;
    render_maze(&grid, request)
}

#[cfg(test)]
mod tests {

    use std::env;
    use std::fs;
    use std::process;

    use super::*;
    use crate::analysis;

    fn scratch_dir() -> PathBuf {
        env::temp_dir()
    }

    #[test]
    fn output_path_naming() {
        let request = MazeRequest::new(3, 3, 4, "1234-alice")
            .with_output_dir("/tmp/mazes")
            .with_format(OutputFormat::Bmp);
        assert_eq!(request.output_path(), PathBuf::from("/tmp/mazes/maze-1234-alice.bmp"));
        assert_eq!(MazeRequest::new(1, 1, 1, "x").output_path(), PathBuf::from("./maze-x.png"));
    }

    #[test]
    fn scale_is_checked_up_front() {
        assert!(MazeRequest::new(0, 0, 1, "ok").check_scale().is_ok());
        let err = MazeRequest::new(3, 3, 0, "zero").check_scale().unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidScale(0) => {}
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn generated_maze_is_perfect() {
        let grid = generate_maze(Width(8), Height(5), &mut generators::seeded_rng(2)).unwrap();
        assert!(analysis::is_perfect(&grid));
    }

    #[test]
    fn writes_exactly_one_file() {
        let name = format!("engine-{}", process::id());
        let request = MazeRequest::new(4, 3, 6, name).with_output_dir(scratch_dir());
        let path = generate_maze_image(&request, &mut generators::seeded_rng(10)).unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with(request.output_path().file_name().unwrap()));
        let image = image::open(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!((image.width(), image.height()), (24, 18));
    }

    #[test]
    fn invalid_dimensions_leave_no_file() {
        let name = format!("engine-zero-{}", process::id());
        let request = MazeRequest::new(0, 3, 6, name).with_output_dir(scratch_dir());
        let err = generate_maze_image(&request, &mut generators::seeded_rng(10)).unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidDimensions(0, 3) => {}
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(!request.output_path().exists());
    }

    #[test]
    fn invalid_scale_leaves_no_file() {
        let name = format!("engine-scale-{}", process::id());
        let request = MazeRequest::new(3, 3, 0, name).with_output_dir(scratch_dir());
        let err = generate_maze_image(&request, &mut generators::seeded_rng(10)).unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidScale(0) => {}
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(!request.output_path().exists());
    }

    #[test]
    fn same_seed_same_image() {
        let request = |suffix: &str| {
            MazeRequest::new(9, 9, 3, format!("engine-seed-{}-{}", process::id(), suffix))
                .with_output_dir(scratch_dir())
                .with_format(OutputFormat::PlainPpm)
        };
        let first = generate_maze_image(&request("a"), &mut generators::seeded_rng(99)).unwrap();
        let second = generate_maze_image(&request("b"), &mut generators::seeded_rng(99)).unwrap();
        let (first_bytes, second_bytes) = (fs::read(&first).unwrap(), fs::read(&second).unwrap());
        let _ = fs::remove_file(&first);
        let _ = fs::remove_file(&second);
        assert_eq!(first_bytes, second_bytes);
    }
}
