// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
use error_chain::*;
use std::path::PathBuf;

use crate::cells::Cartesian2DCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
        Toml(::toml::de::Error);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}, width and height must be positive", width, height)
        }
        NotAdjacent(from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) {
            description("cells are not adjacent")
            display("cannot carve a passage between non adjacent cells {:?} and {:?}", from, to)
        }
        InvalidScale(cell_pixels: u32) {
            description("invalid cell pixel size")
            display("invalid cell pixel size {}, it must be positive", cell_pixels)
        }
        CanvasTooLarge(width: usize, height: usize, cell_pixels: u32) {
            description("maze image too large")
            display("a {}x{} maze at {} pixels per cell does not fit in an image", width, height, cell_pixels)
        }
        WriteFailure(path: PathBuf) {
            description("failed to write maze image")
            display("failed to write maze image to {}", path.display())
        }
        LimitsConfig(path: PathBuf) {
            description("failed to read request limits")
            display("failed to read request limits from {}", path.display())
        }
    }
}
