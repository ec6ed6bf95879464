use docopt::Docopt;
use log::{info, LevelFilter};
use serde_derive::Deserialize;
use simple_logger::SimpleLogger;
use mazegen::{
    analysis,
    engine::{self, MazeRequest},
    generators,
    limits::RequestLimits,
    renderers::OutputFormat,
    units::{Height, Width},
};
use std::{
    fs::File,
    io::prelude::*,
    time::{SystemTime, UNIX_EPOCH},
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--grid-width=<w> --grid-height=<h>] [--cell-pixels=<n>] [--name=<name>] [--out-dir=<dir>] [--format=<fmt>] [--seed=<s>] [--limits=<path>] [--save-edges=<path>] [--text] [--verbose]

Options:
    -h --help              Show this screen.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --cell-pixels=<n>      Pixel count to render one cell wall in a maze [default: 10].
    --name=<name>          Image base name, written as maze-<name>.<format>. Defaults to a timestamp.
    --out-dir=<dir>        Directory to write the image to [default: .].
    --format=<fmt>         Image format: png, bmp or ppm (plain ASCII pixmap) [default: png].
    --seed=<s>             Seed for a reproducible maze.
    --limits=<path>        TOML file with max_width, max_height and max_cell_pixels to clamp requests to.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --text                 Also print the maze as text.
    --verbose              Log debug output.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_cell_pixels: u32,
    flag_name: Option<String>,
    flag_out_dir: String,
    flag_format: String,
    flag_seed: Option<u64>,
    flag_limits: Option<String>,
    flag_save_edges: Option<String>,
    flag_text: bool,
    flag_verbose: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Engine(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Logger(::log::SetLoggerError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    SimpleLogger::new()
        .with_level(if args.flag_verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .env()
        .init()?;

    let limits = match args.flag_limits {
        Some(ref path) => RequestLimits::load(path)?,
        None => RequestLimits::default(),
    };

    let format: OutputFormat = args.flag_format.parse()?;
    let name = args.flag_name.clone().unwrap_or_else(timestamp_name);
    let request = limits.clamp(MazeRequest::new(args.flag_grid_width,
                                                args.flag_grid_height,
                                                args.flag_cell_pixels,
                                                name)
                                   .with_output_dir(&args.flag_out_dir)
                                   .with_format(format));
    request.check_scale()?;

    let mut rng = match args.flag_seed {
        Some(seed) => generators::seeded_rng(seed),
        None => generators::entropy_rng(),
    };
    let maze_grid = engine::generate_maze(Width(request.width), Height(request.height), &mut rng)?;

    if args.flag_text {
        println!("{}", maze_grid);
    }

    if let Some(ref edges_path) = args.flag_save_edges {
        write_text_to_file(&analysis::edges_listing(&maze_grid), edges_path)
            .chain_err(|| format!("Failed to write maze graph to text file {}", edges_path))?;
        info!("saved maze edges to {}", edges_path);
    }

    let image_path = engine::render_maze(&maze_grid, &request)?;
    println!("{}", image_path.display());

    Ok(())
}

fn timestamp_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    millis.to_string()
}

fn write_text_to_file(data: &str, file_name: &str) -> std::io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
