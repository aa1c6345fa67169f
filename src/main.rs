use std::env;
use std::process;

use docopt::Docopt;
use env_logger::Env;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;

use mazegen::{
    generators::Bias,
    maze::MazeContext,
    renderers::{self, RenderOptionsBuilder},
    units::{Height, Width},
};

const USAGE: &str = "Mazegen

Generate a perfect maze and save it as a PNG image.

Usage:
    mazegen [options] [<output> [<width> [<height>]]]
    mazegen -h | --help

Arguments:
    <output>               Output file path, always PNG format. Defaults to output.png.
    <width>                Maze width in cells. Defaults to 100.
    <height>               Maze height in cells. Defaults to 100.

Options:
    -h --help                  Show this screen.
    --cell-pixels=<n>          Pixel length of one side of a cell [default: 10].
    --wall-pixels=<n>          Pixel thickness of a wall [default: 2].
    --bias-horizontal=<n>      Weight of east/west moves while carving, 1 or more [default: 1].
    --bias-vertical=<n>        Weight of north/south moves while carving, 1 or more [default: 1].
    --background=<rgba>        Background colour as RRGGBBAA hex [default: 000000ff].
    --wall-colour=<rgba>       Wall colour as RRGGBBAA hex [default: ffffffff].
    --seed=<n>                 Seed the random generator for a reproducible maze.
    --text                     Also print the maze to stdout as text.
";

const DEFAULT_OUTPUT: &str = "output.png";
const DEFAULT_GRID_SIDE: usize = 100;

#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_output: Option<String>,
    arg_width: Option<usize>,
    arg_height: Option<usize>,
    flag_cell_pixels: u32,
    flag_wall_pixels: u32,
    flag_bias_horizontal: usize,
    flag_bias_vertical: usize,
    flag_background: String,
    flag_wall_colour: String,
    flag_seed: Option<u64>,
    flag_text: bool,
}

// Driver errors wrap the library's so that one chain can be reported.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
        }

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(ref e) = run() {
        // Help, version and usage mistakes print the way docopt formats them.
        if let ErrorKind::DocOptFailure(ref docopt_error) = *e.kind() {
            docopt_error.exit();
        }
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn parse_args<I, S>(argv: I) -> Result<MazeArgs>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    let args = Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize())?;
    Ok(args)
}

fn run() -> Result<()> {
    let args = parse_args(env::args())?;
    debug!("{:?}", args);

    let output = args.arg_output.clone().unwrap_or_else(|| String::from(DEFAULT_OUTPUT));
    let width = args.arg_width.unwrap_or(DEFAULT_GRID_SIDE);
    let height = args.arg_height.unwrap_or(DEFAULT_GRID_SIDE);

    let bias = Bias::new(args.flag_bias_horizontal, args.flag_bias_vertical)?;
    let render_options = RenderOptionsBuilder::new()
        .cell_side_pixels(args.flag_cell_pixels)
        .wall_thickness_pixels(args.flag_wall_pixels)
        .background(renderers::parse_rgba_hex(&args.flag_background)
                        .chain_err(|| "Invalid --background colour")?)
        .wall(renderers::parse_rgba_hex(&args.flag_wall_colour)
                  .chain_err(|| "Invalid --wall-colour colour")?)
        .build();

    let mut ctx = MazeContext::new(Width(width), Height(height))?;
    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    ctx.generate(&bias, &mut rng);

    if args.flag_text {
        println!("{}", ctx.grid());
    }

    renderers::write_png(ctx.grid(), &render_options, &output)
        .chain_err(|| format!("Failed to write maze to image file {}", output))?;

    info!("Done.");
    Ok(())
}
