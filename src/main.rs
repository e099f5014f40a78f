use docopt::Docopt;
use error_chain::bail;
use itertools::Itertools;
use log::info;
use serde_derive::Deserialize;
use seeded_mazes::{
    config::parse_hex_colour,
    grid::ConnectivityGrid,
    heightfield::Heightfield,
    MazeConfig,
    MazeConfigBuilder,
    MazeEngine,
    RasterEncoding,
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Seeded Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [options] [text [--text-out=<path>]]

Options:
    -h --help                   Show this screen.
    --seed=<s>                  Text seed, the same seed always gives the same maze [default: 1].
    --columns=<n>               Number of maze columns [default: 25].
    --rows=<n>                  Number of maze rows [default: 25].
    --path-width=<px>           Pixel width of a passage [default: 10].
    --wall-width=<px>           Pixel width of the walls between cells [default: 2].
    --outer-wall-width=<px>     Pixel width of the border around the maze [default: 2].
    --wall-colour=<hex>         Wall colour as #rgb or #rrggbb [default: #000].
    --path-colour=<hex>         Passage colour as #rgb or #rrggbb [default: #fff].
    --image-out=<path>          Output file path for the maze raster. Always PNG format.
    --raw-out=<path>            Output file path for the raw RGBA bytes of the raster, row major.
    --data-url                  Print the PNG raster as a base64 data URL.
    --heightfield-out=<path>    Output file path for the heightfield samples as CSV, one raster row per line.
    --text-out=<path>           Output file path for a textual rendering of a maze.
    --save-edges=<path>         Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_seed: String,
    flag_columns: u32,
    flag_rows: u32,
    flag_path_width: u32,
    flag_wall_width: u32,
    flag_outer_wall_width: u32,
    flag_wall_colour: String,
    flag_path_colour: String,
    flag_image_out: String,
    flag_raw_out: String,
    flag_data_url: bool,
    flag_heightfield_out: String,
    cmd_text: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::seeded_mazes::errors::Error, ::seeded_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let maze_config = config_from_args(&args)?;
    info!("Generating a {}x{} maze from seed {:?}",
          maze_config.columns().0,
          maze_config.rows().0,
          maze_config.seed());

    let maze = MazeEngine::create(maze_config)?;
    info!("Longest route {} cells, raster {}x{}",
          maze.longest_route(),
          maze.config().raster_width().0,
          maze.config().raster_height().0);

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(maze.grid(), &args.flag_save_edges)?;
    }

    if args.cmd_text {
        if args.flag_text_out.is_empty() {
            println!("{}", maze.grid());
        } else {
            write_bytes_to_file(format!("{}", maze.grid()).as_bytes(), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if !args.flag_image_out.is_empty() {
        let png = maze.export_raster(RasterEncoding::Png)?;
        write_bytes_to_file(&png, &args.flag_image_out)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    if !args.flag_raw_out.is_empty() {
        let raw = maze.export_raster(RasterEncoding::RawRgba)?;
        write_bytes_to_file(&raw, &args.flag_raw_out)
            .chain_err(|| format!("Failed to write raw maze raster {}", args.flag_raw_out))?;
    }

    if args.flag_data_url {
        println!("{}", maze.export_data_url()?);
    }

    if !args.flag_heightfield_out.is_empty() {
        let heightfield = Heightfield::from_raster(maze.raster()?);
        write_bytes_to_file(heightfield_csv(&heightfield).as_bytes(), &args.flag_heightfield_out)
            .chain_err(|| format!("Failed to write heightfield to {}", args.flag_heightfield_out))?;
    }

    Ok(())
}

fn config_from_args(maze_args: &MazeArgs) -> Result<MazeConfig> {

    let wall_colour = parse_hex_colour(&maze_args.flag_wall_colour)
        .chain_err(|| format!("Invalid wall colour {}", maze_args.flag_wall_colour))?;
    let path_colour = parse_hex_colour(&maze_args.flag_path_colour)
        .chain_err(|| format!("Invalid path colour {}", maze_args.flag_path_colour))?;

    let maze_config = MazeConfigBuilder::new()
        .seed(maze_args.flag_seed.as_str())
        .columns(maze_args.flag_columns)
        .rows(maze_args.flag_rows)
        .path_width(maze_args.flag_path_width)
        .wall_width(maze_args.flag_wall_width)
        .outer_wall_width(maze_args.flag_outer_wall_width)
        .wall_colour(wall_colour)
        .path_colour(path_colour)
        .build()?;
    Ok(maze_config)
}

fn heightfield_csv(heightfield: &Heightfield) -> String {

    let mut csv = String::new();
    for row in heightfield.to_matrix() {
        csv.push_str(&row.iter().join(","));
        csv.push('\n');
    }
    csv
}

fn write_bytes_to_file(data: &[u8], file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data)?;
    Ok(())
}

fn save_maze_graph(maze_grid: &ConnectivityGrid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(maze_grid.size().0.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(maze_grid.links_count().0.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_links() {
        let (index_a, index_b) = match (maze_grid.grid_coordinate_to_index(src),
                                        maze_grid.grid_coordinate_to_index(dst)) {
            (Some(a), Some(b)) => (a, b),
            _ => bail!("Link between invalid coordinates {:?} {:?}", src, dst),
        };

        graph_data.push_str((index_a + 1).to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str((index_b + 1).to_string().as_ref());
        graph_data.push('\n');
    }

    write_bytes_to_file(graph_data.as_bytes(), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
