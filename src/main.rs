use std::io;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{self, Clear, ClearType},
};

use maze_gen::config::{self, Config};
use maze_gen::render::{self, View};
use maze_gen::Maze;

#[derive(Parser)]
#[command(name = "maze", about = "Generate and solve a maze in the terminal")]
struct Cli {
    /// Maze height in cells (default: fit the terminal)
    #[arg(long)]
    height: Option<usize>,

    /// Maze width in cells (default: fit the terminal)
    #[arg(short, long)]
    width: Option<usize>,

    /// Path search depth
    #[arg(short, long, default_value_t = 1)]
    depth: i32,

    /// Refresh rate for animated generation (default: instant)
    #[arg(short, long, default_value_t = 0)]
    fps: u64,

    /// Minimum solution length; bare flag selects a size-based default
    #[arg(short, long, num_args = 0..=1, default_missing_value = "0")]
    path: Option<i32>,

    /// Random number seed (default: entropy)
    #[arg(short, long)]
    random: Option<u64>,

    /// Show intermediate mazes while the path length is not met
    #[arg(short, long)]
    show: bool,

    /// Draw the uncarved maze blank instead of as a wall lattice
    #[arg(short, long)]
    blank: bool,

    /// Mark look-ahead probes while animating
    #[arg(short, long)]
    look: bool,

    /// Keep animating while the opening optimizer solves
    #[arg(short, long)]
    view: bool,
}

fn frame_delay(fps: u64) -> Duration {
    if fps > 1000 {
        Duration::from_micros(1_000_000 / fps)
    } else {
        Duration::from_millis(1000 / fps)
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let (term_cols, term_rows) = terminal::size()?;
    let (max_height, max_width) = config::terminal_limits(term_rows, term_cols);

    let mut seed = cli.random.unwrap_or_else(rand::random);
    let fps = config::clamp_fps(cli.fps);
    let mut cfg = Config::new(
        cli.height.unwrap_or(0),
        cli.width.unwrap_or(0),
        cli.depth,
        seed,
    );
    cfg.look = cli.look;
    cfg.view = cli.view;
    cfg.sanitize(max_height, max_width);
    let min_path = config::min_path_length(cli.path, cfg.height, cfg.width);

    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), Hide)?;

    let mut attempt = 0;
    let maze = loop {
        attempt += 1;
        if attempt > 1 {
            // Retry with fresh entropy, otherwise a fixed seed would loop
            // on the same undersized maze forever.
            seed = rand::random();
            cfg.seed = seed;
        }
        let view = View {
            blank: cli.blank,
            seed,
            attempt,
        };

        let mut maze = Maze::new(&cfg);
        if fps > 0 {
            let delay = frame_delay(fps);
            maze.set_frame_hook(Box::new(move |grid, stats| {
                let _ = render::draw(&mut io::stdout(), grid, stats, &view);
                thread::sleep(delay);
            }));
        }

        maze.generate();
        if cli.show {
            render::draw(&mut stdout, maze.grid(), maze.stats(), &view)?;
            thread::sleep(Duration::from_secs(1));
        }
        maze.solve();
        if maze.stats().solve_len >= min_path {
            break maze;
        }
        if cli.show {
            render::draw(&mut stdout, maze.grid(), maze.stats(), &view)?;
            thread::sleep(Duration::from_secs(1));
        }
    };

    let view = View {
        blank: cli.blank,
        seed,
        attempt,
    };
    render::draw(&mut stdout, maze.grid(), maze.stats(), &view)?;
    execute!(stdout, MoveTo(0, (maze.grid().rows() - 1) as u16), Show)?;
    println!();
    Ok(())
}
