//! Validated generation settings. The engine is total over a sanitized
//! `Config`; all range enforcement happens here.

pub const MAX_HEIGHT: usize = 100;
pub const MAX_WIDTH: usize = 300;
pub const MAX_DEPTH: i32 = 100;
pub const MAX_FPS: u64 = 100_000;

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Logical cell rows.
    pub height: usize,
    /// Logical cell columns.
    pub width: usize,
    /// Look-ahead / restart-retry budget.
    pub depth: i32,
    pub seed: u64,
    /// Mark look-ahead probes on the grid for display.
    pub look: bool,
    /// Keep animating while the opening optimizer solves.
    pub view: bool,
}

impl Config {
    pub fn new(height: usize, width: usize, depth: i32, seed: u64) -> Config {
        Config {
            height,
            width,
            depth,
            seed,
            look: false,
            view: false,
        }
    }

    /// Clamp all fields into the ranges the engine assumes.
    pub fn sanitize(&mut self, max_height: usize, max_width: usize) {
        if self.depth < 0 || self.depth > MAX_DEPTH {
            self.depth = MAX_DEPTH;
        }
        if self.height == 0 || self.height > max_height {
            self.height = max_height;
        }
        if self.width == 0 || self.width > max_width {
            self.width = max_width;
        }
    }
}

/// Largest maze that fits a terminal of `rows` x `cols`, leaving room for
/// the status line. Each cell renders 4 columns and 2 rows wide.
pub fn terminal_limits(rows: u16, cols: u16) -> (usize, usize) {
    let rows = rows as usize;
    let cols = cols as usize;
    let max_height = MAX_HEIGHT.min(rows.saturating_sub(3) / 2).max(1);
    let max_width = MAX_WIDTH.min(cols.saturating_sub(1) / 4).max(1);
    (max_height, max_width)
}

/// Minimum solution length used when `--path` is given without a value:
/// half the cell count, capped at ten times its square root.
pub fn default_min_path(height: usize, width: usize) -> i32 {
    let cells = (height * width) as i32;
    let sqrt = ((height * width) as f64).sqrt() as i32;
    (cells / 2).min(sqrt * 10)
}

/// Resolve the `--path` argument: absent means accept any maze, a bare flag
/// or out-of-range value selects the computed default.
pub fn min_path_length(arg: Option<i32>, height: usize, width: usize) -> i32 {
    let mut min_len = match arg {
        None => 1,
        Some(v) => v,
    };
    if min_len < 0 || min_len >= (height * width) as i32 {
        min_len = 0;
    }
    if min_len == 0 {
        min_len = default_min_path(height, width);
    }
    min_len
}

pub fn clamp_fps(fps: u64) -> u64 {
    if fps > MAX_FPS {
        MAX_FPS
    } else {
        fps
    }
}
