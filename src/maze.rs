//! Maze generation and solving engine.
//!
//! One `Maze` session owns the grid, a seeded RNG and the run counters.
//! Generation carves randomized depth-first paths with look-ahead pruning
//! and orphan avoidance, restarting from corners of existing paths until the
//! grid is exhausted, then normalizes mid-wall openings and picks the
//! entry/exit pair with the longest solution. Solving is a DFS with
//! backtracking over the same grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::grid::{CellState, Dir, Grid, Pos, DIRS};

/// Hard cap on look-ahead probes per legality scan. Hitting it reports
/// success: degraded look-ahead quality, never an error.
const CHECK_LIMIT: u32 = 500_000;

/// Called after cell-parity grid mutations while animation is enabled.
pub type FrameHook = Box<dyn FnMut(&Grid, &Stats)>;

/// Read-only run counters surfaced to the caller.
#[derive(Clone, Copy, Default, Debug)]
pub struct Stats {
    /// Carved connections; `height * width - 1` for a finished maze.
    pub maze_len: u32,
    /// Carving passes, the initial one included.
    pub num_paths: u32,
    /// Mid-wall openings pushed by the normalizer.
    pub num_wall_push: u32,
    /// Opening pairs evaluated by the optimizer.
    pub num_solves: u32,
    /// Peak look-ahead probes spent on a single legality scan.
    pub max_checks: u32,
    /// Solution length of the winning opening pair.
    pub solve_len: i32,
    /// Direction changes along the winning solution.
    pub turn_cnt: i32,
}

pub struct Maze {
    grid: Grid,
    rng: StdRng,
    depth: i32,
    /// Remaining look-ahead budget of the current pass; decays when no
    /// direction passes at the current depth.
    path_depth: i32,
    show_checks: bool,
    animate_search: bool,
    hook: Option<FrameHook>,
    top_row: usize,
    bottom_row: usize,
    entry_col: usize,
    exit_col: usize,
    path_len: i32,
    turn_cnt: i32,
    stats: Stats,
}

impl Maze {
    pub fn new(cfg: &Config) -> Maze {
        Maze {
            grid: Grid::new(cfg.height, cfg.width),
            rng: StdRng::seed_from_u64(cfg.seed),
            depth: cfg.depth,
            path_depth: 0,
            show_checks: cfg.look,
            animate_search: cfg.view,
            hook: None,
            top_row: 2,
            bottom_row: 2 * cfg.height,
            entry_col: 2,
            exit_col: 2,
            path_len: 0,
            turn_cnt: 0,
            stats: Stats::default(),
        }
    }

    /// Install the animation callback. Without one the engine never renders.
    pub fn set_frame_hook(&mut self, hook: FrameHook) {
        self.hook = Some(hook);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Committed entry/exit columns (grid coordinates, top then bottom).
    pub fn openings(&self) -> (usize, usize) {
        (self.entry_col, self.exit_col)
    }

    /// Carve the full maze, normalize walls and commit the best openings.
    /// Leaves the grid carved but unsolved.
    pub fn generate(&mut self) {
        self.stats.maze_len = 0;
        self.stats.num_paths = 0;
        self.stats.max_checks = 0;

        let mut pos = Pos {
            row: 2 * (self.rng.gen_range(0..self.grid.height()) + 1),
            col: 2 * (self.rng.gen_range(0..self.grid.width()) + 1),
        };
        loop {
            self.stats.num_paths += 1;
            self.carve_path(&mut pos);
            if !self.find_path_start(&mut pos) {
                break;
            }
        }
        self.push_mid_wall_openings();
        self.search_best_openings();
    }

    /// Solve from the committed entry to the committed exit, leaving the
    /// solution as `Solved` and explored dead ends as `Tried`.
    pub fn solve(&mut self) {
        let mut pos = Pos {
            row: self.top_row,
            col: self.entry_col,
        };
        self.solve_maze(&mut pos);
        self.stats.solve_len = self.path_len;
        self.stats.turn_cnt = self.turn_cnt;
    }

    fn mark(&mut self, p: Pos, state: CellState, update: bool) {
        if self.grid.get(p) == state {
            return;
        }
        self.grid.set(p, state);
        if update && p.row % 2 == 0 && p.col % 2 == 0 {
            self.frame();
        }
    }

    fn frame(&mut self) {
        if let Some(hook) = self.hook.as_mut() {
            hook(&self.grid, &self.stats);
        }
    }

    /// One randomized DFS carving pass from `pos`. Ends when no direction
    /// passes the orphan guard and look-ahead validator.
    fn carve_path(&mut self, pos: &mut Pos) {
        self.path_depth = self.depth;
        self.mark(*pos, CellState::Path, false);
        loop {
            let dirs = self.find_directions(*pos, CellState::Wall, true);
            if dirs.is_empty() {
                break;
            }
            let dir = dirs[self.rng.gen_range(0..dirs.len())];
            self.mark(pos.midpoint(dir), CellState::Path, true);
            *pos = pos.step(dir);
            self.mark(*pos, CellState::Path, true);
            self.stats.maze_len += 1;
        }
        self.frame();
    }

    /// Directions from `pos` whose midpoint and destination both match
    /// `target` and survive the guards. In search mode a miss decays the
    /// pass's depth budget and rescans; depth 0 is always permissive.
    fn find_directions(&mut self, pos: Pos, target: CellState, search: bool) -> Vec<Dir> {
        let mut dirs = Vec::with_capacity(4);
        loop {
            for dir in DIRS {
                let depth = if search { self.path_depth } else { 0 };
                if self.look(pos, dir, target, depth) {
                    dirs.push(dir);
                }
            }
            if !dirs.is_empty() || !search || self.path_depth <= 0 {
                break;
            }
            self.path_depth -= 1;
        }
        dirs
    }

    fn look(&mut self, pos: Pos, dir: Dir, target: CellState, depth: i32) -> bool {
        if self.grid.get(pos.midpoint(dir)) != target {
            return false;
        }
        let dest = pos.step(dir);
        if self.grid.get(dest) != target {
            return false;
        }
        if target == CellState::Wall && depth > 0 && self.check_orphan(pos, dir) {
            return false;
        }
        if depth <= 0 {
            return true;
        }
        let mut checks = 0;
        let mut seen = vec![vec![false; self.grid.cols()]; self.grid.rows()];
        let ok = self.check_directions(dest, target, depth, &mut checks, &mut seen);
        if checks > self.stats.max_checks {
            self.stats.max_checks = checks;
        }
        ok
    }

    /// Recursive bounded look-ahead: can a path of `depth` more cells be
    /// traced from `pos` through cells matching `target`? An exhausted
    /// budget or probe cap counts as success.
    fn check_directions(
        &mut self,
        pos: Pos,
        target: CellState,
        depth: i32,
        checks: &mut u32,
        seen: &mut [Vec<bool>],
    ) -> bool {
        if depth == 0 || *checks >= CHECK_LIMIT {
            return true;
        }
        *checks += 1;
        seen[pos.row][pos.col] = true;
        let viz = self.show_checks && self.hook.is_some();
        if viz {
            self.grid.set(pos, CellState::Check);
            self.frame();
        }

        let mut found = false;
        for dir in DIRS {
            if self.grid.get(pos.midpoint(dir)) != target {
                continue;
            }
            let far = pos.step(dir);
            if seen[far.row][far.col] || self.grid.get(far) != target {
                continue;
            }
            if self.check_directions(far, target, depth - 1, checks, seen) {
                found = true;
                break;
            }
        }

        seen[pos.row][pos.col] = false;
        if viz {
            self.grid.set(pos, target);
            self.frame();
        }
        found
    }

    /// Would carving from `pos` toward `dir` seal off a single cell next to
    /// the new destination? Simulates the carve, checks, reverts.
    fn check_orphan(&mut self, pos: Pos, dir: Dir) -> bool {
        let mid = pos.midpoint(dir);
        let dest = pos.step(dir);
        self.grid.set(mid, CellState::Path);
        self.grid.set(dest, CellState::Path);

        let orphan = DIRS.iter().any(|&d| self.orphan_1x1(dest.step(d)));

        self.grid.set(dest, CellState::Wall);
        self.grid.set(mid, CellState::Wall);
        orphan
    }

    /// A cell whose four midpoints are walls while the cells beyond are all
    /// carved: nothing could ever connect to it through a corner restart.
    fn orphan_1x1(&self, p: Pos) -> bool {
        if p.row < 2 || p.col < 2 || p.row + 2 >= self.grid.rows() || p.col + 2 >= self.grid.cols()
        {
            return false;
        }
        DIRS.iter().all(|&d| {
            self.grid.get(p.midpoint(d)) == CellState::Wall
                && self.grid.get(p.step(d)) == CellState::Path
        })
    }

    /// A corridor cell with both opposite sides open and no branch.
    fn straight_thru(&self, p: Pos, target: CellState) -> bool {
        let open = |d: Dir| {
            self.grid.get(p.midpoint(d)) == target && self.grid.get(p.step(d)) == target
        };
        (open(Dir::Up) && open(Dir::Down)) || (open(Dir::Left) && open(Dir::Right))
    }

    /// Scan for a carved corner/branch cell that can seed a new pass.
    /// Scans in a randomly rotated order to avoid positional bias, retrying
    /// a full rescan per remaining depth unit.
    fn find_path_start(&mut self, pos: &mut Pos) -> bool {
        let height = self.grid.height();
        let width = self.grid.width();
        self.path_depth = self.depth;
        loop {
            let row_start = self.rng.gen_range(0..height);
            let col_start = self.rng.gen_range(0..width);
            for i in 0..height {
                for j in 0..width {
                    let p = Pos {
                        row: 2 * ((row_start + i) % height + 1),
                        col: 2 * ((col_start + j) % width + 1),
                    };
                    if self.grid.get(p) == CellState::Path
                        && !self.straight_thru(p, CellState::Path)
                        && !self.find_directions(p, CellState::Wall, false).is_empty()
                    {
                        *pos = p;
                        return true;
                    }
                }
            }
            if self.path_depth <= 0 {
                self.path_depth = 0;
                return false;
            }
            self.path_depth -= 1;
        }
    }

    /// A carved opening sitting mid-wall: open, but with no wall corner on
    /// any diagonal, which renders ambiguously.
    fn mid_wall_opening(&self, p: Pos) -> bool {
        self.grid.get(p) == CellState::Path
            && self.grid.get(Pos { row: p.row - 1, col: p.col - 1 }) != CellState::Wall
            && self.grid.get(Pos { row: p.row - 1, col: p.col + 1 }) != CellState::Wall
            && self.grid.get(Pos { row: p.row + 1, col: p.col - 1 }) != CellState::Wall
            && self.grid.get(Pos { row: p.row + 1, col: p.col + 1 }) != CellState::Wall
    }

    /// Push mid-wall openings right (odd rows) or down (even rows) until a
    /// full scan moves nothing. Reachability is preserved: the replacement
    /// opening reconnects the same two regions.
    fn push_mid_wall_openings(&mut self) {
        loop {
            let mut moves = 0;
            for row in 1..self.grid.rows() - 1 {
                let mut col = (row & 1) + 1;
                while col < self.grid.cols() - 1 {
                    let p = Pos { row, col };
                    if self.mid_wall_opening(p) {
                        self.mark(p, CellState::Wall, false);
                        if row % 2 == 1 {
                            self.mark(Pos { row, col: col + 2 }, CellState::Path, true);
                        } else {
                            self.mark(Pos { row: row + 2, col }, CellState::Path, true);
                        }
                        moves += 1;
                        self.stats.num_wall_push += 1;
                    }
                    col += 2;
                }
            }
            self.frame();
            if moves == 0 {
                break;
            }
        }
    }

    /// Open an entry/exit pair and return the solve start position.
    fn create_openings(&mut self, entry_col: usize, exit_col: usize) -> Pos {
        self.entry_col = entry_col;
        self.exit_col = exit_col;
        self.grid.set(
            Pos { row: self.top_row - 1, col: self.entry_col },
            CellState::Path,
        );
        self.grid.set(
            Pos { row: self.bottom_row + 1, col: self.exit_col },
            CellState::Path,
        );
        Pos {
            row: self.top_row,
            col: self.entry_col,
        }
    }

    fn delete_openings(&mut self) {
        self.grid.set(
            Pos { row: self.top_row - 1, col: self.entry_col },
            CellState::Wall,
        );
        self.grid.set(
            Pos { row: self.bottom_row + 1, col: self.exit_col },
            CellState::Wall,
        );
    }

    /// Advance along `Path` cells marking them `Solved` until the bottom
    /// boundary is passed (success) or no open neighbor remains.
    fn follow_path(&mut self, pos: &mut Pos) -> bool {
        let mut last_dir = None;
        self.mark(*pos, CellState::Solved, false);
        loop {
            if pos.row < self.top_row || pos.row > self.bottom_row {
                break;
            }
            let dirs = self.find_directions(*pos, CellState::Path, false);
            if dirs.is_empty() {
                break;
            }
            let dir = dirs[0];
            self.mark(pos.midpoint(dir), CellState::Solved, true);
            *pos = pos.step(dir);
            self.mark(*pos, CellState::Solved, true);
            self.path_len += 1;
            if last_dir != Some(dir) {
                last_dir = Some(dir);
                self.turn_cnt += 1;
            }
        }
        pos.row > self.bottom_row
    }

    /// Retreat along `Solved` cells marking them `Tried` until a cell with
    /// an unexplored `Path` neighbor reappears.
    fn back_track_path(&mut self, pos: &mut Pos) {
        let mut last_dir = None;
        self.mark(*pos, CellState::Tried, false);
        loop {
            if !self.find_directions(*pos, CellState::Path, false).is_empty() {
                break;
            }
            let dirs = self.find_directions(*pos, CellState::Solved, false);
            if dirs.is_empty() {
                break;
            }
            let dir = dirs[0];
            self.mark(pos.midpoint(dir), CellState::Tried, true);
            *pos = pos.step(dir);
            self.mark(*pos, CellState::Tried, true);
            self.path_len -= 1;
            if last_dir != Some(dir) {
                last_dir = Some(dir);
                self.turn_cnt -= 1;
            }
        }
    }

    /// Alternate follow/backtrack until the exit boundary is reached. The
    /// maze is perfect, so this terminates with the unique solution.
    fn solve_maze(&mut self, pos: &mut Pos) {
        self.path_len = 0;
        self.turn_cnt = 0;
        self.grid.set(
            Pos { row: self.top_row - 1, col: self.entry_col },
            CellState::Solved,
        );
        while !self.follow_path(pos) {
            self.back_track_path(pos);
        }
        self.grid.set(
            Pos { row: self.bottom_row + 1, col: self.exit_col },
            CellState::Solved,
        );
    }

    /// Try every viable top/bottom opening pair, solving each and restoring
    /// the grid in between, then commit the pair with the longest solution
    /// (most direction changes on ties, first found wins after that).
    fn search_best_openings(&mut self) {
        let width = self.grid.width();
        let mut best_len = 0;
        let mut best_turns = 0;
        let mut best_entry = 2;
        let mut best_exit = 2;

        let saved_hook = if self.animate_search {
            None
        } else {
            self.hook.take()
        };
        for i in 0..width {
            for j in 0..width {
                let entry = 2 * (i + 1);
                let exit = 2 * (j + 1);
                if self.open_sideways(self.top_row, entry)
                    || self.open_sideways(self.bottom_row, exit)
                {
                    continue;
                }
                let mut pos = self.create_openings(entry, exit);
                self.solve_maze(&mut pos);
                if self.path_len > best_len
                    || (self.path_len == best_len && self.turn_cnt > best_turns)
                {
                    best_len = self.path_len;
                    best_turns = self.turn_cnt;
                    best_entry = entry;
                    best_exit = exit;
                }
                self.grid.restore();
                self.delete_openings();
                self.stats.num_solves += 1;
            }
        }
        if let Some(hook) = saved_hook {
            self.hook = Some(hook);
        }

        self.create_openings(best_entry, best_exit);
        self.stats.solve_len = best_len;
        self.stats.turn_cnt = best_turns;
    }

    /// Boundary cells open on both horizontal sides are straight-through
    /// corridors; an opening into one renders ambiguously, so the optimizer
    /// never considers it.
    fn open_sideways(&self, row: usize, col: usize) -> bool {
        self.grid.get(Pos { row, col: col - 1 }) != CellState::Wall
            && self.grid.get(Pos { row, col: col + 1 }) != CellState::Wall
    }
}
