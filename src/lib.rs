use std::{
    cmp::Reverse,
    collections::BinaryHeap,
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

pub const DIRECTION_N: usize = 4;
pub const STEP_SCORE: usize = 1;
pub const TURN_SCORE: usize = 1000;
pub const INFINITE_SCORE: usize = usize::MAX;

#[derive(Debug)]
pub enum Error {
    EmptyMap,
    InconsistentRow(usize, usize),
    MultipleStartPosition(Position, Position),
    MultipleEndPosition(Position, Position),
    InvalidCharForMap(char),
    NoStartPosition,
    NoEndPosition,
    NoPathToEnd,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyMap => write!(f, "Given map text is empty."),
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::MultipleStartPosition(last_pos, pos) => write!(
                f,
                "Expect only one start position, given two({}, {}).",
                last_pos, pos
            ),
            Error::MultipleEndPosition(last_pos, pos) => write!(
                f,
                "Expect only one end position, given two({}, {}).",
                last_pos, pos
            ),
            Error::InvalidCharForMap(c) => write!(f, "Invalid character({}) for map.", c),
            Error::NoStartPosition => write!(f, "No start position in map."),
            Error::NoEndPosition => write!(f, "No end position in map."),
            Error::NoPathToEnd => write!(
                f,
                "No way to reach the end position from the start position."
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::East => Some(Self::new(self.r, self.c + 1)),
            Direction::North if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::West if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            Direction::South => Some(Self::new(self.r + 1, self.c)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; DIRECTION_N] = [
            Direction::East,
            Direction::North,
            Direction::West,
            Direction::South,
        ];

        &ALL_DIRECTIONS
    }

    pub fn index(&self) -> usize {
        match self {
            Direction::East => 0,
            Direction::North => 1,
            Direction::West => 2,
            Direction::South => 3,
        }
    }

    pub fn turn_clockwise(&self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::North => Direction::East,
            Direction::West => Direction::North,
            Direction::South => Direction::West,
        }
    }

    pub fn turn_counterclockwise(&self) -> Self {
        match self {
            Direction::East => Direction::North,
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

#[derive(Debug, Clone, Copy)]
pub struct Edge {
    target: usize,
    score: usize,
}

impl Edge {
    pub fn new(target: usize, score: usize) -> Self {
        Self { target, score }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn score(&self) -> usize {
        self.score
    }
}

#[derive(Debug)]
pub struct Graph {
    edges: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new(vertex_n: usize) -> Self {
        Self {
            edges: vec![Vec::new(); vertex_n],
        }
    }

    pub fn vertex_n(&self) -> usize {
        self.edges.len()
    }

    pub fn edges_from(&self, vertex: usize) -> &[Edge] {
        &self.edges[vertex]
    }

    pub fn add_edge(&mut self, from: usize, to: usize, score: usize) {
        self.edges[from].push(Edge::new(to, score));
    }

    pub fn min_scores(&self, sources: &[usize]) -> Vec<usize> {
        let mut scores = vec![INFINITE_SCORE; self.vertex_n()];
        let mut queue = BinaryHeap::new();
        for source in sources {
            scores[*source] = 0;
            queue.push(Reverse((0, *source)));
        }

        while let Some(Reverse((score, vertex))) = queue.pop() {
            if score > scores[vertex] {
                // Stale pair left behind by an earlier relaxation.
                continue;
            }

            for edge in self.edges_from(vertex) {
                let next_score = score + edge.score();
                if next_score < scores[edge.target()] {
                    scores[edge.target()] = next_score;
                    queue.push(Reverse((next_score, edge.target())));
                }
            }
        }

        scores
    }
}

#[derive(Debug)]
pub struct Map {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    start_pos: Position,
    end_pos: Position,
}

impl Map {
    pub fn start_pos(&self) -> &Position {
        &self.start_pos
    }

    pub fn end_pos(&self) -> &Position {
        &self.end_pos
    }

    pub fn tile(&self, pos: &Position) -> Option<&Tile> {
        if pos.r < self.row_n && pos.c < self.col_n {
            self.tiles.get(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }

    pub fn vertex_n(&self) -> usize {
        self.row_n * self.col_n * DIRECTION_N
    }

    pub fn vertex_index(&self, pos: &Position, dir: Direction) -> usize {
        (pos.r * self.col_n + pos.c) * DIRECTION_N + dir.index()
    }

    pub fn score_graph(&self, reversed: bool) -> Graph {
        let mut graph = Graph::new(self.vertex_n());
        for r in 0..self.row_n {
            for c in 0..self.col_n {
                let pos = Position::new(r, c);
                if self.tile(&pos).is_some_and(|tile| *tile == Tile::Wall) {
                    continue;
                }

                for dir in Direction::all_dirs() {
                    let from = self.vertex_index(&pos, *dir);
                    // Turn edges come in symmetric pairs, so reversal leaves them as is.
                    graph.add_edge(from, self.vertex_index(&pos, dir.turn_clockwise()), TURN_SCORE);
                    graph.add_edge(
                        from,
                        self.vertex_index(&pos, dir.turn_counterclockwise()),
                        TURN_SCORE,
                    );

                    if let Some(next_pos) = pos.neighbor(*dir) {
                        if self.tile(&next_pos).is_some_and(|tile| *tile == Tile::Floor) {
                            let to = self.vertex_index(&next_pos, *dir);
                            if reversed {
                                graph.add_edge(to, from, STEP_SCORE);
                            } else {
                                graph.add_edge(from, to, STEP_SCORE);
                            }
                        }
                    }
                }
            }
        }

        graph
    }

    pub fn min_total_score(&self) -> Result<usize, Error> {
        let scores = self.min_scores_from_start();
        let (best_score, _) = self.best_end_vertices(&scores)?;

        Ok(best_score)
    }

    pub fn best_path_pos_n(&self) -> Result<(usize, usize), Error> {
        let forward_scores = self.min_scores_from_start();
        let (best_score, best_end_vertices) = self.best_end_vertices(&forward_scores)?;
        let backward_scores = self.score_graph(true).min_scores(&best_end_vertices);

        let mut pos_n = 0;
        for r in 0..self.row_n {
            for c in 0..self.col_n {
                let pos = Position::new(r, c);
                if Direction::all_dirs().iter().any(|dir| {
                    let vertex = self.vertex_index(&pos, *dir);
                    forward_scores[vertex] != INFINITE_SCORE
                        && backward_scores[vertex] != INFINITE_SCORE
                        && forward_scores[vertex] + backward_scores[vertex] == best_score
                }) {
                    pos_n += 1;
                }
            }
        }

        Ok((best_score, pos_n))
    }

    fn min_scores_from_start(&self) -> Vec<usize> {
        let start_vertex = self.vertex_index(&self.start_pos, Direction::East);
        self.score_graph(false).min_scores(&[start_vertex])
    }

    fn best_end_vertices(&self, scores: &[usize]) -> Result<(usize, Vec<usize>), Error> {
        let mut best_score = INFINITE_SCORE;
        let mut best_vertices = Vec::new();
        for dir in Direction::all_dirs() {
            let vertex = self.vertex_index(&self.end_pos, *dir);
            if scores[vertex] < best_score {
                best_score = scores[vertex];
                best_vertices.clear();
            }

            if best_score != INFINITE_SCORE && scores[vertex] == best_score {
                best_vertices.push(vertex);
            }
        }

        if best_score == INFINITE_SCORE {
            Err(Error::NoPathToEnd)
        } else {
            Ok((best_score, best_vertices))
        }
    }
}

#[derive(Debug)]
struct MapBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: Option<usize>,
    start_pos: Option<Position>,
    end_pos: Option<Position>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            start_pos: None,
            end_pos: None,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_col_n = text.chars().count();
        if *self.col_n.get_or_insert(this_col_n) != this_col_n {
            return Err(Error::InconsistentRow(self.col_n.unwrap(), this_col_n));
        }

        for (ind, c) in text.chars().enumerate() {
            let pos = Position::new(self.row_n, ind);
            self.tiles.push(match c {
                'S' => {
                    if let Some(last_pos) = &self.start_pos {
                        return Err(Error::MultipleStartPosition(last_pos.clone(), pos));
                    }

                    self.start_pos = Some(pos);
                    Tile::Floor
                }
                'E' => {
                    if let Some(last_pos) = &self.end_pos {
                        return Err(Error::MultipleEndPosition(last_pos.clone(), pos));
                    }

                    self.end_pos = Some(pos);
                    Tile::Floor
                }
                '#' => Tile::Wall,
                '.' => Tile::Floor,
                other => return Err(Error::InvalidCharForMap(other)),
            });
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Map, Error> {
        if self.row_n == 0 {
            return Err(Error::EmptyMap);
        }

        let Some(start_pos) = self.start_pos else {
            return Err(Error::NoStartPosition);
        };
        let Some(end_pos) = self.end_pos else {
            return Err(Error::NoEndPosition);
        };

        Ok(Map {
            tiles: self.tiles,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
            start_pos,
            end_pos,
        })
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<Map> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;

    read_map_from(BufReader::new(file))
}

pub fn read_map_from<R: BufRead>(reader: R) -> Result<Map> {
    let mut builder = MapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of map text.", ind + 1))?;
        builder.add_row(line.as_str())?;
    }

    Ok(builder.build()?)
}
