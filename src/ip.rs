use rand::Rng;

/// Heading of the instruction pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    East,
    West,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Unit step (dx, dy). North is -y: row 0 is the top of the grid.
    #[inline(always)]
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    /// Pick one of the four headings uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Instruction pointer: a position on the grid plus a heading.
///
/// The position always lies in [0, width) × [0, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ip {
    pub x: i64,
    pub y: i64,
    pub dir: Direction,
}

impl Ip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move one cell along the heading, wrapping at the edges.
    pub fn advance(&mut self, width: usize, height: usize) {
        let (dx, dy) = self.dir.delta();
        self.x = wrap(self.x + dx, width as i64);
        self.y = wrap(self.y + dy, height as i64);
    }
}

/// Bring `v` into [0, len) by whole-length corrections, however far out it is.
#[inline(always)]
fn wrap(mut v: i64, len: i64) -> i64 {
    while v < 0 {
        v += len;
    }
    while v >= len {
        v -= len;
    }
    v
}
