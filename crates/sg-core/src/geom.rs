/// Integer pixel coordinate, origin top-left, `x` to the right, `y` down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point2u {
    pub x: usize,
    pub y: usize,
}

impl Point2u {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Point2u {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Point2u> for (usize, usize) {
    fn from(p: Point2u) -> Self {
        (p.x, p.y)
    }
}
