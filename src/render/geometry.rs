/// Side length of a finder pattern in modules
pub const FINDER_SIZE: usize = 7;

/// True when symbol coordinate `(x, y)` lies in one of the three 7x7 finder
/// blocks (top-left, top-right, bottom-left) of a `size`-module symbol.
///
/// Pure geometry: the answer depends only on the coordinates, never on
/// module contents.
pub fn is_finder_region(x: usize, y: usize, size: usize) -> bool {
    let near = |v: usize| v < FINDER_SIZE;
    let far = |v: usize| v < size && v + FINDER_SIZE >= size;
    (near(x) && near(y)) || (far(x) && near(y)) || (near(x) && far(y))
}
