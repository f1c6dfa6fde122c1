/// A flat 2D tilemap grid. The disc does not wrap in either direction, so
/// neighbor queries stop at the map edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap row-major data. `data.len()` must equal `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width * height, "tilemap data does not match {}x{}", width, height);
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) outside {}x{}", x, y, self.width, self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Whether signed coordinates fall inside the map.
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Bounds-checked access with signed coordinates.
    pub fn get_checked(&self, x: i64, y: i64) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Get 8-connected neighbors, clipped at every edge.
    pub fn neighbors_8(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);

        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if self.in_bounds(nx, ny) {
                    result.push((nx as usize, ny as usize));
                }
            }
        }

        result
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Count the cells matching a predicate.
    pub fn count_where(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.data.iter().filter(|v| predicate(v)).count()
    }

    /// Raw row-major cell slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_clip_at_corners() {
        let map: Tilemap<u8> = Tilemap::new(4, 3);

        assert_eq!(map.neighbors_8(0, 0).len(), 3);
        assert_eq!(map.neighbors_8(3, 2).len(), 3);
        assert_eq!(map.neighbors_8(1, 1).len(), 8);
        assert_eq!(map.neighbors_8(0, 1).len(), 5);
    }

    #[test]
    fn test_checked_access() {
        let mut map = Tilemap::new_with(3, 3, 0u8);
        map.set(2, 1, 7);

        assert_eq!(map.get_checked(2, 1), Some(&7));
        assert_eq!(map.get_checked(-1, 0), None);
        assert_eq!(map.get_checked(3, 0), None);
        assert_eq!(map.count_where(|v| *v == 7), 1);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut map = Tilemap::new_with(3, 2, 0usize);
        for (x, y, v) in map.iter_mut() {
            *v = y * 10 + x;
        }
        let coords: Vec<(usize, usize, usize)> = map.iter().map(|(x, y, v)| (x, y, *v)).collect();
        assert_eq!(coords[4], (1, 1, 11));
        assert_eq!(map.as_slice()[5], 12);
    }
}
