// Import the geometry types
use crate::geometry::{subdivide, Triangle};

// Rayon for parallel subdivision
use rayon::prelude::*;

/// All triangles at one recursion depth
///
/// In the fractal, a "generation" is what is left after `depth` rounds of
/// midpoint subdivision. Each round consumes the whole generation and
/// replaces it with three times as many triangles.
///
/// **Rust Concept: Consuming methods**
/// `next(self)` takes the generation by value. The old `Vec` is dropped as
/// soon as the new one is built, so no stale generation can be used by mistake.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    triangles: Vec<Triangle>,
    depth: u32,
}

impl Generation {
    /// Depth 0: just the seed triangle
    pub fn seed(triangle: Triangle) -> Self {
        Self {
            triangles: vec![triangle],
            depth: 0,
        }
    }

    /// Subdivide every triangle, keeping parent order
    ///
    /// The children of triangle `i` land at indices `3i..3i + 3`.
    pub fn next(self) -> Self {
        let triangles = self.triangles.iter().flat_map(subdivide).collect();

        Self {
            triangles,
            depth: self.depth + 1,
        }
    }

    /// Same as `next`, but splits the work across rayon's thread pool
    ///
    /// Each triangle is subdivided independently and rayon's `collect` keeps
    /// the sequential order, so the result is identical to `next`.
    pub fn next_parallel(self) -> Self {
        let triangles = self
            .triangles
            .par_iter()
            .flat_map_iter(subdivide)
            .collect();

        Self {
            triangles,
            depth: self.depth + 1,
        }
    }

    /// Advance one step, choosing the strategy at runtime
    pub fn advance(self, parallel: bool) -> Self {
        if parallel {
            self.next_parallel()
        } else {
            self.next()
        }
    }

    /// How many subdivision rounds produced this generation
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Number of triangles after `iterations` rounds: 3^iterations
pub fn triangle_count(iterations: u32) -> usize {
    3usize.pow(iterations)
}

/// Expand `seed` for `iterations` rounds, calling `on_generation` after each one
pub fn expand_with<F>(
    seed: Triangle,
    iterations: u32,
    parallel: bool,
    mut on_generation: F,
) -> Generation
where
    F: FnMut(&Generation),
{
    let mut generation = Generation::seed(seed);
    for _ in 0..iterations {
        generation = generation.advance(parallel);
        on_generation(&generation);
    }
    generation
}

/// Expand `seed` sequentially for `iterations` rounds
pub fn expand(seed: Triangle, iterations: u32) -> Generation {
    expand_with(seed, iterations, false, |_| {})
}
