//! Broad phase: cheap AABB pruning before the exact narrow-phase tests.

use crate::objects::RigidBody;

use super::Aabb;

/// Brute-force pairwise AABB test, O(n²) over the body list.
///
/// Scratch buffers are kept between calls so a running simulation does not
/// reallocate every sub-step.
#[derive(Debug, Default)]
pub struct BroadPhase {
    aabbs: Vec<Aabb>,
    pairs: Vec<(usize, usize)>,
}

impl BroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every pair `(i, j)` with `i < j` whose bounding boxes overlap,
    /// in ascending order. Pairs of two static bodies are never reported.
    pub fn find_pairs(&mut self, bodies: &mut [RigidBody]) -> &[(usize, usize)] {
        self.aabbs.clear();
        self.aabbs.extend(bodies.iter_mut().map(|body| body.aabb()));
        self.pairs.clear();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if bodies[i].is_static() && bodies[j].is_static() {
                    continue;
                }
                if self.aabbs[i].overlaps(&self.aabbs[j]) {
                    self.pairs.push((i, j));
                }
            }
        }

        &self.pairs
    }
}
