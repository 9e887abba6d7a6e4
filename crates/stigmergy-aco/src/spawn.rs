// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::selection::roulette_wheel;
use rand::Rng;
use stigmergy_model::index::NodeIndex;

/// Random-spawn weights, one per node.
///
/// All nodes start with weight `1.0`, so spawning is uniform until a
/// penalty is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTable {
    weights: Vec<f64>,
}

impl SpawnTable {
    #[inline]
    pub fn uniform(num_nodes: usize) -> Self {
        Self {
            weights: vec![1.0; num_nodes],
        }
    }

    #[inline]
    pub fn weight(&self, node: NodeIndex) -> f64 {
        self.weights[node.get()]
    }

    /// Multiplies the weight of `node` by `factor`.
    #[inline]
    pub fn penalize(&mut self, node: NodeIndex, factor: f64) {
        self.weights[node.get()] *= factor;
    }

    /// Draws a start node proportionally to the weights; uniform once every
    /// weight has decayed to zero. `None` only for an empty table.
    pub fn draw<R>(&self, rng: &mut R) -> Option<NodeIndex>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<(NodeIndex, f64)> = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| (NodeIndex::new(i), *w))
            .collect();
        roulette_wheel(&candidates, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uniform_table_reaches_every_node() {
        let table = SpawnTable::uniform(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut seen = [false; 4];
        for _ in 0..400 {
            seen[table.draw(&mut rng).unwrap().get()] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_penalized_node_is_avoided() {
        let mut table = SpawnTable::uniform(3);
        table.penalize(NodeIndex::new(1), 0.0);
        assert_eq!(table.weight(NodeIndex::new(1)), 0.0);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            assert_ne!(table.draw(&mut rng), Some(NodeIndex::new(1)));
        }
    }

    #[test]
    fn test_empty_table_draws_nothing() {
        let table = SpawnTable::uniform(0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(table.draw(&mut rng), None);
    }
}
