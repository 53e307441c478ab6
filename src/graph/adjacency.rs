//! Dense adjacency-matrix graph and its genetic operators.
//!
//! [`AdjacencyGraph`] is an undirected simple graph on labelled vertices
//! `0..size`. Alignment for the matching metric is by label: pattern vertex
//! `i` lands on host vertex `i`.

use std::collections::VecDeque;
use std::fmt;

use super::{Crossover, Mutator, RandomGraphFactory, StructuralMetrics};
use crate::random::RandomSource;

/// Errors raised when building an [`AdjacencyGraph`] from external data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Adjacency matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("Adjacency matrix entry ({row}, {col}) must be 0 or 1, got {value}")]
    InvalidEntry { row: usize, col: usize, value: u8 },
    #[error("Adjacency matrix is not symmetric at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },
    #[error("Self-loop on vertex {0} is not allowed")]
    SelfLoop(usize),
    #[error("Vertex {vertex} is out of range for a graph with {size} vertices")]
    VertexOutOfRange { vertex: usize, size: usize },
}

/// Undirected simple graph stored as a dense boolean matrix.
///
/// With the `serde` feature the graph serializes as its 0/1 row matrix, and
/// deserialization goes through [`from_matrix`](Self::from_matrix), so
/// malformed input is rejected with a [`GraphError`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")
)]
pub struct AdjacencyGraph {
    size: usize,
    /// Row-major `size * size` matrix, kept symmetric with a false diagonal.
    matrix: Vec<bool>,
    edge_count: usize,
}

impl AdjacencyGraph {
    /// Creates a graph with `size` vertices and no edges.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            matrix: vec![false; size * size],
            edge_count: 0,
        }
    }

    /// Builds a graph from a square 0/1 adjacency matrix.
    ///
    /// The matrix must be symmetric with a zero diagonal.
    ///
    /// ```
    /// use u_mcs::graph::AdjacencyGraph;
    /// use u_mcs::graph::StructuralMetrics;
    ///
    /// let path = AdjacencyGraph::from_matrix(&[[0u8, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
    /// assert_eq!(path.size(), 3);
    /// assert_eq!(path.edge_count(), 2);
    /// ```
    pub fn from_matrix<T: AsRef<[u8]>>(rows: &[T]) -> Result<Self, GraphError> {
        let n = rows.len();
        for (row, entries) in rows.iter().enumerate() {
            let len = entries.as_ref().len();
            if len != n {
                return Err(GraphError::NotSquare {
                    row,
                    len,
                    expected: n,
                });
            }
        }

        let mut graph = Self::new(n);
        for u in 0..n {
            for v in 0..n {
                let value = rows[u].as_ref()[v];
                if value > 1 {
                    return Err(GraphError::InvalidEntry {
                        row: u,
                        col: v,
                        value,
                    });
                }
                if value != rows[v].as_ref()[u] {
                    return Err(GraphError::Asymmetric { row: u, col: v });
                }
                if u == v && value == 1 {
                    return Err(GraphError::SelfLoop(u));
                }
                if u < v && value == 1 {
                    graph.set_edge(u, v, true);
                }
            }
        }
        Ok(graph)
    }

    /// Builds a graph with `size` vertices from an undirected edge list.
    ///
    /// Duplicate edges are collapsed.
    pub fn from_edges(size: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = Self::new(size);
        for &(u, v) in edges {
            for vertex in [u, v] {
                if vertex >= size {
                    return Err(GraphError::VertexOutOfRange { vertex, size });
                }
            }
            if u == v {
                return Err(GraphError::SelfLoop(u));
            }
            graph.set_edge(u, v, true);
        }
        Ok(graph)
    }

    /// Returns the adjacency matrix as 0/1 rows.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|u| {
                self.matrix[u * self.size..(u + 1) * self.size]
                    .iter()
                    .map(|&present| u8::from(present))
                    .collect()
            })
            .collect()
    }

    /// Returns whether `u` and `v` are adjacent.
    ///
    /// Out-of-range vertices are never adjacent to anything.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.size && v < self.size && self.matrix[u * self.size + v]
    }

    /// Adds or removes the edge `{u, v}`.
    ///
    /// # Panics
    /// Panics if either vertex is out of range or `u == v`.
    pub fn set_edge(&mut self, u: usize, v: usize, present: bool) {
        assert!(
            u < self.size && v < self.size,
            "vertex out of range: ({u}, {v}) in graph of size {}",
            self.size
        );
        assert_ne!(u, v, "self-loops are not allowed");

        if self.has_edge(u, v) == present {
            return;
        }
        self.matrix[u * self.size + v] = present;
        self.matrix[v * self.size + u] = present;
        if present {
            self.edge_count += 1;
        } else {
            self.edge_count -= 1;
        }
    }

    /// Appends an isolated vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        let old = self.size;
        let mut grown = Self::new(old + 1);
        for (u, v) in self.edges() {
            grown.set_edge(u, v, true);
        }
        *self = grown;
        old
    }

    /// Removes the highest-numbered vertex and its incident edges.
    ///
    /// Does nothing on the empty graph.
    pub fn remove_last_vertex(&mut self) {
        if self.size == 0 {
            return;
        }
        let last = self.size - 1;
        let mut shrunk = Self::new(last);
        for (u, v) in self.edges() {
            if u != last && v != last {
                shrunk.set_edge(u, v, true);
            }
        }
        *self = shrunk;
    }

    /// Returns every edge `(u, v)` with `u < v`, in row-major order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for u in 0..self.size {
            for v in (u + 1)..self.size {
                if self.matrix[u * self.size + v] {
                    edges.push((u, v));
                }
            }
        }
        edges
    }

    /// Counts connected components over vertices `0..n`, using only edges
    /// accepted by `keep`.
    fn count_components(n: usize, keep: impl Fn(usize, usize) -> bool) -> usize {
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        let mut components = 0;

        for start in 0..n {
            if visited[start] {
                continue;
            }
            components += 1;
            visited[start] = true;
            queue.push_back(start);
            while let Some(u) = queue.pop_front() {
                for v in 0..n {
                    if !visited[v] && keep(u, v) {
                        visited[v] = true;
                        queue.push_back(v);
                    }
                }
            }
        }
        components
    }
}

impl StructuralMetrics for AdjacencyGraph {
    fn size(&self) -> usize {
        self.size
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn unconnected_component_count(&self) -> usize {
        Self::count_components(self.size, |u, v| self.has_edge(u, v)).max(1)
    }

    fn count_unconnected_subgraphs_when_matched_against(&self, pattern: &Self) -> usize {
        let aligned = pattern.size.min(self.size);
        Self::count_components(aligned, |u, v| pattern.has_edge(u, v) && self.has_edge(u, v))
            .max(1)
    }
}

impl TryFrom<Vec<Vec<u8>>> for AdjacencyGraph {
    type Error = GraphError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, GraphError> {
        Self::from_matrix(&rows)
    }
}

impl From<AdjacencyGraph> for Vec<Vec<u8>> {
    fn from(graph: AdjacencyGraph) -> Self {
        graph.rows()
    }
}

impl fmt::Display for AdjacencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vertices={}, edges={}", self.size, self.edge_count)?;
        for u in 0..self.size {
            writeln!(f)?;
            for v in 0..self.size {
                if v > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", u8::from(self.matrix[u * self.size + v]))?;
            }
        }
        Ok(())
    }
}

/// Random construction, crossover, and mutation for [`AdjacencyGraph`].
///
/// # Examples
///
/// ```
/// use u_mcs::graph::MatrixOperators;
///
/// let ops = MatrixOperators::default()
///     .with_edge_probability(0.6)
///     .with_mutation_rate(0.2);
/// assert!((ops.mutation_rate - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixOperators {
    /// Probability that a vertex pair is joined in a freshly created graph.
    pub edge_probability: f64,

    /// Probability that [`Mutator::mutate`] perturbs a graph at all.
    pub mutation_rate: f64,
}

impl Default for MatrixOperators {
    fn default() -> Self {
        Self {
            edge_probability: 0.5,
            mutation_rate: 0.1,
        }
    }
}

impl MatrixOperators {
    /// Sets the edge probability for random graphs.
    pub fn with_edge_probability(mut self, p: f64) -> Self {
        self.edge_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-individual mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }
}

impl RandomGraphFactory for MatrixOperators {
    type Graph = AdjacencyGraph;

    fn create_random_graph<R: RandomSource + ?Sized>(
        &self,
        max_size: usize,
        rng: &mut R,
    ) -> AdjacencyGraph {
        if max_size == 0 {
            return AdjacencyGraph::new(0);
        }
        let size = 1 + rng.next_in_range(max_size);
        let mut graph = AdjacencyGraph::new(size);
        for u in 0..size {
            for v in (u + 1)..size {
                if rng.chance(self.edge_probability) {
                    graph.set_edge(u, v, true);
                }
            }
        }
        graph
    }
}

impl Crossover<AdjacencyGraph> for MatrixOperators {
    /// Uniform crossover on vertex pairs.
    ///
    /// The child takes its vertex count from one parent at random; each pair
    /// then copies its edge bit from a randomly chosen parent.
    fn create_child<R: RandomSource + ?Sized>(
        &self,
        parent_a: &AdjacencyGraph,
        parent_b: &AdjacencyGraph,
        rng: &mut R,
    ) -> AdjacencyGraph {
        let size = if rng.next_in_range(2) == 0 {
            parent_a.size
        } else {
            parent_b.size
        };

        let mut child = AdjacencyGraph::new(size);
        for u in 0..size {
            for v in (u + 1)..size {
                let donor = if rng.next_in_range(2) == 0 {
                    parent_a
                } else {
                    parent_b
                };
                if donor.has_edge(u, v) {
                    child.set_edge(u, v, true);
                }
            }
        }
        child
    }
}

impl Mutator<AdjacencyGraph> for MatrixOperators {
    /// With probability `mutation_rate`, applies one perturbation:
    ///
    /// - 80%: toggle a random vertex pair
    /// - 10%: append a vertex attached to a random existing vertex
    /// - 10%: drop the last vertex
    fn mutate<R: RandomSource + ?Sized>(&self, graph: &mut AdjacencyGraph, rng: &mut R) {
        if !rng.chance(self.mutation_rate) {
            return;
        }

        match rng.next_in_range(10) {
            0 => grow(graph, rng),
            1 if graph.size > 0 => graph.remove_last_vertex(),
            _ if graph.size >= 2 => {
                let u = rng.next_in_range(graph.size);
                let mut v = rng.next_in_range(graph.size - 1);
                if v >= u {
                    v += 1;
                }
                let present = graph.has_edge(u, v);
                graph.set_edge(u, v, !present);
            }
            _ => grow(graph, rng),
        }
    }
}

fn grow<R: RandomSource + ?Sized>(graph: &mut AdjacencyGraph, rng: &mut R) {
    let new = graph.add_vertex();
    if new > 0 {
        let anchor = rng.next_in_range(new);
        graph.set_edge(anchor, new, true);
    }
}
