//! Built-in statistic procedures.
//!
//! - **Total weight**: sum of every adjacency entry.
//! - **Density**: fraction of nonzero off-diagonal entries.
//! - **Mean strength**: total weight divided by node count.
//! - **Global efficiency** Eg: mean of 1/d(i,j) over ordered node pairs,
//!   with d the unweighted shortest-path length (unreachable pairs add 0).
//! - **Modularity** Q: Newman modularity of the partition given by a node
//!   variable.
//!
//! ## Performance
//! - `global_efficiency`: O(N · (N + E)), one BFS per node
//! - everything else: O(N²), one pass over the matrix

use std::collections::VecDeque;

use netmanip_core::{Args, Network};

use crate::procedure::{ProcedureResult, Statistic};

#[derive(Debug, Clone, Copy, Default)]
pub struct TotalWeight;

impl Statistic for TotalWeight {
    fn compute(&self, network: &Network, _args: &Args) -> ProcedureResult<f64> {
        Ok(network.total_weight())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Density;

impl Statistic for Density {
    fn compute(&self, network: &Network, _args: &Args) -> ProcedureResult<f64> {
        let n = network.node_count();
        if n < 2 {
            return Ok(0.0);
        }
        Ok(network.edge_count() as f64 / (n * (n - 1)) as f64)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanStrength;

impl Statistic for MeanStrength {
    fn compute(&self, network: &Network, _args: &Args) -> ProcedureResult<f64> {
        Ok(network.total_weight() / network.node_count() as f64)
    }
}

// ─────────────────────────────────────────────
// Global efficiency
// ─────────────────────────────────────────────

/// Binary global efficiency.
///
/// E_g = 1 / (N (N − 1)) · Σ_{i ≠ j} 1 / d(i, j)
///
/// An entry `A[i][j] != 0` is an arc `i → j`. Returns 0 for `N < 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalEfficiency;

impl Statistic for GlobalEfficiency {
    fn compute(&self, network: &Network, _args: &Args) -> ProcedureResult<f64> {
        let n = network.node_count();
        if n < 2 {
            return Ok(0.0);
        }
        let a = network.adjacency();
        let adj: Vec<Vec<usize>> = (0..n)
            .map(|i| (0..n).filter(|&j| j != i && a[[i, j]] != 0.0).collect())
            .collect();

        let mut total_inv_dist = 0.0_f64;
        for source in 0..n {
            for (target, d) in bfs(&adj, source).into_iter().enumerate() {
                if let Some(d) = d {
                    if target != source && d > 0 {
                        total_inv_dist += 1.0 / d as f64;
                    }
                }
            }
        }
        Ok(total_inv_dist / (n * (n - 1)) as f64)
    }
}

/// BFS from `start`. `dist[v]` is `None` for unreachable nodes.
fn bfs(adj: &[Vec<usize>], start: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adj.len()];
    let mut queue = VecDeque::new();

    dist[start] = Some(0usize);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let current_dist = dist[current].unwrap_or(0);
        for &neighbor in &adj[current] {
            if dist[neighbor].is_none() {
                dist[neighbor] = Some(current_dist + 1);
                queue.push_back(neighbor);
            }
        }
    }

    dist
}

// ─────────────────────────────────────────────
// Modularity
// ─────────────────────────────────────────────

/// Newman modularity of the partition in node variable arg `variable`.
///
/// Q = 1 / (2m) · Σ_ij [ A_ij − k_i k_j / (2m) ] · δ(c_i, c_j)
///
/// with k_i the row sum and 2m the total weight. Nodes with a missing
/// community value belong to no community. Returns 0 for an empty graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modularity;

impl Statistic for Modularity {
    fn compute(&self, network: &Network, args: &Args) -> ProcedureResult<f64> {
        let variable = args.str_arg("variable")?;
        let community = network.node_var(variable)?.keys();
        let a = network.adjacency();
        let n = network.node_count();

        let two_m = network.total_weight();
        if two_m == 0.0 {
            return Ok(0.0);
        }
        let k: Vec<f64> = a.rows().into_iter().map(|r| r.sum()).collect();

        let mut q = 0.0_f64;
        for i in 0..n {
            let Some(ci) = &community[i] else { continue };
            for j in 0..n {
                if community[j].as_ref() == Some(ci) {
                    q += a[[i, j]] - k[i] * k[j] / two_m;
                }
            }
        }
        Ok(q / two_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn path4() -> Network {
        Network::new(
            "path",
            array![
                [0., 1., 0., 0.],
                [1., 0., 1., 0.],
                [0., 1., 0., 1.],
                [0., 0., 1., 0.]
            ],
        )
        .unwrap()
    }

    fn complete(n: usize) -> Network {
        let mut a = Array2::ones((n, n));
        for i in 0..n {
            a[[i, i]] = 0.0;
        }
        Network::new("k", a).unwrap()
    }

    #[test]
    fn total_weight_and_density() {
        let args = Args::new();
        assert_eq!(TotalWeight.compute(&path4(), &args).unwrap(), 6.0);
        assert!((Density.compute(&path4(), &args).unwrap() - 0.5).abs() < 1e-12);
        assert!((MeanStrength.compute(&path4(), &args).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn efficiency_of_complete_graph_is_one() {
        let eg = GlobalEfficiency.compute(&complete(5), &Args::new()).unwrap();
        assert!((eg - 1.0).abs() < 1e-12, "expected 1.0, got {eg}");
    }

    #[test]
    fn efficiency_of_path() {
        // distances: 1,2,3 / 1,1,2 / 2,1,1 / 3,2,1 → Σ 1/d = 2·(1 + 1/2 + 1/3) + 2·(1 + 1 + 1/2)
        let expected = (2.0 * (1.0 + 0.5 + 1.0 / 3.0) + 2.0 * 2.5) / 12.0;
        let eg = GlobalEfficiency.compute(&path4(), &Args::new()).unwrap();
        assert!((eg - expected).abs() < 1e-12, "expected {expected}, got {eg}");
    }

    #[test]
    fn efficiency_of_disconnected_and_single() {
        let empty = Network::new("e", Array2::zeros((3, 3))).unwrap();
        assert_eq!(GlobalEfficiency.compute(&empty, &Args::new()).unwrap(), 0.0);
        let single = Network::from_rows("one", vec![vec![0.]]).unwrap();
        assert_eq!(GlobalEfficiency.compute(&single, &Args::new()).unwrap(), 0.0);
    }

    #[test]
    fn modularity_of_two_cliques() {
        // Two triangles joined by one edge (2–3).
        let mut a = Array2::zeros((6, 6));
        for &(i, j) in &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5), (2, 3)] {
            a[[i, j]] = 1.0;
            a[[j, i]] = 1.0;
        }
        let net = Network::new("bridge", a)
            .unwrap()
            .and_node_var("community", vec!["a", "a", "a", "b", "b", "b"])
            .unwrap();
        let q = Modularity
            .compute(&net, &Args::new().with("variable", "community"))
            .unwrap();
        // m = 7, each side: 3 internal edges, degree sum 7 → Q = 2·(3/7 − (7/14)²)
        let expected = 2.0 * (3.0 / 7.0 - 0.25);
        assert!((q - expected).abs() < 1e-12, "expected {expected}, got {q}");
    }

    #[test]
    fn modularity_requires_variable() {
        assert!(Modularity.compute(&path4(), &Args::new()).is_err());
        assert!(Modularity
            .compute(&path4(), &Args::new().with("variable", "community"))
            .is_err());
    }
}
