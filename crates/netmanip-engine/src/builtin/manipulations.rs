//! Built-in manipulation procedures.
//!
//! | Name                     | Labels                          | Derived network                          |
//! |--------------------------|---------------------------------|------------------------------------------|
//! | `remove_each_node`       | `"1"`..`"n"` (1-based)          | input without that node                  |
//! | `remove_each_community`  | community values, first seen    | input without every node of that value   |
//! | `threshold_proportional` | each requested density          | strongest fraction of edges kept         |

use std::collections::HashSet;

use ndarray::Array2;
use netmanip_core::{Args, Network};

use crate::procedure::{Derived, Manipulation, ProcedureError, ProcedureResult};

fn derived_name(net: &Network, label: &str) -> String {
    format!("{}[-{}]", net.name(), label)
}

// ─────────────────────────────────────────────
// Node removal
// ─────────────────────────────────────────────

/// One derived network per node, with that node removed.
///
/// A single-node network cannot lose its only node and fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveEachNode;

impl Manipulation for RemoveEachNode {
    fn manipulate(&self, network: &Network, _args: &Args) -> ProcedureResult<Derived> {
        let n = network.node_count();
        if n < 2 {
            return Err(ProcedureError::failed(format!(
                "'{}' has {n} node(s); node removal needs at least 2",
                network.name()
            )));
        }
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let label = (i + 1).to_string();
            let derived = network.remove_nodes(derived_name(network, &label), &[i])?;
            out.push((label, derived));
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────
// Community removal
// ─────────────────────────────────────────────

/// One derived network per distinct value of node variable `variable`,
/// with every node carrying that value removed.
///
/// Nodes with a missing (`NaN`) value are never removed. Label sets follow
/// the subject's own communities, so they may differ between subjects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveEachCommunity;

impl Manipulation for RemoveEachCommunity {
    fn manipulate(&self, network: &Network, args: &Args) -> ProcedureResult<Derived> {
        let variable = args.str_arg("variable")?;
        let keys = network.node_var(variable)?.keys();

        let mut seen = HashSet::new();
        let mut communities = Vec::new();
        for key in keys.iter().flatten() {
            if seen.insert(key.as_str()) {
                communities.push(key.clone());
            }
        }

        let mut out = Vec::with_capacity(communities.len());
        for community in communities {
            let remove: Vec<usize> = keys
                .iter()
                .enumerate()
                .filter(|(_, k)| k.as_deref() == Some(community.as_str()))
                .map(|(i, _)| i)
                .collect();
            if remove.len() == network.node_count() {
                return Err(ProcedureError::failed(format!(
                    "removing community '{community}' would leave '{}' without nodes",
                    network.name()
                )));
            }
            let derived = network.remove_nodes(derived_name(network, &community), &remove)?;
            out.push((community, derived));
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────
// Proportional thresholding
// ─────────────────────────────────────────────

/// For every density `d` in arg `densities`, keep the `round(d · m)`
/// strongest edges (by absolute weight) and zero the rest, where `m` is the
/// number of off-diagonal node pairs (unordered if the matrix is symmetric).
///
/// Ties break by matrix position. The node set is unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdProportional;

impl Manipulation for ThresholdProportional {
    fn manipulate(&self, network: &Network, args: &Args) -> ProcedureResult<Derived> {
        let densities = args.f64_list_arg("densities")?;
        let a = network.adjacency();
        let n = network.node_count();
        let symmetric = *a == a.t();

        let mut pairs: Vec<(usize, usize, f64)> = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i == j || (symmetric && j < i) {
                    continue;
                }
                pairs.push((i, j, a[[i, j]]));
            }
        }
        let slots = pairs.len();
        pairs.sort_by(|x, y| y.2.abs().total_cmp(&x.2.abs()));

        let mut out = Vec::with_capacity(densities.len());
        for d in densities {
            if !(d > 0.0 && d <= 1.0) {
                return Err(ProcedureError::failed(format!("density {d} outside (0, 1]")));
            }
            let keep = (d * slots as f64).round() as usize;
            let mut m = Array2::zeros((n, n));
            for &(i, j, w) in pairs.iter().take(keep).filter(|p| p.2 != 0.0) {
                m[[i, j]] = w;
                if symmetric {
                    m[[j, i]] = w;
                }
            }
            let label = format!("{d}");
            let derived = network.with_adjacency(derived_name(network, &label), m)?;
            out.push((label, derived));
        }
        Ok(out)
    }
}
