//! [`Network`]: one adjacency matrix with its node variables.

use ndarray::{Array2, Axis};
use serde::Serialize;

use crate::error::{NetError, NetResult};
use crate::variable::{self, Variable, VariableMap};

/// A square weighted adjacency matrix, a name and per-node variables.
///
/// Invariants, checked by every constructor:
/// - the matrix is square with `n >= 1`,
/// - every entry is finite,
/// - every node-variable column has length `n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Network {
    name: String,
    adjacency: Array2<f64>,
    node_vars: VariableMap,
}

impl Network {
    /// Build a network without node variables.
    pub fn new(name: impl Into<String>, adjacency: Array2<f64>) -> NetResult<Self> {
        Self::with_node_vars(name, adjacency, VariableMap::new())
    }

    pub fn with_node_vars(
        name: impl Into<String>,
        adjacency: Array2<f64>,
        node_vars: VariableMap,
    ) -> NetResult<Self> {
        let name = name.into();
        let (rows, cols) = adjacency.dim();
        if rows != cols {
            return Err(NetError::dimension(
                format!("adjacency of '{name}' (columns)"),
                rows,
                cols,
            ));
        }
        if rows == 0 {
            return Err(NetError::contract(
                format!("network '{name}'"),
                "adjacency matrix must have at least one node",
            ));
        }
        if let Some(((i, j), v)) = adjacency.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(NetError::contract(
                format!("network '{name}'"),
                format!("non-finite adjacency entry {v} at ({i}, {j})"),
            ));
        }
        variable::check_lengths(&node_vars, rows, &format!("network '{name}' node"))?;
        Ok(Self { name, adjacency, node_vars })
    }

    /// Build from nested rows, e.g. `vec![vec![0., 1.], vec![1., 0.]]`.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<f64>>) -> NetResult<Self> {
        let name = name.into();
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(NetError::dimension(
                    format!("adjacency of '{name}' row {i}"),
                    n,
                    row.len(),
                ));
            }
            flat.extend(row);
        }
        let adjacency = Array2::from_shape_vec((n, n), flat)
            .map_err(|e| NetError::contract(format!("network '{name}'"), e.to_string()))?;
        Self::new(name, adjacency)
    }

    /// Return a copy carrying an extra node variable.
    pub fn and_node_var(mut self, name: impl Into<String>, var: impl Into<Variable>) -> NetResult<Self> {
        let name = name.into();
        let var = var.into();
        if var.len() != self.node_count() {
            return Err(NetError::dimension(
                format!("network '{}' node variable '{name}'", self.name),
                self.node_count(),
                var.len(),
            ));
        }
        self.node_vars.insert(name, var);
        Ok(self)
    }

    /// Same matrix and variables under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adjacency: self.adjacency.clone(),
            node_vars: self.node_vars.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adjacency(&self) -> &Array2<f64> {
        &self.adjacency
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.nrows()
    }

    pub fn node_vars(&self) -> &VariableMap {
        &self.node_vars
    }

    pub fn node_var(&self, name: &str) -> NetResult<&Variable> {
        variable::lookup(&self.node_vars, name)
    }

    pub fn numeric_node_var(&self, name: &str) -> NetResult<&[f64]> {
        variable::numeric(&self.node_vars, name)
    }

    pub fn text_node_var(&self, name: &str) -> NetResult<&[String]> {
        variable::text(&self.node_vars, name)
    }

    /// Sum of every adjacency entry.
    pub fn total_weight(&self) -> f64 {
        self.adjacency.sum()
    }

    /// Number of nonzero off-diagonal entries.
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .indexed_iter()
            .filter(|((i, j), w)| i != j && **w != 0.0)
            .count()
    }

    /// Induced subnetwork on `keep` (node indices, in that order).
    ///
    /// Node variables are subset the same way, so the result satisfies the
    /// node-variable invariant by construction. Fails when `keep` is empty
    /// or holds an out-of-range index.
    pub fn subnetwork(&self, name: impl Into<String>, keep: &[usize]) -> NetResult<Self> {
        let name = name.into();
        if let Some(&bad) = keep.iter().find(|&&i| i >= self.node_count()) {
            return Err(NetError::contract(
                format!("subnetwork '{name}'"),
                format!("node index {bad} out of range for {} nodes", self.node_count()),
            ));
        }
        let adjacency = self
            .adjacency
            .select(Axis(0), keep)
            .select(Axis(1), keep);
        let node_vars = self
            .node_vars
            .iter()
            .map(|(k, v)| (k.clone(), v.select(keep)))
            .collect();
        Self::with_node_vars(name, adjacency, node_vars)
    }

    /// Network with the given node indices removed.
    pub fn remove_nodes(&self, name: impl Into<String>, remove: &[usize]) -> NetResult<Self> {
        let keep: Vec<usize> = (0..self.node_count())
            .filter(|i| !remove.contains(i))
            .collect();
        self.subnetwork(name, &keep)
    }

    /// Same node variables over a new matrix, which must still fit them.
    pub fn with_adjacency(&self, name: impl Into<String>, adjacency: Array2<f64>) -> NetResult<Self> {
        Self::with_node_vars(name, adjacency, self.node_vars.clone())
    }

    /// Re-check the shape invariants, e.g. on procedure output.
    pub fn validate(&self) -> NetResult<()> {
        let (rows, cols) = self.adjacency.dim();
        if rows != cols {
            return Err(NetError::dimension(format!("adjacency of '{}'", self.name), rows, cols));
        }
        variable::check_lengths(&self.node_vars, rows, &format!("network '{}' node", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

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

    #[test]
    fn rejects_non_square() {
        let err = Network::new("bad", Array2::zeros((2, 3))).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 2, got: 3, .. }));
    }

    #[test]
    fn rejects_empty() {
        let err = Network::new("empty", Array2::zeros((0, 0))).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));
    }

    #[test]
    fn rejects_nan_entry() {
        let err = Network::new("nan", array![[0., f64::NAN], [1., 0.]]).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));
    }

    #[test]
    fn rejects_short_node_variable() {
        let err = path4().and_node_var("community", vec!["a", "b"]).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 4, got: 2, .. }));
    }

    #[test]
    fn from_rows_matches_array() {
        let net = Network::from_rows("r", vec![vec![0., 2.], vec![2., 0.]]).unwrap();
        assert_eq!(net.adjacency(), &array![[0., 2.], [2., 0.]]);
        assert!(Network::from_rows("r", vec![vec![0., 2.], vec![2.]]).is_err());
    }

    #[test]
    fn remove_node_subsets_variables() {
        let net = path4().and_node_var("community", vec!["a", "a", "b", "b"]).unwrap();
        let cut = net.remove_nodes("cut", &[0]).unwrap();
        assert_eq!(cut.node_count(), 3);
        assert_eq!(cut.total_weight(), 4.0);
        assert_eq!(cut.text_node_var("community").unwrap(), &["a", "b", "b"]);
        cut.validate().unwrap();
    }

    #[test]
    fn counts_edges_and_weight() {
        let net = path4();
        assert_eq!(net.total_weight(), 6.0);
        assert_eq!(net.edge_count(), 6);
    }

    #[test]
    fn subnetwork_rejects_out_of_range() {
        assert!(path4().subnetwork("x", &[0, 9]).is_err());
        assert!(path4().subnetwork("x", &[]).is_err());
    }
}
