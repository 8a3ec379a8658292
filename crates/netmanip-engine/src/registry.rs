//! Explicit name → procedure registry.
//!
//! Built once at startup and passed to whoever needs a lookup by name; no
//! global table exists.

use std::collections::BTreeMap;

use netmanip_core::{NetError, NetResult};
use tracing::debug;

use crate::builtin::{
    Density, GlobalEfficiency, MeanStrength, Modularity, RemoveEachCommunity, RemoveEachNode,
    ThresholdProportional, TotalWeight,
};
use crate::procedure::{Manipulation, Statistic};

#[derive(Default)]
pub struct ProcedureRegistry {
    manipulations: BTreeMap<String, Box<dyn Manipulation>>,
    statistics: BTreeMap<String, Box<dyn Statistic>>,
}

impl std::fmt::Debug for ProcedureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcedureRegistry")
            .field("manipulations", &self.manipulation_names())
            .field("statistics", &self.statistic_names())
            .finish()
    }
}

impl ProcedureRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in procedure.
    ///
    /// | Kind         | Names                                                                    |
    /// |--------------|--------------------------------------------------------------------------|
    /// | manipulation | `remove_each_node`, `remove_each_community`, `threshold_proportional`    |
    /// | statistic    | `total_weight`, `density`, `mean_strength`, `global_efficiency`, `modularity` |
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.manipulations.insert("remove_each_node".into(), Box::new(RemoveEachNode));
        reg.manipulations.insert("remove_each_community".into(), Box::new(RemoveEachCommunity));
        reg.manipulations.insert("threshold_proportional".into(), Box::new(ThresholdProportional));
        reg.statistics.insert("total_weight".into(), Box::new(TotalWeight));
        reg.statistics.insert("density".into(), Box::new(Density));
        reg.statistics.insert("mean_strength".into(), Box::new(MeanStrength));
        reg.statistics.insert("global_efficiency".into(), Box::new(GlobalEfficiency));
        reg.statistics.insert("modularity".into(), Box::new(Modularity));
        reg
    }

    /// Fails with `ContractViolation` if `name` is already taken.
    pub fn register_manipulation(
        &mut self,
        name: impl Into<String>,
        procedure: impl Manipulation + 'static,
    ) -> NetResult<()> {
        let name = name.into();
        if self.manipulations.contains_key(&name) {
            return Err(NetError::contract("procedure registry", format!("manipulation '{name}' already registered")));
        }
        debug!(name = %name, "registered manipulation");
        self.manipulations.insert(name, Box::new(procedure));
        Ok(())
    }

    /// Fails with `ContractViolation` if `name` is already taken.
    pub fn register_statistic(
        &mut self,
        name: impl Into<String>,
        procedure: impl Statistic + 'static,
    ) -> NetResult<()> {
        let name = name.into();
        if self.statistics.contains_key(&name) {
            return Err(NetError::contract("procedure registry", format!("statistic '{name}' already registered")));
        }
        debug!(name = %name, "registered statistic");
        self.statistics.insert(name, Box::new(procedure));
        Ok(())
    }

    pub fn manipulation(&self, name: &str) -> NetResult<&dyn Manipulation> {
        self.manipulations
            .get(name)
            .map(|b| b.as_ref())
            .ok_or_else(|| NetError::UnknownProcedure(name.to_string()))
    }

    pub fn statistic(&self, name: &str) -> NetResult<&dyn Statistic> {
        self.statistics
            .get(name)
            .map(|b| b.as_ref())
            .ok_or_else(|| NetError::UnknownProcedure(name.to_string()))
    }

    pub fn manipulation_names(&self) -> Vec<&str> {
        self.manipulations.keys().map(String::as_str).collect()
    }

    pub fn statistic_names(&self) -> Vec<&str> {
        self.statistics.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::ProcedureResult;
    use netmanip_core::{Args, Network};

    #[test]
    fn builtins_are_listed() {
        let reg = ProcedureRegistry::with_builtins();
        assert_eq!(
            reg.manipulation_names(),
            vec!["remove_each_community", "remove_each_node", "threshold_proportional"]
        );
        assert_eq!(reg.statistic_names().len(), 5);
    }

    #[test]
    fn lookup_by_name() {
        let reg = ProcedureRegistry::with_builtins();
        let net = Network::from_rows("n", vec![vec![0., 2.], vec![2., 0.]]).unwrap();
        let total = reg.statistic("total_weight").unwrap();
        assert_eq!(total.compute(&net, &Args::new()).unwrap(), 4.0);
        assert_eq!(
            reg.statistic("nope").err(),
            Some(NetError::UnknownProcedure("nope".into()))
        );
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut reg = ProcedureRegistry::new();
        let nodes = |net: &Network, _: &Args| -> ProcedureResult<f64> { Ok(net.node_count() as f64) };
        reg.register_statistic("nodes", nodes).unwrap();
        assert!(reg.register_statistic("nodes", nodes).is_err());
        assert_eq!(reg.statistic_names(), vec!["nodes"]);
    }
}
