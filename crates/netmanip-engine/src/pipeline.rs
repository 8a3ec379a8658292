//! Fused manipulate-then-measure runner.
//!
//! [`Pipeline::run`] produces the same [`SampleStatisticSet`] as
//! `apply_statistic(apply_manipulation(sample, ..), ..)`, but handles one
//! subject at a time: its derived networks are dropped as soon as their
//! statistic is known, so at most one subject's derived set is alive.

use netmanip_core::{Args, NetResult, NetworkSample, SampleStatisticSet};
use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::manipulation::ManipulationEngine;
use crate::procedure::{Manipulation, Statistic};
use crate::statistic::StatisticEngine;

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub config: EngineConfig,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// `args` is handed to both procedures.
    #[instrument(skip_all, fields(subjects = sample.len()))]
    pub fn run<M, S>(
        &self,
        sample: &NetworkSample,
        manipulation: &M,
        statistic: &S,
        args: &Args,
    ) -> NetResult<SampleStatisticSet>
    where
        M: Manipulation + ?Sized,
        S: Statistic + ?Sized,
    {
        let manip = ManipulationEngine::new(self.config.clone());
        let stat = StatisticEngine::new(self.config.clone());

        let mut out = Vec::with_capacity(sample.len());
        for (idx, subject) in sample.subjects().iter().enumerate() {
            let derived = manip.network(subject, manipulation, args)?;
            out.push(stat.network(&derived, statistic, args)?);
            drop(derived);
            if self.config.should_log(idx) {
                info!(done = idx + 1, total = sample.len(), "pipeline progress");
            }
        }
        SampleStatisticSet::new(out, sample.sample_vars().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{GlobalEfficiency, RemoveEachNode, TotalWeight};
    use crate::manipulation::apply_manipulation;
    use crate::statistic::apply_statistic;
    use ndarray::array;
    use netmanip_core::{Network, Variable, VariableMap};

    fn sample() -> NetworkSample {
        let a = Network::new("a", array![[0., 1., 1.], [1., 0., 1.], [1., 1., 0.]]).unwrap();
        let b = Network::new("b", array![[0., 2., 0.], [2., 0., 1.], [0., 1., 0.]]).unwrap();
        let mut vars = VariableMap::new();
        vars.insert("group".into(), Variable::from(vec!["x", "y"]));
        NetworkSample::new(vec![a, b], VariableMap::new(), vars).unwrap()
    }

    #[test]
    fn equals_two_step_composition() {
        let args = Args::new();
        let fused = Pipeline::default().run(&sample(), &RemoveEachNode, &TotalWeight, &args).unwrap();

        let manip = apply_manipulation(&sample(), &RemoveEachNode, &args).unwrap();
        let two_step = apply_statistic(&manip, &TotalWeight, &args)
            .unwrap()
            .into_sample_statistic_set()
            .unwrap();

        assert_eq!(fused, two_step);
        assert_eq!(fused.subjects()[1].get("2"), Some(0.0));
    }

    #[test]
    fn errors_abort_the_run() {
        let broken = |_: &Network, _: &Args| -> crate::procedure::ProcedureResult<f64> { Ok(f64::INFINITY) };
        assert!(Pipeline::default().run(&sample(), &RemoveEachNode, &broken, &Args::new()).is_err());
        assert!(Pipeline::default().run(&sample(), &RemoveEachNode, &GlobalEfficiency, &Args::new()).is_ok());
    }
}
