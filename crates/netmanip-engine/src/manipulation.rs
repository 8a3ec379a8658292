//! Manipulation engine: runs a [`Manipulation`] over a network or over
//! every subject of a sample.

use netmanip_core::{
    Args, ManipulatedNetworkSet, ManipulatedSampleSet, NetError, NetResult, Network, NetworkSample,
};
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::procedure::{into_net_error, Manipulation};

/// Entity a manipulation can be applied to.
#[derive(Debug, Clone, Copy)]
pub enum Manipulable<'a> {
    Network(&'a Network),
    Sample(&'a NetworkSample),
}

impl<'a> From<&'a Network> for Manipulable<'a> {
    fn from(n: &'a Network) -> Self {
        Self::Network(n)
    }
}

impl<'a> From<&'a NetworkSample> for Manipulable<'a> {
    fn from(s: &'a NetworkSample) -> Self {
        Self::Sample(s)
    }
}

/// Result of [`apply_manipulation`], mirroring the input kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Manipulated {
    Network(ManipulatedNetworkSet),
    Sample(ManipulatedSampleSet),
}

impl Manipulated {
    pub fn into_network_set(self) -> Option<ManipulatedNetworkSet> {
        match self {
            Self::Network(s) => Some(s),
            Self::Sample(_) => None,
        }
    }

    pub fn into_sample_set(self) -> Option<ManipulatedSampleSet> {
        match self {
            Self::Sample(s) => Some(s),
            Self::Network(_) => None,
        }
    }
}

/// Apply `procedure` to a network or a sample with the default config.
pub fn apply_manipulation<'a, M>(
    entity: impl Into<Manipulable<'a>>,
    procedure: &M,
    args: &Args,
) -> NetResult<Manipulated>
where
    M: Manipulation + ?Sized,
{
    ManipulationEngine::default().apply(entity, procedure, args)
}

/// Stateless runner holding only configuration.
#[derive(Debug, Clone, Default)]
pub struct ManipulationEngine {
    pub config: EngineConfig,
}

impl ManipulationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// Dispatch on the entity kind.
    pub fn apply<'a, M>(
        &self,
        entity: impl Into<Manipulable<'a>>,
        procedure: &M,
        args: &Args,
    ) -> NetResult<Manipulated>
    where
        M: Manipulation + ?Sized,
    {
        match entity.into() {
            Manipulable::Network(net) => self.network(net, procedure, args).map(Manipulated::Network),
            Manipulable::Sample(sample) => self.sample(sample, procedure, args).map(Manipulated::Sample),
        }
    }

    /// Invoke `procedure` once and wrap its output with `network`.
    pub fn network<M>(&self, network: &Network, procedure: &M, args: &Args) -> NetResult<ManipulatedNetworkSet>
    where
        M: Manipulation + ?Sized,
    {
        let context = format!("manipulation of '{}'", network.name());
        let derived = procedure
            .manipulate(network, args)
            .map_err(|e| into_net_error(e, &context))?;

        if self.config.max_labels > 0 && derived.len() > self.config.max_labels {
            return Err(NetError::contract(
                context,
                format!("{} labels exceed the configured maximum of {}", derived.len(), self.config.max_labels),
            ));
        }

        let set = ManipulatedNetworkSet::new(network.clone(), derived)?;
        debug!(subject = network.name(), labels = set.len(), "manipulated network");
        Ok(set)
    }

    /// Invoke `procedure` once per subject, independently and in order.
    #[instrument(skip_all, fields(subjects = sample.len()))]
    pub fn sample<M>(&self, sample: &NetworkSample, procedure: &M, args: &Args) -> NetResult<ManipulatedSampleSet>
    where
        M: Manipulation + ?Sized,
    {
        let mut sets = Vec::with_capacity(sample.len());
        for (idx, subject) in sample.subjects().iter().enumerate() {
            sets.push(self.network(subject, procedure, args)?);
            if self.config.should_log(idx) {
                info!(done = idx + 1, total = sample.len(), "manipulation progress");
            }
        }
        ManipulatedSampleSet::new(sample.clone(), sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::{Derived, ProcedureError, ProcedureResult};
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

    fn drop_each(net: &Network, _args: &Args) -> ProcedureResult<Derived> {
        let mut out = Vec::with_capacity(net.node_count());
        for i in 0..net.node_count() {
            out.push(((i + 1).to_string(), net.remove_nodes(format!("{}-{}", net.name(), i + 1), &[i])?));
        }
        Ok(out)
    }

    #[test]
    fn labels_equal_procedure_keys() {
        let set = apply_manipulation(&path4(), &drop_each, &Args::new())
            .unwrap()
            .into_network_set()
            .unwrap();
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["1", "2", "3", "4"]);
        assert!(set.iter().all(|(_, n)| n.node_count() == 3));
        assert_eq!(set.original(), &path4());
    }

    #[test]
    fn duplicate_labels_are_a_contract_violation() {
        let dup = |net: &Network, _: &Args| -> ProcedureResult<Derived> {
            Ok(vec![("a".into(), net.clone()), ("a".into(), net.clone())])
        };
        let err = apply_manipulation(&path4(), &dup, &Args::new()).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));
    }

    #[test]
    fn empty_output_is_a_contract_violation() {
        let none = |_: &Network, _: &Args| -> ProcedureResult<Derived> { Ok(vec![]) };
        let err = apply_manipulation(&path4(), &none, &Args::new()).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));
    }

    #[test]
    fn procedure_failure_is_reported_with_subject() {
        let boom = |_: &Network, _: &Args| -> ProcedureResult<Derived> { Err(ProcedureError::failed("boom")) };
        let err = apply_manipulation(&path4(), &boom, &Args::new()).unwrap_err();
        assert!(err.to_string().contains("'path'"));
    }

    #[test]
    fn missing_variable_propagates() {
        let needs_var = |net: &Network, _: &Args| -> ProcedureResult<Derived> {
            net.text_node_var("community")?;
            Ok(vec![("x".into(), net.clone())])
        };
        let err = apply_manipulation(&path4(), &needs_var, &Args::new()).unwrap_err();
        assert_eq!(err, NetError::missing("community"));
    }

    #[test]
    fn max_labels_is_enforced() {
        let engine = ManipulationEngine::new(EngineConfig { max_labels: 2, ..EngineConfig::default() });
        let err = engine.network(&path4(), &drop_each, &Args::new()).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));
    }

    #[test]
    fn sample_preserves_subject_order() {
        let subjects = (0..3).map(|i| path4().renamed(format!("s{i}"))).collect();
        let sample = NetworkSample::from_subjects(subjects).unwrap();
        let set = apply_manipulation(&sample, &drop_each, &Args::new())
            .unwrap()
            .into_sample_set()
            .unwrap();
        let names: Vec<_> = set.subjects().iter().map(|s| s.original().name().to_string()).collect();
        assert_eq!(names, vec!["s0", "s1", "s2"]);
        assert!(set.subjects().iter().all(|s| s.len() == 4));
    }
}
