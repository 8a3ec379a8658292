//! Statistic engine: evaluates a [`Statistic`] on the original and on every
//! derived network of a manipulated set.
//!
//! Nothing is cached. A failing or non-finite evaluation aborts the whole
//! call, so a partially filled statistic set is never returned.

use netmanip_core::{
    Args, ManipulatedNetworkSet, ManipulatedSampleSet, NetError, NetResult, Network,
    SampleStatisticSet, StatisticSet, VarValue, VariableMap, ORIGINAL_LABEL,
};
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::manipulation::Manipulated;
use crate::procedure::{into_net_error, Statistic};

/// Entity a statistic can be applied to.
#[derive(Debug, Clone, Copy)]
pub enum Measurable<'a> {
    Network(&'a ManipulatedNetworkSet),
    Sample(&'a ManipulatedSampleSet),
}

impl<'a> From<&'a ManipulatedNetworkSet> for Measurable<'a> {
    fn from(s: &'a ManipulatedNetworkSet) -> Self {
        Self::Network(s)
    }
}

impl<'a> From<&'a ManipulatedSampleSet> for Measurable<'a> {
    fn from(s: &'a ManipulatedSampleSet) -> Self {
        Self::Sample(s)
    }
}

impl<'a> From<&'a Manipulated> for Measurable<'a> {
    fn from(m: &'a Manipulated) -> Self {
        match m {
            Manipulated::Network(s) => Self::Network(s),
            Manipulated::Sample(s) => Self::Sample(s),
        }
    }
}

/// Result of [`apply_statistic`], mirroring the input kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Measured {
    Network(StatisticSet),
    Sample(SampleStatisticSet),
}

impl Measured {
    pub fn into_statistic_set(self) -> Option<StatisticSet> {
        match self {
            Self::Network(s) => Some(s),
            Self::Sample(_) => None,
        }
    }

    pub fn into_sample_statistic_set(self) -> Option<SampleStatisticSet> {
        match self {
            Self::Sample(s) => Some(s),
            Self::Network(_) => None,
        }
    }
}

/// What a per-subject argument resolver sees.
#[derive(Debug, Clone, Copy)]
pub struct SubjectContext<'a> {
    pub index: usize,
    pub name: &'a str,
    pub sample_vars: &'a VariableMap,
}

impl SubjectContext<'_> {
    /// Value of sample variable `name` for this subject.
    pub fn sample_value(&self, name: &str) -> NetResult<VarValue> {
        let var = self.sample_vars.get(name).ok_or_else(|| NetError::missing(name))?;
        var.get(self.index)
            .ok_or_else(|| NetError::dimension(format!("sample variable '{name}'"), self.index + 1, var.len()))
    }
}

/// Apply `procedure` to a manipulated network or sample with the default config.
pub fn apply_statistic<'a, S>(entity: impl Into<Measurable<'a>>, procedure: &S, args: &Args) -> NetResult<Measured>
where
    S: Statistic + ?Sized,
{
    StatisticEngine::default().apply(entity, procedure, args)
}

/// Like [`apply_statistic`] on a sample, but with a per-subject argument bag
/// built by `resolve` (e.g. to pass a subject's sample variable to the
/// statistic).
pub fn apply_statistic_with<S, R>(set: &ManipulatedSampleSet, procedure: &S, resolve: R) -> NetResult<SampleStatisticSet>
where
    S: Statistic + ?Sized,
    R: Fn(&SubjectContext<'_>) -> NetResult<Args>,
{
    StatisticEngine::default().sample_with(set, procedure, resolve)
}

/// Stateless runner holding only configuration.
#[derive(Debug, Clone, Default)]
pub struct StatisticEngine {
    pub config: EngineConfig,
}

impl StatisticEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    pub fn apply<'a, S>(&self, entity: impl Into<Measurable<'a>>, procedure: &S, args: &Args) -> NetResult<Measured>
    where
        S: Statistic + ?Sized,
    {
        match entity.into() {
            Measurable::Network(set) => self.network(set, procedure, args).map(Measured::Network),
            Measurable::Sample(set) => self.sample(set, procedure, args).map(Measured::Sample),
        }
    }

    /// Evaluate on the original and on every label, in label order.
    pub fn network<S>(&self, set: &ManipulatedNetworkSet, procedure: &S, args: &Args) -> NetResult<StatisticSet>
    where
        S: Statistic + ?Sized,
    {
        let subject = set.original().name();
        let original = evaluate(procedure, set.original(), args, subject, ORIGINAL_LABEL)?;
        let mut values = Vec::with_capacity(set.len());
        for (label, net) in set.iter() {
            values.push((label.to_string(), evaluate(procedure, net, args, subject, label)?));
        }
        debug!(subject, labels = values.len(), "measured network set");
        StatisticSet::new(subject, original, values)
    }

    /// One statistic set per subject, plus the sample variables.
    #[instrument(skip_all, fields(subjects = set.len()))]
    pub fn sample<S>(&self, set: &ManipulatedSampleSet, procedure: &S, args: &Args) -> NetResult<SampleStatisticSet>
    where
        S: Statistic + ?Sized,
    {
        self.sample_with(set, procedure, |_| Ok(args.clone()))
    }

    /// One statistic set per subject with a resolved argument bag each.
    pub fn sample_with<S, R>(&self, set: &ManipulatedSampleSet, procedure: &S, resolve: R) -> NetResult<SampleStatisticSet>
    where
        S: Statistic + ?Sized,
        R: Fn(&SubjectContext<'_>) -> NetResult<Args>,
    {
        let sample_vars = set.original().sample_vars();
        let mut out = Vec::with_capacity(set.len());
        for (index, subject_set) in set.subjects().iter().enumerate() {
            let ctx = SubjectContext {
                index,
                name: subject_set.original().name(),
                sample_vars,
            };
            let args = resolve(&ctx)?;
            out.push(self.network(subject_set, procedure, &args)?);
            if self.config.should_log(index) {
                info!(done = index + 1, total = set.len(), "statistic progress");
            }
        }
        SampleStatisticSet::new(out, sample_vars.clone())
    }
}

/// One procedure call, checked against the statistic contract.
pub(crate) fn evaluate<S>(procedure: &S, net: &Network, args: &Args, subject: &str, label: &str) -> NetResult<f64>
where
    S: Statistic + ?Sized,
{
    let context = format!("statistic on subject '{subject}', label '{label}'");
    let value = procedure
        .compute(net, args)
        .map_err(|e| into_net_error(e, &context))?;
    if !value.is_finite() {
        return Err(NetError::contract(context, format!("returned {value}, expected a finite real number")));
    }
    Ok(value)
}
