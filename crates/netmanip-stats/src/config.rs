//! Configuration for the statistical testing module.

use std::fmt;
use std::str::FromStr;

use netmanip_core::NetError;
use serde::{Deserialize, Serialize};

/// Location test family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    /// One-sample t / Welch (or Student) two-sample t.
    #[default]
    Parametric,
    /// Wilcoxon signed-rank / Mann–Whitney U.
    RankBased,
}

/// Multiple-comparison adjustment written to `p_adjusted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    #[default]
    None,
    Bonferroni,
    /// Benjamini–Hochberg false discovery rate.
    Fdr,
}

/// How label sets that differ between subjects are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Test each label on the subjects that carry it.
    #[default]
    Overlap,
    /// Every subject must carry the same label set.
    Identical,
}

fn invalid(key: &str, value: &str, allowed: &str) -> NetError {
    NetError::InvalidArgument {
        key: key.to_string(),
        reason: format!("'{value}' is not one of {allowed}"),
    }
}

impl FromStr for TestMethod {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parametric" | "t" | "ttest" => Ok(Self::Parametric),
            "rank_based" | "rank-based" | "rank" | "wilcoxon" => Ok(Self::RankBased),
            other => Err(invalid("method", other, "parametric, rank_based")),
        }
    }
}

impl FromStr for Correction {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "bonferroni" => Ok(Self::Bonferroni),
            "fdr" | "bh" => Ok(Self::Fdr),
            other => Err(invalid("correction", other, "none, bonferroni, fdr")),
        }
    }
}

impl FromStr for LabelPolicy {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlap" => Ok(Self::Overlap),
            "identical" => Ok(Self::Identical),
            other => Err(invalid("label_policy", other, "overlap, identical")),
        }
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parametric => "parametric",
            Self::RankBased => "rank_based",
        })
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Bonferroni => "bonferroni",
            Self::Fdr => "fdr",
        })
    }
}

/// Test settings shared by the three test procedures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Default: `Parametric`
    pub method: TestMethod,

    /// Pooled-variance Student t for two-sample parametric tests.
    /// Default: `false` (Welch)
    pub equal_variance: bool,

    /// Default: `None`
    pub correction: Correction,

    /// Default: `Overlap`
    pub label_policy: LabelPolicy,
}

impl TestConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// | Variable                   | Default      |
    /// |----------------------------|--------------|
    /// | `NETMANIP_TEST_METHOD`     | `parametric` |
    /// | `NETMANIP_CORRECTION`      | `none`       |
    /// | `NETMANIP_EQUAL_VARIANCE`  | `false`      |
    /// | `NETMANIP_LABEL_POLICY`    | `overlap`    |
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        fn env_parse<T: FromStr>(key: &str, default: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        }

        let def = Self::default();
        Self {
            method:         env_parse("NETMANIP_TEST_METHOD", def.method),
            equal_variance: env_parse("NETMANIP_EQUAL_VARIANCE", def.equal_variance),
            correction:     env_parse("NETMANIP_CORRECTION", def.correction),
            label_policy:   env_parse("NETMANIP_LABEL_POLICY", def.label_policy),
        }
    }
}
