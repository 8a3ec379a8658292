//! Two-level grouping of subjects by a sample variable.

use std::collections::HashSet;

use netmanip_core::{NetError, NetResult, SampleStatisticSet};

use crate::result::Grouping;

/// Subjects split into exactly two groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups {
    pub grouping: Grouping,
    /// Group index (0 or 1) per subject; `None` for a missing value.
    pub membership: Vec<Option<usize>>,
}

impl Groups {
    /// Groups from sample variable `variable`, ordered by first appearance.
    ///
    /// Fails with `MissingVariable` when the variable is absent and with
    /// `GroupConfiguration` unless it has exactly two distinct non-missing
    /// values.
    pub fn resolve(set: &SampleStatisticSet, variable: &str) -> NetResult<Self> {
        let keys = set.sample_var(variable)?.keys();

        let mut seen = HashSet::new();
        let mut levels: Vec<&str> = Vec::new();
        for key in keys.iter().flatten() {
            if seen.insert(key.as_str()) {
                levels.push(key.as_str());
            }
        }
        let &[first, second] = levels.as_slice() else {
            return Err(NetError::GroupConfiguration {
                variable: variable.to_string(),
                distinct: levels.len(),
            });
        };

        let membership = keys
            .iter()
            .map(|k| match k.as_deref() {
                Some(k) if k == first => Some(0),
                Some(_) => Some(1),
                None => None,
            })
            .collect();

        Ok(Self {
            grouping: Grouping {
                variable: variable.to_string(),
                levels: [first.to_string(), second.to_string()],
            },
            membership,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netmanip_core::{StatisticSet, Variable, VariableMap};

    fn set_with(var: Variable) -> SampleStatisticSet {
        let subjects = (0..var.len())
            .map(|i| StatisticSet::new(format!("s{i}"), 1.0, vec![("a".into(), 2.0)]).unwrap())
            .collect();
        let mut vars = VariableMap::new();
        vars.insert("group".into(), var);
        SampleStatisticSet::new(subjects, vars).unwrap()
    }

    #[test]
    fn first_appearance_order() {
        let g = Groups::resolve(&set_with(Variable::from(vec!["pt", "hc", "pt"])), "group").unwrap();
        assert_eq!(g.grouping.levels, ["pt".to_string(), "hc".to_string()]);
        assert_eq!(g.membership, vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn missing_values_are_ungrouped() {
        let g = Groups::resolve(&set_with(Variable::Numeric(vec![1.0, f64::NAN, 2.0])), "group").unwrap();
        assert_eq!(g.membership, vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn wrong_level_count() {
        let err = Groups::resolve(&set_with(Variable::from(vec!["a", "a"])), "group").unwrap_err();
        assert_eq!(err, NetError::GroupConfiguration { variable: "group".into(), distinct: 1 });

        let err = Groups::resolve(&set_with(Variable::from(vec!["a", "b", "c"])), "group").unwrap_err();
        assert_eq!(err, NetError::GroupConfiguration { variable: "group".into(), distinct: 3 });

        let err = Groups::resolve(&set_with(Variable::from(vec!["a", "b"])), "sex").unwrap_err();
        assert_eq!(err, NetError::missing("sex"));
    }
}
