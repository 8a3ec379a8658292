//! Configuration for the manipulation and statistic engines.

use serde::{Deserialize, Serialize};

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Emit an `info` progress event every this many subjects (0 = never).
    /// Default: `25`
    pub log_every: usize,

    /// Upper bound on labels a single manipulation may return (0 = no bound).
    /// A manipulation returning more fails with `ContractViolation`.
    /// Default: `0`
    pub max_labels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_every: 25,
            max_labels: 0,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// | Variable               | Default |
    /// |------------------------|---------|
    /// | `NETMANIP_LOG_EVERY`   | `25`    |
    /// | `NETMANIP_MAX_LABELS`  | `0`     |
    pub fn from_env() -> Self {
        fn env_usize(key: &str, default: usize) -> usize {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        }

        let def = Self::default();
        Self {
            log_every:  env_usize("NETMANIP_LOG_EVERY", def.log_every),
            max_labels: env_usize("NETMANIP_MAX_LABELS", def.max_labels),
        }
    }

    pub(crate) fn should_log(&self, subject_idx: usize) -> bool {
        self.log_every > 0 && (subject_idx + 1) % self.log_every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.log_every, 25);
        assert_eq!(cfg.max_labels, 0);
    }

    #[test]
    fn progress_cadence() {
        let cfg = EngineConfig { log_every: 2, ..EngineConfig::default() };
        assert!(!cfg.should_log(0));
        assert!(cfg.should_log(1));
        let off = EngineConfig { log_every: 0, ..EngineConfig::default() };
        assert!(!off.should_log(1));
    }

    /// Env vars are process-global; keep every scenario in one test.
    #[test]
    fn from_env_all_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::remove_var("NETMANIP_LOG_EVERY");
        std::env::remove_var("NETMANIP_MAX_LABELS");
        assert_eq!(EngineConfig::from_env(), EngineConfig::default());

        std::env::set_var("NETMANIP_LOG_EVERY", "5");
        std::env::set_var("NETMANIP_MAX_LABELS", "100");
        let cfg = EngineConfig::from_env();
        assert_eq!(cfg.log_every, 5);
        assert_eq!(cfg.max_labels, 100);

        std::env::set_var("NETMANIP_LOG_EVERY", "not-a-number");
        assert_eq!(EngineConfig::from_env().log_every, 25);

        std::env::remove_var("NETMANIP_LOG_EVERY");
        std::env::remove_var("NETMANIP_MAX_LABELS");
    }
}
