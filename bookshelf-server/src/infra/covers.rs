use std::sync::Arc;

use bookshelf_config::CoversConfig;
use bookshelf_core::covers::{
    CoverOrchestrator, HttpCoverSource, RemoteCallError, TargetPlan,
};

/// Build the cover orchestrator described by `config`, talking HTTP to the
/// configured cover service.
pub fn orchestrator_from_config(
    config: &CoversConfig,
) -> Result<CoverOrchestrator, RemoteCallError> {
    let source =
        HttpCoverSource::new(config.base_url.clone(), config.request_timeout)?;
    Ok(CoverOrchestrator::new(Arc::new(source), plan_from_config(config)))
}

pub fn plan_from_config(config: &CoversConfig) -> TargetPlan {
    TargetPlan::new(config.cover_count).with_fault_target(config.fault_target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_config::{ConfigLoader, EnvConfig};

    fn covers_config(env: EnvConfig) -> CoversConfig {
        let env = EnvConfig {
            dev_mode: Some(true),
            ..env
        };
        ConfigLoader::new()
            .without_env_file()
            .with_env(env)
            .load()
            .unwrap()
            .config
            .covers
    }

    #[test]
    fn default_settings_match_default_plan() {
        let plan = plan_from_config(&covers_config(EnvConfig::default()));
        assert_eq!(plan, TargetPlan::default());
    }

    #[test]
    fn single_cover_setting_yields_unfaulted_plan() {
        let plan = plan_from_config(&covers_config(EnvConfig {
            covers_count: Some("1".into()),
            ..EnvConfig::default()
        }));
        assert_eq!(plan.count(), 1);
        assert_eq!(plan.fault_target(), None);
    }
}
