// pulse-core/src/infrastructure/config/project.rs

use serde::{Deserialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::domain::quality::PolicyOverride;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["pulse_project_conf.yaml", "pulse.yaml"];

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Chargement YAML Base
    let mut config: ProjectConfig = load_fragment(&config_path)?;

    // 3. Satellites (policies.yml). Un fichier corrompu arrête tout.
    if let Some(config_folder) = config.config_paths.first() {
        let config_dir = project_dir.join(config_folder);
        if config_dir.exists() {
            load_satellite_configs(&mut config, &config_dir)?;
        }
    }

    // 4. Override via Variables d'Environnement
    // PULSE_TARGET_PATH=/tmp/out pulse run
    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

pub fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

/// Charge un fragment de configuration typé depuis un fichier.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| InfrastructureError::Yaml {
        path: path.display().to_string(),
        source,
    })
}

fn load_satellite_configs(
    config: &mut ProjectConfig,
    config_dir: &Path,
) -> Result<(), InfrastructureError> {
    let pol_path = config_dir.join("policies.yml");
    if pol_path.exists() {
        #[derive(Deserialize)]
        struct PoliciesWrapper {
            #[serde(default)]
            policies: Vec<PolicyOverride>,
        }

        let wrapper: PoliciesWrapper = load_fragment(&pol_path)?;
        info!(count = wrapper.policies.len(), "  📜 Cleaning policy overrides loaded");
        config.policy_overrides = wrapper.policies;
    }

    Ok(())
}

fn apply_env_overrides(config: &mut ProjectConfig) {
    if let Ok(val) = std::env::var("PULSE_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Ok(val) = std::env::var("PULSE_WORKERS") {
        match val.parse::<usize>() {
            Ok(workers) => {
                info!(old = config.validation.workers, new = workers, "Overriding workers via ENV");
                config.validation.workers = workers;
            }
            Err(_) => warn!(value = %val, "Ignoring non-numeric PULSE_WORKERS"),
        }
    }
}
