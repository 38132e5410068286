// pulse-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrat d'entrée des datasets (DatasetSource)
pub mod ports;

// 2. Domain (Cœur du métier)
// Règles de validation, Issues, Table des politiques de nettoyage.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB (CSV), JSON, Config YAML, Issue log
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (Validation par lots, Rapport, Run)
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::DatasetValidator;
pub use domain::quality::{Action, Issue, IssueType, Policy, PolicyTable};
pub use error::PulseError;
