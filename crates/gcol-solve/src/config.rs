//! Solver configuration: construction strategy, optimisation mode and
//! their tuning knobs, loadable from YAML.

use std::fmt;
use std::str::FromStr;

use gcol_core::errors::GcolError;
use gcol_core::{parameter_error, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Construction heuristic used to seed every solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Greedy assignment over a uniformly shuffled node order.
    Random,
    /// Greedy assignment by descending degree.
    WelshPowell,
    /// Saturation-degree ordering.
    #[default]
    Dsatur,
    /// Recursive largest first: one colour class at a time.
    Rlf,
}

impl Strategy {
    /// Stable label used in configs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::WelshPowell => "welsh-powell",
            Strategy::Dsatur => "dsatur",
            Strategy::Rlf => "rlf",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = GcolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "welsh-powell" | "welsh_powell" => Ok(Strategy::WelshPowell),
            "dsatur" => Ok(Strategy::Dsatur),
            "rlf" => Ok(Strategy::Rlf),
            other => Err(parameter_error("unknown-strategy", "unknown construction strategy")
                .with_context("strategy", other)
                .with_hint("expected one of random, welsh-powell, dsatur, rlf")),
        }
    }
}

/// Optimisation applied after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptMode {
    /// Keep the constructed colouring.
    #[default]
    None,
    /// Branch and bound; optimal when it runs to exhaustion.
    Exact,
    /// Conflict-tolerant tabu search.
    Tabucol,
    /// Uncolouring-tolerant tabu search.
    Partialcol,
    /// Hybrid evolutionary algorithm polishing offspring with TabuCol.
    HeaTabucol,
    /// Hybrid evolutionary algorithm polishing offspring with PartialCol.
    HeaPartialcol,
}

impl OptMode {
    /// Stable label used in configs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptMode::None => "none",
            OptMode::Exact => "exact",
            OptMode::Tabucol => "tabucol",
            OptMode::Partialcol => "partialcol",
            OptMode::HeaTabucol => "hea-tabucol",
            OptMode::HeaPartialcol => "hea-partialcol",
        }
    }
}

impl fmt::Display for OptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptMode {
    type Err = GcolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(OptMode::None),
            "exact" => Ok(OptMode::Exact),
            "tabucol" => Ok(OptMode::Tabucol),
            "partialcol" => Ok(OptMode::Partialcol),
            "hea-tabucol" => Ok(OptMode::HeaTabucol),
            "hea-partialcol" => Ok(OptMode::HeaPartialcol),
            other => Err(parameter_error("unknown-opt-mode", "unknown optimisation mode")
                .with_context("opt_mode", other)
                .with_hint("expected one of none, exact, tabucol, partialcol, hea-tabucol, hea-partialcol")),
        }
    }
}

/// Tabu tenure parameters shared by TabuCol and PartialCol.
///
/// A move made at iteration `t` stays tabu until
/// `t + uniform(0..tenure_base) + floor(tenure_factor * cost)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabuConfig {
    /// Upper bound (exclusive) of the random tenure component.
    #[serde(default = "default_tenure_base")]
    pub tenure_base: u64,
    /// Multiplier applied to the current cost.
    #[serde(default = "default_tenure_factor")]
    pub tenure_factor: f64,
}

fn default_tenure_base() -> u64 {
    10
}

fn default_tenure_factor() -> f64 {
    0.6
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure_base: default_tenure_base(),
            tenure_factor: default_tenure_factor(),
        }
    }
}

/// Hybrid evolutionary algorithm settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaConfig {
    /// Number of individuals kept in the population.
    #[serde(default = "default_population")]
    pub population: usize,
    /// Local search iterations spent on each new individual; `None` uses
    /// sixteen times the node count.
    #[serde(default)]
    pub offspring_iterations: Option<u64>,
}

fn default_population() -> usize {
    10
}

impl Default for HeaConfig {
    fn default() -> Self {
        Self {
            population: default_population(),
            offspring_iterations: None,
        }
    }
}

impl HeaConfig {
    /// Iterations of local search per individual for a graph with `nodes` nodes.
    pub fn iterations_for(&self, nodes: usize) -> u64 {
        self.offspring_iterations
            .unwrap_or(16 * nodes as u64)
            .max(1)
    }
}

/// Exact search settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExactConfig {
    /// Maximum number of colour assignments explored; `None` searches to
    /// exhaustion.
    #[serde(default)]
    pub node_limit: Option<u64>,
}

/// Parameters for a single solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Construction heuristic.
    #[serde(default)]
    pub strategy: Strategy,
    /// Optimisation applied after construction.
    #[serde(default)]
    pub opt_mode: OptMode,
    /// Total local search iterations across the whole optimisation.
    #[serde(default)]
    pub it_limit: u64,
    /// Diagnostic volume: 0 quiet, 1 improvements, 2 per-run summaries.
    #[serde(default)]
    pub verbosity: u8,
    /// Master seed for every random choice.
    #[serde(default)]
    pub seed: u64,
    /// Tabu tenure parameters.
    #[serde(default)]
    pub tabu: TabuConfig,
    /// Evolutionary algorithm parameters.
    #[serde(default)]
    pub hea: HeaConfig,
    /// Exact search parameters.
    #[serde(default)]
    pub exact: ExactConfig,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            opt_mode: OptMode::default(),
            it_limit: 0,
            verbosity: 0,
            seed: 0,
            tabu: TabuConfig::default(),
            hea: HeaConfig::default(),
            exact: ExactConfig::default(),
        }
    }
}

impl SolveConfig {
    /// Builds a config with the given strategy and optimisation mode.
    pub fn new(strategy: Strategy, opt_mode: OptMode, it_limit: u64) -> Self {
        Self {
            strategy,
            opt_mode,
            it_limit,
            ..Self::default()
        }
    }

    /// Parses a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GcolError> {
        let config: SolveConfig = serde_yaml::from_str(yaml).map_err(|err| {
            GcolError::Parameter(
                ErrorInfo::new("invalid-config", err.to_string())
                    .with_hint("check option names and that numbers are non-negative"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises the config to YAML.
    pub fn to_yaml_string(&self) -> Result<String, GcolError> {
        serde_yaml::to_string(self)
            .map_err(|err| GcolError::Serde(ErrorInfo::new("serialize-yaml", err.to_string())))
    }

    /// Rejects malformed values.
    pub fn validate(&self) -> Result<(), GcolError> {
        if self.hea.population < 2 {
            return Err(parameter_error("population-too-small", "HEA needs at least two individuals")
                .with_context("population", self.hea.population));
        }
        if self.hea.offspring_iterations == Some(0) {
            return Err(parameter_error(
                "invalid-offspring-iterations",
                "offspring iterations must be positive",
            ));
        }
        if !self.tabu.tenure_factor.is_finite() || self.tabu.tenure_factor < 0.0 {
            return Err(parameter_error("invalid-tenure", "tenure factor must be finite and non-negative")
                .with_context("tenure_factor", self.tabu.tenure_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_through_from_str() {
        for strategy in [Strategy::Random, Strategy::WelshPowell, Strategy::Dsatur, Strategy::Rlf] {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
        }
        for mode in [
            OptMode::None,
            OptMode::Exact,
            OptMode::Tabucol,
            OptMode::Partialcol,
            OptMode::HeaTabucol,
            OptMode::HeaPartialcol,
        ] {
            assert_eq!(mode.as_str().parse::<OptMode>().unwrap(), mode);
        }
        assert_eq!("greedy".parse::<Strategy>().unwrap_err().code(), "unknown-strategy");
        assert_eq!("anneal".parse::<OptMode>().unwrap_err().code(), "unknown-opt-mode");
    }

    #[test]
    fn yaml_defaults_fill_missing_fields() {
        let config = SolveConfig::from_yaml_str("opt_mode: hea-tabucol\nit_limit: 500\n").unwrap();
        assert_eq!(config.opt_mode, OptMode::HeaTabucol);
        assert_eq!(config.strategy, Strategy::Dsatur);
        assert_eq!(config.it_limit, 500);
        assert_eq!(config.tabu, TabuConfig::default());
        assert_eq!(config.hea.population, 10);
        assert_eq!(config.hea.iterations_for(5), 80);
    }

    #[test]
    fn negative_numbers_are_parameter_errors() {
        let err = SolveConfig::from_yaml_str("it_limit: -3\n").unwrap_err();
        assert_eq!(err.code(), "invalid-config");
        assert!(matches!(err, GcolError::Parameter(_)));
    }

    #[test]
    fn validation_rejects_tiny_population() {
        let err = SolveConfig::from_yaml_str("hea:\n  population: 1\n").unwrap_err();
        assert_eq!(err.code(), "population-too-small");
    }

    #[test]
    fn json_and_yaml_agree() {
        let mut config = SolveConfig::new(Strategy::Rlf, OptMode::HeaPartialcol, 1_000);
        config.exact.node_limit = Some(42);
        let json = serde_json::to_string(&config).unwrap();
        let from_json: SolveConfig = serde_json::from_str(&json).unwrap();
        let from_yaml = SolveConfig::from_yaml_str(&config.to_yaml_string().unwrap()).unwrap();
        assert_eq!(from_json, config);
        assert_eq!(from_yaml, config);
        assert!(json.contains("\"hea-partialcol\""));
    }
}
