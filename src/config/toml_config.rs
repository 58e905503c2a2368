use crate::core::calculator::SavingsCalculator;
use crate::core::cost_model::{
    CostModel, OnlinePricing, PriceBand, StaffRates, DEFAULT_COST_PER_ASSISTANT, DEFAULT_COST_PER_DENTIST,
};
use crate::core::directory::InstituteDirectory;
use crate::core::geo::DEFAULT_AVERAGE_SPEED_KMH;
use crate::core::resolver::{TravelPolicy, DEFAULT_CARPOOL_SIZE, DEFAULT_TRAVEL_RATE_PER_KM};
use crate::domain::model::{GeoPoint, Institute};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    pub online_pricing: Option<OnlinePricingConfig>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub cost_per_dentist: f64,
    pub cost_per_assistant: f64,
    pub travel_rate_per_km: f64,
    pub carpool_size: u32,
    pub average_speed_kmh: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cost_per_dentist: DEFAULT_COST_PER_DENTIST,
            cost_per_assistant: DEFAULT_COST_PER_ASSISTANT,
            travel_rate_per_km: DEFAULT_TRAVEL_RATE_PER_KM,
            carpool_size: DEFAULT_CARPOOL_SIZE,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

impl PricingConfig {
    pub fn staff_rates(&self) -> StaffRates {
        StaffRates {
            cost_per_dentist: self.cost_per_dentist,
            cost_per_assistant: self.cost_per_assistant,
        }
    }

    pub fn travel_policy(&self) -> TravelPolicy {
        TravelPolicy {
            rate_per_km: self.travel_rate_per_km,
            carpool_size: self.carpool_size,
            average_speed_kmh: self.average_speed_kmh,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlinePricingConfig {
    pub bands: Vec<PriceBand>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// CSV file with `name,latitude,longitude` rows, relative to the config file.
    pub csv_path: Option<String>,
    #[serde(default)]
    pub institutes: Vec<InstituteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstituteEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl CalculatorConfig {
    /// Loads the file and anchors a relative `catalog.csv_path` at its directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(CalcError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(base) = path.parent() {
            if let Some(catalog) = config.catalog.as_mut() {
                if let Some(csv_path) = catalog.csv_path.as_mut() {
                    if Path::new(csv_path.as_str()).is_relative() {
                        *csv_path = base.join(csv_path.as_str()).to_string_lossy().into_owned();
                    }
                }
            }
        }

        tracing::debug!("Loaded calculator configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        let pricing = &self.pricing;
        validation::validate_amount("pricing.cost_per_dentist", pricing.cost_per_dentist, 0.0)?;
        validation::validate_amount("pricing.cost_per_assistant", pricing.cost_per_assistant, 0.0)?;
        validation::validate_amount("pricing.travel_rate_per_km", pricing.travel_rate_per_km, 0.0)?;
        if pricing.carpool_size == 0 {
            return Err(validation::invalid_value("pricing.carpool_size", 0, "A carpool needs at least one seat"));
        }
        if !(pricing.average_speed_kmh.is_finite() && pricing.average_speed_kmh > 0.0) {
            return Err(validation::invalid_value(
                "pricing.average_speed_kmh",
                pricing.average_speed_kmh,
                "Average speed must be greater than 0",
            ));
        }

        self.online_pricing()?;

        if let Some(catalog) = &self.catalog {
            if let Some(csv_path) = &catalog.csv_path {
                validation::validate_path("catalog.csv_path", csv_path)?;
                let is_csv = Path::new(csv_path)
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if !is_csv {
                    return Err(validation::invalid_value("catalog.csv_path", csv_path, "Expected a .csv file"));
                }
            }
            for (index, entry) in catalog.institutes.iter().enumerate() {
                let field = format!("catalog.institutes[{}]", index);
                validation::validate_non_empty_string(&format!("{}.name", field), &entry.name)?;
                validation::validate_range(&format!("{}.latitude", field), entry.latitude, -90.0, 90.0)?;
                validation::validate_range(&format!("{}.longitude", field), entry.longitude, -180.0, 180.0)?;
            }
        }

        Ok(())
    }

    pub fn online_pricing(&self) -> Result<OnlinePricing> {
        let section = self.online_pricing.as_ref().ok_or_else(|| CalcError::MissingConfigError {
            field: "online_pricing".to_string(),
        })?;
        OnlinePricing::new(section.bands.clone())
    }

    pub fn csv_path(&self) -> Option<PathBuf> {
        self.catalog
            .as_ref()
            .and_then(|c| c.csv_path.as_ref())
            .map(PathBuf::from)
    }

    /// Inline entries first, then CSV rows, each in file order.
    pub fn load_directory(&self) -> Result<InstituteDirectory> {
        let inline = self
            .catalog
            .as_ref()
            .map(|c| c.institutes.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|entry| -> Result<Institute> {
                let location = GeoPoint::new(entry.latitude, entry.longitude)?;
                Ok(Institute::new(entry.name.trim(), location))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut directory = InstituteDirectory::new(inline);
        if let Some(csv_path) = self.csv_path() {
            directory.extend(InstituteDirectory::from_csv_file(csv_path)?);
        }

        if directory.is_empty() {
            tracing::warn!("Institute catalog is empty; results will not include travel costs");
        }
        Ok(directory)
    }

    /// The one-time startup step and the only place validation runs before
    /// the engine exists.
    pub fn build_calculator(&self) -> Result<SavingsCalculator> {
        self.validate_config()?;
        let directory = self.load_directory()?;
        let cost_model = CostModel::new(self.pricing.staff_rates(), self.online_pricing()?);

        tracing::info!(
            "Calculator ready with {} institutes and {} online price bands",
            directory.len(),
            cost_model.online_pricing().bands().len()
        );
        Ok(SavingsCalculator::new(directory, self.pricing.travel_policy(), cost_model))
    }
}

impl Validate for CalculatorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[[online_pricing.bands]]
min_team_size = 1
price_per_seat = 99.0
"#;

    #[test]
    fn test_pricing_defaults() {
        let config = CalculatorConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.pricing.cost_per_dentist, 1200.0);
        assert_eq!(config.pricing.cost_per_assistant, 280.0);
        assert_eq!(config.pricing.travel_rate_per_km, 0.30);
        assert_eq!(config.pricing.carpool_size, 5);
        assert_eq!(config.pricing.average_speed_kmh, 80.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_pricing_section_keeps_defaults() {
        let toml_content = r#"
[pricing]
cost_per_dentist = 1500.0

[[online_pricing.bands]]
min_team_size = 1
price_per_seat = 99.0
"#;
        let config = CalculatorConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.pricing.cost_per_dentist, 1500.0);
        assert_eq!(config.pricing.cost_per_assistant, 280.0);
    }

    #[test]
    fn test_missing_bands_fail_validation() {
        let config = CalculatorConfig::from_toml_str("[pricing]\ncarpool_size = 4\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CalcError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_pricing_values() {
        let toml_content = r#"
[pricing]
carpool_size = 0

[[online_pricing.bands]]
min_team_size = 1
price_per_seat = 99.0
"#;
        let config = CalculatorConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[pricing]
average_speed_kmh = 0.0

[[online_pricing.bands]]
min_team_size = 1
price_per_seat = 99.0
"#;
        let config = CalculatorConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_calculator_validates_on_its_own() {
        let toml_content = format!("[pricing]\ncarpool_size = 0\n{}", MINIMAL);
        let config = CalculatorConfig::from_toml_str(&toml_content).unwrap();

        match config.build_calculator() {
            Err(CalcError::InvalidConfigValueError { field, .. }) => assert_eq!(field, "pricing.carpool_size"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_catalog_path_must_be_csv() {
        let toml_content = format!("{}\n[catalog]\ncsv_path = \"institutes.tsv\"\n", MINIMAL);
        let config = CalculatorConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CalcError::InvalidConfigValueError { .. })
        ));

        let toml_content = format!("{}\n[catalog]\ncsv_path = \"data/Institutes.CSV\"\n", MINIMAL);
        let config = CalculatorConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_institute_entry() {
        let toml_content = format!(
            "{}\n[[catalog.institutes]]\nname = \"Nowhere\"\nlatitude = 95.0\nlongitude = 0.0\n",
            MINIMAL
        );
        let config = CalculatorConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CROC_TEST_DENTIST_RATE", "1350.0");

        let toml_content = format!("[pricing]\ncost_per_dentist = ${{CROC_TEST_DENTIST_RATE}}\n{}", MINIMAL);
        let config = CalculatorConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.pricing.cost_per_dentist, 1350.0);

        std::env::remove_var("CROC_TEST_DENTIST_RATE");
    }

    #[test]
    fn test_unknown_env_var_is_left_alone() {
        let content = "name = \"${CROC_TEST_SURELY_UNSET_VARIABLE}\"";
        assert_eq!(CalculatorConfig::substitute_env_vars(content), content);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = CalculatorConfig::from_toml_str("[pricing\n").unwrap_err();
        assert!(matches!(err, CalcError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = CalculatorConfig::from_file(temp_file.path()).unwrap();
        let calculator = config.build_calculator().unwrap();

        assert!(calculator.directory().is_empty());
        assert_eq!(calculator.cost_model().online_pricing().bands().len(), 1);
    }
}
