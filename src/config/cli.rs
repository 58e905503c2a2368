use crate::domain::model::{AddressComponents, Contact, StaffingProfile};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "crocodile-savings")]
#[command(about = "Estimate what a dental practice saves with online continuing education")]
pub struct CliConfig {
    /// Path to the TOML pricing and catalog configuration
    #[arg(short, long, default_value = "calculator.toml")]
    pub config: String,

    /// Number of people in the practice team, dentists included
    #[arg(long, allow_negative_numbers = true)]
    pub team_size: i64,

    /// Number of dentists in the team
    #[arg(long, allow_negative_numbers = true)]
    pub dentists: i64,

    /// Practice location as "latitude,longitude"; omit when not resolved yet
    #[arg(long, allow_hyphen_values = true)]
    pub location: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    /// Contact name for the lead report
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email; when set, the lead report is emitted as a JSON line
    #[arg(long)]
    pub email: Option<String>,

    /// Print the full report as JSON instead of the text summary
    #[arg(long)]
    pub json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn profile(&self) -> Result<StaffingProfile> {
        StaffingProfile::from_counts(self.team_size, self.dentists)
    }

    /// `None` when no address part was given at all.
    pub fn address_components(&self) -> Option<AddressComponents> {
        if self.street.is_none() && self.city.is_none() && self.postal_code.is_none() {
            return None;
        }
        Some(AddressComponents {
            street: self.street.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            postal_code: self.postal_code.clone().unwrap_or_default(),
        })
    }

    pub fn contact(&self) -> Option<Contact> {
        self.email.as_ref().map(|email| Contact {
            name: self.name.clone(),
            email: email.trim().to_string(),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("config", &self.config)?;
        if let Some(email) = &self.email {
            validation::validate_non_empty_string("email", email)?;
            if !email.contains('@') {
                return Err(CalcError::InvalidConfigValueError {
                    field: "email".to_string(),
                    value: email.clone(),
                    reason: "Email address must contain '@'".to_string(),
                });
            }
        }
        if self.name.is_some() && self.email.is_none() {
            return Err(CalcError::MissingConfigError {
                field: "email".to_string(),
            });
        }
        Ok(())
    }
}
