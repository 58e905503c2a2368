use clap::Parser;
use crocodile_savings::adapters::{CoordinateResolver, JsonLeadWriter};
use crocodile_savings::domain::ports::{AddressResolver, LeadSink};
use crocodile_savings::utils::error::ErrorSeverity;
use crocodile_savings::utils::logger::{self, LogFormat};
use crocodile_savings::utils::validation::Validate;
use crocodile_savings::{CalcError, CalculationResult, CalculatorConfig, CliConfig, LeadReport};

fn main() {
    let cli = CliConfig::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init(format, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        tracing::error!(
            "Calculation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig) -> Result<(), CalcError> {
    cli.validate()?;

    let config = CalculatorConfig::from_file(&cli.config)?;

    if cli.show_config {
        config.validate()?;
        let rendered = toml::to_string_pretty(&config).map_err(|e| CalcError::ConfigValidationError {
            field: "config".to_string(),
            message: format!("could not render configuration: {}", e),
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    let calculator = config.build_calculator()?;
    let profile = cli.profile()?;

    let resolver = CoordinateResolver::new(cli.address_components().unwrap_or_default());
    let resolved = cli
        .location
        .as_deref()
        .and_then(|query| resolver.resolve_or_absent(query));
    let origin = resolved.as_ref().map(|r| r.location);

    let result = calculator.calculate(&profile, origin.as_ref())?;
    let report = LeadReport::new(profile, cli.address_components(), cli.contact(), result);

    if !cli.json {
        print_summary(&report.result);
    }

    if report.contact.is_some() {
        let mut sink = JsonLeadWriter::new(std::io::stdout().lock());
        sink.submit_lead(&report)?;
        tracing::info!("Lead report emitted");
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn print_summary(result: &CalculationResult) {
    println!("Traditional training");
    println!("  Dentists:        {:>10.2}", result.traditional_costs_dentists);
    println!("  Assistants:      {:>10.2}", result.traditional_costs_assistants);
    match &result.nearest_institute {
        Some(nearest) => {
            println!("  Travel:          {:>10.2}", nearest.travel_costs);
            println!(
                "    to {} ({:.1} km, ~{:.0} min round trip)",
                nearest.institute.name, nearest.round_trip_distance_km, nearest.round_trip_travel_time_min
            );
        }
        None => println!("  Travel:          not included (no location or institute)"),
    }
    println!("  Total:           {:>10.2}", result.total_traditional_costs);
    println!("Online training:   {:>10.2}", result.crocodile_costs);
    println!(
        "Savings:           {:>10.2} ({:.1}%)",
        result.savings, result.savings_percentage
    );
}
