//! CLI definition and dispatch.
//!
//! Every calculator field is resolved as text: command-line flag first, then the
//! config file, then the portal's pre-filled default. The text then goes through
//! the same zero-fallback parse as form input.

use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::chart_svg::generate_series_svg;
use crate::adapters::csv_series_adapter::write_series_file;
use crate::adapters::display::{format_currency, format_number, format_percent};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_document_adapter::HtmlDocumentAdapter;
use crate::adapters::text_document_adapter::TextDocumentAdapter;
use crate::domain::compound::{
    project_series, project_with, CompoundForm, CompoundInput, Projection, ZeroRatePolicy,
    MAX_PERIODS,
};
use crate::domain::error::PortalError;
use crate::domain::lots::{compute_lots, Instrument, LotForm, LotResult};
use crate::domain::markdown;
use crate::domain::risk::{compute_risk_table, RiskForm, RiskInput, RiskTable};
use crate::ports::config_port::ConfigPort;
use crate::ports::document_port::DocumentPort;

#[derive(Parser, Debug)]
#[command(name = "portaldesk", about = "Portal markdown renderer and trading calculators")]
pub struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a markdown file
    Render(RenderArgs),
    /// Project compound growth of capital plus monthly contributions
    Project(ProjectArgs),
    /// Build the stop-loss / take-profit management table
    Risk(RiskArgs),
    /// Derive the lot size for a loss budget
    Lots(LotArgs),
}

#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    pub input: PathBuf,
    #[arg(short, long)]
    pub format: Option<String>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub capital: Option<String>,
    #[arg(long)]
    pub contribution: Option<String>,
    /// Interest rate in percent
    #[arg(long)]
    pub rate: Option<String>,
    /// monthly or annual
    #[arg(long)]
    pub rate_period: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    /// months or years
    #[arg(long)]
    pub duration_unit: Option<String>,
    /// limit or nonfinite
    #[arg(long)]
    pub zero_rate: Option<String>,
    /// Write the yearly series as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Write the yearly series as an SVG chart
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct RiskArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub capital: Option<String>,
    /// Fraction of winning operations, 0 to 1
    #[arg(long)]
    pub win_rate: Option<String>,
    #[arg(long)]
    pub months: Option<String>,
    #[arg(long)]
    pub weeks: Option<String>,
    #[arg(long)]
    pub days: Option<String>,
    #[arg(long)]
    pub operations: Option<String>,
    /// positive, neutral or negative
    #[arg(long)]
    pub payoff: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct LotArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub instrument: Option<String>,
    #[arg(long)]
    pub loss: Option<String>,
    #[arg(long)]
    pub points: Option<String>,
}

pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Ignore a second initialisation (tests, embedding).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Render(args) => run_render(&args),
        Command::Project(args) => run_project(&args),
        Command::Risk(args) => run_risk(&args),
        Command::Lots(args) => run_lots(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, PortalError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Flag, then config entry (kept even when blank), then the pre-filled default.
fn field(
    flag: Option<&String>,
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: &str,
) -> String {
    flag.cloned()
        .or_else(|| config.get_string(section, key))
        .unwrap_or_else(|| default.to_string())
}

/// Resolve an enumerated option. Missing or blank values take the default.
fn option<T>(
    flag: Option<&String>,
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<T, PortalError>
where
    T: FromStr<Err = String> + Default,
{
    match flag.cloned().or_else(|| config.get_string(section, key)) {
        Some(value) if !value.trim().is_empty() => value
            .parse()
            .map_err(|reason: String| PortalError::invalid(section, key, reason)),
        _ => Ok(T::default()),
    }
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

pub fn document_adapter(format: &str) -> Result<Box<dyn DocumentPort>, PortalError> {
    match format.trim().to_ascii_lowercase().as_str() {
        "" | "html" => Ok(Box::new(HtmlDocumentAdapter::new())),
        "text" | "txt" => Ok(Box::new(TextDocumentAdapter::new())),
        other => Err(PortalError::invalid(
            "render",
            "format",
            format!("unknown format '{other}' (expected html or text)"),
        )),
    }
}

pub fn render_file(path: &Path, format: &str) -> Result<String, PortalError> {
    let source = fs::read(path)?;
    let text = String::from_utf8(source).map_err(|e| PortalError::Render {
        reason: format!("{} is not valid UTF-8: {e}", path.display()),
    })?;
    let adapter = document_adapter(format)?;
    let document = markdown::render(&text);
    info!(
        blocks = document.blocks.len(),
        format = adapter.format_name(),
        "rendered document"
    );
    Ok(adapter.render(&document))
}

fn write_output(path: &Path, contents: &str) -> Result<(), PortalError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

fn run_render(args: &RenderArgs) -> Result<(), PortalError> {
    let config = load_config(args.config.as_ref())?;
    let format = field(args.format.as_ref(), &config, "render", "format", "html");
    let output = render_file(&args.input, &format)?;
    match &args.output {
        Some(path) => write_output(path, &output),
        None => {
            print!("{output}");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// project
// ---------------------------------------------------------------------------

pub fn build_compound_form(
    args: &ProjectArgs,
    config: &dyn ConfigPort,
) -> Result<(CompoundForm, ZeroRatePolicy), PortalError> {
    let form = CompoundForm {
        capital: field(args.capital.as_ref(), config, "compound", "capital", ""),
        monthly_contribution: field(
            args.contribution.as_ref(),
            config,
            "compound",
            "monthly_contribution",
            "",
        ),
        rate: field(args.rate.as_ref(), config, "compound", "rate", "1"),
        rate_period: option(args.rate_period.as_ref(), config, "compound", "rate_period")?,
        duration: field(args.duration.as_ref(), config, "compound", "duration", "12"),
        duration_unit: option(
            args.duration_unit.as_ref(),
            config,
            "compound",
            "duration_unit",
        )?,
    };
    let policy = option(args.zero_rate.as_ref(), config, "compound", "zero_rate")?;
    Ok((form, policy))
}

pub fn format_projection(input: &CompoundInput, projection: &Projection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Periods:           {}", projection.period_count);
    let _ = writeln!(
        out,
        "Monthly rate:      {}",
        format_percent(input.periodic_rate)
    );
    let _ = writeln!(
        out,
        "Total contributed: {}",
        format_currency(projection.total_contributed)
    );
    let _ = writeln!(
        out,
        "Total interest:    {}",
        format_currency(projection.total_interest)
    );
    let _ = writeln!(
        out,
        "Total value:       {}",
        format_currency(projection.total_value)
    );
    out
}

fn run_project(args: &ProjectArgs) -> Result<(), PortalError> {
    let config = load_config(args.config.as_ref())?;
    let (form, policy) = build_compound_form(args, &config)?;
    let input = form.to_input();
    debug!(?input, ?policy, "compound input");
    let requested = form.requested_periods();
    if requested > input.period_count {
        warn!(
            requested,
            max = MAX_PERIODS,
            "duration exceeds the longest projection; clamping"
        );
    }
    if input.periodic_rate == 0.0 {
        warn!(?policy, "periodic rate is zero; annuity term uses the zero-rate policy");
    }

    let projection = project_with(
        input.monthly_contribution,
        input.initial_capital,
        input.periodic_rate,
        input.period_count,
        policy,
    );
    print!("{}", format_projection(&input, &projection));

    if args.csv.is_some() || args.chart.is_some() {
        let series = project_series(&input, policy);
        info!(points = series.len(), "built projection series");
        if let Some(path) = &args.csv {
            write_series_file(path, &series)?;
            info!(path = %path.display(), "wrote series CSV");
        }
        if let Some(path) = &args.chart {
            write_output(path, &generate_series_svg(&series))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// risk
// ---------------------------------------------------------------------------

pub fn build_risk_form(args: &RiskArgs, config: &dyn ConfigPort) -> Result<RiskForm, PortalError> {
    Ok(RiskForm {
        capital: field(args.capital.as_ref(), config, "risk", "capital", ""),
        win_rate: field(args.win_rate.as_ref(), config, "risk", "win_rate", "0.5"),
        months: field(args.months.as_ref(), config, "risk", "months", "1"),
        weeks_per_month: field(args.weeks.as_ref(), config, "risk", "weeks_per_month", "4"),
        days_per_week: field(args.days.as_ref(), config, "risk", "days_per_week", "5"),
        operations_per_day: field(
            args.operations.as_ref(),
            config,
            "risk",
            "operations_per_day",
            "1",
        ),
        payoff: option(args.payoff.as_ref(), config, "risk", "payoff")?,
    })
}

pub fn format_risk_table(input: &RiskInput, table: &RiskTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Payoff: {}   Win rate: {}",
        input.payoff,
        format_percent(input.win_rate)
    );
    let _ = writeln!(out, "{:<12} {:>16} {:>16}", "", "Stop loss", "Take profit");
    for (label, budget) in [
        ("Operation", &table.per_operation),
        ("Day", &table.per_day),
        ("Week", &table.per_week),
        ("Month", &table.per_month),
    ] {
        let _ = writeln!(
            out,
            "{:<12} {:>16} {:>16}",
            label,
            format_currency(budget.stop_loss),
            format_currency(budget.take_profit)
        );
    }
    let _ = writeln!(
        out,
        "Operations:  {}",
        format_number(table.total_operations, 0)
    );
    let _ = writeln!(out, "Gain total:  {}", format_currency(table.gain_total));
    let _ = writeln!(out, "Loss total:  {}", format_currency(table.loss_total));
    let _ = writeln!(
        out,
        "Projection:  {}",
        format_currency(table.projected_balance)
    );
    out
}

fn run_risk(args: &RiskArgs) -> Result<(), PortalError> {
    let config = load_config(args.config.as_ref())?;
    let input = build_risk_form(args, &config)?.to_input();
    debug!(?input, "risk input");
    if !(0.0..=1.0).contains(&input.win_rate) {
        warn!(win_rate = input.win_rate, "win rate outside 0..1");
    }
    let table = compute_risk_table(&input);
    print!("{}", format_risk_table(&input, &table));
    Ok(())
}

// ---------------------------------------------------------------------------
// lots
// ---------------------------------------------------------------------------

pub fn build_lot_form(args: &LotArgs, config: &dyn ConfigPort) -> LotForm {
    LotForm {
        instrument: field(args.instrument.as_ref(), config, "lots", "instrument", "XAUUSD"),
        loss: field(args.loss.as_ref(), config, "lots", "loss", ""),
        points: field(args.points.as_ref(), config, "lots", "points", ""),
    }
}

pub fn format_lots(result: &LotResult) -> String {
    let places = result.instrument.precision() as usize;
    let mut out = String::new();
    let _ = writeln!(out, "Instrument: {}", result.instrument);
    let _ = writeln!(
        out,
        "Lot size:   {}",
        format_number(result.lot_size, places)
    );
    let _ = writeln!(out, "{:<8} {:>16}", "Lot", "Points");
    for row in &result.table.rows {
        let _ = writeln!(
            out,
            "{:<8} {:>16}",
            row.label,
            format_number(row.required_points, places)
        );
    }
    out
}

fn run_lots(args: &LotArgs) -> Result<(), PortalError> {
    let config = load_config(args.config.as_ref())?;
    let form = build_lot_form(args, &config);
    if Instrument::try_from_selector(&form.instrument).is_none() {
        warn!(
            selector = %form.instrument,
            "unknown instrument; using major pair sizing"
        );
    }
    let input = form.to_input();
    debug!(?input, "lot input");
    let result = compute_lots(&input);
    print!("{}", format_lots(&result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compound::{DurationUnit, RatePeriod};
    use crate::domain::risk::PayoffMode;

    #[test]
    fn flag_overrides_config() {
        let config = FileConfigAdapter::from_string("[compound]\ncapital = 500\n").unwrap();
        let args = ProjectArgs {
            capital: Some("750".into()),
            ..Default::default()
        };
        let (form, _) = build_compound_form(&args, &config).unwrap();
        assert_eq!(form.capital, "750");
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let config = FileConfigAdapter::empty();
        let (form, policy) = build_compound_form(&ProjectArgs::default(), &config).unwrap();
        assert_eq!(form.rate, "1");
        assert_eq!(form.duration, "12");
        assert_eq!(form.capital, "");
        assert_eq!(form.rate_period, RatePeriod::Monthly);
        assert_eq!(form.duration_unit, DurationUnit::Months);
        assert_eq!(policy, ZeroRatePolicy::ArithmeticLimit);
    }

    #[test]
    fn blank_config_value_is_kept_blank() {
        let config = FileConfigAdapter::from_string("[compound]\nrate =\n").unwrap();
        let (form, _) = build_compound_form(&ProjectArgs::default(), &config).unwrap();
        assert_eq!(form.rate, "");
    }

    #[test]
    fn unknown_enum_is_config_invalid() {
        let config = FileConfigAdapter::from_string("[risk]\npayoff = huge\n").unwrap();
        let err = build_risk_form(&RiskArgs::default(), &config).unwrap_err();
        assert!(matches!(
            err,
            PortalError::ConfigInvalid { ref section, ref key, .. }
                if section == "risk" && key == "payoff"
        ));
    }

    #[test]
    fn risk_form_reads_config() {
        let config = FileConfigAdapter::from_string(
            "[risk]\ncapital = 1000\nmonths = 10\npayoff = negative\n",
        )
        .unwrap();
        let form = build_risk_form(&RiskArgs::default(), &config).unwrap();
        assert_eq!(form.capital, "1000");
        assert_eq!(form.months, "10");
        assert_eq!(form.weeks_per_month, "4");
        assert_eq!(form.payoff, PayoffMode::Negative);
    }

    #[test]
    fn document_adapter_by_format() {
        assert_eq!(document_adapter("HTML").unwrap().format_name(), "html");
        assert_eq!(document_adapter("text").unwrap().format_name(), "text");
        assert!(document_adapter("pdf").is_err());
    }

    #[test]
    fn projection_report_uses_placeholder_for_nan() {
        let input = CompoundInput {
            monthly_contribution: 10.0,
            initial_capital: 0.0,
            periodic_rate: 0.0,
            period_count: 3,
        };
        let projection = project_with(10.0, 0.0, 0.0, 3, ZeroRatePolicy::NonFinite);
        let report = format_projection(&input, &projection);
        assert!(report.contains("Total value:       –"));
        assert!(report.contains("Total contributed: R$ 30,00"));
    }

    #[test]
    fn lot_form_defaults_to_gold() {
        let form = build_lot_form(&LotArgs::default(), &FileConfigAdapter::empty());
        assert_eq!(form.instrument, "XAUUSD");
        let report = format_lots(&compute_lots(&form.to_input()));
        assert!(report.contains("Instrument: XAUUSD"));
        assert!(report.contains("0.10"));
    }
}
