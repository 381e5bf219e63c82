use air_quality_dashboard::{
    daily_aqi_table, daily_pollutants_table, render_html, station_ranking_table, summary_table,
    AirQualityDashboard, DashboardView,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;
use polars::prelude::DataFrame;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Self-contained HTML page with charts
    Html,
    /// JSON report of the three tables and the summary
    Json,
    /// Tables printed to the terminal
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "aqi-dashboard")]
#[command(about = "Builds an air quality dashboard from a station measurement CSV", long_about = None)]
struct Cli {
    /// Measurement CSV (date, station, avg_AQI, PM2_5, PM10, SO2, NO2, CO, O3)
    #[arg(long)]
    input: PathBuf,

    /// First day to include (YYYY-MM-DD), defaults to the first date in the data
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD), defaults to the last date in the data
    #[arg(long)]
    end: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Output file, `-` for stdout. Not used by the table format
    #[arg(long, default_value = "dashboard.html")]
    output: PathBuf,

    /// Page title of the HTML report
    #[arg(long, default_value = "Air Quality Dashboard")]
    title: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dashboard = AirQualityDashboard::open(cli.input.clone())
        .await
        .with_context(|| format!("Failed to load measurements from {:?}", cli.input))?;
    let view = dashboard
        .view()
        .maybe_start(cli.start)
        .maybe_end(cli.end)
        .call()
        .context("Failed to build the dashboard view")?;

    match cli.format {
        OutputFormat::Html => write_output(&cli.output, render_html(&view, &cli.title)).await?,
        OutputFormat::Json => {
            let report = view.report()?;
            let json = serde_json::to_string_pretty(&report)?;
            write_output(&cli.output, json).await?;
        }
        OutputFormat::Table => print_tables(&view)?,
    }
    Ok(())
}

async fn write_output(path: &Path, contents: String) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {:?}", path))?;
    info!("Wrote dashboard to {:?}", path);
    Ok(())
}

fn print_tables(view: &DashboardView) -> Result<()> {
    match view.range {
        Some(range) => println!("Air quality from {}", range),
        None => println!("No data available"),
    }
    print_section("Station ranking", view.station_ranking.as_deref(), station_ranking_table)?;
    print_section("Daily AQI", view.daily_aqi.as_deref(), daily_aqi_table)?;
    print_section(
        "Daily pollutants",
        view.daily_pollutants.as_deref(),
        daily_pollutants_table,
    )?;
    println!("\nSummary\n{}", summary_table(&view.summary)?);
    Ok(())
}

fn print_section<T, E: std::fmt::Display>(
    name: &str,
    rows: Result<&[T], E>,
    table: fn(&[T]) -> Result<DataFrame, air_quality_dashboard::AirQualityError>,
) -> Result<()> {
    println!("\n{}", name);
    match rows {
        Ok(rows) => println!("{}", table(rows)?),
        Err(e) => println!("unavailable: {}", e),
    }
    Ok(())
}
