//! biodash CLI
//!
//! Command-line front end for the sample explorer: list samples, print a
//! sample's metadata panel, export chart figures, or run the whole dashboard
//! flow against a text display.
#![allow(clippy::uninlined_format_args)]

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use biodash_core::config::{ENV_BASE_URL, ENV_PALETTE, ENV_TIMEOUT_SECS};
use biodash_core::{
    build_charts, metadata_lines, ChartSpec, Dashboard, DashboardConfig, DisplaySurface, Palette,
    Region, SampleId, SampleSource,
};
use biodash_io::{DirectorySource, HttpSource};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Source(#[from] biodash_io::Error),

    #[error("{0}")]
    Core(#[from] biodash_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no samples available")]
    NoSamples,
}

/// Explore per-sample OTU measurements and metadata.
#[derive(Parser)]
#[command(name = "biodash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root URL of the data endpoints
    #[arg(long, global = true, env = ENV_BASE_URL)]
    base_url: Option<String>,

    /// Read JSON fixtures from this directory instead of HTTP (takes precedence over --base-url)
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Chart palette: a built-in name (ocean, ember) or ten comma-separated #rrggbb colors
    #[arg(long, global = true, env = ENV_PALETTE)]
    palette: Option<Palette>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    timeout_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sample identifiers
    Names,

    /// Print the metadata panel for a sample
    Metadata {
        /// Sample identifier
        sample: String,
    },

    /// Print the pie and bubble figures for a sample as Plotly JSON
    Charts {
        /// Sample identifier
        sample: String,

        /// Write the figures to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the dashboard flow and print every region
    Show {
        /// Sample to select after the initial render
        sample: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(palette) = &self.palette {
            config = config.with_palette(palette.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config
    }

    fn source(&self, config: &DashboardConfig) -> Result<Box<dyn SampleSource>> {
        match &self.fixtures {
            Some(dir) => {
                log::info!("reading fixtures from {}", dir.display());
                Ok(Box::new(DirectorySource::open(dir)?))
            }
            None => {
                log::info!("fetching from {}", config.base_url);
                Ok(Box::new(HttpSource::new(config)))
            }
        }
    }
}

/// Text display: keeps the latest content of each region and prints it.
#[derive(Default)]
struct TextDisplay {
    options: Vec<String>,
    selected: Option<String>,
    metadata: Vec<String>,
    pie: Option<String>,
    bubble: Option<String>,
    selector_error: Option<String>,
}

impl TextDisplay {
    fn summarize(chart: &ChartSpec) -> String {
        if let Some(pie) = chart.pie_trace() {
            let slices: Vec<String> = pie
                .labels
                .iter()
                .zip(&pie.values)
                .map(|(id, v)| format!("{id}={v}"))
                .collect();
            format!("{} slices: {}", slices.len(), slices.join(" "))
        } else if let Some(trace) = chart.scatter_trace() {
            match (trace.x.first(), trace.x.last()) {
                (Some(first), Some(last)) => {
                    format!("{} points, x {first}..{last}", trace.x.len())
                }
                _ => "0 points".to_string(),
            }
        } else {
            "empty".to_string()
        }
    }

    fn print(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "== samples")?;
        if let Some(err) = &self.selector_error {
            writeln!(out, "  failed to load: {err}")?;
        }
        for option in &self.options {
            let marker = if self.selected.as_deref() == Some(option) {
                '*'
            } else {
                ' '
            };
            writeln!(out, "{marker} {option}")?;
        }
        writeln!(out, "== metadata")?;
        for line in &self.metadata {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "== pie chart")?;
        writeln!(out, "  {}", self.pie.as_deref().unwrap_or("-"))?;
        writeln!(out, "== bubble chart")?;
        writeln!(out, "  {}", self.bubble.as_deref().unwrap_or("-"))?;
        Ok(())
    }
}

impl DisplaySurface for TextDisplay {
    fn set_options(&mut self, options: &[SampleId], selected: Option<&SampleId>) {
        self.options = options.iter().map(ToString::to_string).collect();
        self.selected = selected.map(ToString::to_string);
    }

    fn render_metadata(&mut self, lines: &[String]) {
        self.metadata = lines.to_vec();
    }

    fn render_chart(&mut self, chart: &ChartSpec) {
        let text = Self::summarize(chart);
        match chart.target {
            biodash_core::ChartTarget::Pie => self.pie = Some(text),
            biodash_core::ChartTarget::Bubble => self.bubble = Some(text),
        }
    }

    fn show_region_error(&mut self, region: Region, message: &str) {
        let text = format!("failed to load: {message}");
        match region {
            Region::Selector => self.selector_error = Some(message.to_string()),
            Region::Metadata => self.metadata = vec![text],
            Region::Pie => self.pie = Some(text),
            Region::Bubble => self.bubble = Some(text),
        }
    }
}

/// Print the sample identifiers, one per line.
fn run_names(source: &dyn SampleSource, out: &mut impl Write) -> Result<()> {
    for name in source.names()? {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Print the metadata panel lines for `sample`.
fn run_metadata(source: &dyn SampleSource, sample: &str, out: &mut impl Write) -> Result<()> {
    let record = source.metadata(&SampleId::from(sample))?;
    for line in metadata_lines(&record) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Print both figures for `sample` as Plotly JSON, or write them to `output`.
fn run_charts(
    source: &dyn SampleSource,
    palette: &Palette,
    sample: &str,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let set = source.measurements(&SampleId::from(sample))?;
    let charts = build_charts(&set, palette);
    let json = serde_json::to_string_pretty(&charts.to_plotly_json())?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("wrote figures for {sample} to {}", path.display());
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

/// Run the dashboard flow against a text display and print every region.
fn run_show(
    source: Box<dyn SampleSource>,
    palette: Palette,
    sample: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let mut dash = Dashboard::new(source, TextDisplay::default(), palette);
    let ready = dash.initialize();
    if ready {
        if let Some(sample) = sample {
            dash.option_changed(SampleId::from(sample));
        }
    }
    dash.display().print(out)?;
    if ready {
        Ok(())
    } else {
        Err(CliError::NoSamples)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.config();
    let source = cli.source(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Names => run_names(source.as_ref(), &mut out),
        Commands::Metadata { sample } => run_metadata(source.as_ref(), sample, &mut out),
        Commands::Charts { sample, output } => run_charts(
            source.as_ref(),
            &config.palette,
            sample,
            output.as_deref(),
            &mut out,
        ),
        Commands::Show { sample } => run_show(source, config.palette, sample.as_deref(), &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biodash_core::{MeasurementSet, OtuId};

    fn write_fixtures(root: &std::path::Path) {
        fs::create_dir_all(root.join("metadata")).unwrap();
        fs::create_dir_all(root.join("samples")).unwrap();
        fs::write(root.join("names.json"), r#"["S1","S2"]"#).unwrap();
        fs::write(
            root.join("metadata/S1.json"),
            r#"{"age": 34, "location": "NA"}"#,
        )
        .unwrap();
        fs::write(
            root.join("samples/S1.json"),
            r#"{"otu_ids":[1,2],"sample_values":[5,9],"otu_labels":["a","b"]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::try_parse_from([
            "biodash",
            "--palette",
            "ember",
            "--timeout-secs",
            "0",
            "charts",
            "S1",
            "-o",
            "out.json",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.palette.name(), "ember");
        assert_eq!(config.timeout, None);
        assert!(matches!(cli.command, Commands::Charts { .. }));
    }

    #[test]
    fn test_cli_rejects_bad_palette() {
        assert!(Cli::try_parse_from(["biodash", "--palette", "neon", "names"]).is_err());
    }

    #[test]
    fn test_show_prints_every_region() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let source = DirectorySource::open(dir.path()).unwrap();

        let mut dash = Dashboard::new(source, TextDisplay::default(), Palette::ocean());
        assert!(dash.initialize());
        let mut buf = Vec::new();
        dash.display().print(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("* S1\n"));
        assert!(text.contains("  S2\n"));
        assert!(text.contains("  age: 34\n  location: NA\n"));
        assert!(text.contains("2 slices: 1=5 2=9"));
        assert!(text.contains("2 points"));
    }

    #[test]
    fn test_region_errors_are_printed() {
        let mut display = TextDisplay::default();
        display.show_region_error(Region::Pie, "request to /samples/S2 returned status 404");
        let set = MeasurementSet::new(vec![OtuId::from(3u64)], vec![1.0], vec!["x".into()]).unwrap();
        display.render_chart(&biodash_core::bubble_chart(&set, &Palette::ocean()));

        let mut buf = Vec::new();
        display.print(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("failed to load: request to /samples/S2 returned status 404"));
        assert!(text.contains("1 points, x 3..3"));
    }

    fn fixture_source(dir: &tempfile::TempDir) -> DirectorySource {
        write_fixtures(dir.path());
        DirectorySource::open(dir.path()).unwrap()
    }

    #[test]
    fn test_names_prints_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let source = fixture_source(&dir);
        let mut buf = Vec::new();
        run_names(&source, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "S1\nS2\n");
    }

    #[test]
    fn test_metadata_prints_panel_lines() {
        let dir = tempfile::tempdir().unwrap();
        let source = fixture_source(&dir);
        let mut buf = Vec::new();
        run_metadata(&source, "S1", &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "age: 34\nlocation: NA\n");

        let err = run_metadata(&source, "S2", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Core(_)), "{err}");
    }

    #[test]
    fn test_charts_writes_figures_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = fixture_source(&dir);
        let output = dir.path().join("figures.json");
        let mut buf = Vec::new();
        run_charts(&source, &Palette::ember(), "S1", Some(&output), &mut buf).unwrap();
        assert!(buf.is_empty());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["pie"]["data"][0]["values"], serde_json::json!([5.0, 9.0]));
        assert_eq!(json["bubble"]["data"][0]["x"], serde_json::json!([1, 2]));
        assert_eq!(
            json["pie"]["data"][0]["marker"]["colors"][0],
            Palette::ember().colors()[0].to_hex()
        );
    }

    #[test]
    fn test_charts_prints_to_stdout_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = fixture_source(&dir);
        let mut buf = Vec::new();
        run_charts(&source, &Palette::ocean(), "S1", None, &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["pie"]["layout"]["title"]["text"], "Pie Chart");
    }

    #[test]
    fn test_show_without_samples_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("names.json"), "[]").unwrap();
        let source = DirectorySource::open(dir.path()).unwrap();
        let mut buf = Vec::new();
        let err = run_show(Box::new(source), Palette::ocean(), None, &mut buf).unwrap_err();
        assert!(matches!(err, CliError::NoSamples));
        assert!(String::from_utf8(buf).unwrap().contains("no samples available"));
    }
}
