use std::fs;
use std::path::Path;

use biodash_core::{Dashboard, Error, OtuId, Palette, SampleId, SampleSource};
use biodash_io::endpoint::METADATA_DIR;
use biodash_io::DirectorySource;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "names.json", r#"["BB_940","BB.941"]"#);
    write(
        dir.path(),
        "metadata/BB_940.json",
        r#"{"sample": 940, "ETHNICITY": "Caucasian", "GENDER": "F", "AGE": 24.0}"#,
    );
    write(
        dir.path(),
        "samples/BB_940.json",
        r#"{"otu_ids":[1167,2859],"sample_values":[163,126],"otu_labels":["Bacteria","Bacteria;Firmicutes"]}"#,
    );
    write(dir.path(), "metadata/BB.941.json", r#"{"sample": 941}"#);
    dir
}

#[test]
fn test_reads_url_shaped_layout() {
    let dir = fixture_dir();
    let source = DirectorySource::open(dir.path()).unwrap();

    let names = source.names().unwrap();
    assert_eq!(names.len(), 2);

    let record = source.metadata(&names[0]).unwrap();
    assert_eq!(record.get("AGE").unwrap().to_string(), "24");

    let set = source.measurements(&names[0]).unwrap();
    assert_eq!(set.ids(), &[OtuId::from(1167u64), OtuId::from(2859u64)]);

    // Dots in identifiers stay part of the file name.
    assert_eq!(
        source
            .sample_file(METADATA_DIR, &SampleId::from("BB.941"))
            .unwrap(),
        dir.path().join("metadata").join("BB.941.json")
    );
    assert!(source.metadata(&names[1]).is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = fixture_dir();
    let source = DirectorySource::open(dir.path()).unwrap();
    let err = source.measurements(&SampleId::from("BB.941")).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");
}

#[test]
fn test_open_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(DirectorySource::open(dir.path().join("nope")).is_err());
}

#[test]
fn test_dashboard_over_fixtures() {
    let dir = fixture_dir();
    let source = DirectorySource::open(dir.path()).unwrap();
    let mut dash = Dashboard::new(source, Recorder::default(), Palette::ocean());
    assert!(dash.initialize());
    assert_eq!(
        dash.display().metadata,
        vec!["sample: 940", "ETHNICITY: Caucasian", "GENDER: F", "AGE: 24"]
    );
    assert_eq!(dash.display().charts, 2);

    // Second sample has metadata but no measurements.
    dash.option_changed("BB.941".into());
    assert_eq!(dash.display().metadata, vec!["sample: 941"]);
    assert_eq!(dash.display().errors, 2);
}

#[derive(Default)]
struct Recorder {
    metadata: Vec<String>,
    charts: usize,
    errors: usize,
}

impl biodash_core::DisplaySurface for Recorder {
    fn set_options(&mut self, _options: &[SampleId], _selected: Option<&SampleId>) {}

    fn render_metadata(&mut self, lines: &[String]) {
        self.metadata = lines.to_vec();
    }

    fn render_chart(&mut self, _chart: &biodash_core::ChartSpec) {
        self.charts += 1;
    }

    fn show_region_error(&mut self, _region: biodash_core::Region, _message: &str) {
        self.errors += 1;
    }
}

#[test]
fn test_file_names_use_raw_identifier() {
    let dir = fixture_dir();
    write(dir.path(), "metadata/BB 942.json", r#"{"sample": 942}"#);
    let source = DirectorySource::open(dir.path()).unwrap();

    let record = source.metadata(&SampleId::from("BB 942")).unwrap();
    assert_eq!(record.get("sample").unwrap().to_string(), "942");
    assert!(source
        .sample_file(METADATA_DIR, &SampleId::from("../names"))
        .is_err());
}
