use std::collections::HashMap;
use std::sync::Mutex;

use biodash_core::{
    ChartSpec, ChartTarget, Dashboard, DisplaySurface, Error, MeasurementSet, MetadataRecord,
    OtuId, Palette, Region, Result, SampleId, SampleSource,
};

// In-memory source that records every request path it serves.
#[derive(Default)]
struct MockSource {
    names: Option<Vec<&'static str>>,
    metadata: HashMap<&'static str, &'static str>,
    samples: HashMap<&'static str, &'static str>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    fn log(&self, path: String) {
        self.requests.lock().unwrap().push(path);
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl SampleSource for MockSource {
    fn names(&self) -> Result<Vec<SampleId>> {
        self.log("/names".to_string());
        match &self.names {
            Some(names) => Ok(names.iter().map(|&n| SampleId::from(n)).collect()),
            None => Err(Error::Status {
                url: "/names".to_string(),
                code: 503,
            }),
        }
    }

    fn metadata(&self, sample: &SampleId) -> Result<MetadataRecord> {
        self.log(format!("/metadata/{sample}"));
        let body = self.metadata.get(sample.as_str()).copied().unwrap_or("{}");
        MetadataRecord::from_json(body)
    }

    fn measurements(&self, sample: &SampleId) -> Result<MeasurementSet> {
        self.log(format!("/samples/{sample}"));
        match self.samples.get(sample.as_str()) {
            Some(body) => MeasurementSet::from_json(body),
            None => Err(Error::Status {
                url: format!("/samples/{sample}"),
                code: 404,
            }),
        }
    }
}

// Display double holding the latest content of each region.
#[derive(Default, Debug, Clone, PartialEq)]
struct Recorder {
    options: Vec<String>,
    selected: Option<String>,
    metadata: Vec<String>,
    pie: Option<ChartSpec>,
    bubble: Option<ChartSpec>,
    errors: HashMap<String, String>,
}

impl DisplaySurface for Recorder {
    fn set_options(&mut self, options: &[SampleId], selected: Option<&SampleId>) {
        self.options = options.iter().map(ToString::to_string).collect();
        self.selected = selected.map(ToString::to_string);
    }

    fn render_metadata(&mut self, lines: &[String]) {
        self.errors.remove("metadata");
        self.metadata = lines.to_vec();
    }

    fn render_chart(&mut self, chart: &ChartSpec) {
        match chart.target {
            ChartTarget::Pie => {
                self.errors.remove("pie chart");
                self.pie = Some(chart.clone());
            }
            ChartTarget::Bubble => {
                self.errors.remove("bubble chart");
                self.bubble = Some(chart.clone());
            }
        }
    }

    fn show_region_error(&mut self, region: Region, message: &str) {
        match region {
            Region::Metadata => self.metadata.clear(),
            Region::Pie => self.pie = None,
            Region::Bubble => self.bubble = None,
            Region::Selector => {}
        }
        self.errors.insert(region.to_string(), message.to_string());
    }
}

fn two_sample_source() -> MockSource {
    MockSource {
        names: Some(vec!["S1", "S2"]),
        metadata: HashMap::from([
            ("S1", r#"{"age": 34, "location": "NA"}"#),
            ("S2", r#"{"sample": 940, "ETHNICITY": "Caucasian", "WFREQ": 2.5}"#),
        ]),
        samples: HashMap::from([
            (
                "S1",
                r#"{"otu_ids":[1,2],"sample_values":[5,9],"otu_labels":["a","b"]}"#,
            ),
            (
                "S2",
                r#"{"otu_ids":[11,12,13,14,15,16,17,18,19,20,21,22],
                    "sample_values":[90,80,70,60,50,40,30,20,10,9,8,7],
                    "otu_labels":["l1","l2","l3","l4","l5","l6","l7","l8","l9","l10","l11","l12"]}"#,
            ),
        ]),
        ..MockSource::default()
    }
}

#[test]
fn test_initialize_populates_options_and_renders_first() {
    let mut dash = Dashboard::new(two_sample_source(), Recorder::default(), Palette::ocean());
    assert!(dash.initialize());

    let display = dash.display();
    assert_eq!(display.options, vec!["S1", "S2"]);
    assert_eq!(display.selected.as_deref(), Some("S1"));
    assert_eq!(display.metadata, vec!["age: 34", "location: NA"]);

    let pie = display.pie.as_ref().unwrap().pie_trace().unwrap();
    assert_eq!(pie.values, vec![5.0, 9.0]);
    assert_eq!(pie.labels, vec![OtuId::from(1u64), OtuId::from(2u64)]);
    assert_eq!(pie.hovertext, vec!["a", "b"]);

    let bubble = display.bubble.as_ref().unwrap().scatter_trace().unwrap();
    assert_eq!(bubble.x, vec![OtuId::from(1u64), OtuId::from(2u64)]);
    assert_eq!(bubble.y, vec![5.0, 9.0]);
    assert_eq!(bubble.text, vec!["a", "b"]);

    assert_eq!(
        dash.source().requests(),
        vec!["/names", "/metadata/S1", "/samples/S1"]
    );
}

#[test]
fn test_each_selection_requests_once_per_region() {
    let mut dash = Dashboard::new(two_sample_source(), Recorder::default(), Palette::ocean());
    dash.initialize();
    let names: Vec<SampleId> = dash.controller().options().to_vec();

    for sample in names {
        let before = dash.source().requests().len();
        dash.option_changed(sample.clone());
        let issued = dash.source().requests()[before..].to_vec();
        assert_eq!(
            issued,
            vec![format!("/metadata/{sample}"), format!("/samples/{sample}")]
        );
    }
}

#[test]
fn test_switching_sample_leaves_no_leftover_lines() {
    let mut dash = Dashboard::new(two_sample_source(), Recorder::default(), Palette::ocean());
    dash.initialize();
    dash.option_changed("S2".into());

    let display = dash.display();
    assert_eq!(
        display.metadata,
        vec!["sample: 940", "ETHNICITY: Caucasian", "WFREQ: 2.5"]
    );
    let pie = display.pie.as_ref().unwrap().pie_trace().unwrap();
    assert_eq!(pie.values.len(), 10);
    assert_eq!(pie.labels.first(), Some(&OtuId::from(11u64)));
    let bubble = display.bubble.as_ref().unwrap().scatter_trace().unwrap();
    assert_eq!(bubble.x.len(), 12);
    assert_eq!(bubble.text.len(), 12);
}

#[test]
fn test_refresh_is_idempotent() {
    let mut once = Dashboard::new(two_sample_source(), Recorder::default(), Palette::ocean());
    once.initialize();
    once.refresh("S2".into());

    let mut twice = Dashboard::new(two_sample_source(), Recorder::default(), Palette::ocean());
    twice.initialize();
    twice.refresh("S2".into());
    twice.refresh("S2".into());

    assert_eq!(once.display(), twice.display());
    assert_eq!(
        once.controller().metadata(),
        twice.controller().metadata()
    );
}

#[test]
fn test_names_failure_triggers_no_refresh() {
    let source = MockSource {
        names: None,
        ..two_sample_source()
    };
    let mut dash = Dashboard::new(source, Recorder::default(), Palette::ocean());
    assert!(!dash.initialize());
    assert_eq!(dash.source().requests(), vec!["/names"]);
    assert!(dash.display().options.is_empty());
    assert!(dash.display().errors.contains_key("samples"));
}

#[test]
fn test_empty_names_triggers_no_refresh() {
    let source = MockSource {
        names: Some(Vec::new()),
        ..two_sample_source()
    };
    let mut dash = Dashboard::new(source, Recorder::default(), Palette::ocean());
    assert!(!dash.initialize());
    assert_eq!(dash.source().requests(), vec!["/names"]);
    assert!(dash.display().pie.is_none());
}

#[test]
fn test_failed_charts_do_not_block_metadata() {
    let mut source = two_sample_source();
    source.names = Some(vec!["S1", "S3"]);
    source.metadata.insert("S3", r#"{"age": 51}"#);
    let mut dash = Dashboard::new(source, Recorder::default(), Palette::ocean());
    dash.initialize();
    dash.option_changed("S3".into());

    let display = dash.display();
    assert_eq!(display.metadata, vec!["age: 51"]);
    assert!(display.pie.is_none());
    assert!(display.bubble.is_none());
    assert!(display.errors["pie chart"].contains("404"));
}

#[test]
fn test_palette_flows_into_charts() {
    let mut dash = Dashboard::new(two_sample_source(), Recorder::default(), Palette::ember());
    dash.initialize();
    let pie = dash.display().pie.as_ref().unwrap().pie_trace().unwrap();
    assert_eq!(pie.marker.colors[0], Palette::ember().colors()[0]);
}
