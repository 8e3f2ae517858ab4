//! Fetch workers run on background threads.
//!
//! Each worker performs exactly one request against the sample source and
//! reports the outcome through the channel. A send failure means the UI is
//! gone, so it is ignored.

use std::sync::mpsc::Sender;
use std::time::Instant;

use biodash_core::{RefreshToken, SampleSource};

use crate::message::AppMessage;

/// Load the sample names list.
pub fn load_names_worker(source: &dyn SampleSource, tx: &Sender<AppMessage>) {
    let start = Instant::now();
    let result = source.names();
    let _ = tx.send(AppMessage::NamesLoaded(result, start.elapsed()));
}

/// Load metadata for the token's sample.
pub fn fetch_metadata_worker(
    source: &dyn SampleSource,
    token: RefreshToken,
    tx: &Sender<AppMessage>,
) {
    let start = Instant::now();
    let result = source.metadata(token.sample());
    let _ = tx.send(AppMessage::MetadataLoaded(token, result, start.elapsed()));
}

/// Load measurements for the token's sample.
pub fn fetch_measurements_worker(
    source: &dyn SampleSource,
    token: RefreshToken,
    tx: &Sender<AppMessage>,
) {
    let start = Instant::now();
    let result = source.measurements(token.sample());
    let _ = tx.send(AppMessage::MeasurementsLoaded(token, result, start.elapsed()));
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use biodash_core::{
        Error, MeasurementSet, MetadataRecord, Result, SampleId, ViewController,
    };

    use super::*;

    struct FixedSource;

    impl SampleSource for FixedSource {
        fn names(&self) -> Result<Vec<SampleId>> {
            Ok(vec!["S1".into()])
        }

        fn metadata(&self, _sample: &SampleId) -> Result<MetadataRecord> {
            MetadataRecord::from_json(r#"{"age": 34}"#)
        }

        fn measurements(&self, sample: &SampleId) -> Result<MeasurementSet> {
            Err(Error::Status {
                url: format!("/samples/{sample}"),
                code: 404,
            })
        }
    }

    #[test]
    fn test_workers_tag_results_with_token() {
        let (tx, rx) = channel();
        let mut controller = ViewController::default();
        let token = controller.initialize(Ok(vec!["S1".into()])).unwrap();

        fetch_metadata_worker(&FixedSource, token.clone(), &tx);
        fetch_measurements_worker(&FixedSource, token.clone(), &tx);
        load_names_worker(&FixedSource, &tx);

        match rx.recv().unwrap() {
            AppMessage::MetadataLoaded(t, result, _) => {
                assert_eq!(t, token);
                assert_eq!(result.unwrap().len(), 1);
            }
            _ => panic!("expected metadata"),
        }
        match rx.recv().unwrap() {
            AppMessage::MeasurementsLoaded(t, result, _) => {
                assert_eq!(t, token);
                assert!(result.is_err());
            }
            _ => panic!("expected measurements"),
        }
        assert!(matches!(rx.recv().unwrap(), AppMessage::NamesLoaded(Ok(_), _)));
    }
}
