//! JSON persistence for telemetry frames and classification results.

use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;
use wildcore::record::{Frame, LabeledRow};

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(value).context("serializing output")?;
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

pub fn save_frame(path: &Path, frame: &Frame) -> anyhow::Result<()> {
    write_json(path, frame)
}

pub fn load_frame(path: &Path) -> anyhow::Result<Frame> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing frame {}", path.display()))
}

pub fn save_labels(path: &Path, labels: &[LabeledRow]) -> anyhow::Result<()> {
    write_json(path, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wildcore::record::Column;
    use wildcore::BehaviorLabel;

    #[test]
    fn frame_survives_a_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("telemetry.json");
        let frame = Frame::from_columns(vec![
            Column::numeric("timestamp", vec![Some(1.0), None]),
            Column::categorical("species", vec!["deer".into(), "deer".into()]),
        ])
        .unwrap();
        save_frame(&path, &frame).unwrap();
        assert_eq!(load_frame(&path).unwrap(), frame);
    }

    #[test]
    fn labels_are_written_as_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.json");
        save_labels(&path, &[LabeledRow::new(Some(3.0), BehaviorLabel::Resting)]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"behavior\": \"resting\""));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_frame(Path::new("/nonexistent/telemetry.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/telemetry.json"));
    }
}
