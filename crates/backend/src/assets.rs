use floorplan_shared::index::PointIndex;
use floorplan_shared::models::{FloorData, PointKind};
use std::path::Path;

/// Counts from a successfully validated floor data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSummary {
    pub data: usize,
    pub commands: usize,
    pub media: usize,
    pub chartable: usize,
    pub has_viewport: bool,
}

impl DataSummary {
    /// Parse and validate the data file the frontend will fetch.
    pub fn load(data_path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(data_path)
            .map_err(|e| format!("Failed to read {}: {}", data_path.display(), e))?;
        let data = FloorData::from_json(&json)
            .map_err(|e| format!("Invalid {}: {}", data_path.display(), e))?;
        let has_viewport = data.viewport_state.is_some();
        let index = PointIndex::new(data.points)
            .map_err(|e| format!("Invalid {}: {}", data_path.display(), e))?;

        let summary = DataSummary {
            data: index.by_type(PointKind::Data).count(),
            commands: index.by_type(PointKind::Command).count(),
            media: index.by_type(PointKind::Media).count(),
            chartable: index.chartable().count(),
            has_viewport,
        };
        tracing::info!(
            data = summary.data,
            commands = summary.commands,
            media = summary.media,
            chartable = summary.chartable,
            has_viewport,
            "Loaded floor data"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor_full_data.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_counts_points() {
        let (_dir, path) = write(
            r#"{"points":[
                {"row":1,"x":0,"y":0,"type":"data","signals":{"MAIN":-40}},
                {"row":2,"x":0,"y":0,"type":"data"},
                {"id":"c","x":0,"y":0,"type":"command","comment":"hi"},
                {"id":"m","x":0,"y":0,"type":"media","mediaData":"a.png"}
            ],"viewportState":{"scale":1,"x":0,"y":0}}"#,
        );
        let summary = DataSummary::load(&path).unwrap();
        assert_eq!(
            summary,
            DataSummary {
                data: 2,
                commands: 1,
                media: 1,
                chartable: 1,
                has_viewport: true,
            }
        );
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataSummary::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }

    #[test]
    fn test_duplicate_ids_are_reported() {
        let (_dir, path) = write(
            r#"{"points":[{"id":"x","x":0,"y":0,"type":"data"},{"id":"x","x":1,"y":1,"type":"data"}]}"#,
        );
        let err = DataSummary::load(&path).unwrap_err();
        assert!(err.contains("duplicate point identity `x`"));
    }
}
