use std::path::{Path, PathBuf};

use clap::Parser;

use crate::data::model::RecordStore;

/// Environment variable naming the launch table to open at startup.
pub const DATA_PATH_ENV: &str = "LAUNCH_DASH_DATA";

/// File picked up from the working directory when nothing else is given.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard: success breakdown and payload scatter")]
pub struct Cli {
    /// Launch table to open (.csv or .parquet)
    #[arg(env = DATA_PATH_ENV)]
    pub data: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Payload slider bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderBounds {
    /// Widen the bounds so every payload in `store` is reachable, snapping the
    /// new edges outward to whole steps.
    pub fn covering(self, store: &RecordStore) -> Self {
        let snap_down = |v: f64| (v / self.step).floor() * self.step;
        let snap_up = |v: f64| (v / self.step).ceil() * self.step;
        Self {
            min: self.min.min(snap_down(store.min_payload_kg())),
            max: self.max.max(snap_up(store.max_payload_kg())),
            step: self.step,
        }
    }
}

// ---------------------------------------------------------------------------
// Startup settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Table to load before the window opens. `None` starts empty.
    pub data_path: Option<PathBuf>,
    pub slider: SliderBounds,
}

impl Settings {
    /// Argument or environment first, then the default file if it exists.
    pub fn from_cli(cli: Cli) -> Self {
        Self::resolve(cli.data, Path::new(DEFAULT_DATA_FILE))
    }

    fn resolve(data: Option<PathBuf>, default_file: &Path) -> Self {
        let data_path =
            data.or_else(|| default_file.exists().then(|| default_file.to_path_buf()));
        Self {
            data_path,
            slider: SliderBounds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use clap::error::ErrorKind;
    use tempfile::TempDir;

    const MISSING: &str = "/definitely/not/here.csv";

    #[test]
    fn test_positional_path() {
        let cli = Cli::try_parse_from(["launch-dash", "a.csv"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("a.csv")));
    }

    #[test]
    fn test_help_is_not_a_data_path() {
        let err = Cli::try_parse_from(["launch-dash", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_env_used_without_argument() {
        std::env::set_var(DATA_PATH_ENV, "b.csv");
        let cli = Cli::try_parse_from(["launch-dash"]);
        std::env::remove_var(DATA_PATH_ENV);
        assert_eq!(cli.unwrap().data, Some(PathBuf::from("b.csv")));
    }

    #[test]
    fn test_given_path_wins_over_default_file() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join(DEFAULT_DATA_FILE);
        std::fs::write(&default, "").unwrap();

        let s = Settings::resolve(Some("a.csv".into()), &default);
        assert_eq!(s.data_path, Some(PathBuf::from("a.csv")));
    }

    #[test]
    fn test_default_file_only_when_present() {
        let s = Settings::resolve(None, Path::new(MISSING));
        assert_eq!(s.data_path, None);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DATA_FILE);
        std::fs::write(&path, "").unwrap();
        let s = Settings::resolve(None, &path);
        assert_eq!(s.data_path, Some(path));
    }

    #[test]
    fn test_slider_bounds_widen_to_data() {
        let store = RecordStore::from_records(vec![
            record("A", true, 350.0, "FT"),
            record("A", true, 15_600.0, "FT"),
        ])
        .unwrap();
        let b = SliderBounds::default().covering(&store);
        assert_eq!(b.min, 0.0);
        assert_eq!(b.max, 16_000.0);

        let small = RecordStore::from_records(vec![record("A", true, 9_600.0, "FT")]).unwrap();
        assert_eq!(SliderBounds::default().covering(&small), SliderBounds::default());
    }
}
