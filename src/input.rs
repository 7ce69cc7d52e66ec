use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};

pub const DEFAULT_ROOT: &str = "/tmp/aoc";
pub const ROOT_ENV: &str = "AOC_INPUT_DIR";

/// Where a day's puzzle text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// The worked example embedded in the day's module.
    Example,
    /// A flat file cache laid out as `<root>/<year>/<day>`.
    Cache { root: PathBuf },
}

impl Source {
    /// Cache rooted at `root`, falling back to `$AOC_INPUT_DIR` and then `/tmp/aoc`.
    pub fn cache(root: Option<PathBuf>) -> Self {
        let root = root
            .or_else(|| env::var_os(ROOT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        Self::Cache { root }
    }

    pub fn load(&self, year: u16, day: u8, example: &'static str) -> Result<String> {
        match self {
            Self::Example => {
                info!("day {}: using the built-in example", day);
                Ok(example.to_owned())
            }
            Self::Cache { root } => {
                let path = cache_path(root, year, day);
                info!("day {}: reading from cache {}", day, path.display());
                fs::read_to_string(&path).map_err(|source| Error::Input { path, source })
            }
        }
    }
}

pub fn cache_path(root: &Path, year: u16, day: u8) -> PathBuf {
    root.join(year.to_string()).join(day.to_string())
}

#[test]
fn test_cache_path() {
    assert_eq!(cache_path(Path::new("/tmp/aoc"), 2023, 5), PathBuf::from("/tmp/aoc/2023/5"));
}

#[test]
fn test_load_example() {
    assert_eq!(Source::Example.load(2023, 5, "text").unwrap(), "text");
}

#[test]
fn test_load_from_cache() {
    let root = env::temp_dir().join(format!("aoc2023-input-test-{}", std::process::id()));
    let path = cache_path(&root, 2023, 6);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "Time: 7\nDistance: 9\n").unwrap();
    let source = Source::cache(Some(root.clone()));
    assert_eq!(source.load(2023, 6, "").unwrap(), "Time: 7\nDistance: 9\n");
    assert!(matches!(source.load(2023, 7, ""), Err(Error::Input { .. })));
    fs::remove_dir_all(&root).unwrap();
}
