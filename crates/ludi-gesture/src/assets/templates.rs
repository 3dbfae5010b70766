use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::core::point::Gesture;
use crate::error::TemplateError;

/// Digit templates shipped with the crate, one resource per file.
const BUNDLED_DIGITS: [(&str, &str); 10] = [
    ("0", include_str!("../../assets/digits/0.json")),
    ("1", include_str!("../../assets/digits/1.json")),
    ("2", include_str!("../../assets/digits/2.json")),
    ("3", include_str!("../../assets/digits/3.json")),
    ("4", include_str!("../../assets/digits/4.json")),
    ("5", include_str!("../../assets/digits/5.json")),
    ("6", include_str!("../../assets/digits/6.json")),
    ("7", include_str!("../../assets/digits/7.json")),
    ("8", include_str!("../../assets/digits/8.json")),
    ("9", include_str!("../../assets/digits/9.json")),
];

/// On-disk layout of a single template resource.
/// Points use the capture convention (y inverted relative to the screen).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Gesture label. Falls back to the resource name when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Each stroke is a list of `[x, y]` points.
    pub strokes: Vec<Vec<[f32; 2]>>,
}

/// Ordered collection of labeled templates.
///
/// Populated once at startup, read-only afterwards. Labels need not be unique;
/// several samples of the same digit improve matching.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    gestures: Vec<Gesture>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in `0`..`9` digit set.
    pub fn bundled_digits() -> Self {
        let mut store = Self::new();
        store.load_sources(BUNDLED_DIGITS);
        store
    }

    /// Bundled directory plus an optional user directory.
    ///
    /// Never fails: an unreadable directory or resource is logged and skipped,
    /// so the worst case is an empty store.
    pub fn load(bundled_dir: impl AsRef<Path>, user_dir: Option<&Path>) -> Self {
        let mut store = Self::new();
        if let Err(e) = store.load_dir(bundled_dir.as_ref()) {
            log::warn!("Bundled templates unavailable: {}", e);
        }
        if let Some(dir) = user_dir {
            store.extend_from_dir(dir);
        }
        log::info!("Template store loaded: {} templates", store.len());
        store
    }

    /// Add user-captured templates if the directory can be read.
    /// A missing or sandboxed directory is not an error.
    pub fn extend_from_dir(&mut self, dir: &Path) -> usize {
        if !dir.is_dir() {
            log::debug!("No user template directory at {}", dir.display());
            return 0;
        }
        match self.load_dir(dir) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("User templates unavailable: {}", e);
                0
            }
        }
    }

    /// Parse one resource. `fallback_label` is used when the file has no name.
    pub fn parse(fallback_label: &str, json: &str) -> Result<Gesture, TemplateError> {
        let file: TemplateFile =
            serde_json::from_str(json).map_err(|source| TemplateError::Parse {
                name: fallback_label.to_string(),
                source,
            })?;
        Self::from_file(fallback_label, file)
    }

    /// Validate an already-decoded resource.
    pub fn from_file(fallback_label: &str, file: TemplateFile) -> Result<Gesture, TemplateError> {
        let label = file.name.unwrap_or_else(|| fallback_label.to_string());
        let gesture = Gesture::from_strokes(label, &file.strokes);
        if gesture.points.is_empty() {
            return Err(TemplateError::Empty {
                name: fallback_label.to_string(),
            });
        }
        Ok(gesture)
    }

    /// Load in-memory resources as `(name, json)` pairs. Returns how many loaded.
    pub fn load_sources<'a>(&mut self, sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> usize {
        let mut loaded = 0;
        for (name, json) in sources {
            match Self::parse(name, json) {
                Ok(gesture) => {
                    self.push(gesture);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping template: {}", e),
            }
        }
        loaded
    }

    /// Load decoded resources as `(name, file)` pairs. Returns how many loaded.
    pub fn load_files<N: AsRef<str>>(&mut self, files: impl IntoIterator<Item = (N, TemplateFile)>) -> usize {
        let mut loaded = 0;
        for (name, file) in files {
            match Self::from_file(name.as_ref(), file) {
                Ok(gesture) => {
                    self.push(gesture);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping template: {}", e),
            }
        }
        loaded
    }

    /// Load every `*.json` file in `dir`, in file-name order.
    ///
    /// Only failure to list the directory is returned; individual bad files
    /// are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, TemplateError> {
        let io_err = |source| TemplateError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect::<Vec<_>>();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match Self::load_file(&path) {
                Ok(gesture) => {
                    self.push(gesture);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping template: {}", e),
            }
        }
        log::debug!("Loaded {} templates from {}", loaded, dir.display());
        Ok(loaded)
    }

    fn load_file(path: &Path) -> Result<Gesture, TemplateError> {
        let json = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&stem, &json)
    }

    pub fn push(&mut self, gesture: Gesture) {
        self.gestures.push(gesture);
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gesture> {
        self.gestures.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Gesture> {
        self.gestures.get(index)
    }

    /// First template with the given label.
    pub fn find(&self, label: &str) -> Option<&Gesture> {
        self.gestures.iter().find(|g| g.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.gestures.iter().map(|g| g.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_digits_load_in_order() {
        let store = TemplateStore::bundled_digits();
        let labels: Vec<&str> = store.labels().collect();
        assert_eq!(labels, vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);
        assert!(store.iter().all(|g| g.point_count() >= 10));
        assert_eq!(store.find("4").unwrap().stroke_count(), 2);
    }

    #[test]
    fn parse_uses_fallback_label() {
        let g = TemplateStore::parse("seven", r#"{ "strokes": [[[0, 0], [1, 0], [0, -2]]] }"#).unwrap();
        assert_eq!(g.label, "seven");
        assert_eq!(g.point_count(), 3);

        let g = TemplateStore::parse("file", r#"{ "name": "7", "strokes": [[[0, 0]]] }"#).unwrap();
        assert_eq!(g.label, "7");
    }

    #[test]
    fn parse_rejects_bad_resources() {
        assert!(matches!(
            TemplateStore::parse("x", "not json"),
            Err(TemplateError::Parse { .. })
        ));
        assert!(matches!(
            TemplateStore::parse("x", r#"{ "strokes": [[]] }"#),
            Err(TemplateError::Empty { .. })
        ));
    }

    #[test]
    fn load_sources_skips_broken_entries() {
        let mut store = TemplateStore::new();
        let loaded = store.load_sources([
            ("a", r#"{ "strokes": [[[0, 0], [1, 1]]] }"#),
            ("b", "{"),
            ("c", r#"{ "strokes": [[[2, 2], [3, 3]]] }"#),
        ]);
        assert_eq!(loaded, 2);
        assert_eq!(store.labels().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn load_files_shares_validation() {
        let file = |name: Option<&str>, strokes: Vec<Vec<[f32; 2]>>| TemplateFile {
            name: name.map(str::to_string),
            strokes,
        };
        let mut store = TemplateStore::new();
        let loaded = store.load_files([
            ("dash", file(None, vec![vec![[0.0, 0.0], [1.0, 0.0]]])),
            ("ignored", file(Some("7"), vec![vec![[0.0, 0.0], [1.0, -1.0]]])),
            ("hollow", file(None, vec![vec![]])),
        ]);
        assert_eq!(loaded, 2);
        assert_eq!(store.labels().collect::<Vec<_>>(), vec!["dash", "7"]);
    }

    #[test]
    fn load_merges_bundled_and_user_dirs() {
        let bundled = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        fs::write(bundled.path().join("b.json"), r#"{ "name": "2", "strokes": [[[0, 0], [1, 0]]] }"#).unwrap();
        fs::write(bundled.path().join("a.json"), r#"{ "name": "1", "strokes": [[[0, 0], [0, 1]]] }"#).unwrap();
        fs::write(bundled.path().join("notes.txt"), "ignored").unwrap();
        fs::write(user.path().join("custom.json"), r#"{ "strokes": [[[0, 0], [1, 1]]] }"#).unwrap();
        fs::write(user.path().join("broken.json"), "[").unwrap();

        let store = TemplateStore::load(bundled.path(), Some(user.path()));
        assert_eq!(store.labels().collect::<Vec<_>>(), vec!["1", "2", "custom"]);
    }

    #[test]
    fn missing_directories_fail_soft() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let store = TemplateStore::load(&missing, Some(missing.as_path()));
        assert!(store.is_empty());
    }

    #[test]
    fn load_dir_reports_unreadable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TemplateStore::new();
        let err = store.load_dir(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
    }
}
