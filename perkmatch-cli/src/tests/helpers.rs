//! Test helpers for writing catalogue fixtures to disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Two cards on premium network tiers with tagged and universal benefits.
///
/// The catalogue carries no network templates, so the built-in table applies.
pub(super) const CATALOGUE_JSON: &str = r#"{
  "cards": [
    {"id": "hana", "issuer": "Hana", "name": "Hana Infinite", "shortName": "Infinite",
     "network": "VISA", "grade": "Infinite"},
    {"id": "kb", "issuer": "KB", "name": "KB Platinum", "shortName": "Platinum",
     "network": "Mastercard", "grade": "Platinum"}
  ],
  "benefits": [
    {"id": "h-sbux", "cardId": "hana", "category": "cafe", "title": "스타벅스 50% 할인",
     "value": "50%", "placeTags": ["cafe", "starbucks"], "conditions": "전월 실적 30만원 이상"},
    {"id": "h-cafe", "cardId": "hana", "category": "cafe", "title": "카페 10% 할인",
     "value": "10%", "placeTags": ["cafe"]},
    {"id": "k-movie", "cardId": "kb", "category": "movie", "title": "CGV 35% 할인",
     "value": "35%", "placeTags": ["movie", "cgv"]},
    {"id": "k-cash", "cardId": "kb", "title": "무제한 적립", "value": "무제한 0.5%"}
  ]
}"#;

/// Write `contents` to `path`, creating the file.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding CLI input files.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the sample catalogue and return its path.
    pub(super) fn catalogue(&self) -> Utf8PathBuf {
        self.write("catalogue.json", CATALOGUE_JSON)
    }

    /// Write `contents` under `name` and return the path.
    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}
