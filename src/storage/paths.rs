// PathManager maps stored images to locations on disk and owns the
// image naming scheme.
//
// The storage layout is a single flat directory; the directory listing
// is the index, there is no manifest file that could drift out of sync
// with the filesystem:
//
//	<root>
//	├── shot_<date>T<time>_<micros>_<seq>.jpg
//	├── ...
//	└── .<name>.tmp        (in-flight upload, never matches the pattern)
//
// Image names are fixed-width and zero-padded so that lexicographic
// order equals creation order. The microsecond field plus a process-wide
// sequence counter disambiguate uploads landing within the same clock
// tick.

use chrono::{DateTime, Utc};

pub const IMAGE_PREFIX: &str = "shot_";
pub const IMAGE_SUFFIX: &str = ".jpg";

/// Length of the stem between prefix and suffix:
/// `YYYYMMDD` + `T` + `HHMMSS` + `_` + 6-digit micros + `_` + 4-digit seq.
const STEM_LEN: usize = 8 + 1 + 6 + 1 + 6 + 1 + 4;

#[derive(Clone)]
pub struct PathManager {
    root_path: String,
}

impl PathManager {
    pub fn new(root: &str) -> Self {
        PathManager {
            root_path: root.to_string(),
        }
    }

    /// Returns the path to the storage directory itself.
    pub fn images_path(&self) -> String {
        self.root_path.clone()
    }

    /// Returns the path to a single stored image,
    /// (e.g. `<root>/shot_20250101T120000_000123_0007.jpg`).
    pub fn image_path(&self, name: &str) -> String {
        format!("{}/{}", self.root_path, name)
    }

    /// Returns the temporary path an upload is written to before being
    /// renamed into place (e.g. `<root>/.shot_....jpg.tmp`). The leading
    /// dot and `.tmp` suffix keep it out of every listing.
    pub fn temp_path(&self, name: &str) -> String {
        format!("{}/.{}.tmp", self.root_path, name)
    }
}

/// Formats the canonical name for an image captured at `at` with the
/// given upload sequence number.
pub fn format_image_name(at: DateTime<Utc>, seq: u64) -> String {
    format!(
        "{IMAGE_PREFIX}{}_{:04}{IMAGE_SUFFIX}",
        at.format("%Y%m%dT%H%M%S_%6f"),
        seq % 10_000
    )
}

/// Whether `name` matches the canonical image name pattern. Anything
/// else (temp files, traversal attempts, foreign files dropped into the
/// storage directory) is rejected before the filesystem is touched.
pub fn is_image_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(IMAGE_PREFIX) else {
        return false;
    };
    let Some(stem) = rest.strip_suffix(IMAGE_SUFFIX) else {
        return false;
    };
    let bytes = stem.as_bytes();
    if bytes.len() != STEM_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 => *b == b'T',
        15 | 22 => *b == b'_',
        _ => b.is_ascii_digit(),
    })
}
