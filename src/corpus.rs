//! Labeled review corpora.
//!
//! A corpus on disk looks like `<root>/{train,test}/{pos,neg}/<id>_<rating>.txt`.
//! Sources are restartable: each call to [`SampleSource::samples`] starts a
//! fresh lazy pass, so training and evaluation can both walk the same source.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::generic_types::{Label, LabeledSample};

lazy_static! {
    static ref SAMPLE_NAME_RE: Regex = Regex::new(r"^(\d+)_(\d+)\.txt$").expect("valid sample name pattern");
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Sample directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No {} samples found", .0.name())]
    Empty(Label),

    #[error("Training samples contain no words")]
    EmptyVocabulary,
}

pub type SampleIter<'a> = Box<dyn Iterator<Item = Result<LabeledSample, CorpusError>> + 'a>;

/// A finite, restartable sequence of labeled samples.
pub trait SampleSource {
    fn samples(&self) -> Result<SampleIter<'_>, CorpusError>;
}

impl SampleSource for [LabeledSample] {
    fn samples(&self) -> Result<SampleIter<'_>, CorpusError> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }
}

impl SampleSource for Vec<LabeledSample> {
    fn samples(&self) -> Result<SampleIter<'_>, CorpusError> {
        self.as_slice().samples()
    }
}

/// Parse `<id>_<rating>.txt`. Anything else is not a sample.
pub fn parse_sample_name(name: &str) -> Option<(u64, u32)> {
    let caps = SAMPLE_NAME_RE.captures(name)?;
    let id = caps[1].parse().ok()?;
    let rating = caps[2].parse().ok()?;
    Some((id, rating))
}

// ************* Directory source *************** | START
/// One class directory of a corpus split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDir {
    path: PathBuf,
}

impl CorpusDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for CorpusDir {
    fn samples(&self) -> Result<SampleIter<'_>, CorpusError> {
        if !self.path.is_dir() {
            return Err(CorpusError::MissingDirectory(self.path.clone()));
        }

        info!("Getting samples from directory: {}", self.path.display());
        let entries = fs::read_dir(&self.path).map_err(|source| CorpusError::Read {
            path: self.path.clone(),
            source,
        })?;

        Ok(Box::new(DirSamples { dir: self.path.as_path(), entries }))
    }
}

struct DirSamples<'a> {
    dir: &'a Path,
    entries: fs::ReadDir,
}

impl Iterator for DirSamples<'_> {
    type Item = Result<LabeledSample, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(CorpusError::Read { path: self.dir.to_path_buf(), source }))
                }
            };

            let file_name = entry.file_name();
            let Some((id, rating)) = file_name.to_str().and_then(parse_sample_name) else {
                debug!("Skipping non-sample file {:?}", file_name);
                continue;
            };

            let path = entry.path();
            let sample = fs::read_to_string(&path)
                .map(|text| LabeledSample::new(id, text, Label::from_rating(rating)))
                .map_err(|source| CorpusError::Read { path, source });
            return Some(sample);
        }
    }
}
// ************* Directory source *************** | END

// ************* Layout *************** | START
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}
impl Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Train => "train",
            Self::Test => "test",
        };
        write!(f, "{}", name)
    }
}

/// Root of a corpus laid out as `<root>/<split>/<pos|neg>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    root: PathBuf,
}

impl CorpusLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dir(&self, split: Split, class: Label) -> CorpusDir {
        let class_dir = match class {
            Label::Positive => "pos",
            Label::Negative => "neg",
        };
        CorpusDir::new(self.root.join(split.to_string()).join(class_dir))
    }
}
// ************* Layout *************** | END

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn parses_sample_names() {
        assert_eq!(parse_sample_name("123_9.txt"), Some((123, 9)));
        assert_eq!(parse_sample_name("0_1.txt"), Some((0, 1)));
        assert_eq!(parse_sample_name("urls_pos.txt"), None);
        assert_eq!(parse_sample_name("12_9.txt.bak"), None);
        assert_eq!(parse_sample_name("12-9.txt"), None);
    }

    #[test]
    fn reads_samples_and_skips_malformed_names() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "1_10.txt", "great");
        write(tmp.path(), "2_3.txt", "awful");
        write(tmp.path(), "notes.md", "ignored");

        let corpus = CorpusDir::new(tmp.path());
        let mut samples: Vec<LabeledSample> =
            corpus.samples().unwrap().collect::<Result<_, _>>().unwrap();
        samples.sort_by_key(|s| s.id);

        assert_eq!(
            samples,
            vec![
                LabeledSample::new(1, "great", Label::Positive),
                LabeledSample::new(2, "awful", Label::Negative),
            ]
        );
    }

    #[test]
    fn source_is_restartable() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "1_8.txt", "one");
        write(tmp.path(), "2_8.txt", "two");

        let corpus = CorpusDir::new(tmp.path());
        assert_eq!(corpus.samples().unwrap().count(), 2);
        assert_eq!(corpus.samples().unwrap().count(), 2);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let corpus = CorpusDir::new(tmp.path().join("nope"));
        assert!(matches!(corpus.samples(), Err(CorpusError::MissingDirectory(_))));
    }

    #[test]
    fn layout_paths() {
        let layout = CorpusLayout::new("aclImdb");
        assert_eq!(
            layout.dir(Split::Train, Label::Positive).path(),
            Path::new("aclImdb/train/pos")
        );
        assert_eq!(
            layout.dir(Split::Test, Label::Negative).path(),
            Path::new("aclImdb/test/neg")
        );
    }

    #[test]
    fn in_memory_source() {
        let samples = vec![LabeledSample::new(7, "fine", Label::Positive)];
        let collected: Vec<_> = samples.samples().unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(collected, samples);
    }
}
