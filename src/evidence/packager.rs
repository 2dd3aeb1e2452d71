/// Evidence packaging for test-suite submission
///
/// Collects `testcase-<n>.xml` files and `metadata.xml` from a directory and
/// writes them, flattened to their base names, into `test-suite.zip`.
use crate::config::types::{Result, WrapperError};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const TESTCASE_PREFIX: &str = "testcase-";
pub const TESTCASE_EXTENSION: &str = ".xml";
pub const METADATA_FILE: &str = "metadata.xml";
pub const ARCHIVE_FILE: &str = "test-suite.zip";

/// Files selected for one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceBundle {
    /// Test cases in index order, then the metadata file
    pub files: Vec<PathBuf>,
    pub archive: PathBuf,
}

/// Outcome of writing the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub archive: PathBuf,
    /// Entry names written, in archive order
    pub packed: Vec<String>,
    /// Candidates that did not exist
    pub skipped: Vec<PathBuf>,
}

/// Index of a `testcase-<digits>.xml` file name
pub fn testcase_index(file_name: &str) -> Option<u64> {
    let digits = file_name
        .strip_prefix(TESTCASE_PREFIX)?
        .strip_suffix(TESTCASE_EXTENSION)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

pub struct EvidencePackager {
    dir: PathBuf,
}

impl EvidencePackager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Packager for the current working directory
    pub fn in_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Select the files to archive. The metadata file is always a candidate,
    /// whether or not it exists yet.
    pub fn discover(&self) -> Result<EvidenceBundle> {
        let mut testcases: Vec<(u64, String)> = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if let Some(index) = testcase_index(&name) {
                if entry.path().is_file() {
                    testcases.push((index, name));
                }
            }
        }
        testcases.sort();

        let mut files: Vec<PathBuf> = testcases
            .into_iter()
            .map(|(_, name)| self.dir.join(name))
            .collect();
        files.push(self.dir.join(METADATA_FILE));

        Ok(EvidenceBundle {
            files,
            archive: self.dir.join(ARCHIVE_FILE),
        })
    }

    /// Discover and archive the evidence
    pub fn package(&self) -> Result<PackageReport> {
        let bundle = self.discover()?;
        write_archive(&bundle)
    }
}

/// Write `bundle` into its archive. Missing files are logged and skipped.
pub fn write_archive(bundle: &EvidenceBundle) -> Result<PackageReport> {
    let file = File::create(&bundle.archive)?;
    let mut zip = ZipWriter::new(file);
    // Fixed timestamp: identical inputs give identical archives
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut packed = Vec::new();
    let mut skipped = Vec::new();

    for path in &bundle.files {
        if !path.is_file() {
            log::warn!("File {} does not exist.", path.display());
            skipped.push(path.clone());
            continue;
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                WrapperError::Config(format!("Invalid evidence file name: {}", path.display()))
            })?
            .to_string();

        zip.start_file(name.as_str(), options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut zip)?;
        packed.push(name);
    }

    zip.finish()?;
    log::info!(
        "Files zipped into {} ({} entries)",
        bundle.archive.display(),
        packed.len()
    );

    Ok(PackageReport {
        archive: bundle.archive.clone(),
        packed,
        skipped,
    })
}
