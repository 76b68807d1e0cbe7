use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use tracing::{debug, info};

use super::ReferralStore;
use crate::{
    record::{ReferralRecord, FIELDNAMES},
    Error, Result,
};

/// The referral table as a comma-separated file with a header row.
///
/// Appends are not serialized against concurrent readers or writers.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

/// CSV writer matching the store's dialect: minimal quoting, CRLF rows.
pub fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(inner)
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    /// Opens for appending; the flag is true when this call created the file.
    fn open_for_append(&self) -> Result<(File, bool)> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => {
                info!("created referral store at {}", self.path.display());
                Ok((file, true))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Ok((OpenOptions::new().append(true).open(&self.path)?, false))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl ReferralStore for CsvStore {
    fn append(&self, record: &ReferralRecord) -> Result<()> {
        self.create_parent()?;
        let (file, created) = self.open_for_append()?;
        let mut writer = csv_writer(file);
        if created {
            writer.write_record(FIELDNAMES)?;
        }
        writer.write_record(record.values())?;
        writer.flush()?;
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<ReferralRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no referral store at {} yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.clone();
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(ReferralRecord::from_pairs(headers.iter().zip(row.iter())));
        }
        Ok(records)
    }
}
