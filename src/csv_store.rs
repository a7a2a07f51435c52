use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::record::{Sandwich, SANDWICH_COUNT};
use crate::store::{Sheet, SheetStore, StoreError};

/// A workbook stored as a directory of CSV files
///
/// Every worksheet lives in its own file, `<dir>/<sheet>.csv`, starting with a
/// header row naming the sandwich types. Rows are read from disk on every call
/// and appended rows are flushed before the call returns, so the files always
/// hold the current state of the workbook.
#[derive(Debug)]
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Opens an existing workbook
    ///
    /// All three worksheets must exist and start with the sandwich header row.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let workbook = Self { dir: dir.into() };

        for sheet in Sheet::ALL {
            let path = workbook.path(sheet);
            if !path.is_file() {
                return Err(StoreError::SheetNotFound(sheet));
            }

            let header = workbook
                .reader(sheet)?
                .records()
                .next()
                .transpose()?
                .ok_or(StoreError::InvalidHeader(sheet))?;
            header
                .deserialize::<[Sandwich; SANDWICH_COUNT]>(None)
                .ok()
                .filter(|names| *names == Sandwich::ALL)
                .ok_or(StoreError::InvalidHeader(sheet))?;
        }

        log::debug!("opened workbook at {}", workbook.dir.display());
        Ok(workbook)
    }

    /// Creates a new workbook whose worksheets only hold the header row
    ///
    /// Fails if any of the worksheets already exists.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let workbook = Self { dir: dir.into() };
        if let Some(path) = Sheet::ALL
            .into_iter()
            .map(|sheet| workbook.path(sheet))
            .find(|path| path.exists())
        {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        std::fs::create_dir_all(&workbook.dir)?;

        for sheet in Sheet::ALL {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(workbook.path(sheet))?;
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file);
            writer.serialize(Sandwich::ALL)?;
            writer.flush()?;
        }

        log::info!("created workbook at {}", workbook.dir.display());
        Ok(workbook)
    }

    /// The directory holding the worksheets
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, sheet: Sheet) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet.name()))
    }

    fn reader(&self, sheet: Sheet) -> Result<csv::Reader<File>, StoreError> {
        Ok(csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(self.path(sheet))?)
    }

    fn rows(&self, sheet: Sheet) -> Result<Vec<Vec<String>>, StoreError> {
        self.reader(sheet)?
            .records()
            .map(|record| -> Result<Vec<String>, StoreError> {
                let record = record?;
                Ok(record.iter().map(str::to_string).collect())
            })
            .collect()
    }
}

impl SheetStore for CsvWorkbook {
    fn col_values(&self, sheet: Sheet, column: usize) -> Result<Vec<String>, StoreError> {
        let index = column
            .checked_sub(1)
            .ok_or(StoreError::ColumnOutOfRange { sheet, column })?;

        let mut values = Vec::new();
        for record in self.reader(sheet)?.records() {
            if let Some(value) = record?.get(index) {
                values.push(value.to_string());
            }
        }

        Ok(values)
    }

    fn row_values(&self, sheet: Sheet, row: usize) -> Result<Vec<String>, StoreError> {
        let index = row
            .checked_sub(1)
            .ok_or(StoreError::RowOutOfRange { sheet, row })?;

        self.rows(sheet)?
            .into_iter()
            .nth(index)
            .ok_or(StoreError::RowOutOfRange { sheet, row })
    }

    fn row_count(&self, sheet: Sheet) -> Result<usize, StoreError> {
        let mut count = 0;
        for record in self.reader(sheet)?.records() {
            record?;
            count += 1;
        }

        Ok(count)
    }

    fn append_row(&mut self, sheet: Sheet, values: &[String]) -> Result<(), StoreError> {
        let path = self.path(sheet);
        if !path.is_file() {
            return Err(StoreError::SheetNotFound(sheet));
        }

        let file = OpenOptions::new().append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        writer.write_record(values)?;
        writer.flush()?;

        log::info!("appended {:?} to the {} worksheet", values, sheet);
        Ok(())
    }
}
