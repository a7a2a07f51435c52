use std::collections::HashMap;
use std::fmt;

/// The worksheets of the workbook
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sheet {
    /// Sales per sandwich type, one row per market
    Sales,
    /// Stock made per sandwich type, one row per market
    Stock,
    /// Stock minus sales per sandwich type, one row per market
    Surplus,
}

impl Sheet {
    pub const ALL: [Sheet; 3] = [Sheet::Sales, Sheet::Stock, Sheet::Surplus];

    /// The name of the worksheet
    pub fn name(self) -> &'static str {
        match self {
            Sheet::Sales => "sales",
            Sheet::Stock => "stock",
            Sheet::Surplus => "surplus",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Possible errors to occur while talking to the workbook
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("the workbook could not be accessed")]
    Io(#[from] std::io::Error),
    #[error("the workbook could not be read or written")]
    Csv(#[from] csv::Error),
    #[error("the workbook has no {0} worksheet")]
    SheetNotFound(Sheet),
    #[error("the header of the {0} worksheet does not name the sandwich types")]
    InvalidHeader(Sheet),
    #[error("the {sheet} worksheet has no row {row}")]
    RowOutOfRange { sheet: Sheet, row: usize },
    #[error("the {sheet} worksheet has no column {column}")]
    ColumnOutOfRange { sheet: Sheet, column: usize },
}

/// Access to the workbook holding the sales, stock and surplus worksheets
///
/// Rows and columns are numbered from `1`, and the header row of a worksheet
/// is row `1`, the way spreadsheets number them.
pub trait SheetStore {
    /// All values of a column, top to bottom, header included
    ///
    /// Rows too short to reach the column are skipped.
    fn col_values(&self, sheet: Sheet, column: usize) -> Result<Vec<String>, StoreError>;

    /// All values of a row
    fn row_values(&self, sheet: Sheet, row: usize) -> Result<Vec<String>, StoreError>;

    /// The number of rows, header included
    fn row_count(&self, sheet: Sheet) -> Result<usize, StoreError>;

    /// Appends a row below the last row of the worksheet
    fn append_row(&mut self, sheet: Sheet, values: &[String]) -> Result<(), StoreError>;
}

impl<S: SheetStore + ?Sized> SheetStore for &mut S {
    fn col_values(&self, sheet: Sheet, column: usize) -> Result<Vec<String>, StoreError> {
        (**self).col_values(sheet, column)
    }

    fn row_values(&self, sheet: Sheet, row: usize) -> Result<Vec<String>, StoreError> {
        (**self).row_values(sheet, row)
    }

    fn row_count(&self, sheet: Sheet) -> Result<usize, StoreError> {
        (**self).row_count(sheet)
    }

    fn append_row(&mut self, sheet: Sheet, values: &[String]) -> Result<(), StoreError> {
        (**self).append_row(sheet, values)
    }
}

/// A workbook that only lives in memory
///
/// Worksheets have to be added before they can be used, just like a
/// spreadsheet that is missing a worksheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryWorkbook {
    sheets: HashMap<Sheet, Vec<Vec<String>>>,
}

impl MemoryWorkbook {
    /// Creates a workbook without any worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workbook with all worksheets, each holding only the header row
    pub fn with_headers() -> Self {
        let mut workbook = Self::new();
        for sheet in Sheet::ALL {
            workbook.add_sheet(sheet, vec![crate::Sandwich::header()]);
        }
        workbook
    }

    /// Adds or replaces a worksheet
    pub fn add_sheet(&mut self, sheet: Sheet, rows: Vec<Vec<String>>) {
        self.sheets.insert(sheet, rows);
    }

    /// All rows of a worksheet
    pub fn rows(&self, sheet: Sheet) -> Result<&[Vec<String>], StoreError> {
        self.sheets
            .get(&sheet)
            .map(Vec::as_slice)
            .ok_or(StoreError::SheetNotFound(sheet))
    }
}

impl SheetStore for MemoryWorkbook {
    fn col_values(&self, sheet: Sheet, column: usize) -> Result<Vec<String>, StoreError> {
        let index = column
            .checked_sub(1)
            .ok_or(StoreError::ColumnOutOfRange { sheet, column })?;

        Ok(self.rows(sheet)?
            .iter()
            .filter_map(|row| row.get(index).cloned())
            .collect())
    }

    fn row_values(&self, sheet: Sheet, row: usize) -> Result<Vec<String>, StoreError> {
        let rows = self.rows(sheet)?;
        row.checked_sub(1)
            .and_then(|index| rows.get(index))
            .cloned()
            .ok_or(StoreError::RowOutOfRange { sheet, row })
    }

    fn row_count(&self, sheet: Sheet) -> Result<usize, StoreError> {
        Ok(self.rows(sheet)?.len())
    }

    fn append_row(&mut self, sheet: Sheet, values: &[String]) -> Result<(), StoreError> {
        self.sheets
            .get_mut(&sheet)
            .ok_or(StoreError::SheetNotFound(sheet))?
            .push(values.to_vec());

        Ok(())
    }
}
