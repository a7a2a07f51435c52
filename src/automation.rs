use std::fmt;
use std::io::{self, BufRead, Write};

use crate::calculate::{self, CalcError, HISTORY_LEN};
use crate::collect::collect_sales;
use crate::record::{RowError, SalesRecord, Sandwich, StockEstimate, StockRecord, SurplusRecord};
use crate::store::{Sheet, SheetStore, StoreError};

/// Possible errors to occur during a single stage of the automation
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Console(#[from] io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("the {sheet} worksheet holds an unusable row")]
    Row { sheet: Sheet, source: RowError },
    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// The error of an aborted run, naming the stage that failed
///
/// Rows appended by earlier stages stay in the workbook.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed")]
pub struct AutomationError {
    stage: Stage,
    #[source]
    source: StageError,
}

impl AutomationError {
    /// The stage that failed
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The reason the stage failed
    pub fn reason(&self) -> &StageError {
        &self.source
    }
}

/// The stages of a run, in the order they are passed
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    CollectingSales,
    PersistingSales,
    ComputingSurplus,
    PersistingSurplus,
    FetchingHistory,
    EstimatingStock,
    PersistingStock,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Idle => "idle",
            Stage::CollectingSales => "collecting sales data",
            Stage::PersistingSales => "updating the sales worksheet",
            Stage::ComputingSurplus => "calculating surplus data",
            Stage::PersistingSurplus => "updating the surplus worksheet",
            Stage::FetchingHistory => "fetching recent sales",
            Stage::EstimatingStock => "calculating stock data",
            Stage::PersistingStock => "updating the stock worksheet",
            Stage::Done => "done",
        })
    }
}

/// Runtime options of the automation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutomationConfig {
    /// The number of recent sales entries per sandwich type the stock
    /// estimate is based on
    pub history_len: usize,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self { history_len: HISTORY_LEN }
    }
}

/// Everything a successful run wrote to the workbook
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub sales: SalesRecord,
    pub surplus: SurplusRecord,
    pub estimate: StockEstimate,
}

/// Runs the data entry of one market day against a workbook
///
/// A run collects the sales figures, stores them, derives the surplus from
/// the latest stock row, stores it, and finally stores a stock estimate for
/// the next market based on the recent sales. The first failing stage aborts
/// the run.
#[derive(Debug)]
pub struct DataAutomation<S> {
    store: S,
    config: AutomationConfig,
    stage: Stage,
}

impl<S: SheetStore> DataAutomation<S> {
    /// Creates an idle automation working on the given workbook
    pub fn new(store: S, config: AutomationConfig) -> Self {
        Self {
            store,
            config,
            stage: Stage::Idle,
        }
    }

    /// The stage the automation is in, or failed in
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The workbook
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives the workbook back
    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs all stages, reading the sales from `input` and reporting progress to `output`
    pub fn run<R, W>(&mut self, input: R, mut output: W) -> Result<Report, AutomationError>
        where R: BufRead,
              W: Write,
    {
        let sales = self.step(Stage::CollectingSales, |_| collect_sales(input, &mut output))?;
        self.step(Stage::PersistingSales, |this| {
            update_worksheet(&mut this.store, Sheet::Sales, &sales.to_row(), &mut output)
        })?;

        let surplus = self.step(Stage::ComputingSurplus, |this| {
            writeln!(output, "Calculating surplus data...\n")?;
            let stock = last_stock(&this.store)?;
            Ok::<_, StageError>(calculate::surplus(stock.values(), sales.values())?)
        })?;
        self.step(Stage::PersistingSurplus, |this| {
            update_worksheet(&mut this.store, Sheet::Surplus, &surplus.to_row(), &mut output)
        })?;

        let history = self.step(Stage::FetchingHistory, |this| {
            last_sales_entries(&this.store, this.config.history_len)
        })?;
        let estimate = self.step(Stage::EstimatingStock, |_| {
            writeln!(output, "Calculating stock data...\n")?;
            Ok::<_, StageError>(calculate::estimate(&history)?)
        })?;
        self.step(Stage::PersistingStock, |this| {
            update_worksheet(&mut this.store, Sheet::Stock, &estimate.to_row(), &mut output)
        })?;

        self.stage = Stage::Done;
        log::debug!("stage: {}", self.stage);

        // best effort, all rows are stored by now
        if let Err(error) = print_recommendation(&estimate, &mut output) {
            log::warn!("could not print the stock recommendation: {}", error);
        }

        Ok(Report { sales, surplus, estimate })
    }

    fn step<T, E, F>(&mut self, stage: Stage, f: F) -> Result<T, AutomationError>
        where E: Into<StageError>,
              F: FnOnce(&mut Self) -> Result<T, E>,
    {
        self.stage = stage;
        log::debug!("stage: {}", stage);

        f(self).map_err(|source| {
            let error = AutomationError { stage, source: source.into() };
            log::error!("{}: {}", error, error.source);
            error
        })
    }
}

/// Appends a row to a worksheet, telling the user about it
pub fn update_worksheet<S, W>(
    store: &mut S,
    sheet: Sheet,
    values: &[String],
    mut output: W,
) -> Result<(), StageError>
    where S: SheetStore + ?Sized,
          W: Write,
{
    writeln!(output, "Updating {} worksheet...\n", sheet)?;
    store.append_row(sheet, values)?;
    writeln!(output, "{} worksheet updated successfully.\n", capitalize(sheet.name()))?;

    Ok(())
}

/// The most recent row of the stock worksheet
pub fn last_stock<S: SheetStore + ?Sized>(store: &S) -> Result<StockRecord, StageError> {
    let row_error = |source| StageError::Row { sheet: Sheet::Stock, source };

    let rows = store.row_count(Sheet::Stock)?;
    // row 1 is the header
    if rows < 2 {
        return Err(row_error(RowError::MissingData));
    }

    let row = store.row_values(Sheet::Stock, rows)?;
    StockRecord::from_row(&row).map_err(row_error)
}

/// The last `count` sales entries of each sandwich type, oldest first
///
/// Whole rows are read, so every entry of the history belongs to the same
/// market for all sandwich types. A row that is not a complete sales record
/// fails the fetch.
pub fn last_sales_entries<S: SheetStore + ?Sized>(
    store: &S,
    count: usize,
) -> Result<Vec<Vec<u32>>, StageError> {
    let rows = store.row_count(Sheet::Sales)?;
    // row 1 is the header
    let first = rows.saturating_sub(count).max(1) + 1;

    let mut columns = vec![Vec::with_capacity(count); Sandwich::ALL.len()];
    for row in first..=rows {
        let sales = SalesRecord::from_row(&store.row_values(Sheet::Sales, row)?)
            .map_err(|source| StageError::Row { sheet: Sheet::Sales, source })?;
        for (column, &value) in columns.iter_mut().zip(sales.values()) {
            column.push(value);
        }
    }

    Ok(columns)
}

fn print_recommendation<W: Write>(estimate: &StockEstimate, mut output: W) -> io::Result<()> {
    writeln!(output, "Make the following numbers of sandwiches for next market:\n")?;
    for (sandwich, amount) in estimate.iter() {
        writeln!(output, "{}: {}", sandwich, amount)?;
    }

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
