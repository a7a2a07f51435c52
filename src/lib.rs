pub use self::{
    automation::{
        last_sales_entries, last_stock, update_worksheet, AutomationConfig, AutomationError,
        DataAutomation, Report, Stage, StageError,
    },
    calculate::{estimate, surplus, CalcError, HISTORY_LEN},
    collect::collect_sales,
    csv_store::CsvWorkbook,
    record::{
        RowError, SalesRecord, Sandwich, StockEstimate, StockRecord, SurplusRecord, SANDWICH_COUNT,
    },
    store::{MemoryWorkbook, Sheet, SheetStore, StoreError},
    validate::{validate, ValidationError, DELIMITER},
};

mod automation;
mod calculate;
mod collect;
mod csv_store;
mod record;
mod store;
mod validate;
