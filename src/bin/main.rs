use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use love_sandwiches::{
    AutomationConfig, CsvWorkbook, DataAutomation, Sheet, SheetStore, StockRecord, HISTORY_LEN,
};

/// Records the sales of the last market, stores the surplus and suggests the
/// stock for the next one
///
/// Sales are entered as six whole numbers separated by commas, one per
/// sandwich type (bacon, chicken, tuna, turkey, ham, egg), e.g.
/// `10,20,30,40,50,60`. Spaces around the numbers are ignored.
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The directory holding the sales, stock and surplus worksheets
    #[clap(long, default_value = "love_sandwiches")]
    workbook: PathBuf,
    /// The number of recent markets the stock suggestion is based on
    #[clap(long, default_value_t = HISTORY_LEN)]
    history: usize,
    /// Create an empty workbook instead of entering sales
    #[clap(long)]
    init: bool,
    /// The stock of the first market, six comma separated numbers (with --init)
    #[clap(long, requires = "init")]
    opening_stock: Option<StockRecord>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.history > 0, "--history must be at least 1");

    if args.init {
        let mut workbook = CsvWorkbook::create(&args.workbook)
            .with_context(|| format!("failed to create a workbook in {}", args.workbook.display()))?;
        if let Some(stock) = args.opening_stock {
            workbook.append_row(Sheet::Stock, &stock.to_row())?;
        }
        println!("Created an empty workbook in {}", workbook.dir().display());
        return Ok(());
    }

    let workbook = CsvWorkbook::open(&args.workbook)
        .with_context(|| format!("failed to open the workbook in {}", args.workbook.display()))?;
    let config = AutomationConfig { history_len: args.history };

    println!("Welcome to Love Sandwiches Data Automation\n");
    let stdin = std::io::stdin();
    DataAutomation::new(workbook, config).run(stdin.lock(), std::io::stdout())?;

    Ok(())
}
