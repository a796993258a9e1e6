//! CSV export and import commands

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use spendlog_core::{export, ExpenseFilter, ExpenseStore, Ledger, SortOrder};
use tracing::info;

pub fn cmd_export<S: ExpenseStore>(
    ledger: &Ledger<S>,
    filter: &ExpenseFilter,
    output: Option<&Path>,
) -> Result<()> {
    let expenses = filter.apply(&ledger.list(SortOrder::default()));

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::write_csv(&mut writer, &expenses)?;
            writer.flush()?;
            info!("Exported {} expenses to {}", expenses.len(), path.display());
            println!("✅ Exported {} expenses to {}", expenses.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            export::write_csv(&mut handle, &expenses)?;
            handle.flush()?;
        }
    }

    Ok(())
}

pub fn cmd_import<S: ExpenseStore>(ledger: &mut Ledger<S>, file: &Path) -> Result<()> {
    println!("📥 Importing expenses from {}...", file.display());

    let reader = File::open(file)
        .map(BufReader::new)
        .with_context(|| format!("Failed to open file: {}", file.display()))?;
    let records = export::parse_csv(reader).context("Failed to parse CSV")?;

    let total = records.len();
    for (index, record) in records.into_iter().enumerate() {
        ledger.add(record).with_context(|| {
            format!(
                "Import stopped at record {} of {} ({} imported)",
                index + 1,
                total,
                index
            )
        })?;
    }

    println!("✅ Imported {} expenses", total);
    Ok(())
}
