use intake_core::ports::RecordStore;
use std::io::Write;

/// Write every row of `sheet`, header included, as pretty-printed JSON.
///
/// A sheet that was never created is an error rather than an empty list, so
/// a misspelled name does not pass silently.
pub async fn dump<S, W>(store: &S, sheet: &str, output: W) -> anyhow::Result<usize>
where
    S: RecordStore,
    W: Write,
{
    let rows = store
        .rows(sheet)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Sheet {sheet} does not exist"))?;

    serde_json::to_writer_pretty(output, &rows)?;
    Ok(rows.len())
}
