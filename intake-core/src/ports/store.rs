use crate::models::{Row, StoredRow};

/// Repository interface for the append-only sheet store.
///
/// A store holds named sheets. Rows are only ever appended; their 1-based
/// position is assigned by the store at write time, so concurrent writers
/// never share a row index.
pub trait RecordStore {
    /// Error type for store failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create the sheet with `header` as its first row, unless it already
    /// exists.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the sheet was created by this call
    /// - Ok(false) if the sheet already existed
    fn ensure_sheet(
        &self,
        sheet: &str,
        header: &Row,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Append an unstyled row to an existing sheet.
    ///
    /// # Returns
    ///
    /// The 1-based index of the new row, equal to the sheet's last row.
    fn append_row(
        &self,
        sheet: &str,
        cells: &[String],
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Read every row of a sheet, header included.
    ///
    /// # Returns
    ///
    /// Ok(None) if no such sheet exists.
    fn rows(
        &self,
        sheet: &str,
    ) -> impl Future<Output = Result<Option<Vec<StoredRow>>, Self::Error>> + Send;
}
