//! `RecordStore` implementation for the SQLite database.

use crate::Db;
use intake_core::{
    models::{Row, RowStyle, StoredRow},
    ports::RecordStore,
};
use sqlx::types::Json;
use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
struct SheetRow {
    row_index: i64,
    cells: Json<Vec<String>>,
    bold: i64,
    background: Option<String>,
}

impl From<SheetRow> for StoredRow {
    fn from(row: SheetRow) -> Self {
        Self {
            index: row.row_index as u64,
            cells: row.cells.0,
            style: RowStyle {
                bold: row.bold != 0,
                background: row.background,
            },
        }
    }
}

impl RecordStore for Db {
    type Error = sqlx::Error;

    async fn ensure_sheet(&self, sheet: &str, header: &Row) -> Result<bool, Self::Error> {
        let now = OffsetDateTime::now_utc();
        let mut tx = self.writer.begin().await?;

        let created = sqlx::query(
            r#"
            insert into
                sheet (name, created_at)
            values
                ($1, $2)
            on conflict (name)
                do nothing
            "#,
        )
        .bind(sheet)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        // The header is written in the same transaction, so a sheet is never
        // observed without it.
        if created {
            sqlx::query(
                r#"
                insert into
                    sheet_row (sheet_name, row_index, cells, bold, background, appended_at)
                values
                    ($1, 1, $2, $3, $4, $5)
                "#,
            )
            .bind(sheet)
            .bind(Json(&header.cells))
            .bind(header.style.bold)
            .bind(header.style.background.as_deref())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn append_row(&self, sheet: &str, cells: &[String]) -> Result<u64, Self::Error> {
        // The index is computed inside the insert; with a single writer
        // connection this is atomic with respect to other appends.
        let row_index = sqlx::query_scalar::<_, i64>(
            r#"
            insert into
                sheet_row (sheet_name, row_index, cells, appended_at)
            select
                $1, coalesce(max(row_index), 0) + 1, $2, $3
            from
                sheet_row
            where
                sheet_name = $1
            returning
                row_index
            "#,
        )
        .bind(sheet)
        .bind(Json(cells))
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.writer)
        .await?;

        Ok(row_index as u64)
    }

    async fn rows(&self, sheet: &str) -> Result<Option<Vec<StoredRow>>, Self::Error> {
        let sheets = sqlx::query_scalar::<_, i64>(
            r#"
            select
                count(*)
            from
                sheet
            where
                name = $1
            "#,
        )
        .bind(sheet)
        .fetch_one(&self.reader)
        .await?;

        if sheets == 0 {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, SheetRow>(
            r#"
            select
                row_index, cells, bold, background
            from
                sheet_row
            where
                sheet_name = $1
            order by
                row_index
            "#,
        )
        .bind(sheet)
        .fetch_all(&self.reader)
        .await?;

        Ok(Some(rows.into_iter().map(StoredRow::from).collect()))
    }
}
