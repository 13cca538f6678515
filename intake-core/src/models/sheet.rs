/// Column titles of every consultation sheet, in cell order.
pub const HEADER: [&str; 6] = [
    "Timestamp",
    "Name (이름)",
    "Grade (학년)",
    "Phone (연락처)",
    "Preferred Time (희망 시간)",
    "Message (문의사항)",
];

/// Fill colour of the header row.
pub const HEADER_BACKGROUND: &str = "#f3f3f3";

/// Presentation attributes of a sheet row.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowStyle {
    /// Whether the row is rendered bold
    #[serde(default)]
    pub bold: bool,
    /// CSS-style background colour, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// A row that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell values, left to right
    pub cells: Vec<String>,
    /// Presentation attributes
    pub style: RowStyle,
}

impl Row {
    /// The bold, shaded header row written when a sheet is created.
    pub fn header() -> Self {
        Self {
            cells: HEADER.iter().map(|title| (*title).to_owned()).collect(),
            style: RowStyle {
                bold: true,
                background: Some(HEADER_BACKGROUND.to_owned()),
            },
        }
    }
}

/// A row as read back from a sheet.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredRow {
    /// 1-based position in the sheet
    pub index: u64,
    /// Cell values, left to right
    pub cells: Vec<String>,
    /// Presentation attributes
    #[serde(flatten)]
    pub style: RowStyle,
}
