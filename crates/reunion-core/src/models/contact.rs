use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the contact spreadsheet.
///
/// `id` is synthesized from the row position (`contact-{row+1}`) and changes if
/// rows are reordered in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// First entry of `image_urls`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl ContactRecord {
    /// Build the synthetic id for a zero-based data row index.
    pub fn id_for_row(row_index: usize) -> String {
        format!("contact-{}", row_index + 1)
    }

    /// Split a `|`-delimited image cell into trimmed, non-empty URLs.
    pub fn split_image_urls(cell: &str) -> Vec<String> {
        cell.split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
