//! Google Sheets contact directory.
//!
//! Reads the spreadsheet through its visualization-query endpoint
//! (`/gviz/tq?tqx=out:json`), which works for link-shared sheets without a
//! token. The body is JSON wrapped in a `google.visualization.Query.setResponse(...)`
//! callback and has to be unwrapped before decoding.
//!
//! Columns are resolved by header label first. A field whose header cannot be
//! found falls back to its fixed position:
//! 0 name, 1 phone, 2 email, 3 image URLs, 4 blood group, 5 facebook,
//! 6 linkedin, 7 whatsapp, 8 city.

use async_trait::async_trait;
use regex::Regex;
use reunion_core::{Config, ContactRecord};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::{SourceError, SourceResult};
use crate::traits::ContactSource;

const PROVIDER: &str = "Google Sheets";

static ENVELOPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)google\.visualization\.Query\.setResponse\((.*)\);?\s*$")
        .expect("gviz envelope regex is valid")
});

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<GvizError>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Option<Value>,
}

/// Contact fields in their fixed positional order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Phone,
    Email,
    Images,
    BloodGroup,
    Facebook,
    LinkedIn,
    WhatsApp,
    City,
}

impl Field {
    const ALL: [Field; 9] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Images,
        Field::BloodGroup,
        Field::Facebook,
        Field::LinkedIn,
        Field::WhatsApp,
        Field::City,
    ];

    fn position(self) -> usize {
        self as usize
    }

    /// Accepted header labels, normalized (lowercase alphanumerics only)
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "fullname"],
            Field::Phone => &["phone", "phonenumber", "mobile", "mobilenumber", "contactnumber"],
            Field::Email => &["email", "emailaddress", "mail"],
            Field::Images => &[
                "image", "images", "imageurl", "imageurls", "photo", "photos", "picture",
                "pictures", "pic", "pics",
            ],
            Field::BloodGroup => &["bloodgroup", "blood", "bloodtype"],
            Field::Facebook => &["facebook", "facebookurl", "fb"],
            Field::LinkedIn => &["linkedin", "linkedinurl"],
            Field::WhatsApp => &["whatsapp", "whatsappnumber"],
            Field::City => &["city", "location", "currentcity"],
        }
    }
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Field-to-column index map, built once per fetch.
///
/// When at least one header label is recognized, only labelled columns are
/// read and fields without a header stay empty. A sheet with no recognized
/// labels is read by fixed position.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMap([Option<usize>; 9]);

impl ColumnMap {
    fn from_labels(labels: &[String]) -> Self {
        let normalized: Vec<String> = labels.iter().map(|l| normalize_label(l)).collect();
        let mut indices = [None; 9];
        for field in Field::ALL {
            indices[field.position()] = normalized
                .iter()
                .position(|label| field.aliases().contains(&label.as_str()));
        }

        if indices.iter().all(Option::is_none) {
            for field in Field::ALL {
                indices[field.position()] = Some(field.position());
            }
        }
        ColumnMap(indices)
    }

    fn index(&self, field: Field) -> Option<usize> {
        self.0[field.position()]
    }
}

/// Render a cell value as text the way the sheet shows it.
fn cell_text(cell: Option<&Option<GvizCell>>) -> String {
    let value = match cell.and_then(|c| c.as_ref()).and_then(|c| c.v.as_ref()) {
        Some(v) => v,
        None => return String::new(),
    };

    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Integral numbers print without a fractional part (phone numbers are often stored as numbers).
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strip the `setResponse(...)` callback and return the inner JSON text.
fn unwrap_envelope(body: &str) -> SourceResult<&str> {
    ENVELOPE_RE
        .captures(body.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(SourceError::Envelope { provider: PROVIDER })
}

/// Parse a full gviz response body into contacts, preserving row order.
pub fn parse_gviz_body(body: &str) -> SourceResult<Vec<ContactRecord>> {
    let json = unwrap_envelope(body)?;
    let response: GvizResponse = serde_json::from_str(json).map_err(|e| SourceError::Decode {
        provider: PROVIDER,
        message: e.to_string(),
    })?;

    if response.status.as_deref() == Some("error") {
        let message = response
            .errors
            .first()
            .and_then(|e| e.detailed_message.clone().or_else(|| e.message.clone()))
            .unwrap_or_else(|| "query failed".to_string());
        return Err(SourceError::Upstream {
            provider: PROVIDER,
            status: 400,
            message,
        });
    }

    let table = response.table.ok_or_else(|| SourceError::Decode {
        provider: PROVIDER,
        message: "response has no table".to_string(),
    })?;

    let labels: Vec<String> = table
        .cols
        .iter()
        .map(|c| c.label.clone().unwrap_or_default())
        .collect();
    let columns = ColumnMap::from_labels(&labels);

    let contacts = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let text = |field: Field| cell_text(columns.index(field).and_then(|i| row.c.get(i)));

            let name = text(Field::Name);
            if name.is_empty() {
                return None;
            }

            let image_urls = ContactRecord::split_image_urls(&text(Field::Images));
            Some(ContactRecord {
                id: ContactRecord::id_for_row(row_index),
                name,
                email: text(Field::Email),
                phone: text(Field::Phone),
                image_url: image_urls.first().cloned(),
                image_urls,
                blood_group: non_empty(text(Field::BloodGroup)),
                facebook: non_empty(text(Field::Facebook)),
                linkedin: non_empty(text(Field::LinkedIn)),
                whatsapp: non_empty(text(Field::WhatsApp)),
                city: non_empty(text(Field::City)),
            })
        })
        .collect();

    Ok(contacts)
}

/// [`ContactSource`] backed by a link-shared spreadsheet.
pub struct GoogleSheetsSource {
    http: reqwest::Client,
    base_url: String,
    sheet_id: Option<String>,
}

impl GoogleSheetsSource {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, sheet_id: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sheet_id,
        }
    }

    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        Self::new(
            http,
            config.sheets_base_url(),
            config.sheet_id().map(String::from),
        )
    }

    fn endpoint(&self, sheet_id: &str) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq?tqx=out:json",
            self.base_url, sheet_id
        )
    }
}

#[async_trait]
impl ContactSource for GoogleSheetsSource {
    #[tracing::instrument(skip(self))]
    async fn list_contacts(&self) -> SourceResult<Vec<ContactRecord>> {
        let sheet_id = self.sheet_id.as_deref().ok_or_else(|| {
            SourceError::Configuration(
                "Missing Google Sheet ID: set the GOOGLE_SHEET_ID environment variable".to_string(),
            )
        })?;

        let response = self
            .http
            .get(self.endpoint(sheet_id))
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Sheets request failed");
            return Err(SourceError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let contacts = parse_gviz_body(&body)?;
        tracing::info!(contacts = contacts.len(), "Loaded contacts from Sheets");
        Ok(contacts)
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }
}
