// Wire types for the Pekan IT backend.
//
// Field names follow the backend's JSON exactly (Indonesian snake_case).
// Identifiers and queue numbers arrive as strings on some deployments and
// as numbers on others, so they deserialize from either.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ── Flexible scalars ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Num(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

// ── Queue number ────────────────────────────────────────────────────

/// An opaque, display-only queue number ("A12", "7", ...).
///
/// Never interpreted numerically. Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QueueNumber(String);

impl QueueNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read a queue number out of an arbitrary JSON value.
    ///
    /// Strings are taken verbatim, numbers are rendered in decimal;
    /// anything else (null, objects, arrays, booleans) is not a queue number.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for QueueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for QueueNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        string_or_number(d).map(Self)
    }
}

// ── Login ───────────────────────────────────────────────────────────

/// `POST /api/login` response body.
///
/// All fields are optional on the wire; the auth workflow decides what
/// counts as a well-formed success.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<LoginUser>,
}

/// The `data` object of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub name: String,
    pub kelas: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub nis: &'a str,
}

// ── Antrian ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct IssueQueueRequest<'a> {
    pub user_id: &'a str,
}

/// One row of `GET /api/antrian/kelas/:kelas`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassQueueEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub no_antrian: Option<QueueNumber>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassQueueEnvelope {
    #[serde(default)]
    pub data: Option<Vec<ClassQueueEntry>>,
}

// ── Kuesioner ───────────────────────────────────────────────────────

/// The closed rating scale used by every questionnaire item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum Rating {
    Baik,
    Cukup,
    Kurang,
    Buruk,
}

impl Rating {
    /// The whole scale, best first.
    pub const ALL: [Self; 4] = [Self::Baik, Self::Cukup, Self::Kurang, Self::Buruk];
}

/// The four rated questionnaire items, shared by both audiences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub tampilan_produk: Rating,
    pub tampilan_stand: Rating,
    pub penjelasan_produk: Rating,
    pub hiburan: Rating,
}

/// `POST /api/kuesioner/create` body (student's guardian fills it in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentQuestionnaire {
    pub nama_wali_siswa: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    pub kritik_saran: String,
}

/// `POST /api/tamu/send` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestQuestionnaire {
    pub nama: String,
    pub instansi: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    pub kritik_saran: String,
}

// ── Reports ─────────────────────────────────────────────────────────

/// Which respondent audience a report or export covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Audience {
    /// Students' guardians (`siswa`).
    #[strum(to_string = "siswa", serialize = "student")]
    #[serde(rename = "siswa")]
    Siswa,
    /// Guests (`tamu`).
    #[strum(to_string = "tamu", serialize = "guest")]
    #[serde(rename = "tamu")]
    Tamu,
}

impl Audience {
    /// Path segments of the list endpoint.
    pub(crate) fn list_path(self) -> [&'static str; 3] {
        match self {
            Self::Siswa => ["api", "show", "siswa"],
            Self::Tamu => ["api", "show", "tamu"],
        }
    }

    /// Path segments of the spreadsheet export endpoint.
    pub(crate) fn export_path(self) -> [&'static str; 2] {
        match self {
            Self::Siswa => ["api", "export-kuesioner"],
            Self::Tamu => ["api", "export-kuesioner-tamu"],
        }
    }

    /// File name the export is saved under by default.
    pub fn export_file_name(self) -> &'static str {
        match self {
            Self::Siswa => "kuesioner-siswa-pekanIt.xlsx",
            Self::Tamu => "kuesioner-tamu-pekanIt.xlsx",
        }
    }
}

/// A stored student questionnaire, as listed by `GET /api/show/siswa`.
///
/// Ratings stay strings here: reports display whatever the backend holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub nama_wali_siswa: String,
    pub nama_siswa: Option<String>,
    pub kelas: Option<String>,
    pub tampilan_produk: String,
    pub tampilan_stand: String,
    pub penjelasan_produk: String,
    pub hiburan: String,
    pub kritik_saran: Option<String>,
    pub created_at: Option<String>,
}

/// A stored guest questionnaire, as listed by `GET /api/show/tamu`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub nama: String,
    pub instansi: Option<String>,
    pub tampilan_produk: String,
    pub tampilan_stand: String,
    pub penjelasan_produk: String,
    pub hiburan: String,
    pub kritik_saran: Option<String>,
    pub created_at: Option<String>,
}
