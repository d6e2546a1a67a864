// ── Questionnaire workflow ──
//
// Drafts are validated locally before anything is sent: the respondent
// name and all four ratings are mandatory. A student submission flips the
// completion flag; chaining into the queue workflow happens in `Portal`.

use std::str::FromStr;

use pekanit_api::{ApiClient, GuestQuestionnaire, QueueNumber, Rating, Ratings, StudentQuestionnaire};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use tracing::{info, warn};

use crate::error::{CoreError, from_api};
use crate::session::{self, Session};
use crate::store::SessionStore;

const SUBMIT_FALLBACK: &str = "Failed to send questionnaire";

// ── Rated items ──────────────────────────────────────────────────

/// The four rated questionnaire items. String form is the wire field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RatingItem {
    TampilanProduk,
    TampilanStand,
    PenjelasanProduk,
    Hiburan,
}

impl RatingItem {
    /// Short column label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TampilanProduk => "Tampilan Produk",
            Self::TampilanStand => "Tampilan Stand",
            Self::PenjelasanProduk => "Penjelasan Produk",
            Self::Hiburan => "Hiburan",
        }
    }

    /// The question as asked of a respondent.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::TampilanProduk => "Bagaimana tampilan produk kami?",
            Self::TampilanStand => "Bagaimana tampilan stand?",
            Self::PenjelasanProduk => "Penjelasan produk oleh siswa?",
            Self::Hiburan => "Kualitas hiburan acara?",
        }
    }
}

/// Ratings as collected, any of which may still be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingsDraft {
    pub tampilan_produk: Option<Rating>,
    pub tampilan_stand: Option<Rating>,
    pub penjelasan_produk: Option<Rating>,
    pub hiburan: Option<Rating>,
}

impl RatingsDraft {
    pub fn get(&self, item: RatingItem) -> Option<Rating> {
        match item {
            RatingItem::TampilanProduk => self.tampilan_produk,
            RatingItem::TampilanStand => self.tampilan_stand,
            RatingItem::PenjelasanProduk => self.penjelasan_produk,
            RatingItem::Hiburan => self.hiburan,
        }
    }

    pub fn set(&mut self, item: RatingItem, rating: Rating) {
        let slot = match item {
            RatingItem::TampilanProduk => &mut self.tampilan_produk,
            RatingItem::TampilanStand => &mut self.tampilan_stand,
            RatingItem::PenjelasanProduk => &mut self.penjelasan_produk,
            RatingItem::Hiburan => &mut self.hiburan,
        };
        *slot = Some(rating);
    }

    /// Parse and set a rating given as text (case-insensitive).
    pub fn set_str(&mut self, item: RatingItem, value: &str) -> Result<(), CoreError> {
        let rating = parse_rating(value).ok_or_else(|| {
            CoreError::validation(
                item.as_ref(),
                format!(
                    "{} must be one of Baik, Cukup, Kurang, Buruk (got '{}')",
                    item.label(),
                    value.trim()
                ),
            )
        })?;
        self.set(item, rating);
        Ok(())
    }

    /// Items not yet rated, in questionnaire order.
    pub fn missing(&self) -> Vec<RatingItem> {
        RatingItem::iter().filter(|i| self.get(*i).is_none()).collect()
    }

    /// All four ratings, or a validation error naming the first unset item.
    pub fn complete(&self) -> Result<Ratings, CoreError> {
        match (
            self.tampilan_produk,
            self.tampilan_stand,
            self.penjelasan_produk,
            self.hiburan,
        ) {
            (Some(tampilan_produk), Some(tampilan_stand), Some(penjelasan_produk), Some(hiburan)) => {
                Ok(Ratings {
                    tampilan_produk,
                    tampilan_stand,
                    penjelasan_produk,
                    hiburan,
                })
            }
            _ => {
                let missing = self.missing();
                let names: Vec<&str> = missing.iter().map(|i| i.label()).collect();
                let field = missing.first().map_or("ratings", |i| i.as_ref());
                Err(CoreError::validation(
                    field,
                    format!("Please rate: {}", names.join(", ")),
                ))
            }
        }
    }
}

fn parse_rating(value: &str) -> Option<Rating> {
    let value = value.trim();
    Rating::from_str(value)
        .ok()
        .or_else(|| Rating::iter().find(|r| r.as_ref().eq_ignore_ascii_case(value)))
}

fn required(field: &str, label: &str, value: &str) -> Result<String, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation(field, format!("{label} must not be empty")));
    }
    Ok(value.to_owned())
}

// ── Drafts ───────────────────────────────────────────────────────

/// A student questionnaire, filled in by the student's guardian.
#[derive(Debug, Clone, Default)]
pub struct StudentDraft {
    pub guardian_name: String,
    pub ratings: RatingsDraft,
    pub remarks: String,
}

impl StudentDraft {
    pub fn validate(&self) -> Result<StudentQuestionnaire, CoreError> {
        Ok(StudentQuestionnaire {
            nama_wali_siswa: required("nama_wali_siswa", "Guardian name", &self.guardian_name)?,
            ratings: self.ratings.complete()?,
            kritik_saran: self.remarks.trim().to_owned(),
        })
    }
}

/// A guest questionnaire. Affiliation and remarks are optional.
#[derive(Debug, Clone, Default)]
pub struct GuestDraft {
    pub name: String,
    pub affiliation: String,
    pub ratings: RatingsDraft,
    pub remarks: String,
}

impl GuestDraft {
    pub fn validate(&self) -> Result<GuestQuestionnaire, CoreError> {
        Ok(GuestQuestionnaire {
            nama: required("nama", "Name", &self.name)?,
            instansi: self.affiliation.trim().to_owned(),
            ratings: self.ratings.complete()?,
            kritik_saran: self.remarks.trim().to_owned(),
        })
    }
}

// ── Outcomes ─────────────────────────────────────────────────────

/// Result of the queue step chained after a student submission.
#[derive(Debug)]
pub enum QueueOutcome {
    Issued(QueueNumber),
    /// The questionnaire was stored but no queue number could be obtained.
    Failed(CoreError),
}

/// A stored student questionnaire and what happened when queueing.
#[derive(Debug)]
pub struct StudentReceipt {
    pub queue: QueueOutcome,
}

impl StudentReceipt {
    pub fn queue_number(&self) -> Option<&QueueNumber> {
        match &self.queue {
            QueueOutcome::Issued(n) => Some(n),
            QueueOutcome::Failed(_) => None,
        }
    }
}

// ── Workflow ─────────────────────────────────────────────────────

/// Validate and send a student questionnaire, then mark it done.
pub(crate) async fn submit_student(
    api: &ApiClient,
    store: &dyn SessionStore,
    session: &Session,
    draft: &StudentDraft,
) -> Result<(), CoreError> {
    let body = draft.validate()?;

    api.submit_student_questionnaire(&session.token, &body)
        .await
        .map_err(|e| {
            warn!(user_id = %session.user_id, error = %e, "student questionnaire rejected");
            from_api!(Submit, e, SUBMIT_FALLBACK)
        })?;

    session::write_flag(store, true)?;
    info!(user_id = %session.user_id, "student questionnaire submitted");
    Ok(())
}

/// Validate and send a guest questionnaire. No session involved.
pub(crate) async fn submit_guest(api: &ApiClient, draft: &GuestDraft) -> Result<(), CoreError> {
    let body = draft.validate()?;

    api.submit_guest_questionnaire(&body).await.map_err(|e| {
        warn!(error = %e, "guest questionnaire rejected");
        from_api!(Submit, e, SUBMIT_FALLBACK)
    })?;

    info!(instansi = %body.instansi, "guest questionnaire submitted");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_ratings() -> RatingsDraft {
        RatingsDraft {
            tampilan_produk: Some(Rating::Baik),
            tampilan_stand: Some(Rating::Cukup),
            penjelasan_produk: Some(Rating::Baik),
            hiburan: Some(Rating::Kurang),
        }
    }

    #[test]
    fn unset_rating_is_named_in_error() {
        let mut ratings = full_ratings();
        ratings.hiburan = None;

        let err = ratings.complete().unwrap_err();
        match err {
            CoreError::Validation { field, message } => {
                assert_eq!(field, "hiburan");
                assert!(message.contains("Hiburan"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn set_str_accepts_any_case_and_rejects_outsiders() {
        let mut ratings = RatingsDraft::default();
        ratings.set_str(RatingItem::TampilanStand, " baik ").unwrap();
        assert_eq!(ratings.tampilan_stand, Some(Rating::Baik));

        assert!(ratings.set_str(RatingItem::Hiburan, "Luar biasa").is_err());
        assert_eq!(ratings.hiburan, None);
        assert_eq!(ratings.missing().len(), 3);
    }

    #[test]
    fn student_name_is_mandatory_and_trimmed() {
        let mut draft = StudentDraft {
            guardian_name: "   ".into(),
            ratings: full_ratings(),
            remarks: String::new(),
        };
        assert!(draft.validate().is_err());

        draft.guardian_name = "  Bu Sari ".into();
        assert_eq!(draft.validate().unwrap().nama_wali_siswa, "Bu Sari");
    }

    #[test]
    fn guest_affiliation_is_optional() {
        let draft = GuestDraft {
            name: "Pak Dedi".into(),
            affiliation: String::new(),
            ratings: full_ratings(),
            remarks: "Mantap".into(),
        };
        let body = draft.validate().unwrap();
        assert_eq!(body.instansi, "");
        assert_eq!(body.kritik_saran, "Mantap");
    }

    #[test]
    fn item_names_match_wire_fields() {
        let names: Vec<String> = RatingItem::iter().map(|i| i.to_string()).collect();
        assert_eq!(
            names,
            ["tampilan_produk", "tampilan_stand", "penjelasan_produk", "hiburan"]
        );
    }
}
