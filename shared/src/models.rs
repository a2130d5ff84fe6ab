use std::collections::BTreeMap;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::format::format_confidence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct DetectionId(pub u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, StrumDisplay, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Whether a holder of `self` may open a page that requires `required`.
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => self == Role::Admin,
        }
    }

    pub fn toggled(self) -> Role {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

/// A user account as returned by either backend dialect.
///
/// The cookie backend sends `name` and `role`, the bearer backend sends
/// `full_name` and `is_admin`. Both deserialize into this struct; use
/// [`User::role`] rather than reading the raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_count: Option<u64>,
}

impl User {
    pub fn role(&self) -> Role {
        match (self.role, self.is_admin) {
            (Some(role), _) => role,
            (None, Some(true)) => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

/// Body of `auth/check-session`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_role: Option<Role>,
}

impl SessionInfo {
    pub fn from_user(user: &User) -> Self {
        Self {
            logged_in: true,
            user_id: Some(user.id),
            user_name: Some(user.name.clone()),
            user_role: Some(user.role()),
        }
    }

    pub fn role(&self) -> Role {
        self.user_role.unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().filter(|name| !name.is_empty()).unwrap_or("User")
    }
}

/// Body of `auth/me`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

/// Body of `auth/login`, `auth/admin-login` and `auth/signup`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Option<FileKind> {
        if mime.starts_with("image/") {
            Some(FileKind::Image)
        } else if mime.starts_with("video/") {
            Some(FileKind::Video)
        } else {
            None
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FileKind::Image => "fa-solid fa-image",
            FileKind::Video => "fa-solid fa-video",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    Fake,
    Real,
    #[serde(other)]
    Unknown,
}

impl Verdict {
    pub fn badge_text(self) -> &'static str {
        match self {
            Verdict::Fake => "⚠️ Fake",
            Verdict::Real => "✓ Real",
            Verdict::Unknown => "? Unknown",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Fake => "DEEPFAKE DETECTED",
            Verdict::Real => "AUTHENTIC MEDIA",
            Verdict::Unknown => "INCONCLUSIVE",
        }
    }
}

/// One stored detection.
///
/// Field names follow the cookie backend; the aliases cover the bearer
/// backend (`result`, `extra_data`, `full_name`, `email`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: DetectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub file_name: String,
    pub file_type: FileKind,
    #[serde(alias = "result")]
    pub prediction: Verdict,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, alias = "extra_data", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, alias = "full_name", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, alias = "email", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DetectionMetadata {
    #[serde(default)]
    pub file_info: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub detection_method: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl DetectionMetadata {
    pub fn is_empty(&self) -> bool {
        self.file_info.as_ref().is_none_or(BTreeMap::is_empty)
            && self.detection_method.is_none()
            && self.model_version.is_none()
    }
}

impl Detection {
    /// Decodes the metadata blob, which arrives either as an object or as a
    /// JSON-encoded string.
    pub fn metadata(&self) -> Option<DetectionMetadata> {
        let decoded = match self.metadata.as_ref()? {
            Value::Null => return None,
            Value::String(raw) => serde_json::from_str::<DetectionMetadata>(raw).ok()?,
            other => serde_json::from_value::<DetectionMetadata>(other.clone()).ok()?,
        };
        (!decoded.is_empty()).then_some(decoded)
    }

    pub fn is_fake(&self) -> bool {
        self.prediction == Verdict::Fake
    }
}

/// Response of the upload endpoints.
///
/// The cookie backend wraps a full record, the bearer backend returns a
/// summary with the new record's id. A 200 carrying only `error` means the
/// backend accepted the file but could not analyse it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Record {
        detection: Detection,
    },
    Summary {
        result: Verdict,
        confidence: f64,
        #[serde(default)]
        processing_time: Option<f64>,
        detection_id: DetectionId,
    },
    Rejected {
        error: String,
    },
}

impl UploadResponse {
    pub fn into_detection(self, file_name: &str, kind: FileKind) -> Result<Detection, String> {
        match self {
            UploadResponse::Record { detection } => Ok(detection),
            UploadResponse::Summary {
                result,
                confidence,
                processing_time,
                detection_id,
            } => Ok(Detection {
                id: detection_id,
                user_id: None,
                file_name: file_name.to_string(),
                file_type: kind,
                prediction: result,
                confidence,
                processing_time,
                created_at: None,
                metadata: None,
                user_name: None,
                user_email: None,
            }),
            UploadResponse::Rejected { error } => Err(error),
        }
    }
}

/// Single record from the detection detail endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionResponse {
    pub detection: Detection,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<Detection>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DetectionsResponse {
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
struct UserStatsBody {
    #[serde(default)]
    total_detections: u64,
    #[serde(default, alias = "fake_count")]
    fake_detected: u64,
    #[serde(default, alias = "real_count")]
    real_detected: u64,
    #[serde(default)]
    avg_confidence: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UserStatsPayload {
    Wrapped { stats: UserStatsBody },
    Flat(UserStatsBody),
}

/// Per-user counters from `detection/stats`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "UserStatsPayload")]
pub struct UserStats {
    pub total_detections: u64,
    pub fake_detected: u64,
    pub real_detected: u64,
    pub avg_confidence: Option<f64>,
}

impl From<UserStatsPayload> for UserStats {
    fn from(payload: UserStatsPayload) -> Self {
        let body = match payload {
            UserStatsPayload::Wrapped { stats } => stats,
            UserStatsPayload::Flat(body) => body,
        };
        Self {
            total_detections: body.total_detections,
            fake_detected: body.fake_detected,
            real_detected: body.real_detected,
            avg_confidence: body.avg_confidence,
        }
    }
}

#[derive(Deserialize)]
struct NestedUserCounts {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    admins: Option<u64>,
    #[serde(default)]
    regular_users: Option<u64>,
}

#[derive(Deserialize)]
struct NestedDetectionCounts {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    fake: u64,
    #[serde(default)]
    real: u64,
    #[serde(default)]
    images: Option<u64>,
    #[serde(default)]
    videos: Option<u64>,
    #[serde(default)]
    avg_confidence: Option<f64>,
    #[serde(default)]
    recent_week: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AdminStatsPayload {
    Nested {
        users: NestedUserCounts,
        detections: NestedDetectionCounts,
    },
    Flat {
        #[serde(default)]
        total_users: u64,
        #[serde(default)]
        total_detections: u64,
        #[serde(default)]
        fake_detections: u64,
        #[serde(default)]
        real_detections: u64,
    },
}

/// System-wide counters from `admin/stats` or `admin/dashboard-stats`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "AdminStatsPayload")]
pub struct AdminStats {
    pub total_users: u64,
    pub admin_users: Option<u64>,
    pub regular_users: Option<u64>,
    pub total_detections: u64,
    pub fake_detections: u64,
    pub real_detections: u64,
    pub image_detections: Option<u64>,
    pub video_detections: Option<u64>,
    pub avg_confidence: Option<f64>,
    pub recent_week: Option<u64>,
}

impl From<AdminStatsPayload> for AdminStats {
    fn from(payload: AdminStatsPayload) -> Self {
        match payload {
            AdminStatsPayload::Nested { users, detections } => Self {
                total_users: users.total,
                admin_users: users.admins,
                regular_users: users.regular_users,
                total_detections: detections.total,
                fake_detections: detections.fake,
                real_detections: detections.real,
                image_detections: detections.images,
                video_detections: detections.videos,
                avg_confidence: detections.avg_confidence,
                recent_week: detections.recent_week,
            },
            AdminStatsPayload::Flat {
                total_users,
                total_detections,
                fake_detections,
                real_detections,
            } => Self {
                total_users,
                total_detections,
                fake_detections,
                real_detections,
                ..Self::default()
            },
        }
    }
}

impl AdminStats {
    /// Counters only the nested payload carries, as `(icon, label, value)`
    /// for the cards after the four totals. Absent fields are skipped.
    pub fn breakdown(&self) -> Vec<(&'static str, &'static str, String)> {
        let counts = [
            ("fa-solid fa-user-shield", "Admins", self.admin_users),
            ("fa-solid fa-user", "Regular users", self.regular_users),
            ("fa-solid fa-image", "Images", self.image_detections),
            ("fa-solid fa-video", "Videos", self.video_detections),
            ("fa-solid fa-calendar-week", "Last 7 days", self.recent_week),
        ];
        let mut cards: Vec<_> = counts
            .into_iter()
            .filter_map(|(icon, label, count)| count.map(|count| (icon, label, count.to_string())))
            .collect();
        if let Some(avg) = self.avg_confidence {
            cards.push(("fa-solid fa-percent", "Average confidence", format!("{}%", format_confidence(avg))));
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_role_reads_both_dialects() {
        let cookie: User = serde_json::from_value(json!({
            "id": 1, "name": "Ada", "email": "ada@example.com", "role": "admin"
        }))
        .unwrap();
        let bearer: User = serde_json::from_value(json!({
            "id": 2, "full_name": "Bob", "email": "bob@example.com", "is_admin": true, "is_verified": false
        }))
        .unwrap();
        let plain: User = serde_json::from_value(json!({
            "id": 3, "full_name": "Cy", "email": "cy@example.com", "is_admin": false
        }))
        .unwrap();

        assert_eq!(cookie.role(), Role::Admin);
        assert_eq!(bearer.role(), Role::Admin);
        assert_eq!(bearer.name, "Bob");
        assert_eq!(plain.role(), Role::User);
    }

    #[test]
    fn cached_user_survives_storage_encoding() {
        let user: User = serde_json::from_value(json!({
            "id": 7, "full_name": "Dee", "email": "dee@example.com", "is_admin": true
        }))
        .unwrap();
        let stored = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored.name, "Dee");
        assert!(restored.is_admin());
    }

    #[test]
    fn role_satisfaction() {
        assert!(Role::User.satisfies(Role::User));
        assert!(Role::Admin.satisfies(Role::User));
        assert!(!Role::User.satisfies(Role::Admin));
        assert_eq!(Role::User.toggled(), Role::Admin);
    }

    #[test]
    fn session_from_user_carries_role() {
        let user: User =
            serde_json::from_value(json!({"id": 4, "full_name": "Eve", "email": "e@x.io", "is_admin": true}))
                .unwrap();
        let session = SessionInfo::from_user(&user);
        assert!(session.logged_in);
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.display_name(), "Eve");
    }

    #[test]
    fn detection_accepts_bearer_field_names() {
        let detection: Detection = serde_json::from_value(json!({
            "id": 11,
            "user_id": 2,
            "file_name": "clip.mp4",
            "file_type": "video",
            "result": "fake",
            "confidence": 91.5,
            "processing_time": 3.21,
            "extra_data": null,
            "full_name": "Bob",
            "email": "bob@example.com",
            "created_at": "2024-03-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(detection.prediction, Verdict::Fake);
        assert_eq!(detection.file_type, FileKind::Video);
        assert_eq!(detection.user_name.as_deref(), Some("Bob"));
        assert_eq!(detection.user_email.as_deref(), Some("bob@example.com"));
        assert!(detection.metadata().is_none());
    }

    #[test]
    fn detail_response_unwraps_the_record() {
        let response: DetectionResponse = serde_json::from_value(json!({
            "detection": {
                "id": 7, "file_name": "face.jpg", "file_type": "image",
                "prediction": "fake", "confidence": 88.0, "processing_time": 1.5
            }
        }))
        .unwrap();
        assert_eq!(response.detection.id, DetectionId(7));
        assert_eq!(response.detection.processing_time, Some(1.5));
        assert!(serde_json::from_value::<DetectionResponse>(json!({"error": "Detection not found"})).is_err());
    }

    #[test]
    fn unexpected_prediction_is_unknown() {
        let detection: Detection = serde_json::from_value(json!({
            "id": 1, "file_name": "a.png", "file_type": "image", "prediction": "error", "confidence": 0
        }))
        .unwrap();
        assert_eq!(detection.prediction, Verdict::Unknown);
    }

    #[test]
    fn metadata_decodes_from_string_or_object() {
        let base = json!({
            "id": 1, "file_name": "a.png", "file_type": "image", "prediction": "real", "confidence": 80.0
        });

        let mut as_object = base.clone();
        as_object["metadata"] = json!({
            "file_info": {"width": 640, "height": 480},
            "detection_method": "cnn",
            "model_version": "1.2"
        });
        let mut as_string = base;
        as_string["metadata"] = json!("{\"model_version\": \"2.0\"}");

        let object: Detection = serde_json::from_value(as_object).unwrap();
        let string: Detection = serde_json::from_value(as_string).unwrap();

        let object_meta = object.metadata().unwrap();
        assert_eq!(object_meta.detection_method.as_deref(), Some("cnn"));
        assert_eq!(object_meta.file_info.unwrap().get("width"), Some(&json!(640)));
        assert_eq!(string.metadata().unwrap().model_version.as_deref(), Some("2.0"));
    }

    #[test]
    fn upload_response_record_shape() {
        let response: UploadResponse = serde_json::from_value(json!({
            "message": "Detection completed",
            "detection": {
                "id": 5, "file_name": "face.jpg", "file_type": "image",
                "prediction": "real", "confidence": 97.12, "processing_time": 0.8
            }
        }))
        .unwrap();
        let detection = response.into_detection("ignored.jpg", FileKind::Image).unwrap();
        assert_eq!(detection.id, DetectionId(5));
        assert_eq!(detection.file_name, "face.jpg");
    }

    #[test]
    fn upload_response_summary_shape_uses_local_file_details() {
        let response: UploadResponse = serde_json::from_value(json!({
            "message": "Video analyzed successfully",
            "result": "fake",
            "confidence": 64.2,
            "processing_time": 12.5,
            "detection_id": 42
        }))
        .unwrap();
        let detection = response.into_detection("clip.mp4", FileKind::Video).unwrap();
        assert_eq!(detection.id, DetectionId(42));
        assert_eq!(detection.file_name, "clip.mp4");
        assert_eq!(detection.file_type, FileKind::Video);
        assert!(detection.is_fake());
    }

    #[test]
    fn upload_response_without_result_is_rejected() {
        let response: UploadResponse = serde_json::from_value(json!({
            "error": "Model not trained yet",
            "prediction": "unknown",
            "confidence": 0,
            "message": "Please train the model first"
        }))
        .unwrap();
        assert_eq!(
            response.into_detection("a.png", FileKind::Image),
            Err("Model not trained yet".to_string())
        );
    }

    #[test]
    fn user_stats_flat_and_wrapped() {
        let flat: UserStats = serde_json::from_value(json!({
            "total_detections": 5, "fake_detected": 2, "real_detected": 3
        }))
        .unwrap();
        let wrapped: UserStats = serde_json::from_value(json!({
            "stats": {"total_detections": 5, "fake_count": 2, "real_count": 3, "avg_confidence": 88.1}
        }))
        .unwrap();

        assert_eq!(flat.fake_detected, 2);
        assert_eq!(wrapped.fake_detected, 2);
        assert_eq!(wrapped.real_detected, 3);
        assert_eq!(wrapped.avg_confidence, Some(88.1));
    }

    #[test]
    fn admin_stats_nested_and_flat() {
        let nested: AdminStats = serde_json::from_value(json!({
            "users": {"total": 10, "admins": 1, "regular_users": 9},
            "detections": {
                "total": 40, "fake": 15, "real": 25, "images": 30, "videos": 10,
                "avg_confidence": 81.3, "recent_week": 6
            }
        }))
        .unwrap();
        let flat: AdminStats = serde_json::from_value(json!({
            "total_users": 10, "total_detections": 40, "fake_detections": 15, "real_detections": 25
        }))
        .unwrap();

        assert_eq!(nested.total_users, 10);
        assert_eq!(nested.video_detections, Some(10));
        assert_eq!(nested.recent_week, Some(6));
        assert_eq!(flat.fake_detections, 15);
        assert_eq!(flat.admin_users, None);
        assert_eq!(nested.total_detections, flat.total_detections);

        let labels: Vec<&str> = nested.breakdown().iter().map(|(_, label, _)| *label).collect();
        assert_eq!(
            labels,
            ["Admins", "Regular users", "Images", "Videos", "Last 7 days", "Average confidence"]
        );
        assert_eq!(nested.breakdown()[5].2, "81.30%");
        assert!(flat.breakdown().is_empty());
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ApiErrorBody =
            serde_json::from_value(json!({"error": "Invalid credentials", "message": "ignored"})).unwrap();
        assert_eq!(body.text(), Some("Invalid credentials"));

        let blank: ApiErrorBody = serde_json::from_value(json!({"error": "  "})).unwrap();
        assert_eq!(blank.text(), None);
    }
}
