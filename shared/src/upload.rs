use thiserror::Error;
use uuid::Uuid;

use crate::models::{Detection, FileKind};

/// Largest file the backend accepts (100 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

pub const IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg", "image/gif", "image/bmp"];

pub const VIDEO_MIME_TYPES: &[&str] = &[
    "video/mp4",
    "video/avi",
    "video/mov",
    "video/quicktime",
    "video/mkv",
    "video/x-matroska",
    "video/x-flv",
    "video/x-ms-wmv",
];

/// `accept` attribute for the file input.
pub fn accept_attribute() -> String {
    IMAGE_MIME_TYPES
        .iter()
        .chain(VIDEO_MIME_TYPES)
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Invalid file type. Please upload an image or video file.")]
    UnsupportedType(String),
    #[error("File size exceeds 100MB limit.")]
    TooLarge(u64),
    #[error("Please select a file first.")]
    NothingSelected,
    #[error("An upload is already in progress.")]
    Busy,
}

/// Checks a candidate file against the allow-list and the size limit.
pub fn validate_selection(mime: &str, size: u64) -> Result<FileKind, SelectionError> {
    let mime = mime.trim().to_ascii_lowercase();
    let allowed = IMAGE_MIME_TYPES.contains(&mime.as_str()) || VIDEO_MIME_TYPES.contains(&mime.as_str());
    if !allowed {
        return Err(SelectionError::UnsupportedType(mime));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(SelectionError::TooLarge(size));
    }
    FileKind::from_mime(&mime).ok_or(SelectionError::UnsupportedType(mime))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub token: Uuid,
    pub handle: F,
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub kind: FileKind,
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase<F> {
    Idle,
    Selected(SelectedFile<F>),
    Uploading { file: SelectedFile<F>, progress: u8 },
    Done(Detection),
}

/// State of the single-file upload page.
///
/// `F` is the platform file handle; the browser build stores a
/// `gloo_file::File`, tests use plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFlow<F> {
    phase: UploadPhase<F>,
    error: Option<String>,
}

impl<F> Default for UploadFlow<F> {
    fn default() -> Self {
        Self {
            phase: UploadPhase::Idle,
            error: None,
        }
    }
}

impl<F: Clone> UploadFlow<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &UploadPhase<F> {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, UploadPhase::Idle)
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading { .. })
    }

    pub fn selected(&self) -> Option<&SelectedFile<F>> {
        match &self.phase {
            UploadPhase::Selected(file) | UploadPhase::Uploading { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<u8> {
        match self.phase {
            UploadPhase::Uploading { progress, .. } => Some(progress),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, UploadPhase::Selected(_))
    }

    /// Offers a file. On rejection the phase is left untouched and the
    /// reason is kept for display.
    pub fn select(&mut self, handle: F, name: &str, mime: &str, size: u64) -> Result<Uuid, SelectionError> {
        if self.is_uploading() {
            return Err(SelectionError::Busy);
        }
        let kind = match validate_selection(mime, size) {
            Ok(kind) => kind,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };
        let token = Uuid::new_v4();
        self.phase = UploadPhase::Selected(SelectedFile {
            token,
            handle,
            name: name.to_string(),
            mime: mime.to_string(),
            size,
            kind,
            preview: None,
        });
        self.error = None;
        Ok(token)
    }

    /// Attaches a preview produced for `token`. Returns false when the
    /// selection it was produced for is gone.
    pub fn attach_preview(&mut self, token: Uuid, data_url: String) -> bool {
        match &mut self.phase {
            UploadPhase::Selected(file) if file.token == token => {
                file.preview = Some(data_url);
                true
            }
            _ => false,
        }
    }

    pub fn begin_upload(&mut self) -> Result<SelectedFile<F>, SelectionError> {
        match std::mem::replace(&mut self.phase, UploadPhase::Idle) {
            UploadPhase::Selected(file) => {
                self.error = None;
                self.phase = UploadPhase::Uploading {
                    file: file.clone(),
                    progress: 0,
                };
                Ok(file)
            }
            uploading @ UploadPhase::Uploading { .. } => {
                self.phase = uploading;
                Err(SelectionError::Busy)
            }
            other => {
                self.phase = other;
                let err = SelectionError::NothingSelected;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Records upload progress as a fraction in `0.0..=1.0`.
    pub fn report_progress(&mut self, fraction: f64) {
        if let UploadPhase::Uploading { progress, .. } = &mut self.phase {
            let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
            *progress = percent.max(*progress);
        }
    }

    pub fn finish(&mut self, detection: Detection) {
        if self.is_uploading() {
            self.phase = UploadPhase::Done(detection);
            self.error = None;
        }
    }

    /// Returns to the selected state and keeps the failure message.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.phase = match std::mem::replace(&mut self.phase, UploadPhase::Idle) {
            UploadPhase::Uploading { file, .. } => UploadPhase::Selected(file),
            other => other,
        };
        self.error = Some(format!("Error: {message}"));
    }

    pub fn clear(&mut self) {
        if !self.is_uploading() {
            self.phase = UploadPhase::Idle;
            self.error = None;
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DetectionId, Verdict};

    const MB: u64 = 1024 * 1024;

    fn detection() -> Detection {
        Detection {
            id: DetectionId(1),
            user_id: None,
            file_name: "face.png".into(),
            file_type: FileKind::Image,
            prediction: Verdict::Real,
            confidence: 90.0,
            processing_time: Some(1.0),
            created_at: None,
            metadata: None,
            user_name: None,
            user_email: None,
        }
    }

    #[test]
    fn accepts_exactly_the_allow_list() {
        for mime in IMAGE_MIME_TYPES.iter().chain(VIDEO_MIME_TYPES) {
            assert!(validate_selection(mime, MB).is_ok(), "{mime} should be accepted");
        }
        for mime in ["image/webp", "application/pdf", "text/plain", "", "video/webm"] {
            assert!(matches!(
                validate_selection(mime, MB),
                Err(SelectionError::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert_eq!(validate_selection("video/mp4", MAX_UPLOAD_BYTES), Ok(FileKind::Video));
        assert_eq!(
            validate_selection("video/mp4", MAX_UPLOAD_BYTES + 1),
            Err(SelectionError::TooLarge(MAX_UPLOAD_BYTES + 1))
        );
    }

    #[test]
    fn small_png_is_selected_and_submittable() {
        let mut flow = UploadFlow::new();
        let token = flow.select("handle", "face.png", "image/png", 5 * MB).unwrap();

        assert!(flow.can_submit());
        assert_eq!(flow.selected().unwrap().kind, FileKind::Image);
        assert!(flow.attach_preview(token, "data:image/png;base64,AAAA".into()));
        assert!(flow.selected().unwrap().preview.is_some());
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn oversized_video_leaves_flow_idle() {
        let mut flow = UploadFlow::new();
        let result = flow.select("handle", "movie.mp4", "video/mp4", 150 * MB);

        assert_eq!(result, Err(SelectionError::TooLarge(150 * MB)));
        assert!(flow.is_idle());
        assert_eq!(flow.error(), Some("File size exceeds 100MB limit."));
    }

    #[test]
    fn rejection_keeps_previous_selection() {
        let mut flow = UploadFlow::new();
        flow.select("first", "a.png", "image/png", MB).unwrap();
        assert!(flow.select("second", "b.txt", "text/plain", MB).is_err());

        assert_eq!(flow.selected().unwrap().handle, "first");
    }

    #[test]
    fn stale_preview_is_ignored() {
        let mut flow = UploadFlow::new();
        let old = flow.select("first", "a.png", "image/png", MB).unwrap();
        flow.clear();
        flow.select("second", "b.png", "image/png", MB).unwrap();

        assert!(!flow.attach_preview(old, "data:old".into()));
        assert!(flow.selected().unwrap().preview.is_none());
    }

    #[test]
    fn submit_without_selection_is_refused() {
        let mut flow: UploadFlow<&str> = UploadFlow::new();
        assert_eq!(flow.begin_upload(), Err(SelectionError::NothingSelected));
        assert!(flow.is_idle());
    }

    #[test]
    fn upload_locks_selection_and_tracks_progress() {
        let mut flow = UploadFlow::new();
        flow.select("file", "clip.mp4", "video/mp4", 10 * MB).unwrap();
        let file = flow.begin_upload().unwrap();
        assert_eq!(file.name, "clip.mp4");

        assert_eq!(flow.select("other", "x.png", "image/png", MB), Err(SelectionError::Busy));
        flow.clear();
        assert!(flow.is_uploading());

        flow.report_progress(0.42);
        assert_eq!(flow.progress(), Some(42));
        flow.report_progress(0.1);
        assert_eq!(flow.progress(), Some(42));
        flow.report_progress(3.0);
        assert_eq!(flow.progress(), Some(100));
    }

    #[test]
    fn failure_returns_to_selected_with_message() {
        let mut flow = UploadFlow::new();
        flow.select("file", "a.png", "image/png", MB).unwrap();
        flow.begin_upload().unwrap();
        flow.fail("No file uploaded");

        assert!(flow.can_submit());
        assert_eq!(flow.error(), Some("Error: No file uploaded"));
    }

    #[test]
    fn dismissing_an_error_keeps_the_selection() {
        let mut flow = UploadFlow::new();
        flow.select("file", "a.png", "image/png", MB).unwrap();
        flow.begin_upload().unwrap();
        flow.fail("Server busy");
        flow.dismiss_error();

        assert_eq!(flow.error(), None);
        assert!(flow.can_submit());
    }

    #[test]
    fn success_ends_in_done() {
        let mut flow = UploadFlow::new();
        flow.select("file", "a.png", "image/png", MB).unwrap();
        flow.begin_upload().unwrap();
        flow.finish(detection());

        assert!(matches!(flow.phase(), UploadPhase::Done(d) if d.id == DetectionId(1)));
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut flow = UploadFlow::new();
        flow.select("file", "a.png", "image/png", MB).unwrap();
        flow.clear();
        assert!(flow.is_idle());
        assert!(flow.selected().is_none());
    }

    #[test]
    fn accept_attribute_lists_every_type() {
        let accept = accept_attribute();
        assert!(accept.starts_with("image/png,"));
        assert!(accept.ends_with("video/x-ms-wmv"));
    }
}
