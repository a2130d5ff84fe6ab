pub mod endpoints;
pub mod filter;
pub mod format;
pub mod forms;
pub mod guard;
pub mod models;
pub mod pages;
pub mod paging;
pub mod table;
pub mod upload;

pub use endpoints::{AuthMode, Endpoint};
pub use models::{
    AdminStats, ApiErrorBody, AuthResponse, Detection, DetectionId, DetectionMetadata, DetectionResponse,
    DetectionsResponse, FileKind, HistoryResponse, MeResponse, MessageResponse, Role,
    SessionInfo, UploadResponse, User, UserId, UserStats, UsersResponse, Verdict,
};
pub use pages::Page;
