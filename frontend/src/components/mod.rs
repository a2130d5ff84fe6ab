pub mod admin;
pub mod auth_button;
pub mod auth_forms;
pub mod dashboard;
pub mod filter_bar;
pub mod handlers;
pub mod header;
pub mod history;
pub mod landing;
pub mod preview_area;
pub mod results;
pub mod upload_page;
pub mod upload_section;
pub mod utils;
