use shared::Page;

/// Full page navigation. There is no in-app routing; every page is its own
/// document.
pub fn redirect(page: Page) {
    redirect_to(&page.href());
}

pub fn redirect_to(href: &str) {
    log::info!("Navigating to {}", href);
    match web_sys::window() {
        Some(window) => {
            if let Err(err) = window.location().set_href(href) {
                log::error!("Navigation to {} failed: {:?}", href, err);
            }
        }
        None => log::error!("No window to navigate from"),
    }
}

pub fn current_page() -> Option<Page> {
    let path = web_sys::window()?.location().pathname().ok()?;
    Page::from_path(&path)
}

/// Blocking confirmation dialog; a missing window counts as "cancel".
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
