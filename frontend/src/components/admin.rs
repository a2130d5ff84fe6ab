use gloo_net::http::Method;
use shared::filter::{DetectionFilter, Removal, filter_users};
use shared::table::TableState;
use shared::{
    AdminStats, Detection, DetectionId, DetectionsResponse, Endpoint, MessageResponse, Page, SessionInfo, User,
    UserId, UsersResponse,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::dashboard::stat_card;
use super::filter_bar::FilterBar;
use super::header::Header;
use super::utils::{
    format_date, render_checking_session, render_confidence_cell, render_error_message, render_kind_cell,
    render_role_badge, render_verdict_badge,
};
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::{guard, nav};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Users,
    Detections,
}

/// Collections to re-fetch after a mutation. Stats are always re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Users,
    Detections,
    Both,
}

impl Refresh {
    fn users(self) -> bool {
        matches!(self, Refresh::Users | Refresh::Both)
    }

    fn detections(self) -> bool {
        matches!(self, Refresh::Detections | Refresh::Both)
    }
}

pub enum Msg {
    SessionChecked(Option<SessionInfo>),

    // Loading
    StatsLoaded(AdminStats),
    UsersLoaded(Vec<User>),
    DetectionsLoaded(Vec<Detection>),
    UsersFailed(String),
    DetectionsFailed(String),

    // UI states
    SwitchTab(AdminTab),
    SetUserSearch(String),
    SetFilter(DetectionFilter),

    // Mutations
    ToggleRole(UserId),
    DeleteUser(UserId),
    DeleteDetection(DetectionId),
    MutationDone(String, Refresh, Option<Removal>),
    MutationFailed(String),
}

#[derive(Properties, PartialEq)]
pub struct AdminProps {
    pub client: ApiClient,
}

pub struct AdminDashboard {
    session: Option<SessionInfo>,
    stats: Option<AdminStats>,
    users: TableState<User>,
    detections: TableState<Detection>,
    tab: AdminTab,
    user_search: String,
    filter: DetectionFilter,
    pending: bool,
    notice: Option<String>,
    error: Option<String>,
}

impl Component for AdminDashboard {
    type Message = Msg;
    type Properties = AdminProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let session = guard::protect_page(&client, Page::AdminDashboard).await;
            link.send_message(Msg::SessionChecked(session));
        });

        Self {
            session: None,
            stats: None,
            users: TableState::Loading,
            detections: TableState::Loading,
            tab: AdminTab::Users,
            user_search: String::new(),
            filter: DetectionFilter::default(),
            pending: false,
            notice: None,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChecked(session) => {
                if session.is_some() {
                    self.refresh(ctx, Refresh::Both);
                }
                self.session = session;
                true
            }

            // Loading
            Msg::StatsLoaded(stats) => {
                self.stats = Some(stats);
                true
            }
            Msg::UsersLoaded(users) => {
                self.users = TableState::Loaded(users);
                true
            }
            Msg::DetectionsLoaded(detections) => {
                self.detections = TableState::Loaded(detections);
                true
            }
            Msg::UsersFailed(message) => {
                if let Some(message) = self.users.fail(message) {
                    self.error = Some(message);
                }
                true
            }
            Msg::DetectionsFailed(message) => {
                if let Some(message) = self.detections.fail(message) {
                    self.error = Some(message);
                }
                true
            }

            // UI states
            Msg::SwitchTab(tab) => {
                let changed = self.tab != tab;
                self.tab = tab;
                changed
            }
            Msg::SetUserSearch(search) => {
                self.user_search = search;
                true
            }
            Msg::SetFilter(filter) => {
                self.filter = filter;
                true
            }

            // Mutations
            Msg::ToggleRole(id) => {
                let Some(user) = self.find_user(id) else {
                    return false;
                };
                let question = format!("Change {}'s role to {}?", user.name, user.role().toggled());
                if !nav::confirm(&question) {
                    return false;
                }
                self.mutate(ctx, Method::PUT, Endpoint::ToggleRole(id), Refresh::Users, None);
                true
            }
            Msg::DeleteUser(id) => {
                let Some(user) = self.find_user(id) else {
                    return false;
                };
                let question = format!(
                    "Delete {} ({})? All of their detections will be removed as well.",
                    user.name, user.email
                );
                if !nav::confirm(&question) {
                    return false;
                }
                self.mutate(ctx, Method::DELETE, Endpoint::AdminUser(id), Refresh::Both, Some(Removal::User(id)));
                true
            }
            Msg::DeleteDetection(id) => {
                if !nav::confirm(&format!("Delete detection #{}?", id)) {
                    return false;
                }
                self.mutate(
                    ctx,
                    Method::DELETE,
                    Endpoint::AdminDetection(id),
                    Refresh::Detections,
                    Some(Removal::Detection(id)),
                );
                true
            }
            Msg::MutationDone(message, refresh, removal) => {
                if let Some(removal) = removal {
                    removal.apply(self.users.rows_mut(), self.detections.rows_mut());
                }
                self.pending = false;
                self.error = None;
                self.notice = Some(message);
                self.refresh(ctx, refresh);
                true
            }
            Msg::MutationFailed(message) => {
                self.pending = false;
                self.notice = None;
                self.error = Some(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.session.clone() else {
            return render_checking_session();
        };
        let link = ctx.link();
        let tab_button = |tab: AdminTab, icon: &'static str, label: &'static str| {
            html! {
                <button
                    class={classes!("tab-btn", (self.tab == tab).then_some("active"))}
                    onclick={link.callback(move |_| Msg::SwitchTab(tab))}
                >
                    <i class={icon}></i>{ format!(" {}", label) }
                </button>
            }
        };

        html! {
            <div class="container">
                <Header client={ctx.props().client.clone()} session={Some(session.clone())} active={Page::AdminDashboard} />
                <main class="main-content">
                    <h2>{ format!("Admin dashboard · {}", session.display_name()) }</h2>
                    { self.render_stats() }
                    { render_error_message(self.error.as_deref()) }
                    if let Some(notice) = &self.notice {
                        <div class="success-message">
                            <i class="fa-solid fa-circle-check"></i>
                            <p>{ notice }</p>
                        </div>
                    }
                    <div class="tabs">
                        { tab_button(AdminTab::Users, "fa-solid fa-users", "Users") }
                        { tab_button(AdminTab::Detections, "fa-solid fa-magnifying-glass", "Detections") }
                    </div>
                    {
                        match self.tab {
                            AdminTab::Users => self.render_users(ctx, &session),
                            AdminTab::Detections => self.render_detections(ctx),
                        }
                    }
                </main>
            </div>
        }
    }
}

impl AdminDashboard {
    fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.rows()?.iter().find(|user| user.id == id)
    }

    fn refresh(&self, ctx: &Context<Self>, refresh: Refresh) {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match client.get::<AdminStats>(&Endpoint::AdminStats).await {
                Ok(stats) => link.send_message(Msg::StatsLoaded(stats)),
                Err(err) if guard::expire_session(&err, Page::AdminDashboard) => return,
                Err(err) => log::error!("Failed to load stats: {}", err),
            }
            if refresh.users() {
                match client.get::<UsersResponse>(&Endpoint::AdminUsers).await {
                    Ok(response) => link.send_message(Msg::UsersLoaded(response.users)),
                    Err(err) if guard::expire_session(&err, Page::AdminDashboard) => return,
                    Err(err) => link.send_message(Msg::UsersFailed(load_failed("users", &err))),
                }
            }
            if refresh.detections() {
                match client.get::<DetectionsResponse>(&Endpoint::AdminDetections).await {
                    Ok(response) => link.send_message(Msg::DetectionsLoaded(response.detections)),
                    Err(err) if guard::expire_session(&err, Page::AdminDashboard) => return,
                    Err(err) => link.send_message(Msg::DetectionsFailed(load_failed("detections", &err))),
                }
            }
        });
    }

    fn mutate(
        &mut self,
        ctx: &Context<Self>,
        method: Method,
        endpoint: Endpoint,
        refresh: Refresh,
        removal: Option<Removal>,
    ) {
        self.pending = true;
        self.notice = None;
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match client.send_empty::<MessageResponse>(method, &endpoint).await {
                Ok(response) => {
                    let message = response.message.unwrap_or_else(|| "Done".to_string());
                    log::info!("Admin action on {} succeeded", client.url(&endpoint));
                    link.send_message(Msg::MutationDone(message, refresh, removal));
                }
                Err(err) if guard::expire_session(&err, Page::AdminDashboard) => {}
                Err(err) => {
                    log::error!("Admin action failed: {}", err);
                    link.send_message(Msg::MutationFailed(err.user_message("Action failed")));
                }
            }
        });
    }

    fn render_stats(&self) -> Html {
        let Some(stats) = &self.stats else {
            return html! {};
        };
        html! {
            <div class="stats-grid">
                { stat_card("fa-solid fa-users", "Total users", stats.total_users.to_string()) }
                { stat_card("fa-solid fa-magnifying-glass", "Total detections", stats.total_detections.to_string()) }
                { stat_card("fa-solid fa-triangle-exclamation", "Fake detections", stats.fake_detections.to_string()) }
                { stat_card("fa-solid fa-circle-check", "Real detections", stats.real_detections.to_string()) }
                { for stats.breakdown().into_iter().map(|(icon, label, value)| stat_card(icon, label, value)) }
            </div>
        }
    }

    fn render_users(&self, ctx: &Context<Self>, session: &SessionInfo) -> Html {
        let users = match &self.users {
            TableState::Loading => return html! { <p class="loading-preview">{"Loading users..."}</p> },
            TableState::Failed(message) => return render_table_error(message),
            TableState::Loaded(users) => users,
        };
        let link = ctx.link();
        let on_search = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetUserSearch(input.value())
        });
        let shown = filter_users(users, &self.user_search);

        html! {
            <div class="tab-content active">
                <div class="filter-bar">
                    <input
                        type="search"
                        class="filter-search"
                        placeholder="Search by name or email..."
                        value={self.user_search.clone()}
                        oninput={on_search}
                    />
                </div>
                if shown.is_empty() {
                    <p class="empty-state">{"No users found."}</p>
                } else {
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>{"ID"}</th>
                                <th>{"Name"}</th>
                                <th>{"Email"}</th>
                                <th>{"Role"}</th>
                                <th>{"Verified"}</th>
                                <th>{"Joined"}</th>
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for shown.into_iter().map(|user| self.render_user_row(ctx, session, user)) }
                        </tbody>
                    </table>
                }
            </div>
        }
    }

    fn render_user_row(&self, ctx: &Context<Self>, session: &SessionInfo, user: &User) -> Html {
        let id = user.id;
        let link = ctx.link();
        let is_self = session.user_id == Some(id);
        let locked = self.pending || is_self;
        let verified = match user.is_verified {
            Some(true) => "✅",
            Some(false) => "❌",
            None => "-",
        };

        html! {
            <tr key={id.to_string()}>
                <td>{ id.to_string() }</td>
                <td>{ &user.name }</td>
                <td>{ &user.email }</td>
                <td>{ render_role_badge(user.role()) }</td>
                <td>{ verified }</td>
                <td>{ format_date(user.created_at.as_deref()) }</td>
                <td class="actions">
                    <button
                        class="action-btn"
                        title={format!("Make {}", user.role().toggled())}
                        disabled={locked}
                        onclick={link.callback(move |_| Msg::ToggleRole(id))}
                    >
                        <i class="fa-solid fa-user-gear"></i>
                    </button>
                    <button
                        class="action-btn danger"
                        title="Delete user"
                        disabled={locked}
                        onclick={link.callback(move |_| Msg::DeleteUser(id))}
                    >
                        <i class="fa-solid fa-trash"></i>
                    </button>
                </td>
            </tr>
        }
    }

    fn render_detections(&self, ctx: &Context<Self>) -> Html {
        let detections = match &self.detections {
            TableState::Loading => return html! { <p class="loading-preview">{"Loading detections..."}</p> },
            TableState::Failed(message) => return render_table_error(message),
            TableState::Loaded(detections) => detections,
        };
        let link = ctx.link();
        let shown = self.filter.apply(detections);

        html! {
            <div class="tab-content active">
                <FilterBar filter={self.filter.clone()} onchange={link.callback(Msg::SetFilter)} />
                if shown.is_empty() && self.filter.is_unfiltered() {
                    <p class="empty-state">{"No detections yet."}</p>
                } else if shown.is_empty() {
                    <p class="empty-state">{"No detections match the current filters."}</p>
                } else {
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>{"ID"}</th>
                                <th>{"User"}</th>
                                <th>{"File"}</th>
                                <th>{"Type"}</th>
                                <th>{"Result"}</th>
                                <th>{"Confidence"}</th>
                                <th>{"Date"}</th>
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for shown.into_iter().map(|detection| {
                                let id = detection.id;
                                html! {
                                    <tr key={id.to_string()}>
                                        <td>{ id.to_string() }</td>
                                        <td title={detection.user_email.clone().unwrap_or_default()}>
                                            { detection.user_name.clone().unwrap_or_else(|| "-".to_string()) }
                                        </td>
                                        <td class="file-name">{ &detection.file_name }</td>
                                        <td>{ render_kind_cell(detection.file_type) }</td>
                                        <td>{ render_verdict_badge(detection.prediction) }</td>
                                        <td>{ render_confidence_cell(detection.confidence, detection.prediction) }</td>
                                        <td>{ format_date(detection.created_at.as_deref()) }</td>
                                        <td class="actions">
                                            <button
                                                class="action-btn danger"
                                                title="Delete detection"
                                                disabled={self.pending}
                                                onclick={link.callback(move |_| Msg::DeleteDetection(id))}
                                            >
                                                <i class="fa-solid fa-trash"></i>
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            </div>
        }
    }
}

fn load_failed(what: &str, err: &ClientError) -> String {
    log::error!("Failed to load {}: {}", what, err);
    err.user_message(&format!("Failed to load {}.", what))
}

fn render_table_error(message: &str) -> Html {
    html! {
        <div class="tab-content active">
            { render_error_message(Some(message)) }
        </div>
    }
}
