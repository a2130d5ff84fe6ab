use shared::filter::DetectionFilter;
use shared::paging::{HISTORY_BATCH_LIMIT, HISTORY_PAGE_SIZE, HistoryPaging, IncrementalReveal, ServerPager};
use shared::format::format_processing_time;
use shared::{Detection, DetectionId, DetectionResponse, Endpoint, HistoryResponse, Page, SessionInfo};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::filter_bar::FilterBar;
use super::header::Header;
use super::utils::{
    format_date, render_checking_session, render_confidence_cell, render_error_message, render_kind_cell,
    render_spinner, render_verdict_badge,
};
use crate::api::ApiClient;
use crate::storage::SessionStore;
use crate::{guard, nav};

pub enum Msg {
    SessionChecked(Option<SessionInfo>),
    Loaded(HistoryResponse),
    LoadFailed(String),
    GoToPage(u32),
    LoadMore,
    SetFilter(DetectionFilter),
    View(DetectionId),
    Open(Detection),
}

#[derive(Properties, PartialEq)]
pub struct HistoryProps {
    pub client: ApiClient,
    pub paging: HistoryPaging,
}

/// The signed-in user's past detections.
pub struct HistoryView {
    session: Option<SessionInfo>,
    items: Vec<Detection>,
    loading: bool,
    error: Option<String>,
    filter: DetectionFilter,
    pager: ServerPager,
    reveal: IncrementalReveal,
}

impl Component for HistoryView {
    type Message = Msg;
    type Properties = HistoryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let session = guard::protect_page(&client, Page::History).await;
            link.send_message(Msg::SessionChecked(session));
        });

        Self {
            session: None,
            items: Vec::new(),
            loading: false,
            error: None,
            filter: DetectionFilter::default(),
            pager: ServerPager::default(),
            reveal: IncrementalReveal::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChecked(session) => {
                if session.is_some() {
                    self.fetch(ctx, 1);
                }
                self.session = session;
                true
            }
            Msg::Loaded(response) => {
                self.loading = false;
                self.error = None;
                self.pager = ServerPager::new(response.current_page, response.pages);
                self.items = response.history;
                self.reveal.reset();
                true
            }
            Msg::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                true
            }
            Msg::GoToPage(page) => {
                self.fetch(ctx, page);
                true
            }
            Msg::LoadMore => {
                let matching = self.filter.apply(&self.items).len();
                self.reveal.load_more(matching);
                true
            }
            Msg::SetFilter(filter) => {
                self.filter = filter;
                self.reveal.reset();
                true
            }
            Msg::View(id) => {
                let Some(row) = self.items.iter().find(|item| item.id == id).cloned() else {
                    return false;
                };
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let detection = match client.get::<DetectionResponse>(&Endpoint::DetectionDetail(id)).await {
                        Ok(response) => response.detection,
                        Err(err) if guard::expire_session(&err, Page::History) => return,
                        Err(err) => {
                            log::warn!("Detail for detection {} unavailable, opening the listed row: {}", id, err);
                            row
                        }
                    };
                    link.send_message(Msg::Open(detection));
                });
                false
            }
            Msg::Open(detection) => {
                match SessionStore::stash_detection(&detection) {
                    Ok(()) => {
                        nav::redirect(Page::Results);
                        false
                    }
                    Err(err) => {
                        self.error = Some(format!("Could not open detection: {}", err));
                        true
                    }
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.session.clone() else {
            return render_checking_session();
        };
        let link = ctx.link();

        html! {
            <div class="container">
                <Header client={ctx.props().client.clone()} session={Some(session)} active={Page::History} />
                <main class="main-content">
                    <h2><i class="fa-solid fa-clock-rotate-left"></i>{" Detection history"}</h2>
                    <FilterBar filter={self.filter.clone()} onchange={link.callback(Msg::SetFilter)} />
                    { render_error_message(self.error.as_deref()) }
                    { self.render_table(ctx) }
                    { self.render_paging(ctx) }
                </main>
            </div>
        }
    }
}

impl HistoryView {
    fn fetch(&mut self, ctx: &Context<Self>, page: u32) {
        self.loading = true;
        let endpoint = match ctx.props().paging {
            HistoryPaging::Server => Endpoint::History {
                page,
                per_page: HISTORY_PAGE_SIZE,
            },
            HistoryPaging::Reveal => Endpoint::HistoryBatch {
                limit: HISTORY_BATCH_LIMIT,
            },
        };
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match client.get::<HistoryResponse>(&endpoint).await {
                Ok(response) => link.send_message(Msg::Loaded(response)),
                Err(err) if guard::expire_session(&err, Page::History) => {}
                Err(err) => {
                    log::error!("Failed to load history: {}", err);
                    link.send_message(Msg::LoadFailed(err.user_message("Failed to load history")));
                }
            }
        });
    }

    fn render_table(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <div class="loading-preview">{ render_spinner("Loading history...") }</div> };
        }

        let matching = self.filter.apply(&self.items);
        let shown: &[&Detection] = match ctx.props().paging {
            HistoryPaging::Server => &matching,
            HistoryPaging::Reveal => self.reveal.visible(&matching),
        };

        if shown.is_empty() {
            let message = if self.filter.is_unfiltered() {
                "No detections yet. Upload a file to get started."
            } else {
                "No detections match the current filters."
            };
            return html! {
                <div class="empty-state">
                    <i class="fa-solid fa-inbox"></i>
                    <p>{ message }</p>
                    <a href={Page::Upload.href()}>{"Upload a file"}</a>
                </div>
            };
        }

        let link = ctx.link();
        html! {
            <table class="history-table">
                <thead>
                    <tr>
                        <th>{"File"}</th>
                        <th>{"Type"}</th>
                        <th>{"Result"}</th>
                        <th>{"Confidence"}</th>
                        <th>{"Time"}</th>
                        <th>{"Date"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for shown.iter().map(|item| {
                        let id = item.id;
                        html! {
                            <tr key={id.to_string()}>
                                <td class="file-name" title={item.file_name.clone()}>{ &item.file_name }</td>
                                <td>{ render_kind_cell(item.file_type) }</td>
                                <td>{ render_verdict_badge(item.prediction) }</td>
                                <td>{ render_confidence_cell(item.confidence, item.prediction) }</td>
                                <td>{ format_processing_time(item.processing_time) }</td>
                                <td>{ format_date(item.created_at.as_deref()) }</td>
                                <td>
                                    <button class="view-btn" onclick={link.callback(move |_| Msg::View(id))}>
                                        <i class="fa-solid fa-eye"></i>{" View"}
                                    </button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        }
    }

    fn render_paging(&self, ctx: &Context<Self>) -> Html {
        if self.loading || self.items.is_empty() {
            return html! {};
        }
        let link = ctx.link();

        match ctx.props().paging {
            HistoryPaging::Server => {
                let previous = self.pager.previous();
                let next = self.pager.next();
                html! {
                    <div class="pagination">
                        <button
                            class="page-btn"
                            disabled={previous.is_none()}
                            onclick={link.batch_callback(move |_| previous.map(Msg::GoToPage))}
                        >
                            <i class="fa-solid fa-chevron-left"></i>{" Previous"}
                        </button>
                        <span class="page-label">{ self.pager.label() }</span>
                        <button
                            class="page-btn"
                            disabled={next.is_none()}
                            onclick={link.batch_callback(move |_| next.map(Msg::GoToPage))}
                        >
                            {"Next "}<i class="fa-solid fa-chevron-right"></i>
                        </button>
                    </div>
                }
            }
            HistoryPaging::Reveal => {
                let matching = self.filter.apply(&self.items).len();
                if self.reveal.is_exhausted(matching) {
                    html! {}
                } else {
                    html! {
                        <div class="pagination">
                            <button class="page-btn" onclick={link.callback(|_| Msg::LoadMore)}>
                                <i class="fa-solid fa-angles-down"></i>{" Load more"}
                            </button>
                        </div>
                    }
                }
            }
        }
    }
}
