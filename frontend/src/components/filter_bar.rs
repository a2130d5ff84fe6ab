use std::str::FromStr;

use shared::filter::{DetectionFilter, KindFilter, VerdictFilter};
use strum::IntoEnumIterator;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filter: DetectionFilter,
    pub onchange: Callback<DetectionFilter>,
}

/// Type, verdict and free-text filter over detections already on screen.
#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_kind = {
        let filter = props.filter.clone();
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(kind) = KindFilter::from_str(&select.value()) {
                onchange.emit(DetectionFilter { kind, ..filter.clone() });
            }
        })
    };

    let on_verdict = {
        let filter = props.filter.clone();
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(verdict) = VerdictFilter::from_str(&select.value()) {
                onchange.emit(DetectionFilter { verdict, ..filter.clone() });
            }
        })
    };

    let on_search = {
        let filter = props.filter.clone();
        let onchange = props.onchange.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            onchange.emit(DetectionFilter {
                search: input.value(),
                ..filter.clone()
            });
        })
    };

    html! {
        <div class="filter-bar">
            <select class="filter-select" onchange={on_kind}>
                { for KindFilter::iter().map(|kind| html! {
                    <option value={kind.as_ref().to_string()} selected={kind == props.filter.kind}>
                        { kind.label() }
                    </option>
                })}
            </select>
            <select class="filter-select" onchange={on_verdict}>
                { for VerdictFilter::iter().map(|verdict| html! {
                    <option value={verdict.as_ref().to_string()} selected={verdict == props.filter.verdict}>
                        { verdict.label() }
                    </option>
                })}
            </select>
            <input
                type="search"
                class="filter-search"
                placeholder="Search by file name..."
                value={props.filter.search.clone()}
                oninput={on_search}
            />
        </div>
    }
}
