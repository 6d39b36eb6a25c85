use leptos::prelude::*;
use watchline_core::Event;
use crate::present::{reveal_tokens, star_fills, watched_label, RevealMode, RevealToken, StarFill};
use crate::state::AppState;
use crate::timeline::session;

const STAR_PATH: &str =
    "M12 2l3.09 6.26L22 9.27l-5 4.87L18.18 22 12 18.6 5.82 22 7 14.14l-5-4.87 6.91-1.01L12 2z";
const HALF_STAR_CLIP: &str = "half-star-clip";

/// Full-screen detail view of the activated cover. Any click or Escape closes it.
#[component]
pub fn DetailOverlay() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_open = move || state.detail.with(Option::is_some);

    view! {
        <div
            id="detailOverlay"
            class=move || if is_open() { "detail-overlay open" } else { "detail-overlay" }
            aria-hidden=move || if is_open() { "false" } else { "true" }
            on:click=move |_| session::close_detail(state)
        >
            {move || state.detail.get().map(|event| view! { <DetailContent event=event /> })}
        </div>
    }
}

#[component]
fn DetailContent(event: Event) -> impl IntoView {
    let cover = event.cover_url.clone().map(|url| {
        view! { <img src=url alt=format!("{} cover", event.title) /> }
    });
    let released = event.year.map(|year| {
        view! { <RevealLine kind="detail-meta" text=format!("Released {year}") mode=RevealMode::Char /> }
    });
    let rating = event.rating.filter(|r| *r > 0.0).map(|rating| {
        view! { <div class="ratings"><Stars rating=rating /></div> }
    });
    let synopsis = event.summary.clone().map(|text| {
        view! { <DetailSection heading="Synopsis" text=text /> }
    });
    let review = event.review_text.clone().map(|text| {
        view! { <DetailSection heading="My Review" text=text /> }
    });

    view! {
        <div class="detail-left">
            <div class="detail-cover">{cover}</div>
        </div>
        <div class="detail-right">
            <RevealLine kind="detail-title" text=event.title.clone() mode=RevealMode::Char />
            {released}
            <RevealLine kind="detail-meta" text=watched_label(event.date) mode=RevealMode::Char />
            {rating}
            {synopsis}
            {review}
        </div>
    }
}

#[component]
fn DetailSection(heading: &'static str, text: String) -> impl IntoView {
    view! {
        <div class="detail-section">
            <h4>{heading}</h4>
            <RevealLine kind="detail-body" text=text mode=RevealMode::Word />
        </div>
    }
}

/// Text that fades in token by token.
#[component]
fn RevealLine(kind: &'static str, text: String, mode: RevealMode) -> impl IntoView {
    let reveal = reveal_tokens(&text, mode);
    let tokens = reveal
        .tokens
        .into_iter()
        .map(|token| match token {
            RevealToken::Animated { text, delay } => view! {
                <span class=mode.class() style=format!("animation-delay: {delay}s")>{text}</span>
            }
            .into_any(),
            RevealToken::Plain(text) => text.into_any(),
        })
        .collect_view();
    let tail = reveal.tail.map(|tail| view! { <span>{tail}</span> });

    view! {
        <div class=format!("{kind} text-scan")>
            {tokens}
            {tail}
        </div>
    }
}

#[component]
fn Stars(rating: f64) -> impl IntoView {
    let stars = star_fills(rating)
        .into_iter()
        .map(|fill| match fill {
            StarFill::Full => view! {
                <svg class="star filled" viewBox="0 0 24 24"><path d=STAR_PATH /></svg>
            }
            .into_any(),
            StarFill::Half => view! {
                <svg class="star filled" viewBox="0 0 24 24">
                    <defs>
                        <clipPath id=HALF_STAR_CLIP>
                            <rect x="0" y="0" width="12" height="24" />
                        </clipPath>
                    </defs>
                    <path d=STAR_PATH clip-path=format!("url(#{HALF_STAR_CLIP})") />
                </svg>
            }
            .into_any(),
            StarFill::Empty => view! {
                <svg class="star" viewBox="0 0 24 24"><path d=STAR_PATH /></svg>
            }
            .into_any(),
        })
        .collect_view();

    view! { <div class="stars">{stars}</div> }
}
