//! Renders tokenized message markup as inline elements.

use leptos::prelude::*;
use messaging::markup::{Span, SpanKind};

#[component]
pub fn MarkupView(spans: Vec<Span>) -> impl IntoView {
    spans.into_iter().map(render_span).collect::<Vec<_>>()
}

fn render_span(span: Span) -> AnyView {
    let Span { kind, text } = span;
    match kind {
        SpanKind::Text => text.into_any(),
        SpanKind::Code => view! { <code class="markup__code">{text}</code> }.into_any(),
        SpanKind::Bold => view! { <strong>{text}</strong> }.into_any(),
        SpanKind::Underline => view! { <u>{text}</u> }.into_any(),
        SpanKind::Italic => view! { <em>{text}</em> }.into_any(),
        SpanKind::Link => {
            // The tokenizer only emits http(s) URLs here.
            let href = text.clone();
            view! {
                <a class="markup__link" href=href target="_blank" rel="noopener noreferrer">
                    {text}
                </a>
            }
            .into_any()
        }
    }
}
