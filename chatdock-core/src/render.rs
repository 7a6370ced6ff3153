//! Bot reply shapes and their markup
//!
//! A reply is classified into exactly one [`BotPayload`] shape, checked in a
//! fixed order: recommendations, summary, answer, then fallback. Later shapes
//! present on the same object are ignored. Every interpolated field is
//! escaped; missing or malformed fields degrade to "N/A" or are left out.

use serde_json::{Map, Value};

use crate::constants::{FALLBACK_TEXT, FOLLOW_UP_LABEL, NOT_AVAILABLE, OUT_OF_STOCK_MARKER};
use crate::markup::{escape, text_to_markup};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    pub title: Option<String>,
    pub author: Option<String>,
    pub reason: Option<String>,
    pub in_stock: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookSummary {
    pub title: Option<String>,
    pub author: Option<String>,
    pub qty: Option<String>,
    pub bullets: Vec<String>,
    pub in_stock: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookLine {
    pub title: Option<String>,
    pub author: Option<String>,
    pub qty: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BotPayload {
    Recommendations {
        items: Vec<Recommendation>,
        follow_up: Option<String>,
    },
    Summary(BookSummary),
    Answer {
        text: String,
        books: Vec<BookLine>,
    },
    Fallback {
        raw: Option<String>,
    },
}

impl BotPayload {
    /// Classify a decoded reply body. Non-objects fall through to the fallback.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Fallback { raw: None };
        };

        if let Some(items) = object.get("recommendations").and_then(Value::as_array) {
            return Self::Recommendations {
                items: items.iter().map(Recommendation::from_value).collect(),
                follow_up: text(object.get("follow_up")),
            };
        }

        if let Some(summary) = object.get("summary").and_then(Value::as_object) {
            return Self::Summary(BookSummary::from_map(summary));
        }

        if let Some(answer) = object
            .get("answer")
            .and_then(Value::as_str)
            .filter(|a| !a.trim().is_empty())
        {
            return Self::Answer {
                text: answer.to_string(),
                books: list(object.get("books"))
                    .iter()
                    .map(BookLine::from_value)
                    .collect(),
            };
        }

        Self::Fallback {
            raw: text(object.get("raw")),
        }
    }

    /// Classify a raw response body; unparsable text counts as an empty object.
    pub fn parse(body: &str) -> Self {
        let value = serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Map::new()));
        Self::from_value(&value)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recommendations { .. } => "recommendations",
            Self::Summary(_) => "summary",
            Self::Answer { .. } => "answer",
            Self::Fallback { .. } => "fallback",
        }
    }

    pub fn to_markup(&self) -> String {
        match self {
            Self::Recommendations { items, follow_up } => {
                render_recommendations(items, follow_up.as_deref())
            }
            Self::Summary(summary) => render_summary(summary),
            Self::Answer { text, books } => render_answer(text, books),
            Self::Fallback { raw: Some(raw) } => text_to_markup(raw),
            Self::Fallback { raw: None } => escape(FALLBACK_TEXT),
        }
    }
}

/// Markup for any decoded reply body.
pub fn render_payload(value: &Value) -> String {
    BotPayload::from_value(value).to_markup()
}

impl Recommendation {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                title: text(map.get("title")),
                author: text(map.get("author")),
                reason: text(map.get("reason")),
                in_stock: map.get("in_stock").and_then(Value::as_bool),
            },
            // A bare string item is taken as the title
            Value::String(_) => Self {
                title: text(Some(value)),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

impl BookSummary {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            title: text(map.get("title")),
            author: text(map.get("author")),
            qty: number(map.get("qty")),
            bullets: list(map.get("bullets"))
                .iter()
                .filter_map(|b| text(Some(b)))
                .collect(),
            in_stock: map.get("in_stock").and_then(Value::as_bool),
        }
    }
}

impl BookLine {
    fn from_value(value: &Value) -> Self {
        Self {
            title: text(value.get("title")),
            author: text(value.get("author")),
            qty: number(value.get("qty")),
        }
    }
}

fn render_recommendations(items: &[Recommendation], follow_up: Option<&str>) -> String {
    let mut out = String::new();

    if !items.is_empty() {
        out.push_str("<ol class=\"cd-recs\">");
        for item in items {
            out.push_str(&format!(
                "<li><b>{}</b> — {}",
                or_na(item.title.as_deref()),
                or_na(item.author.as_deref())
            ));
            if let Some(reason) = &item.reason {
                out.push_str(&format!("<br><i>{}</i>", escape(reason)));
            }
            if item.in_stock == Some(false) {
                out.push_str(&out_of_stock());
            }
            out.push_str("</li>");
        }
        out.push_str("</ol>");
    }

    if let Some(follow_up) = follow_up {
        out.push_str(&format!(
            "<div class=\"cd-follow\"><b>{}</b> {}</div>",
            escape(FOLLOW_UP_LABEL),
            text_to_markup(follow_up)
        ));
    }

    if out.is_empty() {
        return escape(FALLBACK_TEXT);
    }
    out
}

fn render_summary(summary: &BookSummary) -> String {
    let mut out = format!(
        "<div class=\"cd-summary\"><b>{}</b> — {}",
        or_na(summary.title.as_deref()),
        or_na(summary.author.as_deref())
    );
    if let Some(qty) = summary.qty.as_deref().filter(|qty| has_copies(qty)) {
        out.push_str(&format!(
            " <span class=\"cd-qty\">(còn {} bản)</span>",
            escape(qty)
        ));
    }
    if summary.in_stock == Some(false) {
        out.push_str(&out_of_stock());
    }
    out.push_str("</div>");

    if !summary.bullets.is_empty() {
        out.push_str("<ul class=\"cd-bullets\">");
        for bullet in &summary.bullets {
            out.push_str(&format!("<li>{}</li>", escape(bullet)));
        }
        out.push_str("</ul>");
    }
    out
}

fn render_answer(text: &str, books: &[BookLine]) -> String {
    let mut out = text_to_markup(text);
    for book in books {
        out.push_str(&format!(
            "<br>• {} — {} ({})",
            or_na(book.title.as_deref()),
            or_na(book.author.as_deref()),
            or_na(book.qty.as_deref())
        ));
    }
    out
}

fn out_of_stock() -> String {
    format!(" <span class=\"cd-oos\">{}</span>", escape(OUT_OF_STOCK_MARKER))
}

/// A zero or negative count means sold out, which the stock marker covers.
fn has_copies(qty: &str) -> bool {
    qty.trim().parse::<f64>().map_or(true, |n| n > 0.0)
}

fn or_na(value: Option<&str>) -> String {
    escape(value.unwrap_or(NOT_AVAILABLE))
}

/// Non-empty scalar as display text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric field as display text; numeric strings are accepted too.
fn number(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.trim().parse::<f64>().is_ok() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
