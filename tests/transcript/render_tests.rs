//! Bot payload rendering tests

use chatdock_core::render::{BookLine, Recommendation};
use chatdock_core::{BotPayload, render_payload};
use serde_json::json;

#[test]
fn test_recommendations_render_as_ordered_list() {
    let markup = render_payload(&json!({
        "recommendations": [
            {"title": "Sherlock Holmes", "author": "Arthur Conan Doyle", "reason": "kinh điển", "in_stock": true},
            {"title": "Phía sau nghi can X", "reason": "ngắn gọn", "in_stock": false}
        ],
        "follow_up": "Bạn thích trinh thám Nhật hay Anh?"
    }));

    assert!(markup.starts_with("<ol class=\"cd-recs\">"));
    assert_eq!(markup.matches("<li>").count(), 2);
    assert!(markup.contains("<b>Sherlock Holmes</b> — Arthur Conan Doyle"));
    assert!(markup.contains("<i>kinh điển</i>"));
    assert!(markup.contains("<b>Phía sau nghi can X</b> — N/A"));
    assert_eq!(markup.matches("(hết hàng)").count(), 1);
    assert!(markup.contains("Câu hỏi thêm:"));
    assert!(markup.contains("Bạn thích trinh thám Nhật hay Anh?"));
}

#[test]
fn test_recommendations_take_priority_over_summary() {
    let markup = render_payload(&json!({
        "recommendations": [{"title": "A", "author": "X"}],
        "summary": {"title": "SUMMARY-TITLE", "bullets": ["SUMMARY-BULLET"]},
        "answer": "ANSWER-TEXT"
    }));

    assert!(markup.contains("<b>A</b>"));
    assert!(!markup.contains("SUMMARY"));
    assert!(!markup.contains("ANSWER-TEXT"));
}

#[test]
fn test_summary_takes_priority_over_answer() {
    let payload = BotPayload::from_value(&json!({
        "answer": "Tóm tắt nhanh",
        "summary": {"title": "Nhà giả kim", "author": "Paulo Coelho", "qty": 3, "bullets": ["Ý 1", "Ý 2"]}
    }));
    assert_eq!(payload.kind(), "summary");

    let markup = payload.to_markup();
    assert!(markup.contains("<b>Nhà giả kim</b> — Paulo Coelho"));
    assert!(markup.contains("(còn 3 bản)"));
    assert!(markup.contains("<ul class=\"cd-bullets\"><li>Ý 1</li><li>Ý 2</li></ul>"));
    assert!(!markup.contains("Tóm tắt nhanh"));
}

#[test]
fn test_summary_without_fields_degrades() {
    let markup = render_payload(&json!({"summary": {"bullets": "not a list", "qty": "lots"}}));
    assert_eq!(markup, "<div class=\"cd-summary\"><b>N/A</b> — N/A</div>");
}

#[test]
fn test_sold_out_summary_shows_only_the_stock_marker() {
    let markup = render_payload(&json!({
        "summary": {"title": "T", "author": "A", "qty": 0, "in_stock": false}
    }));
    assert!(!markup.contains("còn 0 bản"));
    assert!(markup.contains("(hết hàng)"));
}

#[test]
fn test_summary_hides_non_positive_quantities() {
    let markup = render_payload(&json!({"summary": {"title": "T", "qty": -1}}));
    assert_eq!(markup, "<div class=\"cd-summary\"><b>T</b> — N/A</div>");
}

#[test]
fn test_answer_with_books() {
    let payload = BotPayload::from_value(&json!({
        "answer": "Sách thuộc thể loại Trinh thám đang có:",
        "books": [
            {"title": "Án mạng trên sông Nile", "author": "Agatha Christie", "qty": 4},
            {"title": "Điều kỳ diệu", "qty": 1}
        ]
    }));
    assert_eq!(
        payload,
        BotPayload::Answer {
            text: "Sách thuộc thể loại Trinh thám đang có:".into(),
            books: vec![
                BookLine {
                    title: Some("Án mạng trên sông Nile".into()),
                    author: Some("Agatha Christie".into()),
                    qty: Some("4".into()),
                },
                BookLine {
                    title: Some("Điều kỳ diệu".into()),
                    author: None,
                    qty: Some("1".into()),
                },
            ],
        }
    );

    assert_eq!(
        payload.to_markup(),
        "Sách thuộc thể loại Trinh thám đang có:\
         <br>• Án mạng trên sông Nile — Agatha Christie (4)\
         <br>• Điều kỳ diệu — N/A (1)"
    );
}

#[test]
fn test_answer_with_empty_books_has_no_book_lines() {
    let markup = render_payload(&json!({"answer": "Kho hiện chưa có sách nào còn hàng.", "books": []}));
    assert_eq!(markup, "Kho hiện chưa có sách nào còn hàng.");
}

#[test]
fn test_answer_keeps_line_breaks() {
    let markup = render_payload(&json!({"answer": "Tóm tắt:\n- ý một\n- ý hai"}));
    assert_eq!(markup, "Tóm tắt:<br>- ý một<br>- ý hai");
}

#[test]
fn test_raw_fallback() {
    let markup = render_payload(&json!({"raw": "model said <nothing>"}));
    assert_eq!(markup, "model said &lt;nothing&gt;");
}

#[test]
fn test_unrecognised_payloads_use_fixed_fallback() {
    let fallback = "Xin lỗi, mình chưa hiểu ý bạn. Bạn nói rõ hơn được không?";
    for value in [json!({}), json!(null), json!({"error": "missing message"}), json!("text"), json!(42)] {
        assert_eq!(render_payload(&value), fallback, "payload {value}");
    }
}

#[test]
fn test_unparsable_body_is_an_empty_object() {
    assert_eq!(BotPayload::parse("<html>oops</html>"), BotPayload::Fallback { raw: None });
    assert_eq!(BotPayload::parse(""), BotPayload::Fallback { raw: None });
}

#[test]
fn test_every_field_is_escaped() {
    let markup = render_payload(&json!({
        "recommendations": [{
            "title": "<img src=x onerror=alert(1)>",
            "author": "\"Q\" & co",
            "reason": "<b>bold</b>"
        }],
        "follow_up": "<script>"
    }));
    assert!(!markup.contains("<img"));
    assert!(!markup.contains("<script>"));
    assert!(!markup.contains("<b>bold</b>"));
    assert!(markup.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(markup.contains("&quot;Q&quot; &amp; co"));
}

#[test]
fn test_empty_recommendations_show_follow_up_only() {
    let markup = render_payload(&json!({"recommendations": [], "follow_up": "Bạn muốn đọc thể loại nào?"}));
    assert!(!markup.contains("<ol"));
    assert!(markup.contains("Bạn muốn đọc thể loại nào?"));
}

#[test]
fn test_empty_recommendations_without_follow_up_fall_back() {
    let markup = render_payload(&json!({"recommendations": []}));
    assert_eq!(markup, "Xin lỗi, mình chưa hiểu ý bạn. Bạn nói rõ hơn được không?");
}

#[test]
fn test_malformed_recommendation_items_degrade() {
    let payload = BotPayload::from_value(&json!({"recommendations": ["Dế Mèn", 7, {"title": null}]}));
    let BotPayload::Recommendations { items, follow_up } = payload else {
        panic!("expected recommendations");
    };
    assert_eq!(follow_up, None);
    assert_eq!(
        items,
        vec![
            Recommendation {
                title: Some("Dế Mèn".into()),
                ..Recommendation::default()
            },
            Recommendation::default(),
            Recommendation::default(),
        ]
    );
}
