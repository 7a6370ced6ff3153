//! Element ids, class names and the injected stylesheet

use chatdock_core::{Role, RowId};

/// Id of the panel root; its presence means a widget already owns the page.
pub const PANEL_ID: &str = "chatdock-panel";
pub const TRIGGER_ID: &str = "chatdock-trigger";
pub const STYLE_ID: &str = "chatdock-style";

pub const HEADER_CLASS: &str = "cd-header";
pub const TITLE_CLASS: &str = "cd-title";
pub const CLOSE_CLASS: &str = "cd-close";
pub const LOG_CLASS: &str = "cd-log";
pub const COMPOSE_CLASS: &str = "cd-compose";
pub const INPUT_CLASS: &str = "cd-input";
pub const SEND_CLASS: &str = "cd-send";
pub const RESIZE_CLASS: &str = "cd-resize";
/// Attribute carrying a transcript row's id, so rows are found again by query
pub const ROW_ATTR: &str = "data-row";

/// Gap kept between the default-anchored panel and the viewport's right edge
pub const ANCHOR_RIGHT: f64 = 16.0;
/// Gap kept between the default-anchored panel and the viewport's bottom edge
/// (clears the trigger button)
pub const ANCHOR_BOTTOM: f64 = 88.0;

pub const STYLE_SHEET: &str = r#"
#chatdock-trigger{position:fixed;right:16px;bottom:16px;width:56px;height:56px;border:0;border-radius:50%;background:#1f6feb;color:#fff;font-size:24px;cursor:pointer;box-shadow:0 4px 14px rgba(0,0,0,.25);z-index:2147483000}
#chatdock-panel{position:fixed;right:16px;bottom:88px;display:none;flex-direction:column;background:#fff;color:#1b1f24;border-radius:12px;box-shadow:0 12px 32px rgba(0,0,0,.28);overflow:hidden;font:14px/1.45 system-ui,sans-serif;z-index:2147483001}
#chatdock-panel .cd-header{display:flex;align-items:center;justify-content:space-between;padding:10px 12px;background:#1f6feb;color:#fff;cursor:move;touch-action:none;user-select:none}
#chatdock-panel .cd-title{font-weight:600}
#chatdock-panel .cd-close{border:0;background:transparent;color:inherit;font-size:18px;cursor:pointer}
#chatdock-panel .cd-log{flex:1;overflow-y:auto;padding:12px;display:flex;flex-direction:column;gap:8px}
#chatdock-panel .cd-row{max-width:85%;padding:8px 10px;border-radius:10px;word-wrap:break-word}
#chatdock-panel .cd-row.you{align-self:flex-end;background:#1f6feb;color:#fff}
#chatdock-panel .cd-row.bot{align-self:flex-start;background:#f0f2f5}
#chatdock-panel .cd-typing{opacity:.7;font-style:italic}
#chatdock-panel .cd-recs{margin:0;padding-left:18px}
#chatdock-panel .cd-oos{color:#b42318}
#chatdock-panel .cd-follow{margin-top:6px}
#chatdock-panel .cd-bullets{margin:6px 0 0;padding-left:18px}
#chatdock-panel .cd-compose{display:flex;gap:8px;padding:8px;border-top:1px solid #e5e7eb}
#chatdock-panel .cd-input{flex:1;resize:none;min-height:38px;max-height:120px;padding:8px;border:1px solid #d0d7de;border-radius:8px;font:inherit}
#chatdock-panel .cd-send{border:0;border-radius:8px;padding:0 14px;background:#1f6feb;color:#fff;cursor:pointer}
#chatdock-panel .cd-send:disabled{opacity:.5;cursor:default}
#chatdock-panel .cd-resize{position:absolute;right:0;bottom:0;width:16px;height:16px;cursor:nwse-resize;touch-action:none}
"#;

/// CSS pixel length.
pub fn px(value: f64) -> String {
    format!("{}px", value.round())
}

/// Class list for a transcript row of `role`.
pub fn row_class(role: Role) -> String {
    format!("cd-row {}", role.as_str())
}

/// Selector for the transcript row tagged with `id`.
pub fn row_selector(id: RowId) -> String {
    format!("[{ROW_ATTR}=\"{}\"]", id.0)
}
