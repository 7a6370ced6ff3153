//! DOM-backed panel surface and transcript log

use chatdock_core::{
    LogRegion, PanelSurface, Point, Rect, Role, RowId, ScrollMetrics, Size, Viewport, WidgetConfig,
};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlTextAreaElement, Window};

use super::WebError;
use crate::style::{
    ANCHOR_BOTTOM, ANCHOR_RIGHT, CLOSE_CLASS, COMPOSE_CLASS, HEADER_CLASS, INPUT_CLASS, LOG_CLASS,
    PANEL_ID, RESIZE_CLASS, ROW_ATTR, SEND_CLASS, STYLE_ID, STYLE_SHEET, TITLE_CLASS, TRIGGER_ID,
    px, row_class, row_selector,
};

const TRIGGER_LABEL: &str = "💬";
const CLOSE_LABEL: &str = "×";
const SEND_LABEL: &str = "Gửi";

fn create<T: JsCast>(document: &Document, tag: &'static str) -> Result<T, WebError> {
    document
        .create_element(tag)
        .map_err(|_| WebError::CreateElement { tag })?
        .dyn_into::<T>()
        .map_err(|_| WebError::CreateElement { tag })
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

/// The widget's elements, created detached so the log exists before the
/// widget is assembled. [`DomSurface::build_shell`] inserts them.
pub(super) struct DomShell {
    pub trigger: HtmlButtonElement,
    pub panel: HtmlElement,
    pub header: HtmlElement,
    pub title: HtmlElement,
    pub close: HtmlButtonElement,
    pub log: HtmlElement,
    pub input: HtmlTextAreaElement,
    pub send: HtmlButtonElement,
    pub resize: HtmlElement,
}

impl DomShell {
    pub(super) fn create(document: &Document) -> Result<Self, WebError> {
        let trigger: HtmlButtonElement = create(document, "button")?;
        trigger.set_id(TRIGGER_ID);
        trigger.set_type("button");
        trigger.set_text_content(Some(TRIGGER_LABEL));

        let panel: HtmlElement = create(document, "div")?;
        panel.set_id(PANEL_ID);
        let _ = panel.set_attribute("role", "dialog");

        let header: HtmlElement = create(document, "div")?;
        header.set_class_name(HEADER_CLASS);
        let title: HtmlElement = create(document, "span")?;
        title.set_class_name(TITLE_CLASS);
        let close: HtmlButtonElement = create(document, "button")?;
        close.set_class_name(CLOSE_CLASS);
        close.set_type("button");
        close.set_text_content(Some(CLOSE_LABEL));
        let _ = header.append_child(&title);
        let _ = header.append_child(&close);

        let log: HtmlElement = create(document, "div")?;
        log.set_class_name(LOG_CLASS);
        let _ = log.set_attribute("aria-live", "polite");

        let compose: HtmlElement = create(document, "div")?;
        compose.set_class_name(COMPOSE_CLASS);
        let input: HtmlTextAreaElement = create(document, "textarea")?;
        input.set_class_name(INPUT_CLASS);
        input.set_rows(1);
        let send: HtmlButtonElement = create(document, "button")?;
        send.set_class_name(SEND_CLASS);
        send.set_type("button");
        send.set_text_content(Some(SEND_LABEL));
        let _ = compose.append_child(&input);
        let _ = compose.append_child(&send);

        let resize: HtmlElement = create(document, "div")?;
        resize.set_class_name(RESIZE_CLASS);

        let _ = panel.append_child(&header);
        let _ = panel.append_child(&log);
        let _ = panel.append_child(&compose);
        let _ = panel.append_child(&resize);

        Ok(Self {
            trigger,
            panel,
            header,
            title,
            close,
            log,
            input,
            send,
            resize,
        })
    }
}

pub(super) struct DomSurface {
    window: Window,
    document: Document,
    shell: DomShell,
    /// Last explicit placement; `None` while anchored to the corner
    origin: Option<Point>,
    size: Size,
    panel_shown: bool,
}

impl DomSurface {
    pub(super) fn new(window: Window, document: Document, shell: DomShell) -> Self {
        Self {
            window,
            document,
            shell,
            origin: None,
            size: Size::default(),
            panel_shown: false,
        }
    }

    pub(super) fn shell(&self) -> &DomShell {
        &self.shell
    }

    pub(super) fn input_value(&self) -> String {
        self.shell.input.value()
    }

    fn inject_style(&self) {
        if self.document.get_element_by_id(STYLE_ID).is_some() {
            return;
        }
        let Ok(style) = create::<HtmlElement>(&self.document, "style") else {
            warn!("Failed to create widget stylesheet");
            return;
        };
        style.set_id(STYLE_ID);
        style.set_text_content(Some(STYLE_SHEET));
        match self.document.head() {
            Some(head) => {
                let _ = head.append_child(&style);
            }
            None => warn!("Document has no <head>, widget stylesheet not injected"),
        }
    }
}

impl PanelSurface for DomSurface {
    fn build_shell(&mut self, config: &WidgetConfig) {
        self.inject_style();
        self.shell.title.set_text_content(Some(config.title.as_str()));
        self.shell.input.set_placeholder(&config.placeholder);
        let _ = self.shell.trigger.set_attribute("aria-label", &config.title);

        let Some(body) = self.document.body() else {
            warn!("Document has no <body>, chat widget not inserted");
            return;
        };
        let _ = body.append_child(&self.shell.trigger);
        let _ = body.append_child(&self.shell.panel);
    }

    fn set_panel_visible(&mut self, visible: bool) {
        set_style(&self.shell.panel, "display", if visible { "flex" } else { "none" });
        self.panel_shown = visible;
    }

    fn set_trigger_visible(&mut self, visible: bool) {
        set_style(&self.shell.trigger, "display", if visible { "block" } else { "none" });
    }

    fn panel_rect(&self) -> Rect {
        if self.panel_shown {
            let bounds = self.shell.panel.get_bounding_client_rect();
            if bounds.width() > 0.0 {
                return Rect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height());
            }
        }
        // Hidden panels have no layout box; derive it from what was applied
        let origin = self.origin.unwrap_or_else(|| {
            let viewport = self.viewport();
            Point::new(
                viewport.width - self.size.width - ANCHOR_RIGHT,
                viewport.height - self.size.height - ANCHOR_BOTTOM,
            )
        });
        Rect::from_parts(origin, self.size)
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn place_at(&mut self, origin: Point) {
        let panel = &self.shell.panel;
        set_style(panel, "left", &px(origin.x));
        set_style(panel, "top", &px(origin.y));
        set_style(panel, "right", "auto");
        set_style(panel, "bottom", "auto");
        self.origin = Some(origin);
    }

    fn place_default(&mut self) {
        let panel = &self.shell.panel;
        clear_style(panel, "left");
        clear_style(panel, "top");
        set_style(panel, "right", &px(ANCHOR_RIGHT));
        set_style(panel, "bottom", &px(ANCHOR_BOTTOM));
        self.origin = None;
    }

    fn set_size(&mut self, size: Size) {
        set_style(&self.shell.panel, "width", &px(size.width));
        set_style(&self.shell.panel, "height", &px(size.height));
        self.size = size;
    }

    fn set_selection_suppressed(&mut self, suppressed: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        for property in ["user-select", "-webkit-user-select"] {
            if suppressed {
                set_style(&body, property, "none");
            } else {
                clear_style(&body, property);
            }
        }
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.shell.send.set_disabled(!enabled);
    }

    fn clear_input(&mut self) {
        self.shell.input.set_value("");
    }

    fn focus_input(&mut self) {
        let _ = self.shell.input.focus();
    }
}

/// The scrollable transcript element. Rows carry their id as an
/// attribute and are looked up only when removed.
pub(super) struct DomLog {
    document: Document,
    element: HtmlElement,
    next_id: u64,
}

impl DomLog {
    pub(super) fn new(document: Document, element: HtmlElement) -> Self {
        Self {
            document,
            element,
            next_id: 1,
        }
    }
}

impl LogRegion for DomLog {
    fn append_row(&mut self, role: Role, markup: &str) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        match create::<HtmlElement>(&self.document, "div") {
            Ok(row) => {
                row.set_class_name(&row_class(role));
                row.set_inner_html(markup);
                let _ = row.set_attribute(ROW_ATTR, &id.0.to_string());
                let _ = self.element.append_child(&row);
            }
            Err(err) => warn!(error = %err, "Failed to append transcript row"),
        }
        id
    }

    fn remove_row(&mut self, id: RowId) -> bool {
        match self.element.query_selector(&row_selector(id)) {
            Ok(Some(row)) => {
                row.remove();
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(row = id.0, error = %super::storage::js_reason(&err), "Row lookup failed");
                false
            }
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: f64::from(self.element.scroll_top()),
            scroll_height: f64::from(self.element.scroll_height()),
            client_height: f64::from(self.element.client_height()),
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.element.set_scroll_top(self.element.scroll_height());
    }
}
