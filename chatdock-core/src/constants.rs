//! Widget constants
//!
//! Single source of truth for geometry limits and the fixed texts shown in
//! the transcript.

/// Default POST target for chat messages
pub const DEFAULT_ENDPOINT: &str = "/api/bookbot";

/// Default key of the persisted panel record
pub const DEFAULT_STORAGE_KEY: &str = "bookbot_widget_ui_v1";

pub const DEFAULT_TITLE: &str = "Trợ lý sách";
pub const DEFAULT_PLACEHOLDER: &str = "Nhập câu hỏi…";

pub const DEFAULT_WIDTH: f64 = 360.0;
pub const DEFAULT_HEIGHT: f64 = 520.0;

/// Hard resize floors
pub const MIN_WIDTH: f64 = 300.0;
pub const MIN_HEIGHT: f64 = 380.0;

/// Gap kept between the panel and every viewport edge after clamping
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Max distance from the log bottom that still counts as "at the bottom"
pub const STICK_THRESHOLD: f64 = 4.0;

pub const TYPING_TEXT: &str = "Đang soạn câu trả lời…";
pub const SERVER_ERROR_TEXT: &str = "Máy chủ đang gặp lỗi, bạn thử lại sau nhé.";
pub const NETWORK_ERROR_TEXT: &str = "Lỗi mạng/API, bạn thử lại sau nhé.";
pub const FALLBACK_TEXT: &str = "Xin lỗi, mình chưa hiểu ý bạn. Bạn nói rõ hơn được không?";

pub const FOLLOW_UP_LABEL: &str = "Câu hỏi thêm:";
pub const OUT_OF_STOCK_MARKER: &str = "(hết hàng)";
pub const NOT_AVAILABLE: &str = "N/A";
