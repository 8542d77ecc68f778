pub mod app_state;
pub mod diff_state;
pub mod memo;

pub use app_state::AppState;
pub use diff_state::{DiffSession, LoadState, SessionSettings, Side};
pub use memo::Memo;
