//! Use cases: the serialized entry points that drive the puzzle session

pub mod record_game;
pub mod record_response;
pub mod request_recommendation;
pub mod start_session;

pub use record_game::{GameRecorder, RecordGameError};
pub use record_response::{RecordResponseError, RecordedResponse, ResponseRecorder};
pub use request_recommendation::{RecommendError, RecommendationCoordinator, Slot};
pub use start_session::{SessionStarter, StartSessionError};
