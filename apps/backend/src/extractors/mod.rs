pub mod caller_id;
pub mod session_key;
pub mod validated_json;

pub use caller_id::CallerId;
pub use session_key::{RoundIndex, SessionKey};
pub use validated_json::ValidatedJson;
