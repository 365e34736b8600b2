pub mod hand_param;
pub mod validated_json;

pub use hand_param::HandParam;
pub use validated_json::ValidatedJson;
