use serde::Deserialize;

/// Body returned by the name generator.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeedMessage {
    #[serde(default)]
    pub msg: String,
}
