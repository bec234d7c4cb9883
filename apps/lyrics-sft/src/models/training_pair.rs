use serde::{Deserialize, Serialize};

/// One supervised fine-tuning example. Serialized as `{"prompt": .., "completion": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub prompt: String,
    pub completion: String,
}
