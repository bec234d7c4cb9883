// Prompt constants for calls routed through llm_client.

/// System instruction for lyric summarization (the "analyst" persona).
pub const LYRICS_ANALYST_SYSTEM: &str = "You are a rap lyrics analyst. \
    Read the lyrics and summarize the topic of the lyrics in no more than four sentences.";

/// Wraps raw lyrics as the user turn. Replace `{lyrics}` before sending.
pub const LYRICS_USER_TEMPLATE: &str = "\n{lyrics}\n";
