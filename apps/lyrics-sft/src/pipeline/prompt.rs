use crate::models::song::SongRecord;

/// Rendered in place of absent metadata.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Builds the style-conditioned generation prompt for one song.
pub fn build_prompt(record: &SongRecord, summary: &str) -> String {
    let year = record
        .song_year
        .as_ref()
        .map_or_else(|| UNKNOWN_FIELD.to_string(), ToString::to_string);
    let rapper = record.rapper_name.as_deref().unwrap_or(UNKNOWN_FIELD);

    format!("Write a rap song in year {year}'s {rapper} style. The topic is about: {summary}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::song::SongYear;

    fn record(rapper: Option<&str>, year: Option<SongYear>) -> SongRecord {
        SongRecord {
            rapper_name: rapper.map(str::to_string),
            song_title: Some("Title".to_string()),
            song_year: year,
            song_lyrics: "lyrics".to_string(),
        }
    }

    #[test]
    fn test_prompt_template() {
        let r = record(Some("Nas"), Some(SongYear::Number(1994)));
        assert_eq!(
            build_prompt(&r, "Life in Queensbridge."),
            "Write a rap song in year 1994's Nas style. The topic is about: Life in Queensbridge."
        );
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let r = record(Some("MF DOOM"), Some(SongYear::Text("2004".to_string())));
        assert_eq!(build_prompt(&r, "Villainy."), build_prompt(&r, "Villainy."));
    }

    #[test]
    fn test_absent_metadata_renders_placeholder() {
        let r = record(None, None);
        assert_eq!(
            build_prompt(&r, ""),
            "Write a rap song in year unknown's unknown style. The topic is about: "
        );
    }
}
