/// Prefixes the lyrics with the song title, separated by one blank line.
///
/// Both inputs are trimmed at the outer edges only. An empty title yields the
/// trimmed lyrics alone.
pub fn add_title_to_lyrics(title: &str, lyrics: &str) -> String {
    let title = title.trim();
    let lyrics = lyrics.trim();
    if title.is_empty() {
        return lyrics.to_string();
    }
    format!("{title}\n\n{lyrics}")
}
