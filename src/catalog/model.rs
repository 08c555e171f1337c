/// An immutable, playable item picked from the catalog.
///
/// Two descriptors with the same fields are the same track; the queue keeps
/// duplicates anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub title: String,
    pub artist: String,
    /// Locator the audio output opens to play the preview.
    pub preview_source_ref: String,
    /// Locator for cover art, display only.
    pub artwork_ref: String,
}

impl TrackDescriptor {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        preview_source_ref: impl Into<String>,
        artwork_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            preview_source_ref: preview_source_ref.into(),
            artwork_ref: artwork_ref.into(),
        }
    }

    /// `"Artist - Title"`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }

    pub fn is_playable(&self) -> bool {
        !self.preview_source_ref.trim().is_empty()
    }
}
