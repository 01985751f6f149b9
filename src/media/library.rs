// Ordered collection of media captured during one exam
use anyhow::{bail, Result};
use serde::Serialize;

use super::types::MediaItem;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MediaLibrary {
    items: Vec<MediaItem>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append in capture order. Ids must be unique within the library.
    pub fn append(&mut self, item: MediaItem) -> Result<()> {
        if self.contains(&item.id) {
            bail!("Media item {} already exists", item.id);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<MediaItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn images(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|item| item.is_image())
    }

    pub fn videos(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|item| item.is_video())
    }

    pub fn first_video(&self) -> Option<&MediaItem> {
        self.videos().next()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn image() -> MediaItem {
        MediaItem::image("data:image/jpeg;base64,AA==".to_string(), None)
    }

    fn video() -> MediaItem {
        MediaItem::video("clip.webm".to_string(), Bytes::from_static(b"x"), None)
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut library = MediaLibrary::new();
        let first = image();
        let second = video();
        let third = image();
        let ids = [first.id.clone(), second.id.clone(), third.id.clone()];

        library.append(first).unwrap();
        library.append(second).unwrap();
        library.append(third).unwrap();

        let stored: Vec<&str> = library.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(stored, ids.iter().map(|s| s.as_str()).collect::<Vec<_>>());
        assert_eq!(library.images().count(), 2);
        assert_eq!(library.videos().count(), 1);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut library = MediaLibrary::new();
        let item = image();
        library.append(item.clone()).unwrap();

        assert!(library.append(item).is_err());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_remove_only_that_id() {
        let mut library = MediaLibrary::new();
        let keep = image();
        let drop = image();
        let drop_id = drop.id.clone();
        library.append(keep.clone()).unwrap();
        library.append(drop).unwrap();

        let removed = library.remove(&drop_id).unwrap();
        assert_eq!(removed.id, drop_id);
        assert_eq!(library.len(), 1);
        assert!(library.contains(&keep.id));

        assert!(library.remove("missing").is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_first_video() {
        let mut library = MediaLibrary::new();
        assert!(library.first_video().is_none());
        assert!(library.is_empty());

        library.append(image()).unwrap();
        let clip = video();
        let clip_id = clip.id.clone();
        library.append(clip).unwrap();
        library.append(video()).unwrap();

        assert_eq!(library.first_video().map(|v| v.id.as_str()), Some(clip_id.as_str()));
    }
}
