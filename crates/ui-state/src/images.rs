//! Ordered image attachments for the classified-creation flow.
//!
//! Position 0 is the main image. Each entry carries its preview and its
//! underlying source together, so reordering can never separate a preview from
//! the file it shows. Index arguments come from rendered list positions; an
//! out-of-range index is ignored rather than reported.

use uuid::Uuid;

/// Where the bytes behind an image come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource<F> {
    /// A locally selected file that has not been uploaded yet.
    Pending(F),
    /// An image the server already stores.
    Remote(String),
}

/// One attachment slot.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageEntry<F> {
    /// Stable key for list rendering and drag/drop.
    pub key: Uuid,
    /// Preview URL shown to the user.
    pub preview: String,
    pub source: ImageSource<F>,
    /// Set until preparation of a pending file has completed.
    pub loading: bool,
}

/// Shift direction for [`ImageList::shift`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0.
    Backward,
    /// Towards the end of the list.
    Forward,
}

/// Ordered list of image attachments.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageList<F> {
    entries: Vec<ImageEntry<F>>,
}

impl<F> Default for ImageList<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> ImageList<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from images the server already stores, e.g. when editing.
    pub fn from_remote<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for url in urls {
            list.push_remote(url);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry<F>] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry<F>> {
        self.entries.get(index)
    }

    /// The main image, if any.
    pub fn main(&self) -> Option<&ImageEntry<F>> {
        self.entries.first()
    }

    /// Appends a freshly selected file. It stays `loading` until
    /// [`mark_ready`](Self::mark_ready) is called for its index.
    pub fn push_pending(&mut self, preview: impl Into<String>, file: F) -> usize {
        self.entries.push(ImageEntry {
            key: Uuid::new_v4(),
            preview: preview.into(),
            source: ImageSource::Pending(file),
            loading: true,
        });
        self.entries.len() - 1
    }

    /// Appends an already uploaded image.
    pub fn push_remote(&mut self, url: impl Into<String>) -> usize {
        let url = url.into();
        self.entries.push(ImageEntry {
            key: Uuid::new_v4(),
            preview: url.clone(),
            source: ImageSource::Remote(url),
            loading: false,
        });
        self.entries.len() - 1
    }

    /// Clears the loading flag of the entry at `index`.
    pub fn mark_ready(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.loading = false;
        }
    }

    /// Indicator whether any entry is still being prepared.
    pub fn is_loading(&self) -> bool {
        self.entries.iter().any(|entry| entry.loading)
    }

    /// Swaps the entry at `index` with its neighbour in `direction`.
    pub fn shift(&mut self, index: usize, direction: Direction) {
        let target = match direction {
            Direction::Backward => index.checked_sub(1),
            Direction::Forward => index.checked_add(1),
        };
        match target {
            Some(target) if index < self.entries.len() && target < self.entries.len() => {
                self.entries.swap(index, target);
            }
            _ => {}
        }
    }

    /// Moves the entry at `from` so it ends up at `to`, shifting the entries in
    /// between. This is what a drag-and-drop reorder produces.
    pub fn move_to(&mut self, from: usize, to: usize) {
        if from >= self.entries.len() || to >= self.entries.len() || from == to {
            return;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
    }

    /// Removes and returns the entry at `index`.
    pub fn delete(&mut self, index: usize) -> Option<ImageEntry<F>> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Makes the entry at `index` the main image. Everything else keeps its
    /// relative order.
    pub fn promote(&mut self, index: usize) {
        self.move_to(index, 0);
    }

    /// Preview URLs in display order.
    pub fn previews(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.preview.as_str()).collect()
    }

    /// Sources in display order. Always the same length as
    /// [`previews`](Self::previews).
    pub fn sources(&self) -> Vec<&ImageSource<F>> {
        self.entries.iter().map(|entry| &entry.source).collect()
    }

    /// Files that still need uploading, in display order.
    pub fn pending_files(&self) -> Vec<&F> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.source {
                ImageSource::Pending(file) => Some(file),
                ImageSource::Remote(_) => None,
            })
            .collect()
    }

    /// URLs of already uploaded images, in display order.
    pub fn remote_urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.source {
                ImageSource::Remote(url) => Some(url.as_str()),
                ImageSource::Pending(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
