/// Catalog of the model images the editor can work on
///
/// Clients refer to images as `church<N>.jpg`; the generation service
/// knows them by internal model ids. The id table is opaque external
/// configuration carried over from the deployed setup.

/// Model image ids for the known church images, positional by catalog index
const KNOWN_IMAGE_IDS: [usize; 16] = [
    104, 425, 457, 489, 495, 570, 584, 644, 700, 705, 719, 726, 816, 1085, 1146, 1362,
];

/// Maps client-facing catalog indices to the service's model image ids.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    ids: Vec<usize>,
}

impl ImageCatalog {
    /// Create a catalog over an explicit id table.
    pub fn new(ids: Vec<usize>) -> Self {
        ImageCatalog { ids }
    }

    /// The model image id at a catalog index, if the index is known.
    pub fn model_id(&self, index: usize) -> Option<usize> {
        self.ids.get(index).copied()
    }

    /// Number of images in the catalog.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for ImageCatalog {
    fn default() -> Self {
        ImageCatalog::new(KNOWN_IMAGE_IDS.to_vec())
    }
}

/// Extract the catalog index from a client image reference like
/// `media/extensions/church13.jpg`.
///
/// Only the last path segment matters; it must be `church<N>.jpg`.
pub fn image_index_from_name(name: &str) -> Option<usize> {
    let file_name = name.rsplit('/').next()?;

    file_name
        .strip_prefix("church")?
        .strip_suffix(".jpg")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookup() {
        let catalog = ImageCatalog::default();

        assert_eq!(catalog.len(), 16);
        assert_eq!(catalog.model_id(0), Some(104));
        assert_eq!(catalog.model_id(13), Some(1085));
        assert_eq!(catalog.model_id(16), None);
    }

    #[test]
    fn test_image_index_from_name() {
        assert_eq!(
            image_index_from_name("media/extensions/ganpaint_images/church13.jpg"),
            Some(13)
        );
        assert_eq!(image_index_from_name("church0.jpg"), Some(0));
    }

    #[test]
    fn test_image_index_rejects_other_names() {
        assert_eq!(image_index_from_name("bedroom3.jpg"), None);
        assert_eq!(image_index_from_name("church13.png"), None);
        assert_eq!(image_index_from_name("churchX.jpg"), None);
        assert_eq!(image_index_from_name(""), None);
    }
}
