use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::models::Property;

/// Maximum clipboard size (1MB); a listing summary is a few hundred bytes
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }

    Ok(())
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Text copied for a listing: its summary line, id and virtual tour link
pub fn listing_clipboard_text(property: &Property) -> String {
    let mut text = property.summary();
    text.push_str("\nid: ");
    text.push_str(&property.id);
    if property.has_virtual_tour()
        && let Some(ref url) = property.virtual_tour_url
    {
        text.push_str("\ntour: ");
        text.push_str(url.trim());
    }
    text
}

/// Copy text to the system clipboard
///
/// # Errors
/// Returns error if:
/// - Text is empty or whitespace only
/// - Text is larger than 1MB
/// - The system clipboard is unavailable (headless environment, denied access)
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate first so bad input never touches the system clipboard
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(text, &mut clipboard)
}

/// Copy a listing's clipboard text
pub fn copy_listing(property: &Property) -> Result<()> {
    copy_to_clipboard(&listing_clipboard_text(property))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::{SharingKind, SharingType};

    /// Mock clipboard for testing without system clipboard access
    struct MockClipboard {
        text: Option<String>,
        should_fail: bool,
    }

    impl MockClipboard {
        fn new() -> Self {
            Self { text: None, should_fail: false }
        }

        fn with_failure() -> Self {
            Self { text: None, should_fail: true }
        }
    }

    impl ClipboardProvider for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    fn create_test_property(tour: Option<&str>) -> Property {
        Property {
            id: "pg-42".to_string(),
            title: "Sunrise Residency".to_string(),
            city: Some("Bengaluru".to_string()),
            address: Some("HSR Layout".to_string()),
            property_type: None,
            sharing_types: vec![SharingType { kind: SharingKind::Double, price: 8500, available: 3 }],
            amenities: BTreeSet::new(),
            virtual_tour_url: tour.map(str::to_string),
            average_rating: None,
            created_at: None,
        }
    }

    #[test]
    fn test_listing_text_with_tour() {
        let property = create_test_property(Some(" https://tours.example/pg-42 "));
        assert_eq!(
            listing_clipboard_text(&property),
            "Sunrise Residency - HSR Layout - from 8500/month\nid: pg-42\ntour: https://tours.example/pg-42"
        );
    }

    #[test]
    fn test_listing_text_skips_blank_tour() {
        let property = create_test_property(Some("   "));
        assert!(!listing_clipboard_text(&property).contains("tour:"));
    }

    #[test]
    fn test_copy_with_mock() {
        let mut mock = MockClipboard::new();
        let text = listing_clipboard_text(&create_test_property(None));

        copy_with_provider(&text, &mut mock).unwrap();
        assert_eq!(mock.text.as_deref(), Some(text.as_str()));
    }

    #[test]
    fn test_clipboard_provider_failure() {
        let mut mock = MockClipboard::with_failure();
        let result = copy_with_provider("HSR Layout", &mut mock);
        assert!(result.unwrap_err().to_string().contains("Mock clipboard error"));
    }

    #[test]
    fn test_copy_rejects_empty_and_oversized() {
        let mut mock = MockClipboard::new();
        assert!(copy_with_provider("  \n", &mut mock).unwrap_err().to_string().contains("empty"));

        let large = "a".repeat(MAX_CLIPBOARD_SIZE + 1);
        assert!(copy_with_provider(&large, &mut mock).unwrap_err().to_string().contains("too large"));
        assert!(mock.text.is_none());
    }

    #[test]
    fn test_copy_to_clipboard_validates_before_clipboard_access() {
        let result = copy_to_clipboard("");
        assert!(result.unwrap_err().to_string().contains("empty"));
    }
}
