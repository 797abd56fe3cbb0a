//! Builds the batch catalog from a newline-delimited identifier list.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::batch;
use crate::trace::{self, TraceRecord};

/// All trace records known to the session, keyed by trimmed identifier.
#[derive(Debug, Clone, Default)]
pub struct BatchCatalog {
    records: BTreeMap<String, TraceRecord>,
    skipped: usize,
}

impl BatchCatalog {
    pub fn get(&self, batch_id: &str) -> Option<&TraceRecord> {
        self.records.get(batch_id.trim())
    }

    pub fn records(&self) -> &BTreeMap<String, TraceRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lines that looked like identifiers but failed to parse. Malformed lines
    /// are dropped silently; this count is the only diagnostic.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}

/// Parse and synthesize every identifier in `text`.
///
/// A leading byte-order mark is stripped; blank lines and lines starting with
/// a URL scheme are ignored. Unparseable lines are omitted from the result.
pub fn build(text: &str, rng: &mut impl Rng) -> BatchCatalog {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut catalog = BatchCatalog::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("http://") || line.starts_with("https://") {
            continue;
        }
        match batch::parse_batch_id(line) {
            Some(parsed) => {
                let record = trace::synthesize(line, &parsed, rng);
                catalog.records.insert(line.to_string(), record);
            }
            None => catalog.skipped += 1,
        }
    }

    if catalog.skipped > 0 {
        debug!(skipped = catalog.skipped, "dropped unparseable batch identifier lines");
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build_seeded(text: &str) -> BatchCatalog {
        let mut rng = StdRng::seed_from_u64(99);
        build(text, &mut rng)
    }

    #[test]
    fn builds_records_for_valid_lines() {
        let catalog = build_seeded(
            "MKRM-SonaMasoori23-2024-Chattisgarh8\nMKRM-Basmati3-2024-Haryana2\n",
        );
        assert_eq!(catalog.len(), 2);
        let record = catalog.get("MKRM-SonaMasoori23-2024-Chattisgarh8").unwrap();
        assert_eq!(record.batch_id, "MKRM-SonaMasoori23-2024-Chattisgarh8");
        assert_eq!(catalog.skipped_lines(), 0);
    }

    #[test]
    fn omits_malformed_lines_without_panicking() {
        let catalog = build_seeded("NOTVALID\nMKRM-Kolam9-2023-Punjab4\n");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("NOTVALID").is_none());
        assert_eq!(catalog.skipped_lines(), 1);
    }

    #[test]
    fn strips_byte_order_mark() {
        let catalog = build_seeded("\u{feff}MKRM-Kolam9-2023-Punjab4\n");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.skipped_lines(), 0);
    }

    #[test]
    fn skips_blank_and_url_lines_silently() {
        let catalog = build_seeded(
            "\n   \nhttps://example.com/batches.txt\nhttp://mirror.example/b.txt\nMKRM-Kolam9-2023-Punjab4\n",
        );
        assert_eq!(catalog.len(), 1);
        // Blank lines and URLs are not counted as skipped identifiers.
        assert_eq!(catalog.skipped_lines(), 0);
    }

    #[test]
    fn lookup_trims_the_query() {
        let catalog = build_seeded("MKRM-Kolam9-2023-Punjab4\n");
        assert!(catalog.get("  MKRM-Kolam9-2023-Punjab4 ").is_some());
    }

    #[test]
    fn empty_input_yields_empty_catalog() {
        let catalog = build_seeded("");
        assert!(catalog.is_empty());
    }
}
