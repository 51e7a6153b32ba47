//! Chronological ordering of listed documents.

use super::DocumentDescriptor;

/// Order descriptors newest first.
///
/// The sort is stable: descriptors sharing a timestamp keep the relative
/// order they had in the listing.
pub fn order(mut descriptors: Vec<DocumentDescriptor>) -> Vec<DocumentDescriptor> {
    descriptors.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;

    fn doc(key: &str, secs: u64) -> DocumentDescriptor {
        DocumentDescriptor::new(key, DateTimeUtc::from_unix_secs(secs))
    }

    fn keys(docs: &[DocumentDescriptor]) -> Vec<&str> {
        docs.iter().map(|d| d.key.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let ordered = order(vec![doc("old", 100), doc("new", 300), doc("mid", 200)]);
        assert_eq!(keys(&ordered), ["new", "mid", "old"]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(order(Vec::new()).is_empty());
        assert_eq!(keys(&order(vec![doc("only", 1)])), ["only"]);
    }

    #[test]
    fn test_ties_keep_listing_order() {
        let ordered = order(vec![
            doc("a", 100),
            doc("b", 200),
            doc("c", 100),
            doc("d", 200),
            doc("e", 100),
        ]);
        assert_eq!(keys(&ordered), ["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_all_equal_timestamps_unchanged() {
        let input = vec![doc("x", 5), doc("y", 5), doc("z", 5)];
        assert_eq!(keys(&order(input)), ["x", "y", "z"]);
    }

    /// Non-increasing output and stable ties over many pseudo-random inputs.
    #[test]
    fn test_ordering_laws_hold_for_generated_inputs() {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for round in 0..200 {
            let len = (next() % 24) as usize;
            let input: Vec<_> = (0..len)
                .map(|i| doc(&format!("{round}-{i}"), next() % 6))
                .collect();

            let ordered = order(input.clone());
            assert_eq!(ordered.len(), input.len());

            for pair in ordered.windows(2) {
                assert!(pair[0].last_modified >= pair[1].last_modified);
            }

            let position = |key: &str| input.iter().position(|d| d.key == key).unwrap();
            for pair in ordered.windows(2) {
                if pair[0].last_modified == pair[1].last_modified {
                    assert!(position(&pair[0].key) < position(&pair[1].key));
                }
            }
        }
    }
}
