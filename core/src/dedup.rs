use std::collections::BTreeSet;

use crate::document::DocumentId;
use crate::server::SearchServer;

/// Removes every document whose set of distinct words equals that of an
/// earlier document (in insertion order). Term frequencies are ignored.
/// Returns the removed ids.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut seen: BTreeSet<Vec<&str>> = BTreeSet::new();
    let duplicates: Vec<DocumentId> = server
        .document_ids()
        .filter(|&id| {
            let words = server.word_frequencies(id).keys().map(|word| word.as_str()).collect();
            !seen.insert(words)
        })
        .collect();
    drop(seen);
    for &id in &duplicates {
        tracing::info!(id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStatus;

    #[test]
    fn keeps_first_of_each_vocabulary() {
        let mut server = SearchServer::new("and with").unwrap();
        let docs = [
            (1, "funny pet and nasty rat"),
            (2, "funny pet with curly hair"),
            (3, "funny pet with curly hair"),
            (4, "funny pet and curly hair"),
            (5, "funny funny pet and nasty nasty rat"),
            (6, "funny pet and not very nasty rat"),
            (7, "very nasty rat and not very funny pet"),
            (8, "pet with rat and rat and rat"),
            (9, "nasty rat with curly hair"),
        ];
        for (id, text) in docs {
            server.add_document(id, text, DocumentStatus::Active, &[1, 2]).unwrap();
        }
        assert_eq!(server.document_count(), 9);
        let removed = remove_duplicates(&mut server);
        assert_eq!(removed, vec![3, 4, 5, 7]);
        assert_eq!(server.document_count(), 5);
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
    }
}
