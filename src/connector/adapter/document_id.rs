use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated document IDs, the same as the store's own auto IDs.
pub const DOCUMENT_ID_LENGTH: usize = 20;

/// Generate a random alphanumeric document ID.
pub fn new_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LENGTH)
        .map(char::from)
        .collect()
}
