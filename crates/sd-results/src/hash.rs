//! Content fingerprint used to tell result deliveries apart.

use crate::store::ResultsStore;
use sha2::{Digest, Sha256};

pub fn fingerprint(store: &ResultsStore) -> String {
    let mut hasher = Sha256::new();

    let store_json = serde_json::to_string(store).unwrap_or_default();
    hasher.update(store_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_stability() {
        let store = ResultsStore::from_json_str(r#"{"Experiment 0": {"FCFS": {"Makespan speedup": 1.4}}}"#)
            .unwrap();
        assert_eq!(fingerprint(&store), fingerprint(&store.clone()));
        assert_eq!(fingerprint(&store).len(), 64);
    }

    #[test]
    fn fingerprint_differs_for_different_results() {
        let a = ResultsStore::from_json_str(r#"{"Experiment 0": {"FCFS": {"Makespan speedup": 1.4}}}"#)
            .unwrap();
        let b = ResultsStore::from_json_str(r#"{"Experiment 0": {"FCFS": {"Makespan speedup": 1.5}}}"#)
            .unwrap();
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}
