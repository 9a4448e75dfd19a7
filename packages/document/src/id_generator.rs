use crc32fast::Hasher;
use std::time::{SystemTime, UNIX_EPOCH};

/// Derive a short session seed from an arbitrary label using CRC32
pub fn session_seed(label: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(label.as_bytes());
    format!("{:08x}", hasher.finalize())
}

/// Sequential block ID generator for one editing session.
///
/// IDs look like `<seed>-<n>`. The seed keeps IDs from separate sessions
/// apart; the counter keeps them unique within one.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    /// Generator seeded from the wall clock and process id
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Self::from_seed(session_seed(&format!("{}:{}", std::process::id(), nanos)))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate an ID that `is_taken` does not already claim
    pub fn fresh_id(&mut self, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !is_taken(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_seed_is_stable() {
        assert_eq!(session_seed("welcome"), session_seed("welcome"));
        assert_ne!(session_seed("welcome"), session_seed("newsletter"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        assert_eq!(gen.new_id(), "abc-1");
        assert_eq!(gen.new_id(), "abc-2");
        assert_eq!(gen.new_id(), "abc-3");
    }

    #[test]
    fn test_fresh_id_skips_taken() {
        let mut gen = IdGenerator::from_seed("abc");
        let id = gen.fresh_id(|id| id == "abc-1" || id == "abc-2");
        assert_eq!(id, "abc-3");
    }
}
