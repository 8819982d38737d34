//! Shared test utilities for the workspace
//!
//! - `TestDatabase`: in-memory SQLite with migrations applied (feature: "sqlite")
//! - `TestServer`: a router served on an ephemeral local port (feature: "server")
//! - `TestDataBuilder`: deterministic test data generation (always available)
//! - `assertions`: custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_store_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_store_test");
//!
//!     let title = builder.title("groceries");
//! }
//! ```

#[cfg(feature = "server")]
mod server;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "server")]
pub use server::TestServer;
#[cfg(feature = "sqlite")]
pub use sqlite::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Seeding from the test name keeps generated values stable between runs and
/// distinct between tests.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique task title, e.g. "test-task-12345-groceries"
    pub fn title(&self, suffix: &str) -> String {
        format!("test-task-{}-{}", self.seed, suffix)
    }

    /// Unique category name
    pub fn category(&self, suffix: &str) -> String {
        format!("cat-{}-{}", self.seed % 10_000, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `items` is ordered by `key`, descending
    pub fn assert_sorted_desc<T, K: PartialOrd + std::fmt::Debug>(
        items: &[T],
        key: impl Fn(&T) -> K,
        context: &str,
    ) {
        for pair in items.windows(2) {
            let (a, b) = (key(&pair[0]), key(&pair[1]));
            assert!(a >= b, "{}: {:?} sorted before {:?}", context, a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.title("a"), builder2.title("a"));
        assert_eq!(builder1.category("b"), builder2.category("b"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.title("x"), builder2.title("x"));
    }

    #[test]
    fn test_assert_sorted_desc() {
        assertions::assert_sorted_desc(&[3, 2, 2, 1], |n| *n, "numbers");
    }

    #[test]
    #[should_panic(expected = "numbers")]
    fn test_assert_sorted_desc_panics() {
        assertions::assert_sorted_desc(&[1, 2], |n| *n, "numbers");
    }
}
