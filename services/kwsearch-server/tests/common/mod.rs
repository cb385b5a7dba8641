// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: not every test binary uses every helper
#[allow(unused_imports)]
pub use fixtures::IndexBuilder;
#[allow(unused_imports)]
pub use helpers::{
    memory_services, result_ids, sqlite_services, unavailable_services, CountingStore,
    TEST_TIMEOUT,
};
