//! Capability traits at the subsystem seams.
//!
//! Providers are injected explicitly into the engines that need them —
//! there are no global handles, and every trait can be replaced with a
//! fake in tests.

mod completion;
mod embedding;
mod retriever;
mod session_store;
mod storage;

pub use completion::{Completion, ICompletionProvider};
pub use embedding::IEmbeddingProvider;
pub use retriever::IRetriever;
pub use session_store::ISessionStore;
pub use storage::IRuleStorage;
