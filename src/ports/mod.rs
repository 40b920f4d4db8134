/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod notifier;
pub mod storage;
pub mod summarizer;

#[cfg(test)]
pub mod mocks;

pub use notifier::NotifierPort;
pub use storage::StoragePort;
pub use summarizer::SummarizerPort;
