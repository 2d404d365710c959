pub mod client;
pub mod error;
pub mod normalize;
pub mod pace;
pub mod pipeline;
pub mod snapshot;
pub mod sources;
pub mod types;

pub use client::EventClient;
pub use error::ScraperError;
pub use pace::Pacer;
pub use pipeline::{collect_source, Collected};
pub use snapshot::{dedupe_records, write_snapshot, SnapshotError, SnapshotSummary};
pub use sources::{Emart24Source, EventSource, Gs25Source, PageOutcome};
