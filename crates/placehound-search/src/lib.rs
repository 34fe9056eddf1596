pub mod aggregate;
pub mod batch;
pub mod client;
pub mod email;
pub mod error;
pub mod settings;
pub mod types;

pub use aggregate::{PlaceAggregator, SearchReport, SearchStats};
pub use client::PlacesClient;
pub use email::{find_first_email, EmailExtractor};
pub use error::{DetailFetchError, SearchError};
pub use settings::SearchSettings;
