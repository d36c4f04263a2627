pub mod marketplace_api_client;

pub use marketplace_api_client::MarketplaceApiClient;
