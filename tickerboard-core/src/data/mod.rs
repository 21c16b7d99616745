//! Market data gateways

pub mod alpaca;
pub mod csv_import;
pub mod provider;
pub mod synthetic;

pub use alpaca::{AlpacaCredentials, AlpacaGateway, AlpacaSettings};
pub use csv_import::CsvGateway;
pub use provider::{DataSource, GatewayError, MarketDataGateway};
pub use synthetic::SyntheticGateway;
