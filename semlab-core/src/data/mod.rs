//! Feed decoding and normalization.

pub mod catalog;
pub mod decode;
pub mod prices;
pub mod source;

pub use catalog::{Catalog, StockRecord};
pub use decode::{decode, CsvRow};
pub use prices::{PricePoint, PriceSeries};
pub use source::{
    DataError, FetchProgress, FileSource, HttpSource, SilentProgress, SnapshotSource,
    StdoutProgress,
};
