//! `vindec` - Heavy-truck VIN decoding
//!
//! Decodes 17-character Vehicle Identification Numbers into manufacturer,
//! model, model year, country of manufacture and an engine family estimate,
//! and fills empty truck-record fields from the result.
//!
//! ```
//! let decoded = vindec::decode("1XKDP4TX0KJ123456");
//! assert_eq!(
//!     vindec::describe(&decoded),
//!     "Manufacturer: KENWORTH, Model: T680, Year: 2019, Country: United States"
//! );
//! assert!(!vindec::decode("1XKDP4TX0KJ12345O").is_valid);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod truck;
pub mod vin;

pub use config::Config;
pub use error::{Error, InvalidVinReason, Result};
pub use logging::init_logging;
pub use truck::{Fleet, Truck};
pub use vin::{
    check_digit, decode, describe, is_valid_format, normalize, CheckDigitStatus, Country,
    DecodedVin, Manufacturer, Vin,
};
