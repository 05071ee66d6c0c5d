//! Matcher - Record Filtering for the Signal Catalog
//!
//! Decides which catalog records satisfy a set of search criteria. Everything
//! in this crate is pure and synchronous: callers fetch a snapshot of records
//! from wherever they live, build a [`FilterCriteria`] from user input, and get
//! back the ordered subsequence that matches.
//!
//! A record matches when every criterion holds:
//!
//! - name: case-insensitive substring
//! - frequency: exact equality
//! - range: strictly positive overlap between the query band and the record band
//! - signal type: exact equality
//!
//! Unset criteria match everything. Criteria that could not be parsed match
//! nothing.

pub mod criteria;
pub mod demo;
pub mod error;
pub mod filter;
pub mod profile;
pub mod range;
pub mod record;

pub use criteria::{Constraint, FilterCriteria, RawCriteria};
pub use error::MatchError;
pub use filter::{filter_records, filter_refs, matches};
pub use profile::{Channel, FlightProfile, Quantity};
pub use range::{parse_range, Range};
pub use record::{Record, SignalType};
