//! Record selection.

use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::record::Record;

/// True when `record` satisfies every criterion.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
  name_matches(record, criteria)
    && frequency_matches(record, criteria)
    && range_matches(record, criteria)
    && signal_type_matches(record, criteria)
}

/// Matching records, borrowed, in input order.
pub fn filter_refs<'a>(
  records: &'a [Record],
  criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a Record> + 'a {
  records.iter().filter(move |record| matches(record, criteria))
}

/// The ordered subsequence of `records` that matches `criteria`.
pub fn filter_records(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
  let selected: Vec<Record> = filter_refs(records, criteria).cloned().collect();
  debug!(candidates = records.len(), selected = selected.len(), "filtered records");
  selected
}

fn name_matches(record: &Record, criteria: &FilterCriteria) -> bool {
  criteria.name.admits(|query| record.name.to_lowercase().contains(query.as_str()))
}

fn frequency_matches(record: &Record, criteria: &FilterCriteria) -> bool {
  criteria.frequency.admits(|query| record.frequency == Some(*query))
}

// A record without a usable band can never satisfy a range query.
fn range_matches(record: &Record, criteria: &FilterCriteria) -> bool {
  criteria.range.admits(|query| match record.band() {
    Ok(Some(band)) => band.overlaps(query),
    Ok(None) | Err(_) => false,
  })
}

fn signal_type_matches(record: &Record, criteria: &FilterCriteria) -> bool {
  criteria.signal_type.admits(|query| record.signal_type == Some(*query))
}
