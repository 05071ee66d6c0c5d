use matcher::demo::demo_records;
use matcher::{filter_records, FilterCriteria, RawCriteria, Record, SignalType};

fn scenario_records() -> Vec<Record> {
  vec![
    Record::new("1", "DJI Mavic 3")
      .with_frequency(2400)
      .with_range("900-1500")
      .with_signal_type(SignalType::FrequencyHopping),
    Record::new("4", "Shahed-136")
      .with_frequency(900)
      .with_range("2000-3000")
      .with_signal_type(SignalType::FixedFrequency),
  ]
}

fn names(records: &[Record]) -> Vec<&str> {
  records.iter().map(|r| r.name.as_str()).collect()
}

fn criteria(name: &str, frequency: &str, range: &str, signal_type: &str) -> FilterCriteria {
  FilterCriteria::parse(&RawCriteria {
    name: Some(name.to_string()),
    frequency: Some(frequency.to_string()),
    range: Some(range.to_string()),
    signal_type: Some(signal_type.to_string()),
  })
}

#[test]
fn test_signal_type_selects_fixed_frequency_only() {
  let result = filter_records(&scenario_records(), &criteria("", "", "", "ФРЧ"));
  assert_eq!(names(&result), vec!["Shahed-136"]);
}

#[test]
fn test_range_query_overlapping_both_records() {
  let result = filter_records(&scenario_records(), &criteria("", "", "1400-2100", ""));
  assert_eq!(names(&result), vec!["DJI Mavic 3", "Shahed-136"]);
}

#[test]
fn test_all_predicates_must_hold() {
  let result = filter_records(&scenario_records(), &criteria("dji", "900", "", ""));
  assert!(result.is_empty());
}

#[test]
fn test_empty_criteria_return_each_record_unchanged() {
  for record in demo_records() {
    let result = filter_records(std::slice::from_ref(&record), &FilterCriteria::any());
    assert_eq!(result, vec![record]);
  }
}

#[test]
fn test_name_query_partitions_dataset() {
  let records = demo_records();
  for query in ["dji", "DJI", "a", "136", "pro", "zzz"] {
    let result = filter_records(&records, &criteria(query, "", "", ""));
    let needle = query.to_lowercase();

    for record in &records {
      let expected = record.name.to_lowercase().contains(&needle);
      assert_eq!(result.contains(record), expected, "query {query:?} vs {}", record.name);
    }
  }
}

#[test]
fn test_filtering_is_idempotent() {
  let records = demo_records();
  let cases = [
    criteria("", "", "", ""),
    criteria("dji", "", "", ""),
    criteria("", "2400", "", ""),
    criteria("", "", "1000-6000", ""),
    criteria("", "", "", "ППРЧ"),
    criteria("", "nope", "", ""),
    criteria("", "", "bad", ""),
  ];

  for case in &cases {
    let once = filter_records(&records, case);
    let twice = filter_records(&once, case);
    assert_eq!(once, twice);
  }
}

#[test]
fn test_demo_dataset_queries() {
  let records = demo_records();

  let hopping_2400 = filter_records(&records, &criteria("", "2400", "", "ППРЧ"));
  assert_eq!(names(&hopping_2400), vec!["DJI Mavic 3", "DJI Mini 2", "Phantom 4 Pro"]);

  // 1000-1500 touches Mini 2 (500-1000) only at its edge
  let band = filter_records(&records, &criteria("", "", "1000-1500", ""));
  assert_eq!(names(&band), vec!["DJI Mavic 3", "Phantom 4 Pro"]);
}
