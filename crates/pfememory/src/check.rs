//! Threshold evaluation of card records.

use pfe_types::{MemoryChannel, MicSlot, State};
use tracing::{debug, instrument};

use crate::config::Thresholds;
use crate::error::{PfeMemoryError, PfeMemoryResult};
use crate::types::{CardRecord, CheckResult, Section};

/// Bands in emission order.
const BANDS: [State; 3] = [State::Crit, State::Warn, State::Ok];

fn band_phrase(state: State) -> &'static str {
    match state {
        State::Crit => "very low",
        State::Warn => "low",
        State::Ok | State::Unknown => "normal",
    }
}

/// Reads and converts a reading that must be present.
fn required_reading(
    item: &str,
    record: &CardRecord,
    channel: MemoryChannel,
    slot: MicSlot,
) -> PfeMemoryResult<i64> {
    let field = CardRecord::field_name(channel, slot);
    let raw = record
        .get(channel, slot)
        .ok_or_else(|| PfeMemoryError::missing_field(item, field))?;

    raw.parse::<i64>()
        .map_err(|source| PfeMemoryError::InvalidValue {
            item: item.to_string(),
            field: field.to_string(),
            value: raw.to_string(),
            source,
        })
}

fn mic_details(slot: MicSlot, nh: i64, fw: i64) -> String {
    format!("{slot} NH Free {nh}, {slot} FW Free {fw}")
}

/// Long output for MIC 0. The leading label is followed by two spaces.
fn leading_details(nh: i64, fw: i64) -> String {
    let mic0 = MicSlot::Mic0;
    format!("{mic0}  NH Free {nh}, {mic0} FW Free {fw}")
}

/// Evaluates the NH and FW readings of one MIC.
///
/// Every band a reading falls into produces a result, so a reading at or
/// below the CRIT level yields both a CRIT and a WARN result.
pub fn evaluate_mic(
    slot: MicSlot,
    readings: [(MemoryChannel, i64); 2],
    details: &str,
    thresholds: &Thresholds,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    for band in BANDS {
        for (channel, value) in readings {
            if thresholds.in_band(band, value) {
                results.push(CheckResult::new(
                    band,
                    format!(
                        "{} Free Memory on {} is {} at {}",
                        channel,
                        slot,
                        band_phrase(band),
                        value
                    ),
                    details,
                ));
            }
        }
    }

    results
}

/// Checks a single card record.
///
/// MIC 0 readings are required. MIC 1 is evaluated only when both of its
/// readings are present; its results carry the readings of both MICs.
pub fn check_card(
    item: &str,
    record: &CardRecord,
    thresholds: &Thresholds,
) -> PfeMemoryResult<Vec<CheckResult>> {
    let nh_free1 = required_reading(item, record, MemoryChannel::Nh, MicSlot::Mic0)?;
    let fw_free1 = required_reading(item, record, MemoryChannel::Fw, MicSlot::Mic0)?;

    let mut details = leading_details(nh_free1, fw_free1);
    let mut results = evaluate_mic(
        MicSlot::Mic0,
        [(MemoryChannel::Nh, nh_free1), (MemoryChannel::Fw, fw_free1)],
        &details,
        thresholds,
    );

    if record.has_mic(MicSlot::Mic1) {
        let nh_free2 = required_reading(item, record, MemoryChannel::Nh, MicSlot::Mic1)?;
        let fw_free2 = required_reading(item, record, MemoryChannel::Fw, MicSlot::Mic1)?;

        details.push_str(", ");
        details.push_str(&mic_details(MicSlot::Mic1, nh_free2, fw_free2));

        results.extend(evaluate_mic(
            MicSlot::Mic1,
            [(MemoryChannel::Nh, nh_free2), (MemoryChannel::Fw, fw_free2)],
            &details,
            thresholds,
        ));
    } else if record.is_partial_mic(MicSlot::Mic1) {
        debug!("{}: MIC 1 reported on one channel only, not evaluated", item);
    }

    Ok(results)
}

/// Checks an item of the parsed section.
///
/// Items no longer present in the section produce no results.
#[instrument(skip(section, thresholds))]
pub fn check_pfememory(
    item: &str,
    section: &Section,
    thresholds: &Thresholds,
) -> PfeMemoryResult<Vec<CheckResult>> {
    match section.get(item) {
        Some(record) => check_card(item, record, thresholds),
        None => {
            debug!("Item not found in section");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ITEM: &str = "FPC: MPC4E 3D 32XGE @ 0/*/* Free Memory";

    fn record(values: &[(MemoryChannel, MicSlot, &str)]) -> CardRecord {
        let mut record = CardRecord::new("FPC: MPC4E 3D 32XGE @ 0/*/*");
        for (channel, slot, value) in values {
            record.set(*channel, *slot, *value);
        }
        record
    }

    fn states(results: &[CheckResult]) -> Vec<State> {
        results.iter().map(|r| r.state).collect()
    }

    #[test]
    fn test_critical_reading_also_warns() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "5"),
            (MemoryChannel::Fw, MicSlot::Mic0, "99"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::default()).unwrap();

        assert_eq!(
            results,
            vec![
                CheckResult::new(
                    State::Crit,
                    "NH Free Memory on MIC 0 is very low at 5",
                    "MIC 0  NH Free 5, MIC 0 FW Free 99"
                ),
                CheckResult::new(
                    State::Warn,
                    "NH Free Memory on MIC 0 is low at 5",
                    "MIC 0  NH Free 5, MIC 0 FW Free 99"
                ),
                CheckResult::new(
                    State::Ok,
                    "FW Free Memory on MIC 0 is normal at 99",
                    "MIC 0  NH Free 5, MIC 0 FW Free 99"
                ),
            ]
        );
    }

    #[test]
    fn test_single_mic_all_normal() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "20"),
            (MemoryChannel::Fw, MicSlot::Mic0, "20"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::default()).unwrap();

        assert_eq!(states(&results), vec![State::Ok, State::Ok]);
        assert!(results.iter().all(|r| !r.summary.contains("MIC 1")));
    }

    #[test]
    fn test_two_mics() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "9"),
            (MemoryChannel::Fw, MicSlot::Mic0, "9"),
            (MemoryChannel::Nh, MicSlot::Mic1, "20"),
            (MemoryChannel::Fw, MicSlot::Mic1, "20"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::default()).unwrap();

        assert_eq!(
            states(&results),
            vec![
                State::Crit,
                State::Crit,
                State::Warn,
                State::Warn,
                State::Ok,
                State::Ok
            ]
        );
        assert_eq!(results[0].summary, "NH Free Memory on MIC 0 is very low at 9");
        assert_eq!(results[1].summary, "FW Free Memory on MIC 0 is very low at 9");
        assert_eq!(results[3].summary, "FW Free Memory on MIC 0 is low at 9");
        assert_eq!(results[4].summary, "NH Free Memory on MIC 1 is normal at 20");
        assert_eq!(results[0].details, "MIC 0  NH Free 9, MIC 0 FW Free 9");
        assert_eq!(
            results[5].details,
            "MIC 0  NH Free 9, MIC 0 FW Free 9, MIC 1 NH Free 20, MIC 1 FW Free 20"
        );
    }

    #[test]
    fn test_warn_boundary() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "15"),
            (MemoryChannel::Fw, MicSlot::Mic0, "16"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::default()).unwrap();
        assert_eq!(states(&results), vec![State::Warn, State::Ok]);
    }

    #[test]
    fn test_partial_second_mic_not_evaluated() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "80"),
            (MemoryChannel::Fw, MicSlot::Mic0, "99"),
            (MemoryChannel::Fw, MicSlot::Mic1, "98"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::default()).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_leading_zeros_are_normalized() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "007"),
            (MemoryChannel::Fw, MicSlot::Mic0, "99"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::default()).unwrap();
        assert_eq!(results[0].summary, "NH Free Memory on MIC 0 is very low at 7");
    }

    #[test]
    fn test_missing_mic0_field() {
        let rec = record(&[(MemoryChannel::Fw, MicSlot::Mic0, "99")]);
        let err = check_card(ITEM, &rec, &Thresholds::default()).unwrap_err();
        assert!(matches!(
            err,
            PfeMemoryError::MissingField { ref field, .. } if field == "nh_free1"
        ));
    }

    #[test]
    fn test_non_integer_reading() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "½"),
            (MemoryChannel::Fw, MicSlot::Mic0, "99"),
        ]);
        let err = check_card(ITEM, &rec, &Thresholds::default()).unwrap_err();
        assert!(matches!(err, PfeMemoryError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_item_is_skipped() {
        let section = Section::new();
        let results = check_pfememory("FPC: gone Free Memory", &section, &Thresholds::default())
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let rec = record(&[
            (MemoryChannel::Nh, MicSlot::Mic0, "18"),
            (MemoryChannel::Fw, MicSlot::Mic0, "30"),
        ]);
        let results = check_card(ITEM, &rec, &Thresholds::new(20, 5)).unwrap();
        assert_eq!(states(&results), vec![State::Warn, State::Ok]);
    }
}
