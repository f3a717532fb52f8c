//! Power readings derived from a snapshot data row.

use crate::domain::errors::ExtractionError;
use csv::ByteRecord;

/// Entities whose raw reading is reported by the device in tens of watts.
pub const SCALED_ENTITIES: &[(&str, i64)] = &[("main", 10), ("ecocute", 10)];

/// One gauge sample for a single scrape. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSample {
    pub entity: String,
    pub friendly_name: String,
    pub watts: f64,
}

/// Multiplier applied to an entity's raw reading.
pub fn scale_factor(entity: &str) -> i64 {
    SCALED_ENTITIES
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, factor)| *factor)
        .unwrap_or(1)
}

/// Display label for an entity: `kitchen_appliances` becomes `KitchenAppliances`.
///
/// Underscores split words; the first letter of every word is upper-cased and
/// the rest of the word is left as is.
pub fn friendly_name(entity: &str) -> String {
    let spaced = entity.replace('_', " ");
    let mut name = String::with_capacity(spaced.len());
    let mut at_word_start = true;

    for c in spaced.chars() {
        if at_word_start {
            name.extend(c.to_uppercase());
        } else {
            name.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }

    name.replace(' ', "")
}

/// Parse a device field as a signed base-16 integer (`1f4`, `-A`, `+0`).
pub fn parse_hex_reading(field: &str) -> Result<i64, std::num::ParseIntError> {
    i64::from_str_radix(field, 16)
}

/// Build the sample for one mapping entry from the snapshot data row.
///
/// A field that is not valid UTF-8 can never be hex, so it fails the same way.
pub fn extract_sample(
    entity: &str,
    column: usize,
    row: &ByteRecord,
) -> Result<PowerSample, ExtractionError> {
    let field = row
        .get(column)
        .ok_or_else(|| ExtractionError::ColumnOutOfBounds {
            entity: entity.to_string(),
            column,
            width: row.len(),
        })?;

    let invalid_hex = |reason: String| ExtractionError::InvalidHex {
        entity: entity.to_string(),
        field: String::from_utf8_lossy(field).into_owned(),
        reason,
    };

    let text = std::str::from_utf8(field).map_err(|e| invalid_hex(e.to_string()))?;
    let raw = parse_hex_reading(text).map_err(|e| invalid_hex(e.to_string()))?;

    Ok(PowerSample {
        entity: entity.to_string(),
        friendly_name: friendly_name(entity),
        watts: raw as f64 * scale_factor(entity) as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> ByteRecord {
        ByteRecord::from(fields.to_vec())
    }

    #[test]
    fn test_friendly_name() {
        assert_eq!(friendly_name("kitchen_appliances"), "KitchenAppliances");
        assert_eq!(friendly_name("main"), "Main");
        assert_eq!(friendly_name("kitchen"), "Kitchen");
        assert_eq!(friendly_name("living_room_ac"), "LivingRoomAc");
    }

    #[test]
    fn test_friendly_name_keeps_inner_case() {
        assert_eq!(friendly_name("LED_lights"), "LEDLights");
        assert_eq!(friendly_name("ev-charger"), "Ev-Charger");
        assert_eq!(friendly_name("floor2_heater"), "Floor2Heater");
        assert_eq!(friendly_name(""), "");
    }

    #[test]
    fn test_scale_factor_table() {
        assert_eq!(scale_factor("main"), 10);
        assert_eq!(scale_factor("ecocute"), 10);
        assert_eq!(scale_factor("Main"), 1);
        assert_eq!(scale_factor("main_2"), 1);
        assert_eq!(scale_factor("kitchen"), 1);
    }

    #[test]
    fn test_parse_hex_reading() {
        assert_eq!(parse_hex_reading("1f4").unwrap(), 500);
        assert_eq!(parse_hex_reading("1F4").unwrap(), 500);
        assert_eq!(parse_hex_reading("-a").unwrap(), -10);
        assert_eq!(parse_hex_reading("0").unwrap(), 0);
        assert!(parse_hex_reading("").is_err());
        assert!(parse_hex_reading("0x1f").is_err());
        assert!(parse_hex_reading(" 1f").is_err());
        assert!(parse_hex_reading("zz").is_err());
    }

    #[test]
    fn test_extract_scaled_and_unscaled() {
        let data = row(&["202610181200", "1f4", "64"]);

        let main = extract_sample("main", 1, &data).unwrap();
        assert_eq!(main.watts, 5000.0);
        assert_eq!(main.friendly_name, "Main");

        let kitchen = extract_sample("kitchen_appliances", 2, &data).unwrap();
        assert_eq!(kitchen.watts, 100.0);
        assert_eq!(kitchen.entity, "kitchen_appliances");
        assert_eq!(kitchen.friendly_name, "KitchenAppliances");
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let data = row(&["202610181200", "1f4"]);
        match extract_sample("garage", 2, &data) {
            Err(ExtractionError::ColumnOutOfBounds { column, width, .. }) => {
                assert_eq!(column, 2);
                assert_eq!(width, 2);
            }
            other => panic!("expected ColumnOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_invalid_hex() {
        let data = row(&["202610181200", "--"]);
        let err = extract_sample("ecocute", 1, &data).unwrap_err();
        assert_eq!(err.reason(), "invalid_hex");
        assert_eq!(err.entity(), "ecocute");
    }

    #[test]
    fn test_extract_non_utf8_field_is_invalid_hex() {
        let data = ByteRecord::from(vec![&b"202610181200"[..], &b"\x93\x64"[..], &b"1f4"[..]]);

        let err = extract_sample("kitchen", 1, &data).unwrap_err();
        assert_eq!(err.reason(), "invalid_hex");

        let main = extract_sample("main", 2, &data).unwrap();
        assert_eq!(main.watts, 5000.0);
    }
}
