//! Category colours for polylines

use dv_core::Value;
use egui::Color32;

/// Category keys with a fixed palette slot
pub const CATEGORY_KEYS: [&str; 9] = ["0", "1", "2", "3", "4", "5", "6", "7", "8"];

pub const CATEGORY_PALETTE: [Color32; 9] = [
    Color32::from_rgb(0xD2, 0x7F, 0x8A),
    Color32::from_rgb(0x50, 0xA9, 0xD4),
    Color32::from_rgb(0x4C, 0xFC, 0x86),
    Color32::from_rgb(0xC9, 0x7D, 0x0B),
    Color32::from_rgb(0x45, 0x92, 0x48),
    Color32::from_rgb(0xD2, 0x6F, 0xA7),
    Color32::from_rgb(0xE1, 0x52, 0x5A),
    Color32::from_rgb(0x5D, 0xB5, 0xB3),
    Color32::from_rgb(0x78, 0x5D, 0x82),
];

/// Stroke colour of a category value.
///
/// The nine known keys map to their own slot; any other key (and an absent
/// value, keyed as the empty string) falls back to an FNV-1a hash so the
/// colour stays the same across redraws and runs.
pub fn category_color(value: Option<&Value>) -> Color32 {
    let key = value.map(|v| v.to_string()).unwrap_or_default();
    let slot = CATEGORY_KEYS
        .iter()
        .position(|k| *k == key)
        .unwrap_or_else(|| (fnv1a(key.as_bytes()) % CATEGORY_PALETTE.len() as u64) as usize);
    CATEGORY_PALETTE[slot]
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_use_their_slot() {
        assert_eq!(category_color(Some(&Value::Number(0.0))), CATEGORY_PALETTE[0]);
        assert_eq!(category_color(Some(&Value::Number(4.0))), CATEGORY_PALETTE[4]);
        assert_eq!(category_color(Some(&Value::from("8"))), CATEGORY_PALETTE[8]);
    }

    #[test]
    fn test_unknown_categories_are_stable() {
        let a = category_color(Some(&Value::from("disk")));
        let b = category_color(Some(&Value::from("disk")));
        assert_eq!(a, b);
        assert!(CATEGORY_PALETTE.contains(&category_color(Some(&Value::Number(12.5)))));
        assert_eq!(category_color(None), category_color(None));
    }
}
