use log::*;
use serde::Deserialize;

pub const MIN_LENGTH: f64 = 16.0;
pub const MIN_WIDTH: f64 = 11.0;
pub const MIN_HEIGHT: f64 = 2.0;

/// One purchased line as the caller sent it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkuLine {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Single box standing in for the whole order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedPackage {
    pub total_weight: f64,
    pub declared_value: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Missing, zero and negative measures all count as 1.
fn measure(value: Option<f64>) -> f64 {
    value.filter(|v| *v > 0.0).unwrap_or(1.0)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Merges all lines into one box.
///
/// Each dimension is the largest of the biggest item along that axis, the
/// edge of a cube holding the summed item volumes, and the carrier minimum.
pub fn consolidate(items: &[SkuLine]) -> ConsolidatedPackage {
    let mut total_weight = 0.0;
    let mut declared_value = 0.0;
    let mut volume = 0.0;
    let (mut max_length, mut max_width, mut max_height) = (0.0f64, 0.0f64, 0.0f64);

    for item in items {
        let quantity = f64::from(item.quantity.filter(|q| *q > 0).unwrap_or(1));
        let (length, width, height) = (
            measure(item.length),
            measure(item.width),
            measure(item.height),
        );

        total_weight += measure(item.weight) * quantity;
        declared_value += item.price.unwrap_or(0.0).max(0.0) * quantity;
        volume += length * width * height * quantity;

        max_length = max_length.max(length);
        max_width = max_width.max(width);
        max_height = max_height.max(height);
    }

    let edge = f64::cbrt(volume);
    let package = ConsolidatedPackage {
        total_weight: round_cents(total_weight),
        declared_value: round_cents(declared_value),
        length: max_length.max(edge).max(MIN_LENGTH),
        width: max_width.max(edge).max(MIN_WIDTH),
        height: max_height.max(edge).max(MIN_HEIGHT),
    };
    debug!("Consolidated {} lines into {:?}.", items.len(), package);
    package
}
