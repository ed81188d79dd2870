use futures::future::try_join_all;
use log::*;
use serde::{Deserialize, Serialize};

use super::{distance::distance, GeoResolver};
use crate::{services::Coordinate, ShippingError};

/// Origin the order can ship from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub name: String,
    pub postal_code: String,
}

impl Warehouse {
    pub fn new(name: &str, postal_code: &str) -> Self {
        Warehouse {
            name: name.to_string(),
            postal_code: postal_code.to_string(),
        }
    }
}

/// Resolves every warehouse concurrently and returns the one closest to
/// `destination`.
pub async fn select_nearest<'a>(
    resolver: &GeoResolver,
    destination: Coordinate,
    warehouses: &'a [Warehouse],
) -> Result<&'a Warehouse, ShippingError> {
    if warehouses.is_empty() {
        return Err(ShippingError::NoWarehouseAvailable);
    }

    let coordinates = try_join_all(
        warehouses
            .iter()
            .map(|warehouse| resolver.resolve(&warehouse.postal_code)),
    )
    .await?;

    nearest(destination, warehouses.iter().zip(coordinates))
        .ok_or(ShippingError::NoWarehouseAvailable)
}

/// Minimum-distance candidate; the first one wins ties.
pub fn nearest<'a, I>(destination: Coordinate, candidates: I) -> Option<&'a Warehouse>
where
    I: IntoIterator<Item = (&'a Warehouse, Coordinate)>,
{
    let mut best: Option<(&'a Warehouse, f64)> = None;
    for (warehouse, coordinate) in candidates {
        let km = distance(destination, coordinate);
        trace!("Warehouse {} is {:.1} km away.", warehouse.name, km);
        if best.map_or(true, |(_, best_km)| km < best_km) {
            best = Some((warehouse, km));
        }
    }

    if let Some((warehouse, km)) = best {
        debug!("Selected warehouse {} at {:.1} km.", warehouse.name, km);
    }
    best.map(|(warehouse, _)| warehouse)
}
