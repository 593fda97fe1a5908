use crate::error::{BookingError, BookingResult};
use crate::types::{Catalog, VehicleType};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub base_cents: i32,
    pub add_ons_cents: i32,
}

impl Quote {
    pub fn total_cents(&self) -> i32 {
        self.base_cents + self.add_ons_cents
    }
}

/// Resolves the base price row for (sub-package, vehicle type) and adds
/// the selected add-ons. Unknown or mismatched ids are validation
/// failures; duplicate add-on selections count once.
pub fn quote(
    catalog: &Catalog,
    package_id: Uuid,
    sub_package_id: Uuid,
    vehicle_type: VehicleType,
    add_on_ids: &[Uuid],
) -> BookingResult<Quote> {
    catalog
        .packages
        .iter()
        .find(|package| package.id == package_id)
        .ok_or_else(|| BookingError::Validation("unknown package".into()))?;

    let sub_package = catalog
        .sub_packages
        .iter()
        .find(|sub_package| sub_package.id == sub_package_id)
        .ok_or_else(|| BookingError::Validation("unknown sub-package".into()))?;
    if sub_package.package_id != package_id {
        return Err(BookingError::Validation(
            "sub-package does not belong to the selected package".into(),
        ));
    }

    let price = catalog
        .prices
        .iter()
        .find(|price| price.sub_package_id == sub_package_id && price.vehicle_type == vehicle_type)
        .ok_or_else(|| {
            BookingError::Validation(format!(
                "no price configured for this sub-package and vehicle type {vehicle_type}"
            ))
        })?;

    let mut add_ons_cents = 0;
    let mut counted: Vec<Uuid> = Vec::new();
    for add_on_id in add_on_ids {
        if counted.contains(add_on_id) {
            continue;
        }
        counted.push(*add_on_id);
        let add_on = catalog
            .add_ons
            .iter()
            .find(|add_on| add_on.id == *add_on_id)
            .ok_or_else(|| BookingError::Validation(format!("unknown add-on {add_on_id}")))?;
        add_ons_cents += add_on.price_cents;
    }

    Ok(Quote {
        base_cents: price.amount_cents,
        add_ons_cents,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::local_bookings::example_catalog;

    fn first_priced_selection(catalog: &Catalog) -> (Uuid, Uuid) {
        let sub_package = &catalog.sub_packages[0];
        (sub_package.package_id, sub_package.id)
    }

    #[test]
    fn test_base_price_matches_vehicle_type() {
        let catalog = example_catalog();
        let (package_id, sub_package_id) = first_priced_selection(&catalog);

        for vehicle_type in VehicleType::ALL {
            let quote = quote(&catalog, package_id, sub_package_id, vehicle_type, &[]).unwrap();
            let expected = catalog
                .prices
                .iter()
                .find(|price| {
                    price.sub_package_id == sub_package_id && price.vehicle_type == vehicle_type
                })
                .unwrap()
                .amount_cents;
            assert_eq!(quote.base_cents, expected);
            assert_eq!(quote.add_ons_cents, 0);
            assert_eq!(quote.total_cents(), expected);
        }
    }

    #[test]
    fn test_add_ons_sum_on_top_of_base() {
        let catalog = example_catalog();
        let (package_id, sub_package_id) = first_priced_selection(&catalog);
        let add_on_ids: Vec<Uuid> = catalog.add_ons.iter().map(|add_on| add_on.id).collect();
        let add_on_total: i32 = catalog.add_ons.iter().map(|add_on| add_on.price_cents).sum();

        let quote = quote(
            &catalog,
            package_id,
            sub_package_id,
            VehicleType::Sedan,
            &add_on_ids,
        )
        .unwrap();
        assert_eq!(quote.add_ons_cents, add_on_total);
        assert_eq!(quote.total_cents(), quote.base_cents + add_on_total);
    }

    #[test]
    fn test_duplicate_add_on_counts_once() {
        let catalog = example_catalog();
        let (package_id, sub_package_id) = first_priced_selection(&catalog);
        let add_on = &catalog.add_ons[0];

        let quote = quote(
            &catalog,
            package_id,
            sub_package_id,
            VehicleType::Suv,
            &[add_on.id, add_on.id],
        )
        .unwrap();
        assert_eq!(quote.add_ons_cents, add_on.price_cents);
    }

    #[test]
    fn test_unknown_ids_are_validation_failures() {
        let catalog = example_catalog();
        let (package_id, sub_package_id) = first_priced_selection(&catalog);

        let unknown = Uuid::new_v4();
        assert!(matches!(
            quote(&catalog, unknown, sub_package_id, VehicleType::Van, &[]),
            Err(BookingError::Validation(_))
        ));
        assert!(matches!(
            quote(&catalog, package_id, unknown, VehicleType::Van, &[]),
            Err(BookingError::Validation(_))
        ));
        assert!(matches!(
            quote(
                &catalog,
                package_id,
                sub_package_id,
                VehicleType::Van,
                &[unknown]
            ),
            Err(BookingError::Validation(_))
        ));
    }

    #[test]
    fn test_sub_package_must_belong_to_package() {
        let catalog = example_catalog();
        let foreign_sub_package = catalog
            .sub_packages
            .iter()
            .find(|sub_package| sub_package.package_id != catalog.packages[0].id)
            .unwrap();

        assert!(matches!(
            quote(
                &catalog,
                catalog.packages[0].id,
                foreign_sub_package.id,
                VehicleType::Sedan,
                &[]
            ),
            Err(BookingError::Validation(_))
        ));
    }
}
