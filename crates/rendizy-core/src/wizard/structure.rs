//! The property wizard layout: three blocks, seventeen steps.

use rendizy_types::wizard::{Modality, StepValidation, WizardBlock, WizardStep};

const fn step(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    validation: StepValidation,
) -> WizardStep {
    WizardStep {
        id,
        title,
        description,
        validation,
    }
}

const CONTENT_STEPS: &[WizardStep] = &[
    step(
        "content-type",
        "Type and identification",
        "What kind of property are you listing?",
        StepValidation::Required,
    ),
    step(
        "content-location",
        "Location",
        "Where is the property?",
        StepValidation::Required,
    ),
    step(
        "content-rooms",
        "Rooms and layout",
        "How are the rooms distributed?",
        StepValidation::Recommended,
    ),
    step(
        "content-location-amenities",
        "Location amenities",
        "Amenities inherited from the location",
        StepValidation::Optional,
    ),
    step(
        "content-property-amenities",
        "Unit amenities",
        "Amenities specific to this unit",
        StepValidation::Recommended,
    ),
    step(
        "content-photos",
        "Photos and media",
        "Show the property in photos",
        StepValidation::Recommended,
    ),
    step(
        "content-description",
        "Description",
        "Describe the property",
        StepValidation::Required,
    ),
];

const FINANCIAL_STEPS: &[WizardStep] = &[
    step(
        "financial-contract",
        "Relationship settings",
        "Owner, commission and communication",
        StepValidation::Required,
    ),
    step(
        "financial-residential-pricing",
        "Rent and sale prices",
        "Residential rent and sale values",
        StepValidation::Optional,
    ),
    step(
        "financial-fees",
        "Seasonal fees",
        "Cleaning, service and extra charges",
        StepValidation::Recommended,
    ),
    step(
        "financial-pricing",
        "Seasonal pricing",
        "Nightly rates, seasons and discounts",
        StepValidation::Required,
    ),
    step(
        "financial-derived-pricing",
        "Derived prices",
        "Extra guest and age band rates",
        StepValidation::Recommended,
    ),
];

const SETTINGS_STEPS: &[WizardStep] = &[
    step(
        "settings-rules",
        "House rules",
        "Rules of the accommodation",
        StepValidation::Required,
    ),
    step(
        "settings-booking",
        "Booking settings",
        "How are bookings accepted?",
        StepValidation::Optional,
    ),
    step(
        "settings-tags",
        "Tags and groups",
        "Organize the property",
        StepValidation::Optional,
    ),
    step(
        "settings-ical",
        "iCal and sync",
        "Synchronize calendars",
        StepValidation::Optional,
    ),
    step(
        "settings-otas",
        "OTA integrations",
        "Distribution channels",
        StepValidation::Optional,
    ),
];

/// Id of the block whose steps become mandatory for short-term rentals.
pub const CONTENT_BLOCK_ID: &str = "content";

/// Blocks of the property editor, in navigation order.
pub const PROPERTY_WIZARD: &[WizardBlock] = &[
    WizardBlock {
        id: CONTENT_BLOCK_ID,
        title: "Content",
        steps: CONTENT_STEPS,
    },
    WizardBlock {
        id: "financial",
        title: "Financial",
        steps: FINANCIAL_STEPS,
    },
    WizardBlock {
        id: "settings",
        title: "Settings",
        steps: SETTINGS_STEPS,
    },
];

/// Validation level of `step` given the property's modalities.
///
/// Short-term rentals must fill every content step.
pub fn effective_validation(step: &WizardStep, modalities: &[Modality]) -> StepValidation {
    if modalities.contains(&Modality::ShortTermRental) && is_content_step(step.id) {
        return StepValidation::Required;
    }
    step.validation
}

fn is_content_step(step_id: &str) -> bool {
    CONTENT_STEPS.iter().any(|s| s.id == step_id)
}

/// Total number of steps across all blocks.
pub fn total_steps(blocks: &[WizardBlock]) -> usize {
    blocks.iter().map(|b| b.steps.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_shape() {
        assert_eq!(PROPERTY_WIZARD.len(), 3);
        assert_eq!(PROPERTY_WIZARD[0].steps.len(), 7);
        assert_eq!(PROPERTY_WIZARD[1].steps.len(), 5);
        assert_eq!(PROPERTY_WIZARD[2].steps.len(), 5);
        assert_eq!(total_steps(PROPERTY_WIZARD), 17);
    }

    #[test]
    fn test_step_ids_are_unique() {
        let mut ids: Vec<&str> = PROPERTY_WIZARD
            .iter()
            .flat_map(|b| b.steps.iter().map(|s| s.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 17);
    }

    #[test]
    fn test_short_term_rental_requires_all_content_steps() {
        let rooms = &CONTENT_STEPS[2];
        assert_eq!(rooms.validation, StepValidation::Recommended);
        assert_eq!(
            effective_validation(rooms, &[Modality::ShortTermRental]),
            StepValidation::Required
        );
        assert_eq!(
            effective_validation(rooms, &[Modality::BuySell]),
            StepValidation::Recommended
        );
        assert_eq!(
            effective_validation(rooms, &[Modality::BuySell, Modality::ShortTermRental]),
            StepValidation::Required
        );
    }

    #[test]
    fn test_short_term_rental_leaves_other_blocks_alone() {
        let booking = &SETTINGS_STEPS[1];
        assert_eq!(
            effective_validation(booking, &[Modality::ShortTermRental]),
            StepValidation::Optional
        );
    }
}
