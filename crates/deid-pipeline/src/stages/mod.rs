//! The seven fixed stages plus optional sampling.
//!
//! drop_identifiers → generalize_location → attach_decile →
//! pseudonymize_facility → generalize_arrival → filter_gender → bracket_age

pub mod age;
pub mod arrival;
pub mod decile;
pub mod facility;
pub mod gender;
pub mod identifiers;
pub mod location;
pub mod sample;

pub use age::BracketAge;
pub use arrival::GeneralizeArrival;
pub use decile::AttachDecile;
pub use facility::PseudonymizeFacility;
pub use gender::FilterGender;
pub use identifiers::DropIdentifiers;
pub use location::GeneralizeLocation;
pub use sample::Sample;

use deid_core::config::{DeidConfig, StageKind};

use crate::stage::Stage;

/// Build the stage for `kind` from the run configuration.
pub fn create_stage(kind: StageKind, config: &DeidConfig) -> Box<dyn Stage> {
    let columns = &config.columns;
    let reference = &config.reference;
    let pipeline = &config.pipeline;
    match kind {
        StageKind::DropIdentifiers => Box::new(DropIdentifiers::new(columns.identifiers.clone())),
        StageKind::GeneralizeLocation => Box::new(GeneralizeLocation {
            key_column: columns.postcode.clone(),
            area_column: reference.area.clone(),
            score_column: reference.score.clone(),
            policy: pipeline.join_miss,
            impute_label: pipeline.impute_area_label.clone(),
            fail_on_empty: pipeline.fail_on_empty_join,
        }),
        StageKind::AttachDecile => Box::new(AttachDecile {
            score_column: reference.score.clone(),
            area_column: reference.area.clone(),
            decile_column: columns.decile.clone(),
        }),
        StageKind::PseudonymizeFacility => Box::new(PseudonymizeFacility {
            column: columns.facility.clone(),
            id_column: columns.facility_id.clone(),
            scheme: pipeline.pseudonym.scheme,
            digits: pipeline.pseudonym.digits,
        }),
        StageKind::GeneralizeArrival => Box::new(GeneralizeArrival {
            column: columns.arrival_time.clone(),
            date_column: columns.arrival_date.clone(),
            range_column: columns.hour_range.clone(),
        }),
        StageKind::FilterGender => Box::new(FilterGender::new(
            columns.gender.clone(),
            pipeline.allowed_genders.iter().cloned(),
        )),
        StageKind::BracketAge => Box::new(BracketAge {
            column: columns.age.clone(),
            bracket_column: columns.age_bracket.clone(),
        }),
    }
}

/// Every stage of a run in execution order, with sampling spliced in after
/// its configured stage.
pub fn build_stages(config: &DeidConfig) -> Vec<Box<dyn Stage>> {
    let mut stages = Vec::with_capacity(StageKind::ORDER.len() + 1);
    for kind in StageKind::ORDER {
        stages.push(create_stage(kind, config));
        if let Some(sample) = config.pipeline.sample.as_ref().filter(|s| s.after == kind) {
            stages.push(Box::new(Sample::new(sample.fraction)) as Box<dyn Stage>);
        }
    }
    stages
}
