//! Regularly sampled scalar field backing a sampled-field geometry.
//!
//! # Invariants
//! - `samples` is stored as given; `samplesLength` is an independent
//!   attribute and is not recomputed.

use crate::model::{AttributeTable, ElementCore, Node};
use crate::spatial::kinds::{CompressionKind, DataKind, InterpolationKind};
use crate::spatial::{spatial_element, COMPRESSION, DATA_TYPE, SAMPLED_FIELD, SPATIAL};
use once_cell::sync::Lazy;

pub const NUM_SAMPLES1: &str = "numSamples1";
pub const NUM_SAMPLES2: &str = "numSamples2";
pub const NUM_SAMPLES3: &str = "numSamples3";
pub const INTERPOLATION_TYPE: &str = "interpolationType";
pub const SAMPLES: &str = "samples";
pub const SAMPLES_LENGTH: &str = "samplesLength";

static SAMPLED_FIELD_ATTRIBUTES: Lazy<AttributeTable<SampledField>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .token(
            DATA_TYPE,
            SampledField::data_type,
            SampledField::set_data_type,
            SampledField::unset_data_type,
        )
        .value(
            NUM_SAMPLES1,
            SampledField::num_samples1,
            SampledField::set_num_samples1,
            SampledField::unset_num_samples1,
        )
        .value(
            NUM_SAMPLES2,
            SampledField::num_samples2,
            SampledField::set_num_samples2,
            SampledField::unset_num_samples2,
        )
        .value(
            NUM_SAMPLES3,
            SampledField::num_samples3,
            SampledField::set_num_samples3,
            SampledField::unset_num_samples3,
        )
        .token(
            INTERPOLATION_TYPE,
            SampledField::interpolation_type,
            SampledField::set_interpolation_type,
            SampledField::unset_interpolation_type,
        )
        .token(
            COMPRESSION,
            SampledField::compression,
            SampledField::set_compression,
            SampledField::unset_compression,
        )
        .value(
            SAMPLES,
            |field: &SampledField| field.samples().map(<[f64]>::to_vec),
            SampledField::set_samples,
            SampledField::unset_samples,
        )
        .value(
            SAMPLES_LENGTH,
            SampledField::samples_length,
            SampledField::set_samples_length,
            SampledField::unset_samples_length,
        )
});

#[derive(Debug, Clone, PartialEq)]
pub struct SampledField {
    core: ElementCore,
    data_type: Option<DataKind>,
    num_samples1: Option<i32>,
    num_samples2: Option<i32>,
    num_samples3: Option<i32>,
    interpolation_type: Option<InterpolationKind>,
    compression: Option<CompressionKind>,
    samples: Option<Vec<f64>>,
    samples_length: Option<i32>,
}

impl SampledField {
    pub fn new() -> Self {
        Self {
            core: spatial_element(SAMPLED_FIELD),
            data_type: None,
            num_samples1: None,
            num_samples2: None,
            num_samples3: None,
            interpolation_type: None,
            compression: None,
            samples: None,
            samples_length: None,
        }
    }

    /// Product of the set sample counts, or `None` when no count is set.
    pub fn grid_size(&self) -> Option<usize> {
        let counts = [self.num_samples1, self.num_samples2, self.num_samples3];
        counts
            .into_iter()
            .flatten()
            .map(|count| usize::try_from(count).unwrap_or(0))
            .reduce(|total, count| total.saturating_mul(count))
    }
}

impl Default for SampledField {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SampledField {
    token data_type: DataKind = DATA_TYPE => is_set_data_type, set_data_type, unset_data_type;
    value num_samples1: i32 = NUM_SAMPLES1
        => is_set_num_samples1, set_num_samples1, unset_num_samples1;
    value num_samples2: i32 = NUM_SAMPLES2
        => is_set_num_samples2, set_num_samples2, unset_num_samples2;
    value num_samples3: i32 = NUM_SAMPLES3
        => is_set_num_samples3, set_num_samples3, unset_num_samples3;
    token interpolation_type: InterpolationKind = INTERPOLATION_TYPE
        => is_set_interpolation_type, set_interpolation_type, unset_interpolation_type;
    token compression: CompressionKind = COMPRESSION
        => is_set_compression, set_compression, unset_compression;
    array samples: f64 = SAMPLES => is_set_samples, set_samples, unset_samples;
    value samples_length: i32 = SAMPLES_LENGTH
        => is_set_samples_length, set_samples_length, unset_samples_length;
});

impl Node for SampledField {
    element_core_access!();
    attribute_table_access!(SAMPLED_FIELD_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::SampledField;
    use crate::diagnostics::CollectedDiagnostics;
    use crate::model::Node;
    use crate::spatial::kinds::DataKind;

    #[test]
    fn samples_read_from_text_and_written_back() {
        let mut field = SampledField::new();
        let mut diagnostics = CollectedDiagnostics::new();
        assert!(field.read_attribute("samples", "spatial", "0 1 1 0", &mut diagnostics));
        assert!(field.read_attribute("dataType", "spatial", "uint8", &mut diagnostics));
        assert!(diagnostics.is_empty());

        assert_eq!(field.samples(), Some(&[0.0, 1.0, 1.0, 0.0][..]));
        assert_eq!(field.data_type(), Some(DataKind::Uint8));
        let attributes = field.write_xml_attributes();
        assert_eq!(attributes.get("spatial:samples").map(String::as_str), Some("0 1 1 0"));
    }

    #[test]
    fn grid_size_multiplies_set_counts() {
        let mut field = SampledField::new();
        assert_eq!(field.grid_size(), None);
        field.set_num_samples1(4);
        field.set_num_samples2(3);
        assert_eq!(field.grid_size(), Some(12));
    }
}
