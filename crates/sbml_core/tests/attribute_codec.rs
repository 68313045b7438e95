use sbml_core::elements::Species;
use sbml_core::spatial::{
    BoundaryKind, BoundaryCondition, CompressionKind, CsgRotation, DataKind, Domain,
    InteriorPoint, SampledField,
};
use sbml_core::{CollectedDiagnostics, DiagnosticCode, Node, Severity};

#[test]
fn rotate_axis_reads_from_prefixed_attribute() {
    let mut written = CsgRotation::new();
    written.set_rotate_axis_x(1.5);
    let attributes = written.write_xml_attributes();
    assert_eq!(
        attributes.get("spatial:rotateAxisX").map(String::as_str),
        Some("1.5")
    );

    let mut read = CsgRotation::new();
    let mut diagnostics = CollectedDiagnostics::new();
    assert!(read.read_attribute("rotateAxisX", "spatial", "1.5", &mut diagnostics));
    assert!(read.is_set_rotate_axis_x());
    assert_eq!(read.rotate_axis_x(), Some(1.5));
    assert!(diagnostics.is_empty());
}

#[test]
fn unparsable_value_is_consumed_reported_and_left_unset() {
    let mut rotation = CsgRotation::new();
    rotation.set_rotate_axis_y(2.0);
    let mut diagnostics = CollectedDiagnostics::new();

    assert!(rotation.read_attribute("rotateAxisY", "spatial", "two", &mut diagnostics));
    assert!(!rotation.is_set_rotate_axis_y());
    let reported = diagnostics.iter().next().unwrap();
    assert_eq!(reported.code, DiagnosticCode::UnreadableAttribute);
    assert_eq!(reported.severity, Severity::Warning);
    assert_eq!(reported.element, "csgRotation");
    assert_eq!(reported.attribute.as_deref(), Some("rotateAxisY"));
}

#[test]
fn foreign_prefix_is_not_consumed() {
    let mut rotation = CsgRotation::new();
    let mut diagnostics = CollectedDiagnostics::new();
    assert!(!rotation.read_attribute("rotateAxisX", "", "1.5", &mut diagnostics));
    assert!(!rotation.read_attribute("rotateAxisX", "comp", "1.5", &mut diagnostics));
    assert!(!rotation.is_set_rotate_axis_x());
    assert!(diagnostics.is_empty());
}

#[test]
fn unset_fields_are_omitted_from_written_map() {
    let point = InteriorPoint::new();
    assert!(point.write_xml_attributes().is_empty());

    let mut point = InteriorPoint::new();
    point.set_coord2(0.25);
    let attributes = point.write_xml_attributes();
    assert_eq!(attributes.len(), 1);
    assert!(attributes.contains_key("spatial:coord2"));
}

#[test]
fn written_attributes_read_back_into_equal_instance() {
    let mut field = SampledField::new();
    field.core_mut().set_id("field1").unwrap();
    field.core_mut().set_meta_id("meta_field1").unwrap();
    field.core_mut().set_sbo_term(123).unwrap();
    field.set_data_type(DataKind::Uint16);
    field.set_num_samples1(2);
    field.set_num_samples2(2);
    field.set_compression(CompressionKind::Uncompressed);
    field.set_samples(vec![0.0, 1.0, 2.0, 3.0]);
    field.set_samples_length(4);

    let attributes = field.write_xml_attributes();
    assert_eq!(attributes.get("spatial:id").map(String::as_str), Some("field1"));
    assert_eq!(attributes.get("sboTerm").map(String::as_str), Some("SBO:0000123"));
    assert_eq!(attributes.get("spatial:dataType").map(String::as_str), Some("uint16"));

    let mut copy = SampledField::new();
    let mut diagnostics = CollectedDiagnostics::new();
    let unconsumed = copy.read_attributes(&attributes, &mut diagnostics);
    assert!(unconsumed.is_empty());
    assert!(diagnostics.is_empty());
    assert_eq!(copy, field);
}

#[test]
fn enum_tokens_are_case_sensitive() {
    let mut condition = BoundaryCondition::new();
    let mut diagnostics = CollectedDiagnostics::new();

    assert!(condition.read_attribute("type", "spatial", "Robin_sum", &mut diagnostics));
    assert_eq!(condition.condition_type(), Some(BoundaryKind::RobinSum));
    assert!(condition.read_attribute("type", "spatial", "robin_sum", &mut diagnostics));
    assert_eq!(condition.condition_type(), None);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn nan_unsets_double_fields() {
    let mut point = InteriorPoint::new();
    point.set_coord1(4.0);
    point.set_coord1(f64::NAN);
    assert!(!point.is_set_coord1());

    let mut diagnostics = CollectedDiagnostics::new();
    assert!(point.read_attribute("coord1", "spatial", "NaN", &mut diagnostics));
    assert!(!point.is_set_coord1());
    assert!(point.read_attribute("coord1", "spatial", "INF", &mut diagnostics));
    assert_eq!(point.coord1(), Some(f64::INFINITY));
    assert_eq!(
        point.write_xml_attributes().get("spatial:coord1").map(String::as_str),
        Some("INF")
    );
}

#[test]
fn invalid_identifier_is_reported_and_unset() {
    let mut domain = Domain::new();
    let mut diagnostics = CollectedDiagnostics::new();
    assert!(domain.read_attribute("id", "spatial", "1bad id", &mut diagnostics));
    assert_eq!(domain.core().id(), None);
    assert!(diagnostics.contains(DiagnosticCode::UnreadableAttribute));

    assert!(domain.core_mut().set_id("also bad").is_err());
}

#[test]
fn core_elements_use_unprefixed_attributes() {
    let mut species = Species::new();
    let mut diagnostics = CollectedDiagnostics::new();
    assert!(species.read_attribute("id", "", "glucose", &mut diagnostics));
    assert!(species.read_attribute("boundaryCondition", "", "false", &mut diagnostics));
    assert!(diagnostics.is_empty());

    let attributes = species.write_xml_attributes();
    assert_eq!(attributes.get("id").map(String::as_str), Some("glucose"));
    assert_eq!(
        attributes.get("boundaryCondition").map(String::as_str),
        Some("false")
    );
}

#[test]
fn diagnostics_serialize_to_json() {
    let mut rotation = CsgRotation::new();
    let mut diagnostics = CollectedDiagnostics::new();
    rotation.read_attribute("rotateAngleInRadians", "spatial", "quarter", &mut diagnostics);

    let json = serde_json::to_value(diagnostics.iter().next().unwrap()).unwrap();
    assert_eq!(json["code"], "unreadable_attribute");
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["attribute"], "rotateAngleInRadians");
    assert_eq!(json["value"], "quarter");
}

#[test]
fn enum_wire_tokens_serialize_through_serde() {
    let json = serde_json::to_string(&DataKind::Uint8).unwrap();
    assert_eq!(json, "\"uint8\"");
    let parsed: BoundaryKind = serde_json::from_str("\"Robin_valueCoefficient\"").unwrap();
    assert_eq!(parsed, BoundaryKind::RobinValueCoefficient);
}
