//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sbml_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use log::{error, info};
use sbml_core::elements::Model;
use sbml_core::spatial::{CsgPrimitive, CsgRotation, Geometry, PrimitiveKind, SpatialModelPlugin};
use sbml_core::{default_log_level, init_logging, LogDiagnostics, Node};

fn main() {
    if let Err(err) = init_logging(default_log_level(), None) {
        eprintln!("sbml_cli logging disabled: {err}");
    }

    println!("sbml_core ping={}", sbml_core::ping());
    println!("sbml_core version={}", sbml_core::core_version());

    let mut rotation = CsgRotation::new();
    rotation.set_rotate_axis_x(1.0);
    rotation.set_rotate_angle_in_radians(std::f64::consts::FRAC_PI_2);
    let mut sphere = CsgPrimitive::new();
    sphere.set_primitive_type(PrimitiveKind::Sphere);
    rotation.set_csg_node(sphere);
    for (key, value) in rotation.write_xml_attributes() {
        println!("csgRotation {key}={value}");
    }

    let mut model = Model::new();
    let mut geometry = Geometry::new();
    if let Err(err) = geometry.core_mut().set_id("geometry") {
        error!("event=cli_smoke module=cli status=error reason={err}");
        return;
    }
    let mut plugin = SpatialModelPlugin::new();
    plugin.set_geometry(geometry, &mut LogDiagnostics);
    model.core_mut().add_plugin(Box::new(plugin));
    println!("model children={}", model.child_count());
    println!("model plugins={}", model.core().plugins().len());
    info!("event=cli_smoke module=cli status=ok");
}
