use sbml_core::spatial::{CsgRotation, Domain, InteriorPoint, SpatialSpeciesPlugin};
use sbml_core::elements::Species;
use sbml_core::{ChangeEvent, ChangeKind, ChangeListener, Node, Plugin};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<ChangeEvent>>,
}

impl ChangeListener for Recorder {
    fn changed(&self, event: &ChangeEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[test]
fn property_events_carry_old_and_new_values() {
    let recorder = Rc::new(Recorder::default());
    let mut rotation = CsgRotation::new();
    rotation.core_mut().add_listener(recorder.clone());

    rotation.set_rotate_axis_z(1.0);
    rotation.set_rotate_axis_z(2.5);
    rotation.unset_rotate_axis_z();

    let events = recorder.events.borrow();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|event| event.kind == ChangeKind::Property));
    assert!(events.iter().all(|event| event.source == rotation.handle()));
    assert_eq!(events[1].property, "rotateAxisZ");
    assert_eq!(events[1].old_value.as_deref(), Some("1"));
    assert_eq!(events[1].new_value.as_deref(), Some("2.5"));
    assert_eq!(events[2].new_value, None);
}

#[test]
fn structural_events_fire_on_the_container() {
    let recorder = Rc::new(Recorder::default());
    let mut domain = Domain::new();
    domain.add_interior_point(InteriorPoint::new());
    domain.add_interior_point(InteriorPoint::new());

    let listener: Rc<dyn ChangeListener> = recorder.clone();
    domain.interior_points_mut().core_mut().add_listener(listener.clone());
    domain.add_interior_point(InteriorPoint::new());
    domain.remove_interior_point(0).unwrap();

    let kinds: Vec<_> = recorder.events.borrow().iter().map(|event| event.kind).collect();
    assert_eq!(kinds, vec![ChangeKind::NodeAdded, ChangeKind::NodeRemoved]);

    assert!(domain.interior_points_mut().core_mut().remove_listener(&listener));
    domain.add_interior_point(InteriorPoint::new());
    assert_eq!(recorder.events.borrow().len(), 2);
}

#[test]
fn plugin_events_name_the_host() {
    let recorder = Rc::new(Recorder::default());
    let mut species = Species::new();
    let mut plugin = SpatialSpeciesPlugin::new();
    plugin.core_mut().add_listener(recorder.clone());
    species.core_mut().add_plugin(Box::new(plugin));

    let plugin = species
        .core_mut()
        .plugins_mut()
        .get_mut::<SpatialSpeciesPlugin>("spatial")
        .unwrap()
        .unwrap();
    plugin.set_is_spatial(true);

    let events = recorder.events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, species.handle());
    assert_eq!(events[0].element, "species");
    assert_eq!(events[0].property, "isSpatial");
}

#[test]
fn clones_do_not_inherit_listeners() {
    let recorder = Rc::new(Recorder::default());
    let mut rotation = CsgRotation::new();
    rotation.core_mut().add_listener(recorder.clone());

    let mut copy = rotation.clone();
    copy.set_rotate_angle_in_radians(0.5);
    assert!(recorder.events.borrow().is_empty());
}
