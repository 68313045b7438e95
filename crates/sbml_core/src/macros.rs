//! Accessor generators shared by the concrete element types.
//!
//! Every optional field gets the same quartet: getter returning `Option`,
//! `is_set_*`, `set_*` and `unset_*`, each mutation firing a change event on
//! the owner's `core`.

/// Generates accessors for optional attribute fields.
///
/// Kinds: `value` (Copy types), `double` (NaN means unset), `token`
/// (enumerations, same shape as `value`), `text` (owned strings) and `array`
/// (owned vectors of `$ty`, borrowed as slices).
macro_rules! optional_properties {
    ($owner:ty {
        $($kind:ident $field:ident: $ty:ty = $property:expr
            => $is_set:ident, $set:ident, $unset:ident;)*
    }) => {
        impl $owner {
            $(optional_properties!(@$kind $field: $ty = $property => $is_set, $set, $unset);)*
        }
    };

    (@value $field:ident: $ty:ty = $property:expr => $is_set:ident, $set:ident, $unset:ident) => {
        pub fn $field(&self) -> Option<$ty> {
            self.$field
        }

        pub fn $is_set(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $set(&mut self, value: $ty) {
            let old = self.$field.replace(value);
            self.core.property_changed(
                $property,
                old.map(|old| old.to_string()),
                Some(value.to_string()),
            );
        }

        pub fn $unset(&mut self) -> bool {
            match self.$field.take() {
                Some(old) => {
                    self.core.property_changed($property, Some(old.to_string()), None);
                    true
                }
                None => false,
            }
        }
    };

    (@token $field:ident: $ty:ty = $property:expr => $is_set:ident, $set:ident, $unset:ident) => {
        optional_properties!(@value $field: $ty = $property => $is_set, $set, $unset);
    };

    (@double $field:ident: $ty:ty = $property:expr => $is_set:ident, $set:ident, $unset:ident) => {
        pub fn $field(&self) -> Option<f64> {
            self.$field.filter(|value| !value.is_nan())
        }

        pub fn $is_set(&self) -> bool {
            self.$field().is_some()
        }

        /// Setting NaN unsets the field.
        pub fn $set(&mut self, value: f64) {
            if value.is_nan() {
                self.$unset();
                return;
            }
            let old = self.$field.replace(value);
            self.core.property_changed(
                $property,
                old.map(|old| old.to_string()),
                Some(value.to_string()),
            );
        }

        pub fn $unset(&mut self) -> bool {
            match self.$field.take() {
                Some(old) => {
                    self.core.property_changed($property, Some(old.to_string()), None);
                    true
                }
                None => false,
            }
        }
    };

    (@text $field:ident: $ty:ty = $property:expr => $is_set:ident, $set:ident, $unset:ident) => {
        pub fn $field(&self) -> Option<&str> {
            self.$field.as_deref()
        }

        pub fn $is_set(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $set(&mut self, value: impl Into<String>) {
            let value: String = value.into();
            let old = self.$field.replace(value.clone());
            self.core.property_changed($property, old, Some(value));
        }

        pub fn $unset(&mut self) -> bool {
            match self.$field.take() {
                Some(old) => {
                    self.core.property_changed($property, Some(old), None);
                    true
                }
                None => false,
            }
        }
    };

    (@array $field:ident: $ty:ty = $property:expr => $is_set:ident, $set:ident, $unset:ident) => {
        pub fn $field(&self) -> Option<&[$ty]> {
            self.$field.as_deref()
        }

        pub fn $is_set(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $set(&mut self, values: Vec<$ty>) {
            let new_value = $crate::model::Lexical::to_lexical(&values);
            let old = self.$field.replace(values);
            self.core.property_changed(
                $property,
                old.map(|old| $crate::model::Lexical::to_lexical(&old)),
                Some(new_value),
            );
        }

        pub fn $unset(&mut self) -> bool {
            match self.$field.take() {
                Some(old) => {
                    self.core.property_changed(
                        $property,
                        Some($crate::model::Lexical::to_lexical(&old)),
                        None,
                    );
                    true
                }
                None => false,
            }
        }
    };
}

/// Generates accessors for optional single-slot children.
///
/// Setting a child attaches it to the owner; the previous child is detached
/// and returned.
macro_rules! child_slots {
    ($owner:ty {
        $($field:ident: $ty:ty = $element:expr
            => $is_set:ident, $field_mut:ident, $set:ident, $unset:ident;)*
    }) => {
        impl $owner {
            $(
                pub fn $field(&self) -> Option<&$ty> {
                    self.$field.as_ref()
                }

                pub fn $field_mut(&mut self) -> Option<&mut $ty> {
                    self.$field.as_mut()
                }

                pub fn $is_set(&self) -> bool {
                    self.$field.is_some()
                }

                pub fn $set(&mut self, mut child: $ty) -> Option<$ty> {
                    let previous = self.$unset();
                    $crate::model::node::attach(self.core.handle(), &mut child);
                    self.$field = Some(child);
                    self.core.node_added($element);
                    previous
                }

                pub fn $unset(&mut self) -> Option<$ty> {
                    let mut child = self.$field.take()?;
                    $crate::model::node::detach(&mut child);
                    self.core.node_removed($element);
                    Some(child)
                }
            )*
        }
    };
}

/// Generates accessors for optional child lists.
///
/// A list counts as set only when it holds at least one item. The `*_mut`
/// accessor creates the list on first use, labelled with the owner's package.
macro_rules! child_lists {
    ($owner:ty {
        $($field:ident: $item:ty = ($list_name:expr, $item_name:expr, $minimum:expr)
            => $is_set:ident, $field_mut:ident, $set:ident, $unset:ident,
               $add:ident, $remove:ident;)*
    }) => {
        impl $owner {
            $(
                pub fn $field(&self) -> Option<&$crate::model::ListOf<$item>> {
                    self.$field.as_ref().filter(|list| !list.is_empty())
                }

                pub fn $is_set(&self) -> bool {
                    self.$field().is_some()
                }

                pub fn $field_mut(&mut self) -> &mut $crate::model::ListOf<$item> {
                    let owner = self.core.handle();
                    let package = self.core.package();
                    let namespace = self.core.namespace().unwrap_or_default().to_string();
                    self.$field.get_or_insert_with(|| {
                        let mut list =
                            $crate::model::ListOf::new($list_name, $item_name, package, &namespace)
                                .with_minimum($minimum);
                        $crate::model::node::attach(owner, &mut list);
                        list
                    })
                }

                /// Replaces the whole list; the previous one is detached and returned.
                pub fn $set(
                    &mut self,
                    mut list: $crate::model::ListOf<$item>,
                ) -> Option<$crate::model::ListOf<$item>> {
                    let previous = self.$unset();
                    let namespace = self.core.namespace().unwrap_or_default().to_string();
                    list.set_package(self.core.package(), &namespace);
                    $crate::model::node::attach(self.core.handle(), &mut list);
                    self.$field = Some(list);
                    self.core.node_added($list_name);
                    previous
                }

                pub fn $unset(&mut self) -> Option<$crate::model::ListOf<$item>> {
                    let mut list = self.$field.take()?;
                    $crate::model::node::detach(&mut list);
                    self.core.node_removed($list_name);
                    Some(list)
                }

                pub fn $add(&mut self, item: $item) -> &mut $item {
                    self.$field_mut().add(item)
                }

                /// # Errors
                /// - `IndexOutOfBounds` or `CardinalityViolation` from the list.
                pub fn $remove(
                    &mut self,
                    index: usize,
                ) -> Result<$item, $crate::model::StructuralError> {
                    match self.$field.as_mut() {
                        Some(list) => list.remove_at(index),
                        None => Err($crate::model::StructuralError::IndexOutOfBounds {
                            index,
                            bound: 0,
                        }),
                    }
                }
            )*
        }
    };
}

/// Implements the type-erased members of `Plugin` for a `Clone + PartialEq`
/// plugin type.
macro_rules! plugin_boilerplate {
    () => {
        fn clone_plugin(&self) -> Box<dyn $crate::model::Plugin> {
            Box::new(self.clone())
        }

        fn eq_plugin(&self, other: &dyn $crate::model::Plugin) -> bool {
            other
                .as_any()
                .downcast_ref::<Self>()
                .is_some_and(|other| self == other)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

/// Implements `Node::core`/`core_mut` for a type with a `core` field.
macro_rules! element_core_access {
    () => {
        fn core(&self) -> &$crate::model::ElementCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut $crate::model::ElementCore {
            &mut self.core
        }
    };
}

/// Routes a node's own attribute layer through a static `AttributeTable`.
macro_rules! attribute_table_access {
    ($table:expr) => {
        fn read_own_attribute(
            &mut self,
            name: &str,
            prefix: &str,
            value: &str,
            diagnostics: &mut dyn $crate::diagnostics::Diagnostics,
        ) -> bool {
            $table.read(self, name, prefix, value, diagnostics)
        }

        fn write_own_attributes(&self, attributes: &mut $crate::model::AttributeMap) {
            $table.write(self, attributes);
        }
    };
}

/// Implements `Node` for an enum whose variants each wrap one node type.
macro_rules! delegate_node {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl $name {
            pub fn as_node(&self) -> &dyn $crate::model::Node {
                match self {
                    $(Self::$variant(inner) => inner),+
                }
            }

            pub fn as_node_mut(&mut self) -> &mut dyn $crate::model::Node {
                match self {
                    $(Self::$variant(inner) => inner),+
                }
            }
        }

        impl $crate::model::Node for $name {
            fn core(&self) -> &$crate::model::ElementCore {
                self.as_node().core()
            }

            fn core_mut(&mut self) -> &mut $crate::model::ElementCore {
                self.as_node_mut().core_mut()
            }

            fn allows_children(&self) -> bool {
                self.as_node().allows_children()
            }

            fn children(&self) -> Vec<&dyn $crate::model::Node> {
                self.as_node().children()
            }

            fn children_mut(&mut self) -> Vec<&mut dyn $crate::model::Node> {
                self.as_node_mut().children_mut()
            }

            fn carries_secondary_id(&self) -> bool {
                self.as_node().carries_secondary_id()
            }

            fn read_own_attribute(
                &mut self,
                name: &str,
                prefix: &str,
                value: &str,
                diagnostics: &mut dyn $crate::diagnostics::Diagnostics,
            ) -> bool {
                self.as_node_mut()
                    .read_own_attribute(name, prefix, value, diagnostics)
            }

            fn write_own_attributes(&self, attributes: &mut $crate::model::AttributeMap) {
                self.as_node().write_own_attributes(attributes);
            }
        }
    };
}
