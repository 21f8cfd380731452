use crate::compose::compose;
use crate::dto::Dto;
use crate::field::{Behavior, FieldSpec, NestedType};
use crate::options::{PropertyOptions, PropertyOptionsExt};
use apidto_openapi::JsonSchema;
use apidto_validate::{rules, Message};

/// Options of a field holding another DTO (or an array of them).
#[derive(Debug, Clone)]
pub struct NestedOptions<N> {
    base: PropertyOptions<N>,
}

impl<N: Dto> NestedOptions<N> {
    pub fn new() -> Self {
        Self {
            base: PropertyOptions::default(),
        }
    }
}

impl<N: Dto> Default for NestedOptions<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Dto> PropertyOptionsExt<N> for NestedOptions<N> {
    fn base(&self) -> &PropertyOptions<N> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyOptions<N> {
        &mut self.base
    }
}

/// The nested schema is only looked up while binding, so a DTO may nest
/// itself.
pub fn is_nested<N: Dto>(options: NestedOptions<N>) -> FieldSpec {
    let nested = NestedType {
        name: N::dto_name(),
        schema: N::schema,
        each: options.base.is_array(),
    };

    let mut extras = Vec::with_capacity(2);
    if !nested.each {
        extras.push(Behavior::rule(rules::is_object(false).message(Message::dynamic(
            move |args| nested.message(args.property),
        ))));
    }
    extras.push(Behavior::Nested(nested));

    compose(JsonSchema::component(N::dto_name()), &options.base, extras)
}
