//! The composition engine.
//!
//! Every decorator hands its schema fragment and its own behaviours to
//! [`compose`], which adds everything driven by [`PropertyOptions`]:
//! renaming, defaults, optional/nullable handling, array rules and the
//! merged schema.

use crate::field::{Behavior, FieldSpec};
use crate::options::PropertyOptions;
use apidto_openapi::JsonSchema;
use apidto_validate::rules;

/// Combine a type fragment, the shared options and the decorator's own
/// behaviours into one field spec.
///
/// The behaviour list always has the same shape, with `Behavior::Noop` in
/// unused slots:
///
/// 1. `Expose`
/// 2. `Default`
/// 3. `Force`
/// 4. `SkipIfAbsent`
/// 5. `SkipIfNull`
/// 6. `extras`, in order
/// 7. `isArray`
/// 8. `arrayMinSize`
/// 9. `arrayMaxSize`
/// 10. `Schema`
pub fn compose<T>(
    fragment: JsonSchema,
    options: &PropertyOptions<T>,
    extras: Vec<Behavior>,
) -> FieldSpec {
    let (min, max) = options
        .is_array
        .as_ref()
        .map(|shape| shape.bounds())
        .unwrap_or((None, None));
    let force = options.is_array.as_ref().is_some_and(|shape| shape.force);

    let mut behaviors = Vec::with_capacity(10 + extras.len());
    behaviors.push(Behavior::Expose {
        name: options.name.clone(),
    });
    behaviors.push(
        options
            .default
            .clone()
            .map_or(Behavior::Noop, Behavior::Default),
    );
    behaviors.push(if force { Behavior::Force } else { Behavior::Noop });
    behaviors.push(if options.optional {
        Behavior::SkipIfAbsent
    } else {
        Behavior::Noop
    });
    behaviors.push(if options.nullable {
        Behavior::SkipIfNull
    } else {
        Behavior::Noop
    });
    behaviors.extend(extras);
    behaviors.push(if options.is_array() {
        Behavior::rule(rules::is_array())
    } else {
        Behavior::Noop
    });
    behaviors.push(
        min.filter(|min| *min > 0)
            .map_or(Behavior::Noop, |min| Behavior::rule(rules::array_min_size(min))),
    );
    behaviors.push(max.map_or(Behavior::Noop, |max| {
        Behavior::rule(rules::array_max_size(max))
    }));
    behaviors.push(Behavior::Schema(merge_schema(fragment, options, min, max)));

    FieldSpec::new(behaviors)
}

fn merge_schema<T>(
    fragment: JsonSchema,
    options: &PropertyOptions<T>,
    min: Option<usize>,
    max: Option<usize>,
) -> JsonSchema {
    let mut schema = if options.is_array() {
        let mut array = JsonSchema::array(fragment);
        array.min_items = min.map(|n| n as u64);
        array.max_items = max.map(|n| n as u64);
        array
    } else {
        fragment
    };

    if options.nullable {
        match schema.one_of.as_mut() {
            Some(members) => {
                for member in members {
                    member.nullable = Some(true);
                }
            }
            None => schema.nullable = Some(true),
        }
    }
    if options.description.is_some() {
        schema.description = options.description.clone();
    }
    if options.deprecated {
        schema.deprecated = Some(true);
    }
    if options.example.is_some() {
        schema.example = options.example.clone();
    }
    if options.default.is_some() {
        schema.default = options.default.clone();
    }
    schema
}
