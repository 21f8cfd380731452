//! DTO declarations.

use crate::field::FieldSpec;
use apidto_validate::ValidationErrors;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A `serde` struct whose fields are declared with field specs.
///
/// Property names in the schema are the struct's serde field names; wire
/// names come from each field's `name` option.
///
/// Implement it with the [`dto!`](crate::dto!) macro:
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct CreatePet {
///     name: String,
///     age: Option<f64>,
/// }
///
/// dto!(CreatePet {
///     name => is_string(StringOptions::new().min_length(1)),
///     age => is_number(NumberOptions::new().integer().optional()),
/// });
/// ```
pub trait Dto: Serialize + DeserializeOwned + 'static {
    /// Component name in generated documents.
    fn dto_name() -> &'static str;

    /// Field specs of the type, built once per process.
    fn schema() -> &'static DtoSchema;

    /// Checks spanning several fields, run after binding succeeded.
    fn check(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Enum usable with `EnumOptions::of`.
pub trait DtoEnum: Serialize + Sized + 'static {
    /// Component name of the enum.
    const NAME: &'static str;

    fn variants() -> Vec<Self>;
}

/// Ordered field specs of one DTO type.
#[derive(Debug)]
pub struct DtoSchema {
    name: &'static str,
    fields: Vec<(&'static str, FieldSpec)>,
}

impl DtoSchema {
    pub fn builder(name: &'static str) -> DtoSchemaBuilder {
        DtoSchemaBuilder {
            name,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order, keyed by property name.
    pub fn fields(&self) -> &[(&'static str, FieldSpec)] {
        &self.fields
    }

    pub fn field(&self, property: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, spec)| spec)
    }

    /// Whether `key` is the wire name of a declared field.
    pub fn declares_wire_name(&self, key: &str) -> bool {
        self.fields
            .iter()
            .any(|(property, spec)| spec.wire_name(property) == key)
    }
}

/// Builder for [`DtoSchema`].
#[derive(Debug)]
pub struct DtoSchemaBuilder {
    name: &'static str,
    fields: Vec<(&'static str, FieldSpec)>,
}

impl DtoSchemaBuilder {
    pub fn field(mut self, property: &'static str, spec: FieldSpec) -> Self {
        self.fields.push((property, spec));
        self
    }

    pub fn build(self) -> DtoSchema {
        crate::trace_debug!(dto = self.name, fields = self.fields.len(), "schema built");
        DtoSchema {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// Implement [`Dto`] for a struct from a list of `field => spec` pairs.
///
/// The component name defaults to the type name; `dto!(Type as "Name" { .. })`
/// overrides it. A trailing `check = path` installs `path(&self)` as
/// [`Dto::check`]:
///
/// ```rust,ignore
/// dto!(Range {
///     from => is_number(NumberOptions::new()),
///     to => is_number(NumberOptions::new()),
/// } check = check_range);
/// ```
#[macro_export]
macro_rules! dto {
    (@impl $ty:ident, $name:expr, { $($field:ident => $spec:expr),* } $(, $check:path)?) => {
        impl $crate::Dto for $ty {
            fn dto_name() -> &'static str {
                $name
            }

            fn schema() -> &'static $crate::DtoSchema {
                static SCHEMA: ::std::sync::OnceLock<$crate::DtoSchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::DtoSchema::builder($name)
                        $(.field(stringify!($field), $spec))*
                        .build()
                })
            }

            $(
                fn check(&self) -> ::std::result::Result<(), $crate::__private::ValidationErrors> {
                    $check(self)
                }
            )?
        }
    };
    ($ty:ident as $name:literal { $($field:ident => $spec:expr),* $(,)? } $(check = $check:path)?) => {
        $crate::dto!(@impl $ty, $name, { $($field => $spec),* } $(, $check)?);
    };
    ($ty:ident { $($field:ident => $spec:expr),* $(,)? } $(check = $check:path)?) => {
        $crate::dto!(@impl $ty, stringify!($ty), { $($field => $spec),* } $(, $check)?);
    };
}
