//! Macros for reducing boilerplate when defining records
//!
//! Every record type needs a field enum with the same handful of trait
//! implementations: wire names, kinds, categorical choices, `Display` and
//! `FromStr`. [`record_fields!`](crate::record_fields) generates them from
//! one declaration.

/// Declare the field enum of a record type
///
/// Each line maps a variant to its wire name and [`FieldKind`](crate::core::FieldKind).
/// Categorical fields may pass their allowed values in parentheses.
///
/// # Example
/// ```rust,ignore
/// record_fields! {
///     /// Sortable and filterable reservation fields
///     pub enum ReservationField for "reservations" {
///         GuestName => "guest_name": Text,
///         TotalAmount => "total_amount": Number,
///         Status => "status": Categorical(ReservationStatus::ALL),
///     }
/// }
///
/// assert_eq!(ReservationField::parse("total_amount")?, ReservationField::TotalAmount);
/// ```
#[macro_export]
macro_rules! record_fields {
    (@choices) => {
        &[]
    };
    (@choices $choices:expr) => {
        $choices
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $resource:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal : $kind:ident $(($choices:expr))?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $crate::core::RecordField for $name {
            fn resource() -> &'static str {
                $resource
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant),*]
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }

            fn kind(&self) -> $crate::core::FieldKind {
                match self {
                    $($name::$variant => $crate::core::FieldKind::$kind,)*
                }
            }

            fn choices(&self) -> &'static [&'static str] {
                match self {
                    $($name::$variant => $crate::record_fields!(@choices $($choices)?),)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::RecordField::name(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::ViewError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::core::RecordField>::parse(s)
            }
        }
    };
}

/// Declare a categorical enum stored with fixed wire names
///
/// Generates the enum with serde renames, `as_str()`, `ALL` with every wire
/// name (used as the choices of the matching record field) and a
/// human-readable `label()`.
#[macro_export]
macro_rules! categorical_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $wire:literal, $label:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            /// Every wire value, in declaration order
            pub const ALL: &'static [&'static str] = &[$($wire),*];

            /// Wire value as stored in fixtures and compared by filters
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }

            /// Label shown in the dashboard
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for $crate::core::FieldValue {
            fn from(value: $name) -> Self {
                $crate::core::FieldValue::Text(value.as_str().to_string())
            }
        }
    };
}
