// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration macros.
//!
//! These macros generate the [`Record`](crate::ports::Record) and
//! [`Setting`](crate::domain::Setting) implementations that let a type take part in
//! path-based binding.

/// Makes a struct addressable by field path.
///
/// Lists the fields that paths may name. The short form uses the Rust field names as path
/// segments; the long form maps explicit names onto fields, and a field may be marked
/// `(read_only)` to refuse assignments.
///
/// The struct must implement `Default` (used when an unset `Option` pointing at it is
/// allocated) and `serde::Deserialize` (used when a whole record is assigned from text).
///
/// # Examples
///
/// ```
/// use cfgbind::bind_record;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Child {
///     name: String,
/// }
///
/// #[derive(Debug, Default, Deserialize)]
/// struct AppConfig {
///     name: String,
///     child: Option<Child>,
///     version: u32,
/// }
///
/// bind_record!(Child { name });
///
/// bind_record! {
///     AppConfig {
///         "Name" => name,
///         "Child" => child,
///         "Version" => version (read_only),
///     }
/// }
/// ```
#[macro_export]
macro_rules! bind_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::bind_record!($ty { $(stringify!($field) => $field),* });
    };
    ($ty:ty { $($name:expr => $field:ident $(($access:ident))?),* $(,)? }) => {
        impl $crate::ports::Record for $ty {
            fn field_names(&self) -> &'static [&'static str] {
                &[$($name),*]
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<$crate::ports::FieldMut<'_>> {
                $(
                    if name == $name {
                        return ::core::option::Option::Some($crate::ports::FieldMut::new(
                            $name,
                            &mut self.$field,
                            $crate::__bind_settable!($($access)?),
                        ));
                    }
                )*
                ::core::option::Option::None
            }
        }

        impl $crate::domain::Setting for $ty {
            const KIND: $crate::ports::Kind = $crate::ports::Kind::Record;

            fn zero() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(<$ty as ::core::default::Default>::default())
            }

            fn parse_text(
                text: &str,
            ) -> ::core::result::Result<Self, $crate::domain::errors::BoxError> {
                $crate::domain::setting::decode_data(text)
            }

            fn parse_document(
                document: $crate::domain::setting::Document,
            ) -> ::core::result::Result<Self, $crate::domain::errors::BoxError> {
                $crate::domain::setting::decode_document(document)
            }

            fn record(&mut self) -> ::core::option::Option<&mut dyn $crate::ports::Record> {
                ::core::option::Option::Some(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bind_settable {
    () => {
        true
    };
    (read_only) => {
        false
    };
}

/// Binds types that parse themselves from text through [`FromText`](crate::domain::FromText).
///
/// The types must implement `Default`, which is their zero value behind an unset `Option`.
///
/// # Examples
///
/// ```
/// use cfgbind::domain::errors::BoxError;
/// use cfgbind::domain::{FromText, Setting};
/// use cfgbind::text_setting;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Hex(u32);
///
/// impl FromText for Hex {
///     fn from_text(text: &[u8]) -> Result<Self, BoxError> {
///         let text = std::str::from_utf8(text)?;
///         Ok(Hex(u32::from_str_radix(text.trim_start_matches("0x"), 16)?))
///     }
/// }
///
/// text_setting!(Hex);
///
/// assert_eq!(Hex::parse_text("0xff").unwrap(), Hex(255));
/// ```
#[macro_export]
macro_rules! text_setting {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::Setting for $ty {
                const KIND: $crate::ports::Kind = $crate::ports::Kind::Text;

                fn zero() -> ::core::option::Option<Self> {
                    ::core::option::Option::Some(<$ty as ::core::default::Default>::default())
                }

                fn parse_text(
                    text: &str,
                ) -> ::core::result::Result<Self, $crate::domain::errors::BoxError> {
                    <$ty as $crate::domain::FromText>::from_text(text.as_bytes())
                }
            }
        )+
    };
}

/// Binds serde-deserializable leaf types, decoded from structured data (JSON) text.
///
/// The types must implement `Default` and `serde::Deserialize`.
///
/// # Examples
///
/// ```
/// use cfgbind::data_setting;
/// use cfgbind::domain::Setting;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// #[serde(rename_all = "lowercase")]
/// enum Mode {
///     #[default]
///     Debug,
///     Release,
/// }
///
/// data_setting!(Mode);
///
/// assert_eq!(Mode::parse_text("release").unwrap(), Mode::Release);
/// ```
#[macro_export]
macro_rules! data_setting {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::Setting for $ty {
                const KIND: $crate::ports::Kind = $crate::ports::Kind::Data;

                fn zero() -> ::core::option::Option<Self> {
                    ::core::option::Option::Some(<$ty as ::core::default::Default>::default())
                }

                fn parse_text(
                    text: &str,
                ) -> ::core::result::Result<Self, $crate::domain::errors::BoxError> {
                    $crate::domain::setting::decode_data(text)
                }

                fn parse_document(
                    document: $crate::domain::setting::Document,
                ) -> ::core::result::Result<Self, $crate::domain::errors::BoxError> {
                    $crate::domain::setting::decode_document(document)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::Setting;
    use crate::ports::{Kind, Record};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Inner {
        port: u16,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Outer {
        title: String,
        inner: Inner,
        locked: bool,
    }

    bind_record!(Inner { port });

    bind_record! {
        Outer {
            "Title" => title,
            "Inner" => inner,
            "Locked" => locked (read_only),
        }
    }

    #[test]
    fn test_short_form_uses_field_names() {
        let mut inner = Inner::default();
        assert_eq!(inner.field_names(), &["port"]);
        assert!(inner.field_mut("port").is_some());
        assert!(inner.field_mut("Port").is_none());
    }

    #[test]
    fn test_long_form_maps_names() {
        let mut outer = Outer::default();
        assert_eq!(outer.field_names(), &["Title", "Inner", "Locked"]);
        let title = outer.field_mut("Title").unwrap();
        assert_eq!(title.name(), "Title");
        assert_eq!(title.kind(), Kind::String);
        assert!(title.can_set());
        assert!(outer.field_mut("title").is_none());
    }

    #[test]
    fn test_read_only_flag() {
        let mut outer = Outer::default();
        let locked = outer.field_mut("Locked").unwrap();
        assert!(!locked.can_set());
    }

    #[test]
    fn test_record_setting() {
        assert_eq!(Outer::KIND, Kind::Record);
        let inner = Inner::parse_text(r#"{"port": 8080}"#).unwrap();
        assert_eq!(inner.port, 8080);

        let mut outer = Outer::default();
        assert!(outer.field_mut("Inner").unwrap().kind() == Kind::Record);
        assert_eq!(outer.record().map(|r| r.field_names().len()), Some(3));
        assert!(!outer.locked);
        assert!(outer.title.is_empty());
    }
}
