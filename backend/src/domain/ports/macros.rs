//! `define_port_error!`: declares a driven-port error enum.
//!
//! The enum derives `thiserror::Error` with the given messages, and every
//! variant gains a snake_case constructor whose parameters accept anything
//! convertible into the field types:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Offline => "store offline",
//!         Query { message: String } => "query failed: {message}",
//!     }
//! }
//! let err = StoreError::query("timeout");
//! ```

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),+ } )?,
            )+
        }

        impl $name {
            $( define_port_error!(@constructor $variant $( { $($field: $ty),+ } )?); )+
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = "Build the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };
}

pub(crate) use define_port_error;
