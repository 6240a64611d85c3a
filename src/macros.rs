/// Defines an open set of named native constants.
///
/// Unlike a Rust `enum`, the resulting type can hold any value of the underlying native type,
/// which is needed for codes handed to us by the ForceFeedback framework (or by callers) that we
/// don't know about.
macro_rules! ffi_enum {
    (
        $( #[$attrs:meta] )*
        $v:vis enum $name:ident: $native:ty {
            $(
                $( #[$variant_attrs:meta] )*
                $variant:ident = $value:expr
            ),+
            $(,)?
        }
    ) => {
        $( #[$attrs] )*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        $v struct $name(pub(crate) $native);

        impl $name {
            $(
                $( #[$variant_attrs] )*
                $v const $variant: Self = Self($value);
            )+

            #[inline]
            pub const fn from_raw(raw: $native) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> $native {
                self.0
            }

            #[allow(dead_code, unreachable_patterns)]
            fn variant_name(&self) -> Option<&'static str> {
                match self {
                    $(
                        &Self::$variant => Some(stringify!($variant)),
                    )*
                    _ => None,
                }
            }

            /// Returns whether this value is one of the named constants.
            #[allow(dead_code)]
            pub fn is_known(&self) -> bool {
                self.variant_name().is_some()
            }
        }
    };
}
