// -----------------------------------------------------------------------------
// Modules

mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use reflect::{Reflect, reflect_hasher};

// -----------------------------------------------------------------------------
// Macros

/// Implements the casting methods of [`Reflect`] for a given kind.
///
/// `Map` types must implement [`Map`](crate::ops::Map).
macro_rules! impl_reflect_cast_fn {
    (Map) => {
        $crate::reflection::impl_reflect_cast_fn!(@common);

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::Map(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::Map(self)
        }
    };
    (Opaque) => {
        $crate::reflection::impl_reflect_cast_fn!(@common);

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::Opaque(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::Opaque(self)
        }
    };
    (@common) => {
        #[inline]
        fn reflect_type_path(&self) -> &'static str {
            ::core::any::type_name::<Self>()
        }

        #[inline(always)]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline(always)]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline(always)]
        fn into_reflect(self: ::alloc::boxed::Box<Self>) -> ::alloc::boxed::Box<dyn $crate::Reflect> {
            self
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

/// Implements [`Reflect`] and [`Typed`] for a type whose structure is opaque
/// to the reflection system.
///
/// The type must implement `PartialEq` and `Debug`. Append `: Hash` to also
/// provide [`Reflect::reflect_hash`], which is required for keys of a
/// [`DynamicMap`].
///
/// Pair it with [`TypeRegistry::register_serde`] to make the type
/// (de)serializable through `serde`.
///
/// # Examples
///
/// ```
/// use kv_reflect::{Reflect, impl_reflect_opaque};
///
/// #[derive(PartialEq, Eq, Hash, Debug)]
/// struct UserId(u32);
///
/// impl_reflect_opaque!(UserId: Hash);
///
/// let id: &dyn Reflect = &UserId(7);
/// assert!(id.reflect_hash().is_some());
/// assert_eq!(id.reflect_eq(&UserId(7)), Some(true));
/// ```
///
/// [`Typed`]: crate::info::Typed
/// [`DynamicMap`]: crate::ops::DynamicMap
/// [`TypeRegistry::register_serde`]: crate::registry::TypeRegistry::register_serde
#[macro_export]
macro_rules! impl_reflect_opaque {
    (@impl $ty:ty, { $($extra:tt)* }) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> $crate::info::TypeInfo {
                $crate::info::TypeInfo::Opaque($crate::info::OpaqueInfo::new::<Self>())
            }
        }

        impl $crate::Reflect for $ty {
            fn reflect_type_path(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn as_reflect(&self) -> &dyn $crate::Reflect {
                self
            }

            fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
                self
            }

            fn into_reflect(
                self: $crate::__macro_exports::Box<Self>,
            ) -> $crate::__macro_exports::Box<dyn $crate::Reflect> {
                self
            }

            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Opaque(self)
            }

            fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
                $crate::ops::ReflectMut::Opaque(self)
            }

            fn reflect_eq(&self, other: &dyn $crate::Reflect) -> ::core::option::Option<bool> {
                ::core::option::Option::Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other)),
                )
            }

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }

            $($extra)*
        }
    };
    ($ty:ty) => {
        $crate::impl_reflect_opaque!(@impl $ty, {});
    };
    ($ty:ty : Hash) => {
        $crate::impl_reflect_opaque!(@impl $ty, {
            fn reflect_hash(&self) -> ::core::option::Option<u64> {
                let mut hasher = $crate::reflect_hasher();
                ::core::hash::Hash::hash(self, &mut hasher);
                ::core::option::Option::Some(::core::hash::Hasher::finish(&hasher))
            }
        });
    };
}
