use alloc::boxed::Box;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// A container providing [`Default`] support for reflected types.
///
/// Converters use it as the instance factory: a map is created empty through
/// this trait, then populated entry by entry.
///
/// # Examples
///
/// ```
/// use kv_reflect::{Reflect, registry::{TypeRegistry, TypeTraitDefault}};
///
/// let registry = TypeRegistry::new(); // `new` will register some basic type
///
/// let generator = registry
///     .get_with_type_path("alloc::string::String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let s: Box<dyn Reflect> = generator.default();
///
/// assert_eq!(s.take::<String>().unwrap(), "");
/// ```
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    /// Call T's [`Default`]
    ///
    /// [`TypeTraitDefault`] does not have a type flag,
    /// but the functions used internally are type specific.
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Default + Typed + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
