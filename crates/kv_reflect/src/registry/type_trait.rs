use alloc::boxed::Box;
use core::any::Any;

/// A capability of a type, stored in its [`TypeMeta`].
///
/// Implemented for every `Clone + Send + Sync + 'static` type.
///
/// [`TypeMeta`]: crate::registry::TypeMeta
pub trait TypeTrait: Any + Send + Sync {
    /// Clones the type trait into a new box.
    fn clone_type_trait(&self) -> Box<dyn TypeTrait>;
}

impl<T: Clone + Any + Send + Sync> TypeTrait for T {
    #[inline]
    fn clone_type_trait(&self) -> Box<dyn TypeTrait> {
        Box::new(self.clone())
    }
}

impl dyn TypeTrait {
    /// Downcasts to the concrete type trait by reference.
    #[inline]
    pub fn downcast_ref<T: TypeTrait>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    /// Downcasts to the concrete type trait by mutable reference.
    #[inline]
    pub fn downcast_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }
}
