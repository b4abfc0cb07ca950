use alloc::string::String;

use crate::registry::{
    FromType, GetTypeMeta, TypeMeta, TypeTraitDefault, TypeTraitDeserialize, TypeTraitSerialize,
};

macro_rules! impl_native {
    ($($ty:ty $(: $hash:ident)?),* $(,)?) => {
        $(
            crate::impl_reflect_opaque!($ty $(: $hash)?);

            impl GetTypeMeta for $ty {
                fn get_type_meta() -> TypeMeta {
                    let mut type_meta = TypeMeta::with_capacity::<Self>(3);
                    type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                    type_meta.insert_trait::<TypeTraitSerialize>(FromType::<Self>::from_type());
                    type_meta.insert_trait::<TypeTraitDeserialize>(FromType::<Self>::from_type());
                    type_meta
                }
            }
        )*
    };
}

impl_native! {
    (): Hash,
    bool: Hash,
    char: Hash,
    u8: Hash,
    u16: Hash,
    u32: Hash,
    u64: Hash,
    u128: Hash,
    usize: Hash,
    i8: Hash,
    i16: Hash,
    i32: Hash,
    i64: Hash,
    i128: Hash,
    isize: Hash,
    f32,
    f64,
    String: Hash,
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn native_types_are_opaque() {
        assert_eq!(<i32 as Typed>::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(<String as Typed>::type_info().ty().path(), "alloc::string::String");
    }

    #[test]
    fn hash_follows_equality() {
        let a: &dyn Reflect = &String::from("key");
        let b: &dyn Reflect = &String::from("key");
        assert_eq!(a.reflect_eq(b), Some(true));
        assert_eq!(a.reflect_hash(), b.reflect_hash());
        assert!(a.reflect_hash().is_some());
        assert!(1.0_f32.reflect_hash().is_none());
    }
}
