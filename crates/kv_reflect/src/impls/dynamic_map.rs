use crate::ops::DynamicMap;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

impl GetTypeMeta for DynamicMap {
    fn get_type_meta() -> TypeMeta {
        let mut type_meta = TypeMeta::with_capacity::<Self>(1);
        type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        type_meta
    }
}
