use core::fmt;

use crate::Reflect;
use crate::ops::{Map, ReflectRef};

/// A function used for implementing [`Reflect::reflect_eq`] on maps.
///
/// Returns `Some(false)` if `y` is not a map or has a different length.
/// Otherwise every value of `x` must be equal to the value under the same
/// key in `y`.
pub fn map_eq(x: &dyn Map, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Map(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.len() != y.len() {
        return Some(false);
    }

    for (key, val) in x.iter() {
        let Some(y_val) = y.get(key) else {
            return Some(false);
        };
        let result = val.reflect_eq(y_val);
        if result != Some(true) {
            return result;
        }
    }

    Some(true)
}

/// A function used for implementing [`Reflect::reflect_debug`] on maps.
pub fn map_debug(dyn_map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_map();
    for (key, value) in dyn_map.iter() {
        debug.entry(&key as &dyn fmt::Debug, &value as &dyn fmt::Debug);
    }
    debug.finish()
}
