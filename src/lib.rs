#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use kv_reflect as reflect;
pub use kv_utils as utils;
