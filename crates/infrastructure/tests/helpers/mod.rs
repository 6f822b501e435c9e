#![allow(dead_code)]
#![allow(unused_imports)]

mod gateway_api_mock;

pub use builders::*;
pub use gateway_api_mock::*;
