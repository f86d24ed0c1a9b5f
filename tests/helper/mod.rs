#![allow(dead_code)]

pub mod helper;

pub use helper::*;
