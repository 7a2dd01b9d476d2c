#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ecosystem;
pub mod modules;
pub mod nonce;
pub mod operation;

pub use ecosystem::*;
pub use modules::*;
pub use nonce::*;
pub use operation::*;
