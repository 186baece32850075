#![cfg_attr(not(feature = "std"), no_std)]

//! Types shared by the RAM minter contracts: errors, event tags, access
//! control and the micro-percent share type.

pub use crate::{authority::*, constants::*, errors::*, percentage::*, types::*};
use concordium_std::*;

pub mod test;

mod authority;
mod constants;
mod errors;
mod percentage;
mod types;
