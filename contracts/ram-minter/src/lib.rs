//! Ranked Auction Mechanism (RAM) minter.
//!
//! Each project of a core token contract is sold through one batch auction.
//! Bidders pick one of 512 price slots. Once the auction is sold out every new
//! bid must outbid the lowest bid, which gets evicted and refunded. After the
//! auction every winner pays the same clearing price, the lowest winning bid,
//! and the excess is settled back.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod auction;
pub mod bid_book;
pub mod bitmap;
pub mod collaborators;
pub mod events;
pub mod external;
pub mod guard;
pub mod price;
pub mod settlement;
pub mod state;

mod contract;
