//! Database entities for the rental domain.
//!
//! Catalog entities (cars, packs, places, added options, clients) are
//! reference data: the booking path reads them and never writes them.
//! `reservation` and `reservation_option` form the booking aggregate.

pub mod added_option;
pub mod car;
pub mod client;
pub mod pack;
pub mod pack_item;
pub mod place;
pub mod reservation;
pub mod reservation_option;
