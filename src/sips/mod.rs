//! Scraper for the Logos Energía SIPS portal: authenticated session, search
//! and result page parsing.

pub mod aggregate;
pub mod assemble;
pub mod client;
pub mod cookie_jar;
pub mod csrf;
pub mod helper;
mod html_parsing;
pub mod lookup;
pub mod parsers;
pub mod session;
pub mod table_locator;

pub use lookup::SipsService;
