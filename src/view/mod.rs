//! Catalog records rendered as cards, grouped into browse pages.

pub mod cards;
pub mod pages;

pub use cards::{Card, CardAction};
pub use pages::{Page, PageView, Section};
