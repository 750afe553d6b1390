//! Interactive behaviour for server-rendered TurboCommerce storefront pages.
//!
//! - Carousels: every `.carousel` cycles its slides with its own
//!   previous/next controls.
//! - Cart: the header badge mirrors the server-side cart count, and the
//!   product page's add-to-cart form is submitted in the background.
//! - Flash notifications: short-lived status messages.
//!
//! The behaviour is written against the [`Document`], [`Element`] and
//! [`Platform`] seams, so it runs unchanged in the browser and in native
//! tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_interactions::{Storefront, StorefrontConfig};
//!
//! let storefront = Storefront::boot(
//!     document,
//!     platform,
//!     transport,
//!     StorefrontConfig::default(),
//!     &logger,
//! );
//! ```

pub mod carousel;
pub mod cart;
pub mod config;
mod dom;
mod error;
pub mod flash;
mod page;
mod platform;

#[cfg(test)]
mod testing;

pub use carousel::{Carousel, CarouselState};
pub use cart::{AddToCartOutcome, CartController};
pub use config::StorefrontConfig;
pub use dom::{Document, Element};
pub use error::{ConfigError, InteractionError};
pub use flash::{FlashCategory, FlashMessages};
pub use page::{BootReport, Storefront};
pub use platform::Platform;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Document, Element, FlashCategory, InteractionError, Platform, Storefront,
        StorefrontConfig,
    };
}
