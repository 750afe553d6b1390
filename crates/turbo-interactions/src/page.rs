//! Page bootstrap.

use std::rc::Rc;

use turbo_data::HttpTransport;
use turbo_observability::StructuredLogger;

use crate::carousel::{init_carousels, Carousel};
use crate::cart::CartController;
use crate::config::StorefrontConfig;
use crate::flash::FlashMessages;
use crate::{Document, Element, Platform};

/// What [`Storefront::boot`] found on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub carousels: usize,
    pub add_to_cart_form: bool,
}

/// All behaviour attached to one page.
pub struct Storefront<D: Document, P: Platform> {
    carousels: Vec<Rc<Carousel<D::Element>>>,
    flash: Rc<FlashMessages<D, P>>,
    add_to_cart_form: bool,
}

impl<D: Document, P: Platform> Storefront<D, P> {
    /// Attach every behaviour to a parsed page.
    ///
    /// Carousels are rendered and wired, the cart badge refresh is
    /// spawned unconditionally, and the add-to-cart form is wired when the
    /// page has one. Nothing here fails: problems are logged and the
    /// affected behaviour is skipped.
    pub fn boot(
        document: D,
        platform: Rc<P>,
        transport: Rc<dyn HttpTransport>,
        config: StorefrontConfig,
        logger: &StructuredLogger,
    ) -> Self {
        let carousels = init_carousels(&document, &config.selectors, logger);

        let flash = Rc::new(FlashMessages::new(
            document.clone(),
            Rc::clone(&platform),
            config.selectors.flash_container_id.clone(),
            config.flash.clone(),
            logger,
        ));

        let form_id = config.selectors.add_to_cart_form_id.clone();
        let cart = Rc::new(CartController::new(
            document.clone(),
            transport,
            Rc::clone(&flash),
            config,
            logger,
        ));

        let refresh = Rc::clone(&cart);
        platform.spawn_local(Box::pin(async move {
            refresh.update_cart_counter().await;
        }));

        let add_to_cart_form = match document.get_element_by_id(&form_id) {
            Some(form) => {
                let (cart, spawner) = (Rc::clone(&cart), Rc::clone(&platform));
                let wired = form.on_submit(Box::new(move |fields| {
                    let cart = Rc::clone(&cart);
                    spawner.spawn_local(Box::pin(async move {
                        cart.submit_add_to_cart(fields).await;
                    }));
                }));
                match wired {
                    Ok(()) => true,
                    Err(e) => {
                        logger.error_with("failed to wire add-to-cart form", &[("error", &e)]);
                        false
                    }
                }
            }
            None => false,
        };

        let storefront = Self {
            carousels,
            flash,
            add_to_cart_form,
        };

        let report = storefront.report();
        logger
            .info_builder("storefront interactions ready")
            .field_u64("carousels", report.carousels as u64)
            .field_bool("add_to_cart_form", report.add_to_cart_form)
            .emit();

        storefront
    }

    pub fn report(&self) -> BootReport {
        BootReport {
            carousels: self.carousels.len(),
            add_to_cart_form: self.add_to_cart_form,
        }
    }

    pub fn carousels(&self) -> &[Rc<Carousel<D::Element>>] {
        &self.carousels
    }

    pub fn flash(&self) -> &Rc<FlashMessages<D, P>> {
        &self.flash
    }
}
