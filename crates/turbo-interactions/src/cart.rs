//! Cart badge and add-to-cart flow.

use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;
use turbo_data::{FetchClient, FetchError, FormFields, HttpTransport};
use turbo_observability::StructuredLogger;

use crate::config::{FormConfig, StorefrontConfig};
use crate::flash::{FlashCategory, FlashMessages};
use crate::{Document, Element, InteractionError, Platform};

/// Reply from the cart-count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartCount {
    pub count: u64,
}

/// Reply from the add-to-cart endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddToCartReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl AddToCartReply {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Server message, unless absent or blank.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// What the badge should look like for a given count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeState {
    Hidden,
    Visible(u64),
}

impl BadgeState {
    pub fn from_count(count: u64) -> Self {
        if count == 0 {
            Self::Hidden
        } else {
            Self::Visible(count)
        }
    }

    pub fn apply<E: Element>(&self, badge: &E) -> Result<(), InteractionError> {
        match self {
            Self::Hidden => badge.set_style("display", "none"),
            Self::Visible(count) => {
                badge.set_text_content(&count.to_string());
                badge.set_style("display", "inline-flex")
            }
        }
    }
}

/// A selection the shopper still has to make.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no color selected")]
    MissingColor,
    #[error("no size selected")]
    MissingSize,
}

/// Validated add-to-cart submission.
///
/// Carries every submitted field, product id and file inputs included, so
/// the server receives the form exactly as the shopper filled it in.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCartRequest {
    fields: FormFields,
}

impl AddToCartRequest {
    pub fn from_form(fields: FormFields, form: &FormConfig) -> Result<Self, SelectionError> {
        fields
            .non_empty(&form.color_field)
            .ok_or(SelectionError::MissingColor)?;
        fields
            .non_empty(&form.size_field)
            .ok_or(SelectionError::MissingSize)?;
        Ok(Self { fields })
    }

    pub fn into_fields(self) -> FormFields {
        self.fields
    }
}

/// Which branch an add-to-cart submission took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToCartOutcome {
    /// Color or size missing; nothing was sent.
    Invalid(SelectionError),
    /// Server accepted the item.
    Added { message: String },
    /// Server answered with a failure status.
    Rejected { message: String },
    /// No usable reply (network failure or unreadable body).
    ConnectionFailed,
}

/// Keeps the cart badge in sync and drives the add-to-cart form.
pub struct CartController<D: Document, P: Platform> {
    document: D,
    client: FetchClient,
    flash: Rc<FlashMessages<D, P>>,
    config: StorefrontConfig,
    logger: StructuredLogger,
}

impl<D: Document, P: Platform> CartController<D, P> {
    pub fn new(
        document: D,
        transport: Rc<dyn HttpTransport>,
        flash: Rc<FlashMessages<D, P>>,
        config: StorefrontConfig,
        logger: &StructuredLogger,
    ) -> Self {
        let mut client = FetchClient::new(transport).with_default_header("Accept", "application/json");
        if let Some(base_url) = &config.api.base_url {
            client = client.with_base_url(base_url.clone());
        }
        Self {
            document,
            client,
            flash,
            config,
            logger: logger.for_component("cart"),
        }
    }

    async fn fetch_count(&self) -> Result<CartCount, FetchError> {
        self.client
            .get(self.config.api.cart_count_path.as_str())
            .send()
            .await?
            .json()
    }

    /// Re-read the cart count and update the badge.
    ///
    /// Failures are logged and leave the badge as it was. Returns the
    /// count that was applied.
    pub async fn update_cart_counter(&self) -> Option<u64> {
        let count = match self.fetch_count().await {
            Ok(reply) => reply.count,
            Err(e) => {
                self.logger
                    .error_with("failed to refresh cart counter", &[("error", &e)]);
                return None;
            }
        };

        let Some(badge) = self
            .document
            .get_element_by_id(&self.config.selectors.cart_counter_id)
        else {
            self.logger.debug("no cart badge on this page");
            return Some(count);
        };

        if let Err(e) = BadgeState::from_count(count).apply(&badge) {
            self.logger
                .error_with("failed to update cart badge", &[("error", &e)]);
            return None;
        }

        self.logger
            .debug_builder("cart counter updated")
            .field_u64("count", count)
            .emit();
        Some(count)
    }

    /// Handle one submission of the add-to-cart form.
    ///
    /// On success the badge refresh runs after the reply is handled, in
    /// the same task.
    pub async fn submit_add_to_cart(&self, fields: FormFields) -> AddToCartOutcome {
        let messages = &self.config.messages;

        let request = match AddToCartRequest::from_form(fields, &self.config.form) {
            Ok(request) => request,
            Err(e) => {
                self.logger
                    .info_builder("add to cart blocked")
                    .field("reason", e.to_string())
                    .emit();
                self.flash.show(&messages.missing_selection, FlashCategory::Danger);
                return AddToCartOutcome::Invalid(e);
            }
        };

        let reply = self
            .client
            .post(self.config.api.cart_add_path.as_str())
            .form(request.into_fields())
            .send()
            .await
            .and_then(|response| response.json::<AddToCartReply>());

        match reply {
            Ok(reply) if reply.is_success() => {
                let message = reply.message().unwrap_or(messages.added.as_str()).to_string();
                self.flash.show(&message, FlashCategory::Success);
                self.update_cart_counter().await;
                AddToCartOutcome::Added { message }
            }
            Ok(reply) => {
                let message = reply.message().unwrap_or(messages.add_failed.as_str()).to_string();
                self.logger
                    .warn_builder("add to cart rejected")
                    .field("status", reply.status.clone())
                    .emit();
                self.flash.show(&message, FlashCategory::Danger);
                AddToCartOutcome::Rejected { message }
            }
            Err(e) => {
                self.logger
                    .error_with("add to cart request failed", &[("error", &e)]);
                self.flash.show(&messages.connection_error, FlashCategory::Danger);
                AddToCartOutcome::ConnectionFailed
            }
        }
    }
}
