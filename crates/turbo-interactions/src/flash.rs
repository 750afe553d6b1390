//! Transient status notifications.
//!
//! Each notification lives on its own timers: fully visible for
//! `visible_ms`, then an opacity fade of `fade_ms`, then detached.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use turbo_observability::StructuredLogger;

use crate::config::FlashConfig;
use crate::{Document, Element, InteractionError, Platform};

/// Notification category. Each maps to a fixed color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Info,
    #[default]
    Success,
    Danger,
}

/// Colors for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashPalette {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }

    /// Class list applied to the notification element.
    pub fn css_class(&self) -> String {
        format!("flash-message flash-{}", self.as_str())
    }

    pub fn palette(&self) -> FlashPalette {
        match self {
            Self::Info => FlashPalette {
                background: "#d1ecf1",
                text: "#0c5460",
                border: "#bee5eb",
            },
            Self::Success => FlashPalette {
                background: "#d4edda",
                text: "#155724",
                border: "#c3e6cb",
            },
            Self::Danger => FlashPalette {
                background: "#f8d7da",
                text: "#721c24",
                border: "#f5c6cb",
            },
        }
    }
}

impl fmt::Display for FlashCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type LiveList<E> = Rc<RefCell<VecDeque<(u64, E)>>>;

/// Displays notifications in the page's notification area.
pub struct FlashMessages<D: Document, P: Platform> {
    document: D,
    platform: Rc<P>,
    container_id: String,
    config: FlashConfig,
    logger: StructuredLogger,
    live: LiveList<D::Element>,
    next_id: Cell<u64>,
}

impl<D: Document, P: Platform> FlashMessages<D, P> {
    pub fn new(
        document: D,
        platform: Rc<P>,
        container_id: impl Into<String>,
        config: FlashConfig,
        logger: &StructuredLogger,
    ) -> Self {
        Self {
            document,
            platform,
            container_id: container_id.into(),
            config,
            logger: logger.for_component("flash"),
            live: Rc::new(RefCell::new(VecDeque::new())),
            next_id: Cell::new(0),
        }
    }

    /// Notifications currently attached, oldest first.
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    /// Show `message` styled as `category`.
    ///
    /// Returns false, doing nothing, when the page has no notification
    /// area.
    pub fn show(&self, message: &str, category: FlashCategory) -> bool {
        let Some(container) = self.document.get_element_by_id(&self.container_id) else {
            self.logger.debug("no notification area on this page");
            return false;
        };

        match self.append(&container, message, category) {
            Ok(()) => true,
            Err(e) => {
                self.logger
                    .error_with("failed to show notification", &[("error", &e)]);
                false
            }
        }
    }

    fn append(
        &self,
        container: &D::Element,
        message: &str,
        category: FlashCategory,
    ) -> Result<(), InteractionError> {
        if let Some(max) = self.config.max_visible {
            // values below 1 behave as 1
            let mut live = self.live.borrow_mut();
            while live.len() >= max.max(1) {
                if let Some((_, oldest)) = live.pop_front() {
                    oldest.remove();
                }
            }
        }

        let element = self.document.create_element("div")?;
        let palette = category.palette();
        element.set_class_name(&category.css_class());
        element.set_style("background-color", palette.background)?;
        element.set_style("color", palette.text)?;
        element.set_style("border", &format!("1px solid {}", palette.border))?;
        element.set_style("opacity", "1")?;
        element.set_style(
            "transition",
            &format!("opacity {}ms ease", self.config.fade_ms),
        )?;
        element.set_text_content(message);
        container.append_child(&element)?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.live.borrow_mut().push_back((id, element.clone()));
        self.schedule_removal(id, element);
        Ok(())
    }

    fn schedule_removal(&self, id: u64, element: D::Element) {
        let platform = Rc::clone(&self.platform);
        let live = Rc::clone(&self.live);
        let logger = self.logger.clone();
        let fade = self.config.fade();

        self.platform.set_timeout(
            self.config.visible(),
            Box::new(move || {
                if let Err(e) = element.set_style("opacity", "0") {
                    logger.error_with("failed to fade notification", &[("error", &e)]);
                }
                platform.set_timeout(
                    fade,
                    Box::new(move || {
                        element.remove();
                        live.borrow_mut().retain(|(live_id, _)| *live_id != id);
                    }),
                );
            }),
        );
    }
}
