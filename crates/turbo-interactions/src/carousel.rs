//! Slide carousels.
//!
//! Every `.carousel` container on the page cycles its `.carousel-item`
//! children independently. Exactly one slide is displayed at a time and
//! navigation wraps in both directions.

use std::cell::RefCell;
use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::SelectorConfig;
use crate::{Document, Element, InteractionError};

/// Container attribute naming the id of the "previous" control.
pub const PREV_CONTROL_ATTR: &str = "data-carousel-prev";
/// Container attribute naming the id of the "next" control.
pub const NEXT_CONTROL_ATTR: &str = "data-carousel-next";

/// Index model for one carousel.
///
/// With zero slides both directions are no-ops and the index stays 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    len: usize,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step forward, wrapping from the last slide to the first.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = if self.index + 1 < self.len {
                self.index + 1
            } else {
                0
            };
        }
        self.index
    }

    /// Step back, wrapping from the first slide to the last.
    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = if self.index > 0 {
                self.index - 1
            } else {
                self.len - 1
            };
        }
        self.index
    }
}

/// One carousel: its slides plus the current position.
pub struct Carousel<E: Element> {
    slides: Vec<E>,
    state: RefCell<CarouselState>,
}

impl<E: Element> Carousel<E> {
    pub fn new(slides: Vec<E>) -> Self {
        let state = CarouselState::new(slides.len());
        Self {
            slides,
            state: RefCell::new(state),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.state.borrow().current()
    }

    /// Display the slide at `index` and hide every other one.
    pub fn show_item(&self, index: usize) -> Result<(), InteractionError> {
        for (i, slide) in self.slides.iter().enumerate() {
            slide.set_style("display", if i == index { "block" } else { "none" })?;
        }
        Ok(())
    }

    pub fn show_next(&self) -> Result<(), InteractionError> {
        let index = self.state.borrow_mut().next();
        self.show_item(index)
    }

    pub fn show_previous(&self) -> Result<(), InteractionError> {
        let index = self.state.borrow_mut().previous();
        self.show_item(index)
    }
}

/// The two navigation elements bound to one carousel.
#[derive(Debug, Clone)]
pub struct CarouselControls<E> {
    pub previous: E,
    pub next: E,
}

/// Find the controls for `container`.
///
/// Explicit `data-carousel-prev`/`data-carousel-next` ids win. Otherwise
/// the element right after the container is "previous" and the one after
/// that is "next".
pub fn resolve_controls<D: Document>(
    document: &D,
    container: &D::Element,
) -> Option<CarouselControls<D::Element>> {
    match (
        container.attribute(PREV_CONTROL_ATTR),
        container.attribute(NEXT_CONTROL_ATTR),
    ) {
        (Some(prev_id), Some(next_id)) => Some(CarouselControls {
            previous: document.get_element_by_id(&prev_id)?,
            next: document.get_element_by_id(&next_id)?,
        }),
        _ => {
            let previous = container.next_element_sibling()?;
            let next = previous.next_element_sibling()?;
            Some(CarouselControls { previous, next })
        }
    }
}

/// Discover every carousel on the page, render slide 0 and wire navigation.
///
/// A carousel whose controls cannot be found is still rendered; it just
/// does not navigate.
pub fn init_carousels<D: Document>(
    document: &D,
    selectors: &SelectorConfig,
    logger: &StructuredLogger,
) -> Vec<Rc<Carousel<D::Element>>> {
    let logger = logger.for_component("carousel");
    let mut carousels = Vec::new();

    for (position, container) in document
        .query_selector_all(&selectors.carousel)
        .into_iter()
        .enumerate()
    {
        let carousel = Rc::new(Carousel::new(
            container.query_selector_all(&selectors.carousel_item),
        ));
        if let Err(e) = carousel.show_item(0) {
            logger.error_with("failed to render first slide", &[("error", &e)]);
        }

        match resolve_controls(document, &container) {
            Some(controls) => {
                if let Err(e) = wire_controls(&carousel, controls, &logger) {
                    logger.error_with("failed to wire carousel controls", &[("error", &e)]);
                }
            }
            None => logger
                .warn_builder("carousel controls not found")
                .field_u64("carousel", position as u64)
                .emit(),
        }

        logger
            .debug_builder("carousel ready")
            .field_u64("carousel", position as u64)
            .field_u64("slides", carousel.slide_count() as u64)
            .emit();
        carousels.push(carousel);
    }

    carousels
}

fn wire_controls<E: Element>(
    carousel: &Rc<Carousel<E>>,
    controls: CarouselControls<E>,
    logger: &StructuredLogger,
) -> Result<(), InteractionError> {
    let (target, log) = (Rc::clone(carousel), logger.clone());
    controls.previous.on_click(Box::new(move || {
        if let Err(e) = target.show_previous() {
            log.error_with("failed to show previous slide", &[("error", &e)]);
        }
    }))?;

    let (target, log) = (Rc::clone(carousel), logger.clone());
    controls.next.on_click(Box::new(move || {
        if let Err(e) = target.show_next() {
            log.error_with("failed to show next slide", &[("error", &e)]);
        }
    }))?;

    Ok(())
}
