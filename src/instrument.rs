//! Element instrumentation: deciding which elements become draggable and
//! which identifier each one gets.
//!
//! The DOM host walks the page once and asks [`Instrumentor::plan`] about each
//! element. Listener wiring lives in the host; this module only makes the
//! decisions so they can be tested without a browser.

#[cfg(test)]
#[path = "instrument_test.rs"]
mod instrument_test;

use crate::config::DragConfig;
use crate::page::ElementId;

/// Hands out `<prefix><n>` identifiers, counting from zero.
///
/// Scoped to one instrumentation run rather than the process.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

impl IdGenerator {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 0 }
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// How many identifiers have been issued.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// What the host needs to know about an element to decide on it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub tag: &'a str,
    /// Existing DOM id; empty when unset.
    pub id: &'a str,
    pub classes: &'a [String],
    /// An HTML element. SVG and `MathML` nodes carry no inline style the host can pin.
    pub html: bool,
}

/// Why an element was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Tag,
    NotHtml,
    Banner,
    AlreadyFloating,
    AlreadyInstrumented,
}

/// Decision for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Skip(SkipReason),
    Instrument {
        id: ElementId,
        /// `id` was generated and must be written to the element.
        assign: bool,
    },
}

/// Totals for one run, for the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstrumentReport {
    pub seen: usize,
    pub instrumented: usize,
    pub skipped: usize,
    pub assigned: usize,
}

impl InstrumentReport {
    pub fn record(&mut self, plan: &Plan) {
        self.seen += 1;
        match plan {
            Plan::Skip(_) => self.skipped += 1,
            Plan::Instrument { assign, .. } => {
                self.instrumented += 1;
                if *assign {
                    self.assigned += 1;
                }
            }
        }
    }
}

pub struct Instrumentor<'c> {
    config: &'c DragConfig,
    ids: IdGenerator,
}

impl<'c> Instrumentor<'c> {
    #[must_use]
    pub fn new(config: &'c DragConfig) -> Self {
        Self { config, ids: IdGenerator::new(config.id_prefix.clone()) }
    }

    /// Decide on one element, generating an identifier when it has none.
    ///
    /// Elements already carrying the floating or instrumented marker are
    /// skipped, so a second run over the same page registers nothing twice.
    pub fn plan(&mut self, candidate: Candidate<'_>) -> Plan {
        let markers = &self.config.markers;
        let has = |name: &str| candidate.classes.iter().any(|c| c == name);

        if self.config.is_skipped_tag(candidate.tag) {
            return Plan::Skip(SkipReason::Tag);
        }
        if !candidate.html {
            return Plan::Skip(SkipReason::NotHtml);
        }
        if has(&markers.banner) {
            return Plan::Skip(SkipReason::Banner);
        }
        if has(&markers.floating) {
            return Plan::Skip(SkipReason::AlreadyFloating);
        }
        if has(&markers.instrumented) {
            return Plan::Skip(SkipReason::AlreadyInstrumented);
        }

        if candidate.id.is_empty() {
            Plan::Instrument { id: self.ids.next_id(), assign: true }
        } else {
            Plan::Instrument { id: ElementId::new(candidate.id), assign: false }
        }
    }

    /// The CSS selector matching every element the host should offer to [`Instrumentor::plan`].
    #[must_use]
    pub fn selector(&self) -> String {
        let mut selector = String::from("body *");
        for tag in &self.config.skipped_tags {
            selector.push_str(&format!(":not({tag})"));
        }
        selector.push_str(&format!(":not(.{})", self.config.markers.banner));
        selector
    }

    #[must_use]
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }
}
