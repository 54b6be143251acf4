//! Card rendering
//!
//! A surface shows one card per record. On the web it is the page's `<main>`
//! holding `<recipe-card>` elements; elsewhere it is [`MemorySurface`].

use crate::error::Result;
use crate::record::Record;

/// Something that can show recipe cards
pub trait CardSurface {
    /// Append one card carrying `record` as its data payload
    fn append_card(&mut self, record: &Record) -> Result<()>;
    /// Remove every card
    fn clear(&mut self) -> Result<()>;
    /// Cards currently shown
    fn card_count(&self) -> usize;
}

/// Append a card for each record, in order. Does not de-duplicate.
pub fn render_all<V: CardSurface + ?Sized>(records: &[Record], surface: &mut V) -> Result<()> {
    for record in records {
        surface.append_card(record)?;
    }
    log::debug!("Rendered {} cards", records.len());
    Ok(())
}

/// Whether a DOM `tagName` (upper-cased for HTML elements) names a card
pub fn is_card_element(tag_name: &str, card_tag: &str) -> bool {
    tag_name.eq_ignore_ascii_case(card_tag)
}

/// Surface that keeps the payloads it was handed
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    cards: Vec<Record>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Record] {
        &self.cards
    }
}

impl CardSurface for MemorySurface {
    fn append_card(&mut self, record: &Record) -> Result<()> {
        self.cards.push(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.cards.clear();
        Ok(())
    }

    fn card_count(&self) -> usize {
        self.cards.len()
    }
}
