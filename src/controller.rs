//! Form controller
//!
//! Two independent transitions driven by the page: submit a record, clear
//! everything. Storage and surface are handed in, so the same logic runs
//! against LocalStorage and the DOM or against in-memory stand-ins.

use crate::config::CommitOrder;
use crate::error::Result;
use crate::record::Record;
use crate::render::{CardSurface, render_all};
use crate::storage::{KeyValueStore, RecipeStore};

pub struct FormController<S, V> {
    store: RecipeStore<S>,
    surface: V,
    order: CommitOrder,
}

impl<S: KeyValueStore, V: CardSurface> FormController<S, V> {
    pub fn new(store: RecipeStore<S>, surface: V, order: CommitOrder) -> Self {
        Self {
            store,
            surface,
            order,
        }
    }

    /// Draw everything already persisted. Returns how many cards were drawn.
    pub fn init(&mut self) -> Result<usize> {
        let records = self.store.load()?;
        render_all(&records, &mut self.surface)?;
        log::info!("Loaded {} recipes from '{}'", records.len(), self.store.key());
        Ok(records.len())
    }

    /// Add a submitted record to storage and to the surface
    pub fn submit(&mut self, record: Record) -> Result<()> {
        match self.order {
            CommitOrder::SaveThenRender => {
                let total = self.store.append(record.clone())?;
                self.surface.append_card(&record)?;
                log::info!("Recipe added ({} stored)", total);
            }
            CommitOrder::RenderThenSave => {
                self.surface.append_card(&record)?;
                let total = self.store.append(record)?;
                log::info!("Recipe added ({} stored)", total);
            }
        }
        Ok(())
    }

    /// Wipe storage, then the surface
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        self.surface.clear()?;
        log::info!("All recipes cleared");
        Ok(())
    }

    pub fn store(&self) -> &RecipeStore<S> {
        &self.store
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn commit_order(&self) -> CommitOrder {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::render::MemorySurface;
    use crate::storage::{MemoryStore, STORAGE_KEY};
    use proptest::prelude::*;

    fn controller(order: CommitOrder) -> FormController<MemoryStore, MemorySurface> {
        FormController::new(RecipeStore::new(MemoryStore::new()), MemorySurface::new(), order)
    }

    fn pasta() -> Record {
        Record::new().with("title", "Pasta").with("minutes", "20")
    }

    #[test]
    fn test_init_renders_stored() {
        let mut store = RecipeStore::new(MemoryStore::new());
        store.save(&[pasta(), pasta()]).unwrap();
        let mut c = FormController::new(store, MemorySurface::new(), CommitOrder::default());
        assert_eq!(c.init().unwrap(), 2);
        assert_eq!(c.surface().cards(), &[pasta(), pasta()]);
    }

    #[test]
    fn test_init_empty_storage() {
        let mut c = controller(CommitOrder::default());
        assert_eq!(c.init().unwrap(), 0);
        assert_eq!(c.surface().card_count(), 0);
    }

    #[test]
    fn test_init_corrupt_aborts() {
        let mut backend = MemoryStore::new();
        backend.set_item(STORAGE_KEY, "[{").unwrap();
        let mut c = FormController::new(
            RecipeStore::new(backend),
            MemorySurface::new(),
            CommitOrder::default(),
        );
        assert!(matches!(c.init(), Err(Error::Corrupt { .. })));
        assert_eq!(c.surface().card_count(), 0);
    }

    #[test]
    fn test_submit_appends_card_and_record() {
        for order in [CommitOrder::SaveThenRender, CommitOrder::RenderThenSave] {
            let mut c = controller(order);
            let prior = Record::new().with("title", "Soup");
            c.submit(prior.clone()).unwrap();
            c.submit(pasta()).unwrap();
            assert_eq!(c.surface().cards().last(), Some(&pasta()));
            assert_eq!(c.surface().card_count(), 2);
            assert_eq!(c.store().load().unwrap(), vec![prior, pasta()]);
        }
    }

    #[test]
    fn test_clear_empties_both() {
        let mut c = controller(CommitOrder::default());
        c.submit(pasta()).unwrap();
        c.clear().unwrap();
        assert!(c.store().load().unwrap().is_empty());
        assert_eq!(c.surface().card_count(), 0);
    }

    #[test]
    fn test_save_first_skips_card_on_quota() {
        let mut c = FormController::new(
            RecipeStore::new(MemoryStore::with_quota(16)),
            MemorySurface::new(),
            CommitOrder::SaveThenRender,
        );
        assert!(matches!(c.submit(pasta()), Err(Error::QuotaExceeded { .. })));
        assert_eq!(c.surface().card_count(), 0);
        assert!(c.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_render_first_diverges_on_quota() {
        let mut c = FormController::new(
            RecipeStore::new(MemoryStore::with_quota(16)),
            MemorySurface::new(),
            CommitOrder::RenderThenSave,
        );
        assert!(c.submit(pasta()).is_err());
        assert_eq!(c.surface().card_count(), 1);
        assert!(c.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_controller_usable_after_failure() {
        let mut backend = MemoryStore::new();
        backend.set_item(STORAGE_KEY, "garbage").unwrap();
        let mut c = FormController::new(
            RecipeStore::new(backend),
            MemorySurface::new(),
            CommitOrder::default(),
        );
        assert!(c.submit(pasta()).is_err());
        c.clear().unwrap();
        c.submit(pasta()).unwrap();
        assert_eq!(c.store().load().unwrap(), vec![pasta()]);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

        #[test]
        fn submissions_keep_order(titles in prop::collection::vec("[a-z]{1,10}", 0..12)) {
            let mut c = controller(CommitOrder::default());
            let records: Vec<Record> = titles
                .iter()
                .map(|t| Record::new().with("title", t.as_str()))
                .collect();
            for record in &records {
                c.submit(record.clone()).unwrap();
            }
            prop_assert_eq!(c.store().load().unwrap(), records.clone());
            prop_assert_eq!(c.surface().cards(), records.as_slice());
        }
    }
}
