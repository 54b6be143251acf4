//! Browser bindings
//!
//! LocalStorage and the page's `<main>` behind the storage and surface
//! traits, plus the event wiring that drives [`FormController`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DomException, Element, FormData, HtmlFormElement, Storage};

use crate::config::Config;
use crate::controller::FormController;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::render::{CardSurface, is_card_element};
use crate::storage::{KeyValueStore, RecipeStore};

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn storage_error(key: &str, err: JsValue) -> Error {
    match err.dyn_ref::<DomException>() {
        Some(ex) if ex.name() == "QuotaExceededError" => Error::QuotaExceeded {
            key: key.to_string(),
        },
        _ => Error::Storage(js_message(&err)),
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from(js_sys::Error::new(&err.to_string()))
    }
}

/// The window's LocalStorage area
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| Error::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| Error::Storage(js_message(&e)))?
            .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(|e| storage_error(key, e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_error(key, e))
    }

    fn clear(&mut self) -> Result<()> {
        self.storage.clear().map_err(|e| storage_error("*", e))
    }

    fn key_count(&self) -> Result<usize> {
        self.storage
            .length()
            .map(|n| n as usize)
            .map_err(|e| storage_error("*", e))
    }
}

/// A container element that receives one custom element per record
pub struct DomSurface {
    document: Document,
    container: Element,
    tag: String,
}

impl DomSurface {
    pub fn new(document: Document, container: Element, tag: impl Into<String>) -> Self {
        Self {
            document,
            container,
            tag: tag.into(),
        }
    }

    /// Plain JS object with the record's fields in order
    fn payload(record: &Record) -> Result<JsValue> {
        let json = serde_json::to_string(record).map_err(Error::Serialize)?;
        js_sys::JSON::parse(&json).map_err(|e| Error::Render(js_message(&e)))
    }
}

impl CardSurface for DomSurface {
    fn append_card(&mut self, record: &Record) -> Result<()> {
        let card = self
            .document
            .create_element(&self.tag)
            .map_err(|e| Error::Render(js_message(&e)))?;
        // Custom element reads its payload through a `data` setter
        js_sys::Reflect::set(&card, &JsValue::from_str("data"), &Self::payload(record)?)
            .map_err(|e| Error::Render(js_message(&e)))?;
        self.container
            .append_child(&card)
            .map_err(|e| Error::Render(js_message(&e)))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.container.set_inner_html("");
        Ok(())
    }

    fn card_count(&self) -> usize {
        let children = self.container.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|el| is_card_element(&el.tag_name(), &self.tag))
            .count()
    }
}

/// Current form fields as a record. Non-text entries (files) are skipped.
pub fn snapshot_form(form: &HtmlFormElement) -> Result<Record> {
    let data = FormData::new_with_form(form).map_err(|e| Error::Render(js_message(&e)))?;
    let entries = js_sys::try_iter(&data)
        .map_err(|e| Error::Render(js_message(&e)))?
        .ok_or_else(|| Error::Render("FormData is not iterable".to_string()))?;

    let mut record = Record::new();
    for entry in entries {
        let entry: js_sys::Array = entry.map_err(|e| Error::Render(js_message(&e)))?.unchecked_into();
        let name = entry.get(0).as_string().unwrap_or_default();
        match entry.get(1).as_string() {
            Some(value) => record.insert(name, value),
            None => log::warn!("Skipping non-text form field '{}'", name),
        }
    }
    Ok(record)
}

fn query(document: &Document, selector: &str) -> Result<Element> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| Error::MissingElement {
            selector: selector.to_string(),
        })
}

fn page_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

type PageController = FormController<LocalStorage, DomSurface>;

/// Page entry: draw stored recipes and wire the form and clear button
pub fn run() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let (config, ignored) = Config::from_query(&page_query());
    if let Some(level) = config.log_level.to_level() {
        console_log::init_with_level(level).map_err(|e| JsValue::from_str(&e.to_string()))?;
    }

    log::info!("Recipe box starting...");
    for pair in &ignored {
        log::warn!("Ignoring query parameter '{}'", pair);
    }

    let window = web_sys::window().ok_or_else(|| Error::Storage("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::MissingElement {
            selector: "document".to_string(),
        })?;

    let container = query(&document, &config.container_selector)?;
    let form: HtmlFormElement = query(&document, &config.form_selector)?
        .dyn_into()
        .map_err(|_| Error::MissingElement {
            selector: config.form_selector.clone(),
        })?;
    let clear_btn = query(&document, &config.clear_selector)?;

    let store = RecipeStore::with_key(LocalStorage::open()?, config.storage_key.clone());
    let surface = DomSurface::new(document, container, config.card_tag.clone());
    let controller = Rc::new(RefCell::new(FormController::new(
        store,
        surface,
        config.commit_order,
    )));

    controller.borrow_mut().init()?;

    setup_submit_handler(&form, controller.clone())?;
    setup_clear_button(&clear_btn, controller)?;

    log::info!("Recipe box ready ({} order)", config.commit_order.as_str());
    Ok(())
}

fn setup_submit_handler(
    form: &HtmlFormElement,
    controller: Rc<RefCell<PageController>>,
) -> std::result::Result<(), JsValue> {
    let target = form.clone();
    let closure = Closure::<dyn FnMut(_) -> std::result::Result<(), JsValue>>::new(
        move |event: web_sys::Event| {
            event.prevent_default();
            let result = snapshot_form(&target).and_then(|r| controller.borrow_mut().submit(r));
            result.map_err(|e| {
                log::error!("Submit failed: {}", e);
                JsValue::from(e)
            })
        },
    );
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_clear_button(
    button: &Element,
    controller: Rc<RefCell<PageController>>,
) -> std::result::Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(_) -> std::result::Result<(), JsValue>>::new(
        move |_event: web_sys::MouseEvent| {
            controller.borrow_mut().clear().map_err(|e| {
                log::error!("Clear failed: {}", e);
                JsValue::from(e)
            })
        },
    );
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
