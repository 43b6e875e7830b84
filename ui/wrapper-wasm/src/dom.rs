//! DOM element bindings.
//!
//! Every element the page touches is resolved once in `Elements::bind()`;
//! a missing id fails startup instead of failing later on first render.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()?.create_element(tag)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_visible(el: &Element, visible: bool) {
    toggle_class(el, "hidden", !visible);
}

pub fn clear_children(el: &Element) {
    el.set_inner_html("");
}

// ── Elements struct ──

/// One wrap or unwrap form.
#[derive(Clone)]
pub struct FormElements {
    pub form: HtmlFormElement,
    pub title: Element,
    pub amount: HtmlInputElement,
    pub submit: HtmlButtonElement,
    pub input_error: Element,
    pub status: Element,
}

#[derive(Clone)]
pub struct Elements {
    // Header
    pub app_title: Element,
    pub app_description: Element,
    pub connect_button: HtmlButtonElement,

    // Display modes
    pub connect_section: Element,
    pub connect_prompt: Element,
    pub switch_section: Element,
    pub switch_prompt: Element,
    pub switch_button: HtmlButtonElement,
    pub interface_section: Element,

    // Balances
    pub native_balance: Element,
    pub wrapped_balance: Element,

    // Forms
    pub wrap: FormElements,
    pub unwrap: FormElements,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id).ok_or_else(|| {
            JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id))
        })?
    };
}

impl FormElements {
    /// Binds `{prefix}Form`, `{prefix}Title`, `{prefix}Amount`, `{prefix}Submit`,
    /// `{prefix}InputError` and `{prefix}Status`.
    fn bind(prefix: &str) -> Result<Self, JsValue> {
        let id = |suffix: &str| format!("{prefix}{suffix}");
        Ok(Self {
            form: get_typed!(HtmlFormElement, &id("Form")),
            title: get_el!(&id("Title")),
            amount: get_typed!(HtmlInputElement, &id("Amount")),
            submit: get_typed!(HtmlButtonElement, &id("Submit")),
            input_error: get_el!(&id("InputError")),
            status: get_el!(&id("Status")),
        })
    }
}

impl Elements {
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            app_title: get_el!("appTitle"),
            app_description: get_el!("appDescription"),
            connect_button: get_typed!(HtmlButtonElement, "connectButton"),

            connect_section: get_el!("connectSection"),
            connect_prompt: get_el!("connectPrompt"),
            switch_section: get_el!("switchSection"),
            switch_prompt: get_el!("switchPrompt"),
            switch_button: get_typed!(HtmlButtonElement, "switchButton"),
            interface_section: get_el!("interfaceSection"),

            native_balance: get_el!("nativeBalance"),
            wrapped_balance: get_el!("wrappedBalance"),

            wrap: FormElements::bind("wrap")?,
            unwrap: FormElements::bind("unwrap")?,
        })
    }
}
