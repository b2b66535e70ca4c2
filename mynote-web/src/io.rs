//! Browser-based file I/O using Web APIs

use wasm_bindgen::prelude::*;
use web_sys::{Blob, Event, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

/// How a picked file should be handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAs {
    Text,
    DataUrl,
}

/// Download JSON as a file
pub fn download_json(filename: &str, json: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    // Create a blob from the JSON content
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(json));

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type("application/json");

    let blob = Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)?;

    // Create an object URL for the blob
    let url = Url::create_object_url_with_blob(&blob)?;

    // Create a temporary anchor element and trigger download
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    // Clean up the object URL
    Url::revoke_object_url(&url)?;

    Ok(())
}

/// Open the browser's file picker and read the chosen file.
///
/// `on_loaded` runs once, after the read completes. Cancelling the picker or
/// a failed read means it never runs.
pub fn pick_file<F>(accept: &str, read_as: ReadAs, on_loaded: F) -> Result<(), JsValue>
where
    F: FnOnce(String) + 'static,
{
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_accept(accept);

    let picker = input.clone();
    let onchange = Closure::once_into_js(move |_event: Event| {
        if let Err(e) = read_selected(&picker, read_as, on_loaded) {
            web_sys::console::error_1(&e);
        }
    });
    input.set_onchange(Some(onchange.unchecked_ref()));
    input.click();

    Ok(())
}

fn read_selected<F>(input: &HtmlInputElement, read_as: ReadAs, on_loaded: F) -> Result<(), JsValue>
where
    F: FnOnce(String) + 'static,
{
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };

    let reader = FileReader::new()?;
    let source = reader.clone();
    let onload = Closure::once_into_js(move |_event: Event| {
        match source.result().ok().and_then(|value| value.as_string()) {
            Some(content) => on_loaded(content),
            None => web_sys::console::error_1(&"File reader returned no text".into()),
        }
    });
    reader.set_onload(Some(onload.unchecked_ref()));

    match read_as {
        ReadAs::Text => reader.read_as_text(&file)?,
        ReadAs::DataUrl => reader.read_as_data_url(&file)?,
    }

    Ok(())
}
