//! Сохранение файла через браузер (скрытая ссылка + click)
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Создает Blob из байтов и инициирует скачивание
pub fn download_bytes(bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), String> {
    let blob = create_blob(bytes, mime_type)?;
    download_blob(&blob, filename)
}

fn create_blob(bytes: &[u8], mime_type: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime_type);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    // Добавляем в DOM, кликаем и удаляем
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
