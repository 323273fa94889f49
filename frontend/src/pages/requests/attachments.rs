use super::utils::{check_attachment, encode_attachment};
use crate::api::Attachment;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};

/// Reads every selected file. Oversized or unreadable files come back as errors
/// so the rest of the selection still goes through.
pub async fn read_files(list: FileList) -> Vec<Result<Attachment, String>> {
    let mut out = Vec::new();
    for index in 0..list.length() {
        if let Some(file) = list.item(index) {
            out.push(read_file(&file).await);
        }
    }
    out
}

async fn read_file(file: &File) -> Result<Attachment, String> {
    let name = file.name();
    check_attachment(&name, file.size() as u64)?;
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("Could not read {}.", name))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(encode_attachment(&name, &bytes))
}
