use anyhow::anyhow;
use wasm_bindgen::JsValue;
use waves_core::WavesConfig;

/// Read the JS option object (`undefined`/`null` means all defaults). The
/// object goes through `JSON.stringify` so the browser and the native host
/// share `WavesConfig::from_json`.
pub fn parse_options(options: &JsValue) -> anyhow::Result<WavesConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(WavesConfig::default());
    }
    let json = js_sys::JSON::stringify(options)
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| anyhow!("options must be a plain object"))?;
    Ok(WavesConfig::from_json(&json)?)
}
