use floorplan_shared::viewer::Viewer;

/// Data file and floor image, served by the backend from its assets directory.
pub const DATA_PATH: &str = "/static/floor_full_data.json";
pub const FLOOR_IMAGE_PATH: &str = "/static/floor.png";

/// localStorage flag set once the welcome dialog has been dismissed.
pub const WELCOME_SEEN_KEY: &str = "paldiblind_welcome_seen";

/// Build the absolute data file URL from the page origin.
pub fn build_data_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), DATA_PATH)
}

fn origin() -> Result<String, String> {
    web_sys::window()
        .ok_or_else(|| "No window object available".to_string())?
        .location()
        .origin()
        .map_err(|e| format!("{:?}", e))
}

/// Fetch, parse and validate the floor data file.
pub async fn fetch_viewer() -> Result<Viewer, String> {
    let url = build_data_url(&origin()?);
    let resp = reqwest::get(&url).await.map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("Error loading floor_full_data.json ({})", resp.status()));
    }
    let body = resp.text().await.map_err(|e| e.to_string())?;
    Viewer::from_json(&body).map_err(|e| e.to_string())
}

fn is_seen(value: Option<&str>) -> bool {
    value == Some("true")
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Whether the welcome dialog was already dismissed on this browser.
pub fn welcome_seen() -> bool {
    let value = local_storage().and_then(|s| s.get_item(WELCOME_SEEN_KEY).ok().flatten());
    is_seen(value.as_deref())
}

pub fn mark_welcome_seen() {
    if let Some(storage) = local_storage() {
        // Private browsing can reject writes; the dialog just shows again next time.
        let _ = storage.set_item(WELCOME_SEEN_KEY, "true");
    }
}
