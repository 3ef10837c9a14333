use starfield_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(1.0)
}

/// Look up the mount element and size it to fill the browser viewport.
pub fn mount_element(document: &web::Document, element_id: &str) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", element_id))?;
    let el: web::HtmlElement = el
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not an HTML element: {:?}", element_id, e)))?;
    let style = el.style();
    style
        .set_property("width", "100vw")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    style
        .set_property("height", "100vh")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(el)
}

/// Current CSS size of the mount element.
pub fn measure(el: &web::HtmlElement) -> Result<Viewport, starfield_core::StarfieldError> {
    let rect = el.get_bounding_client_rect();
    Viewport::new(rect.width() as f32, rect.height() as f32)
}

/// Create the drawing canvas as the last child of `mount`, stretched to its size.
pub fn append_canvas(
    document: &web::Document,
    mount: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let style = canvas.style();
    for (k, v) in [("display", "block"), ("width", "100%"), ("height", "100%")] {
        style
            .set_property(k, v)
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    }
    mount
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

/// Match the canvas backing store to the swapchain size in physical pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, (w_px, h_px): (u32, u32)) {
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}
