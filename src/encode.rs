use crate::annotate::Annotator;
use crate::status::WorkflowStatus;

pub const DEFAULT_RENDER_BASE_URL: &str = "https://www.plantuml.com/plantuml/png/";

/// Marker the rendering service uses to recognize a byte-hex payload.
pub const HEX_PAYLOAD_MARKER: &str = "~h";

/// Encodes each byte of `text` as exactly two uppercase hex digits,
/// concatenated in byte order with no separators.
pub fn text_to_hex(text: &str) -> String {
    let mut hex = String::with_capacity(text.len() * 2);
    for byte in text.as_bytes() {
        hex.push_str(&format!("{byte:02X}"));
    }
    hex
}

/// Builds the rendering-service URL for an already annotated diagram.
pub fn render_url(base_url: &str, diagram: &str) -> String {
    format!("{base_url}{HEX_PAYLOAD_MARKER}{}", text_to_hex(diagram))
}

/// Annotates `diagram` with `status` and encodes the result into a URL.
pub fn to_render_url(
    annotator: &Annotator,
    base_url: &str,
    diagram: &str,
    status: &WorkflowStatus,
) -> String {
    render_url(base_url, &annotator.annotate(diagram, status))
}
