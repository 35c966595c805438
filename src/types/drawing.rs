//! Drawing types: picture anchors and media payloads.

/// One corner of a cell anchor: a 0-indexed cell plus EMU offsets into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorPoint {
    pub col: u32,
    pub col_off_emu: i64,
    pub row: u32,
    pub row_off_emu: i64,
}

/// A picture anchored in a drawing part.
///
/// `to` is present for twoCellAnchor; oneCellAnchor carries `extent`
/// instead and derives its bottom-right corner from it.
#[derive(Debug, Clone, Default)]
pub struct PictureAnchor {
    pub from: AnchorPoint,
    pub to: Option<AnchorPoint>,
    /// (cx, cy) in EMU from `<xdr:ext>`.
    pub extent: Option<(i64, i64)>,
    /// r:embed relationship id of the image payload.
    pub embed_rid: Option<String>,
}

/// An image read out of xl/media/.
#[derive(Debug, Clone)]
pub struct MediaImage {
    /// Archive path, e.g. "xl/media/image1.png".
    pub path: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl MediaImage {
    /// MIME type from a media filename extension.
    pub fn mime_for_path(path: &str) -> &'static str {
        let ext = path.rsplit('.').next().unwrap_or("");
        match ext.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            "webp" => "image/webp",
            "emf" => "image/emf",
            "wmf" => "image/wmf",
            _ => "application/octet-stream",
        }
    }
}
