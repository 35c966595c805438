//! Style types: raw stylesheet records and the resolved per-cell style.

/// A color reference as it appears in styles.xml, before resolution.
#[derive(Debug, Clone, Default)]
pub struct ColorSpec {
    pub rgb: Option<String>,
    pub theme: Option<u32>,
    pub tint: Option<f64>,
    pub indexed: Option<u32>,
    pub auto: bool,
}

/// Border line styles from ECMA-376 Section 18.18.3.
///
/// `none` never reaches this enum; an absent edge is simply `None` in the
/// surrounding `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Hair,
    Dotted,
    DashDotDot,
    DashDot,
    Dashed,
    Thin,
    MediumDashDotDot,
    SlantDashDot,
    MediumDashDot,
    MediumDashed,
    Medium,
    Thick,
    Double,
}

impl BorderKind {
    /// Map a `style` attribute value to a kind. "none" and unknown values
    /// yield `None`.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "hair" => Some(Self::Hair),
            "dotted" => Some(Self::Dotted),
            "dashDotDot" => Some(Self::DashDotDot),
            "dashDot" => Some(Self::DashDot),
            "dashed" => Some(Self::Dashed),
            "thin" => Some(Self::Thin),
            "mediumDashDotDot" => Some(Self::MediumDashDotDot),
            "slantDashDot" => Some(Self::SlantDashDot),
            "mediumDashDot" => Some(Self::MediumDashDot),
            "mediumDashed" => Some(Self::MediumDashed),
            "medium" => Some(Self::Medium),
            "thick" => Some(Self::Thick),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    /// XSL-FO `border-*-style` value for this line style.
    pub const fn fo_style(self) -> &'static str {
        match self {
            Self::Hair | Self::Dotted => "dotted",
            Self::DashDotDot
            | Self::DashDot
            | Self::Dashed
            | Self::MediumDashDotDot
            | Self::SlantDashDot
            | Self::MediumDashDot
            | Self::MediumDashed => "dashed",
            Self::Thin | Self::Medium | Self::Thick => "solid",
            Self::Double => "double",
        }
    }

    /// XSL-FO `border-*-width` value for this line style.
    pub const fn fo_width(self) -> &'static str {
        match self {
            Self::Hair => "0.12mm",
            Self::Dotted | Self::DashDotDot | Self::DashDot | Self::Dashed | Self::Thin => "thin",
            Self::MediumDashDotDot
            | Self::SlantDashDot
            | Self::MediumDashDot
            | Self::MediumDashed
            | Self::Medium => "medium",
            Self::Thick => "thick",
            Self::Double => "1.2mm",
        }
    }
}

/// Horizontal alignment from a cellXf `<alignment horizontal=..>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

impl HAlign {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" | "centerContinuous" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub const fn fo_value(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical alignment from a cellXf `<alignment vertical=..>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

impl VAlign {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// XSL-FO `display-align` value.
    pub const fn fo_value(self) -> &'static str {
        match self {
            Self::Top => "before",
            Self::Center => "center",
            Self::Bottom => "after",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RawFont {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub color: Option<ColorSpec>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Default, Clone)]
pub struct RawFill {
    pub fg_color: Option<ColorSpec>,
    pub pattern_type: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct RawBorder {
    pub left: Option<RawBorderSide>,
    pub right: Option<RawBorderSide>,
    pub top: Option<RawBorderSide>,
    pub bottom: Option<RawBorderSide>,
}

#[derive(Debug, Clone)]
pub struct RawBorderSide {
    pub kind: BorderKind,
    pub color: Option<ColorSpec>,
}

#[derive(Debug, Default, Clone)]
pub struct RawAlignment {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
}

/// Cell format (xf) record from cellXfs.
#[derive(Debug, Default, Clone)]
pub struct CellXf {
    pub font_id: Option<u32>,
    pub fill_id: Option<u32>,
    pub border_id: Option<u32>,
    pub num_fmt_id: Option<u32>,
    pub alignment: Option<RawAlignment>,
}

/// Everything parsed out of styles.xml, before color resolution.
#[derive(Debug, Default, Clone)]
pub struct StyleSheet {
    pub fonts: Vec<RawFont>,
    pub fills: Vec<RawFill>,
    pub borders: Vec<RawBorder>,
    pub cell_xfs: Vec<CellXf>,
    /// (numFmtId, formatCode) pairs for custom formats.
    pub num_fmts: Vec<(u32, String)>,
    /// `<colors><indexedColors>` palette override, when present.
    pub indexed_colors: Option<Vec<String>>,
}

impl StyleSheet {
    /// The workbook default font (fonts[0]). Drives the column-width
    /// heuristic and the page-sequence font.
    pub fn default_font(&self) -> Option<&RawFont> {
        self.fonts.first()
    }

    /// Look up a format code by numFmtId: custom formats first, then the
    /// builtin table.
    pub fn format_code(&self, num_fmt_id: u32) -> Option<&str> {
        self.num_fmts
            .iter()
            .find(|(id, _)| *id == num_fmt_id)
            .map(|(_, code)| code.as_str())
            .or_else(|| crate::numfmt::get_builtin_format(num_fmt_id))
    }
}

/// A fully resolved border edge.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderEdge {
    pub kind: BorderKind,
    pub color: Option<String>,
}

/// A fully resolved font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size_pt: f64,
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// One entry of the resolved style table, indexed by cellXf id.
///
/// Colors are already `#RRGGBB`; border kinds carry their FO mapping.
/// `font` is `None` for cells on the workbook default font, which emits no
/// font attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub font: Option<FontSpec>,
    pub bg_color: Option<String>,
    pub align_h: Option<HAlign>,
    pub align_v: Option<VAlign>,
    pub border_top: Option<BorderEdge>,
    pub border_left: Option<BorderEdge>,
    pub border_bottom: Option<BorderEdge>,
    pub border_right: Option<BorderEdge>,
    /// Number format code; `None` means General.
    pub num_fmt: Option<String>,
}
