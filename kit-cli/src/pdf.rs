//! PDF proposal export.
//!
//! The body is the same summary text sent through the share link, laid out
//! one line per summary line. The builtin Helvetica font only covers
//! Latin-1, so every string goes through [`sanitize_text`] first and
//! characters such as emoji are dropped.

use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use kit_core::QuoteInput;
use printpdf::image_crate::GenericImageView;
use printpdf::{
    Actions, BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, LinkAnnotation,
    Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ExportConfig;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_TOP: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 18.0;
const BANNER_X: f32 = 10.0;
const BANNER_Y: f32 = 8.0;
const BANNER_WIDTH: f32 = 180.0;
const BANNER_DPI: f32 = 300.0;

const BODY_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 6.0;
const BLANK_LINE_HEIGHT: f32 = 3.0;
/// Characters per line at the body size across the printable width.
const WRAP_WIDTH: usize = 88;
/// Average Helvetica glyph width relative to the font size, in mm per pt.
const GLYPH_WIDTH_MM_PER_PT: f32 = 0.19;

pub const LINK_CAPTION: &str = "Clique aqui para ver o modelo online";

static FILENAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("filename pattern is valid"));

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("cannot load banner '{path}': {message}")]
    Banner { path: String, message: String },

    #[error("cannot write proposal '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Drops every character the PDF builtin fonts cannot encode (anything
/// outside Latin-1).
pub fn sanitize_text(text: &str) -> String {
    text.chars().filter(|c| u32::from(*c) <= 0xFF).collect()
}

/// File name for a proposal: `proposta_<customer>.pdf`.
///
/// Spaces become underscores and anything outside `[A-Za-z0-9_]` is removed.
/// When no usable name remains, `default_token` is used instead.
pub fn proposal_filename(
    customer: Option<&str>,
    default_token: &str,
) -> String {
    let base = customer
        .map(|name| {
            let spaced = name.trim().replace(' ', "_");
            FILENAME_DISALLOWED
                .replace_all(&sanitize_text(&spaced), "")
                .into_owned()
        })
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| default_token.to_string());
    format!("proposta_{base}.pdf")
}

/// Splits `text` into lines of at most `width` characters at word
/// boundaries. Words longer than `width` are split hard.
fn wrap_line(
    text: &str,
    width: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Write position inside the document; starts a new page when the bottom
/// margin is reached.
struct PageCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor {
    fn advance(
        &mut self,
        height: f32,
    ) {
        self.y -= height;
        if self.y < MARGIN_BOTTOM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP - height;
        }
    }

    fn text(
        &mut self,
        text: &str,
        size: f32,
        font: &IndirectFontRef,
    ) {
        self.advance(LINE_HEIGHT);
        self.layer.use_text(text, size, Mm(MARGIN_LEFT), Mm(self.y), font);
    }
}

/// Renders proposals using the export settings.
pub struct ProposalExporter<'a> {
    config: &'a ExportConfig,
}

impl<'a> ProposalExporter<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    pub fn filename(
        &self,
        input: &QuoteInput,
    ) -> String {
        proposal_filename(input.customer(), &self.config.default_file_token)
    }

    /// Renders the proposal for `input` with `summary` as its body.
    pub fn render(
        &self,
        input: &QuoteInput,
        summary: &str,
    ) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new("Proposta", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Render(e.to_string()))?;

        let mut cursor = PageCursor {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN_TOP,
        };

        match self.draw_banner(&cursor.layer) {
            Ok(height) => cursor.y = PAGE_HEIGHT - BANNER_Y - height - LINE_HEIGHT,
            Err(err) => {
                if self.config.banner.is_some() {
                    warn!(error = %err, "banner unavailable, using text header");
                }
                cursor.text(&sanitize_text(&self.config.header_title), TITLE_SIZE, &font_bold);
                cursor.advance(LINE_HEIGHT);
            }
        }

        cursor.layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        for line in summary.lines() {
            let clean = sanitize_text(line);
            let clean = clean.trim();
            if clean.is_empty() {
                cursor.advance(BLANK_LINE_HEIGHT);
                continue;
            }
            for wrapped in wrap_line(clean, WRAP_WIDTH) {
                cursor.text(&wrapped, BODY_SIZE, &font);
            }
        }

        if let Some(link) = input.item.online_link.as_deref() {
            cursor.advance(BLANK_LINE_HEIGHT);
            draw_link(&mut cursor, link, &font);
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        cursor
            .doc
            .save(&mut writer)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Render(e.to_string()))
    }

    /// Renders the proposal and writes it into `dir`, returning the path.
    pub fn write_to_dir(
        &self,
        dir: &Path,
        input: &QuoteInput,
        summary: &str,
    ) -> Result<PathBuf, ExportError> {
        let bytes = self.render(input, summary)?;
        let path = dir.join(self.filename(input));
        std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "proposal written");
        Ok(path)
    }

    /// Draws the banner scaled to the banner width and returns its height.
    fn draw_banner(
        &self,
        layer: &PdfLayerReference,
    ) -> Result<f32, ExportError> {
        let path = self.config.banner.as_deref().ok_or_else(|| ExportError::Banner {
            path: String::new(),
            message: "no banner configured".to_string(),
        })?;
        let banner_err = |message: String| ExportError::Banner {
            path: path.display().to_string(),
            message,
        };

        let dynamic = printpdf::image_crate::open(path).map_err(|e| banner_err(e.to_string()))?;
        let (width_px, height_px) = dynamic.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(banner_err("empty image".to_string()));
        }

        let native_width = width_px as f32 / BANNER_DPI * 25.4;
        let native_height = height_px as f32 / BANNER_DPI * 25.4;
        let scale = BANNER_WIDTH / native_width;
        let height = native_height * scale;

        Image::from_dynamic_image(&dynamic).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(BANNER_X)),
                translate_y: Some(Mm(PAGE_HEIGHT - BANNER_Y - height)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(BANNER_DPI),
                ..Default::default()
            },
        );
        Ok(height)
    }
}

/// Blue underlined caption with a URI annotation over it.
fn draw_link(
    cursor: &mut PageCursor,
    link: &str,
    font: &IndirectFontRef,
) {
    cursor.advance(LINE_HEIGHT);
    let blue = Color::Rgb(Rgb::new(0.0, 0.0, 1.0, None));
    let layer = &cursor.layer;
    layer.set_fill_color(blue.clone());
    layer.set_outline_color(blue);
    layer.use_text(LINK_CAPTION, BODY_SIZE, Mm(MARGIN_LEFT), Mm(cursor.y), font);

    let width = LINK_CAPTION.chars().count() as f32 * BODY_SIZE * GLYPH_WIDTH_MM_PER_PT;
    let baseline = cursor.y - 1.0;
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(baseline)), false),
            (Point::new(Mm(MARGIN_LEFT + width), Mm(baseline)), false),
        ],
        is_closed: false,
    });

    layer.add_link_annotation(LinkAnnotation::new(
        Rect::new(
            Mm(MARGIN_LEFT),
            Mm(baseline - 1.0),
            Mm(MARGIN_LEFT + width),
            Mm(cursor.y + LINE_HEIGHT - 2.0),
        ),
        None,
        None,
        Actions::uri(link.to_string()),
        None,
    ));
}
