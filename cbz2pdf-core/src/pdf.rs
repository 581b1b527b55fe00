use std::{
    fs::File,
    io::{BufWriter, Cursor},
};

use camino::Utf8Path;
use image::{io::Reader as ImageReader, ColorType};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageFilter, ImageTransform, ImageXObject, Mm, PdfDocument,
    PdfDocumentReference, Px,
};
use tracing::debug;

use crate::errors::{Error, Result};

/// Page geometry is expressed in PDF points at this resolution, so one image
/// pixel maps to exactly one page unit.
const PAGE_DPI: f32 = 72.0;

/// The in-progress output document. Pages are append-only and keep the order
/// in which they were added; the document is consumed on save and its
/// resources are released on every exit path.
pub struct DocumentBuilder {
    doc: PdfDocumentReference,
    pages: usize,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            doc: PdfDocument::empty(title),
            pages: 0,
        }
    }

    /// Appends one page sized to the image's pixel dimensions, with the
    /// original jpeg bytes embedded untouched at the page's lower-left corner
    /// at 1:1 scale. Each page gets its own layer, finished before the next
    /// entry is processed.
    ///
    /// ## Errors
    ///
    /// Fails with `Error::Image` naming `entry` if the bytes cannot be
    /// decoded as a raster image
    pub fn append_page(&mut self, entry: &str, bytes: &[u8]) -> Result<()> {
        let decoded = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|err| Error::Image {
                entry: entry.to_owned(),
                source: image::ImageError::IoError(err),
            })?
            .decode()
            .map_err(|err| Error::Image {
                entry: entry.to_owned(),
                source: err,
            })?;

        let width = Px(decoded.width() as usize);
        let height = Px(decoded.height() as usize);

        let (page, layer) = self.doc.add_page(
            Mm::from(width.into_pt(PAGE_DPI)),
            Mm::from(height.into_pt(PAGE_DPI)),
            format!("page {}", self.pages + 1),
        );

        // Luma jpegs carry a single channel; everything else decodes to rgb.
        let color_space = match decoded.color() {
            ColorType::L8 | ColorType::L16 => ColorSpace::Greyscale,
            _ => ColorSpace::Rgb,
        };

        // The decoded raster only provided dimensions and color space; the
        // page content is the source jpeg stream itself, DCT-encoded as-is.
        let image = Image::from(ImageXObject {
            width,
            height,
            color_space,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: bytes.to_vec(),
            image_filter: Some(ImageFilter::DCT),
            clipping_bbox: None,
            smask: None,
        });

        image.add_to_layer(
            self.doc.get_page(page).get_layer(layer),
            ImageTransform {
                dpi: Some(PAGE_DPI),
                ..ImageTransform::default()
            },
        );

        self.pages += 1;
        debug!("`{entry}` added to document");

        Ok(())
    }

    /// Number of pages appended so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Serializes the complete page sequence to `path`. The destination file
    /// is only created here, once every page has been appended.
    ///
    /// ## Errors
    ///
    /// Fails with `Error::Persist` carrying `path` and the underlying cause
    pub fn save(self, path: &Utf8Path) -> Result<()> {
        let file = File::create(path).map_err(|err| Error::Persist {
            path: path.to_owned(),
            source: err.into(),
        })?;

        let mut writer = BufWriter::new(file);

        self.doc.save(&mut writer).map_err(|err| Error::Persist {
            path: path.to_owned(),
            source: err.into(),
        })?;

        writer.into_inner().map_err(|err| Error::Persist {
            path: path.to_owned(),
            source: err.into_error().into(),
        })?;

        Ok(())
    }
}
